//! [`PassengerFilter`]: optional typed predicates combined with AND.

use crate::passenger::Passenger;

/// Parameters for [`crate::store::PassengerStore::filter`].
///
/// Every field is independent; unset fields do not constrain the result. A
/// passenger with no recorded age never matches an age bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassengerFilter {
  pub survived:        Option<i64>,
  pub passenger_class: Option<i64>,
  pub sex:             Option<String>,
  /// Inclusive lower bound on age.
  pub min_age:         Option<f64>,
  /// Inclusive upper bound on age.
  pub max_age:         Option<f64>,
  pub embarked:        Option<String>,
}

impl PassengerFilter {
  /// `true` when no predicate is set.
  pub fn is_empty(&self) -> bool {
    self.survived.is_none()
      && self.passenger_class.is_none()
      && self.sex.is_none()
      && self.min_age.is_none()
      && self.max_age.is_none()
      && self.embarked.is_none()
  }

  /// Evaluate the filter against a single passenger.
  pub fn matches(&self, p: &Passenger) -> bool {
    if self.survived.is_some_and(|v| p.survived != v) {
      return false;
    }
    if self.passenger_class.is_some_and(|v| p.passenger_class != v) {
      return false;
    }
    if self.sex.as_deref().is_some_and(|v| p.sex != v) {
      return false;
    }
    if let Some(min) = self.min_age
      && !p.age.is_some_and(|age| age >= min)
    {
      return false;
    }
    if let Some(max) = self.max_age
      && !p.age.is_some_and(|age| age <= max)
    {
      return false;
    }
    if let Some(port) = self.embarked.as_deref()
      && p.embarked.as_deref() != Some(port)
    {
      return false;
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::passenger::tests::passenger;

  #[test]
  fn empty_filter_matches_everything() {
    let f = PassengerFilter::default();
    assert!(f.is_empty());
    assert!(f.matches(&passenger(1, 3, 0, "male", None)));
  }

  #[test]
  fn any_field_makes_filter_non_empty() {
    let f = PassengerFilter { max_age: Some(10.0), ..Default::default() };
    assert!(!f.is_empty());
  }

  #[test]
  fn exact_match_fields() {
    let p = passenger(1, 2, 1, "female", Some(30.0));

    let f = PassengerFilter { survived: Some(1), ..Default::default() };
    assert!(f.matches(&p));
    let f = PassengerFilter { survived: Some(0), ..Default::default() };
    assert!(!f.matches(&p));

    let f = PassengerFilter { passenger_class: Some(2), ..Default::default() };
    assert!(f.matches(&p));
    let f = PassengerFilter { sex: Some("male".into()), ..Default::default() };
    assert!(!f.matches(&p));

    let f = PassengerFilter { embarked: Some("S".into()), ..Default::default() };
    assert!(f.matches(&p));
    let f = PassengerFilter { embarked: Some("C".into()), ..Default::default() };
    assert!(!f.matches(&p));
  }

  #[test]
  fn age_bounds_are_inclusive() {
    let p = passenger(1, 3, 0, "male", Some(18.0));
    let f = PassengerFilter {
      min_age: Some(18.0),
      max_age: Some(18.0),
      ..Default::default()
    };
    assert!(f.matches(&p));

    let f = PassengerFilter { min_age: Some(18.5), ..Default::default() };
    assert!(!f.matches(&p));
  }

  #[test]
  fn missing_age_never_matches_age_bounds() {
    let p = passenger(1, 3, 0, "male", None);
    let f = PassengerFilter { min_age: Some(0.0), ..Default::default() };
    assert!(!f.matches(&p));
    let f = PassengerFilter { max_age: Some(200.0), ..Default::default() };
    assert!(!f.matches(&p));
  }

  #[test]
  fn missing_port_never_matches_embarked() {
    let mut p = passenger(1, 3, 0, "male", None);
    p.embarked = None;
    let f = PassengerFilter { embarked: Some("S".into()), ..Default::default() };
    assert!(!f.matches(&p));
  }

  #[test]
  fn predicates_combine_with_and() {
    let people = [
      passenger(1, 1, 1, "female", Some(30.0)),
      passenger(2, 1, 0, "male", Some(40.0)),
      passenger(3, 3, 1, "male", Some(4.0)),
      passenger(4, 3, 0, "female", None),
    ];

    let survived = PassengerFilter { survived: Some(1), ..Default::default() };
    let first = PassengerFilter { passenger_class: Some(1), ..Default::default() };
    let both = PassengerFilter {
      survived: Some(1),
      passenger_class: Some(1),
      ..Default::default()
    };

    let ids = |f: &PassengerFilter| -> Vec<i64> {
      people.iter().filter(|p| f.matches(p)).map(|p| p.id).collect()
    };

    let intersection: Vec<i64> = ids(&survived)
      .into_iter()
      .filter(|id| ids(&first).contains(id))
      .collect();
    assert_eq!(ids(&both), intersection);
    assert_eq!(ids(&both), [1]);
  }
}
