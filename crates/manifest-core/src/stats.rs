//! Survival statistics: overall totals plus per-class and per-sex breakdowns.
//!
//! Backends supply raw grouped counts; [`StatsReport::from_counts`] owns the
//! ordering, the exclusion of unknown categories and the zero-total guard so
//! every backend reports identically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::passenger::{Passenger, PassengerClass, Sex};

/// `survived / total`, or `0.0` when `total` is zero.
pub fn survival_rate(survived: u64, total: u64) -> f64 {
  if total == 0 { 0.0 } else { survived as f64 / total as f64 }
}

// ─── Report types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalStats {
  pub passengers: u64,
  pub survivors:  u64,
  pub rate:       f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
  /// Class number (1, 2 or 3).
  pub class:    i64,
  pub total:    u64,
  pub survived: u64,
  pub rate:     f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderStats {
  pub gender:   Sex,
  pub total:    u64,
  pub survived: u64,
  pub rate:     f64,
}

/// The full statistics payload returned by `GET /passengers/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
  pub total:     TotalStats,
  /// Always three entries, ordered 1, 2, 3.
  pub by_class:  Vec<ClassStats>,
  /// Always two entries, ordered male, female.
  pub by_gender: Vec<GenderStats>,
}

/// `(total, survived)` for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCount {
  pub total:    u64,
  pub survived: u64,
}

impl GroupCount {
  fn add(&mut self, survived: bool) {
    self.total += 1;
    self.survived += u64::from(survived);
  }
}

impl StatsReport {
  /// Assemble a report from grouped counts.
  ///
  /// `by_class` is keyed by the raw `Pclass` value and `by_sex` by the raw
  /// `Sex` value; keys outside the known categories are ignored and missing
  /// categories report zero.
  pub fn from_counts(
    overall: GroupCount,
    by_class: &HashMap<i64, GroupCount>,
    by_sex: &HashMap<String, GroupCount>,
  ) -> Self {
    let by_class = PassengerClass::iter()
      .map(|class| {
        let c = by_class.get(&class.number()).copied().unwrap_or_default();
        ClassStats {
          class:    class.number(),
          total:    c.total,
          survived: c.survived,
          rate:     survival_rate(c.survived, c.total),
        }
      })
      .collect();

    let by_gender = Sex::iter()
      .map(|sex| {
        let c = by_sex.get(sex.as_str()).copied().unwrap_or_default();
        GenderStats {
          gender:   sex,
          total:    c.total,
          survived: c.survived,
          rate:     survival_rate(c.survived, c.total),
        }
      })
      .collect();

    Self {
      total: TotalStats {
        passengers: overall.total,
        survivors:  overall.survived,
        rate:       survival_rate(overall.survived, overall.total),
      },
      by_class,
      by_gender,
    }
  }

  /// Compute a report directly from records held in memory.
  pub fn from_passengers(passengers: &[Passenger]) -> Self {
    let mut overall = GroupCount::default();
    let mut by_class: HashMap<i64, GroupCount> = HashMap::new();
    let mut by_sex: HashMap<String, GroupCount> = HashMap::new();

    for p in passengers {
      let survived = p.has_survived();
      overall.add(survived);
      if let Some(class) = p.class() {
        by_class.entry(class.number()).or_default().add(survived);
      }
      if let Some(sex) = p.known_sex() {
        by_sex.entry(sex.as_str().to_owned()).or_default().add(survived);
      }
    }

    Self::from_counts(overall, &by_class, &by_sex)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::passenger::tests::passenger;

  #[test]
  fn rate_guards_division_by_zero() {
    assert_eq!(survival_rate(0, 0), 0.0);
    assert_eq!(survival_rate(1, 4), 0.25);
  }

  #[test]
  fn empty_input_reports_zeroes_in_fixed_order() {
    let report = StatsReport::from_passengers(&[]);
    assert_eq!(report.total.passengers, 0);
    assert_eq!(report.total.rate, 0.0);

    let classes: Vec<i64> = report.by_class.iter().map(|c| c.class).collect();
    assert_eq!(classes, [1, 2, 3]);
    assert!(report.by_class.iter().all(|c| c.total == 0 && c.rate == 0.0));

    let genders: Vec<Sex> = report.by_gender.iter().map(|g| g.gender).collect();
    assert_eq!(genders, [Sex::Male, Sex::Female]);
  }

  #[test]
  fn three_passenger_example() {
    let report = StatsReport::from_passengers(&[
      passenger(1, 1, 1, "female", Some(38.0)),
      passenger(2, 2, 0, "male", Some(35.0)),
      passenger(3, 3, 1, "male", None),
    ]);

    assert_eq!(report.total.passengers, 3);
    assert_eq!(report.total.survivors, 2);
    assert!((report.total.rate - 2.0 / 3.0).abs() < 1e-9);

    let expected = [(1, 1, 1, 1.0), (2, 1, 0, 0.0), (3, 1, 1, 1.0)];
    for (stats, (class, total, survived, rate)) in
      report.by_class.iter().zip(expected)
    {
      assert_eq!(stats.class, class);
      assert_eq!(stats.total, total);
      assert_eq!(stats.survived, survived);
      assert_eq!(stats.rate, rate);
    }

    let male = &report.by_gender[0];
    assert_eq!((male.total, male.survived), (2, 1));
    assert_eq!(male.rate, 0.5);
    let female = &report.by_gender[1];
    assert_eq!((female.total, female.survived), (1, 1));
  }

  #[test]
  fn unknown_categories_are_excluded_from_breakdowns() {
    let report = StatsReport::from_passengers(&[
      passenger(1, 1, 1, "female", None),
      passenger(2, 4, 1, "unknown", None),
    ]);

    assert_eq!(report.total.passengers, 2);
    assert_eq!(report.total.survivors, 2);
    let class_total: u64 = report.by_class.iter().map(|c| c.total).sum();
    assert_eq!(class_total, 1);
    let gender_total: u64 = report.by_gender.iter().map(|g| g.total).sum();
    assert_eq!(gender_total, 1);
  }

  #[test]
  fn breakdown_survivors_sum_to_overall() {
    let people: Vec<Passenger> = (0..30)
      .map(|i| {
        let sex = if i % 3 == 0 { "female" } else { "male" };
        passenger(i, i % 3 + 1, i % 2, sex, None)
      })
      .collect();
    let report = StatsReport::from_passengers(&people);

    let by_class: u64 = report.by_class.iter().map(|c| c.survived).sum();
    let by_gender: u64 = report.by_gender.iter().map(|g| g.survived).sum();
    assert_eq!(by_class, report.total.survivors);
    assert_eq!(by_gender, report.total.survivors);
    for c in &report.by_class {
      assert!(c.survived <= c.total);
      assert_eq!(c.rate, survival_rate(c.survived, c.total));
    }
  }

  #[test]
  fn serialises_to_dashboard_shape() {
    let json =
      serde_json::to_value(StatsReport::from_passengers(&[])).unwrap();
    assert_eq!(json["total"]["passengers"], 0);
    assert_eq!(json["by_class"][0]["class"], 1);
    assert_eq!(json["by_gender"][1]["gender"], "female");
  }
}
