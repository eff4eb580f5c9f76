//! The passenger record: one row of the manifest dataset.
//!
//! Records are created only by a full import and are never updated in place.
//! Categorical columns (`Pclass`, `Sex`, `Embarked`) are stored as the raw
//! values found in the source file; [`PassengerClass`] and [`Sex`] name the
//! values the statistics breakdown knows about.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Categories ──────────────────────────────────────────────────────────────

/// Ticket class, in breakdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PassengerClass {
  First  = 1,
  Second = 2,
  Third  = 3,
}

impl PassengerClass {
  /// The integer stored in the `Pclass` column.
  pub fn number(self) -> i64 { self as i64 }

  pub fn from_number(n: i64) -> Option<Self> {
    match n {
      1 => Some(Self::First),
      2 => Some(Self::Second),
      3 => Some(Self::Third),
      _ => None,
    }
  }
}

/// Passenger sex as recorded in the `Sex` column, in breakdown order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr,
  Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
  Male,
  Female,
}

impl Sex {
  /// The value stored in the `Sex` column.
  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Passenger ───────────────────────────────────────────────────────────────

/// A single passenger. `id` comes from the source file and is never
/// reassigned by the store.
///
/// Serialises with the dataset's column names (`PassengerId`, `Pclass`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
  #[serde(rename = "PassengerId")]
  pub id:               i64,
  #[serde(rename = "Survived")]
  pub survived:         i64,
  #[serde(rename = "Pclass")]
  pub passenger_class:  i64,
  #[serde(rename = "Name")]
  pub name:             String,
  #[serde(rename = "Sex")]
  pub sex:              String,
  #[serde(rename = "Age")]
  pub age:              Option<f64>,
  #[serde(rename = "SibSp")]
  pub siblings_spouses: i64,
  #[serde(rename = "Parch")]
  pub parents_children: i64,
  #[serde(rename = "Ticket")]
  pub ticket:           String,
  #[serde(rename = "Fare")]
  pub fare:             f64,
  #[serde(rename = "Cabin")]
  pub cabin:            Option<String>,
  #[serde(rename = "Embarked")]
  pub embarked:         Option<String>,
}

impl Passenger {
  /// Check the value constraints that typing alone cannot express.
  ///
  /// Counts, age and fare must be non-negative; floats must be finite.
  pub fn validate(&self) -> Result<()> {
    if let Some(age) = self.age {
      non_negative_float("Age", age)?;
    }
    non_negative_float("Fare", self.fare)?;
    non_negative_int("SibSp", self.siblings_spouses)?;
    non_negative_int("Parch", self.parents_children)?;
    Ok(())
  }

  pub fn has_survived(&self) -> bool { self.survived == 1 }

  /// The known class, or `None` for a value outside {1, 2, 3}.
  pub fn class(&self) -> Option<PassengerClass> {
    PassengerClass::from_number(self.passenger_class)
  }

  /// The known sex, or `None` for a value outside {"male", "female"}.
  pub fn known_sex(&self) -> Option<Sex> { self.sex.parse().ok() }
}

fn non_negative_float(field: &'static str, value: f64) -> Result<()> {
  if !value.is_finite() {
    return Err(Error::InvalidField {
      field,
      reason: format!("{value} is not a finite number"),
    });
  }
  if value < 0.0 {
    return Err(Error::InvalidField {
      field,
      reason: format!("{value} is negative"),
    });
  }
  Ok(())
}

fn non_negative_int(field: &'static str, value: i64) -> Result<()> {
  if value < 0 {
    return Err(Error::InvalidField {
      field,
      reason: format!("{value} is negative"),
    });
  }
  Ok(())
}
