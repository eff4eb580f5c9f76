//! Header-driven mapping from CSV records to [`Passenger`] values.
//!
//! Pipeline:
//!   header record
//!     └─ Columns::from_header()  → column positions by name
//!   data record
//!     └─ Columns::passenger()    → typed fields, coerced one by one
//!          └─ Passenger::validate() → value constraints

use manifest_core::passenger::Passenger;

use crate::{
  error::{Error, Result},
  reader::Record,
};

// ─── Column names ────────────────────────────────────────────────────────────

pub const PASSENGER_ID: &str = "PassengerId";
pub const SURVIVED: &str = "Survived";
pub const PCLASS: &str = "Pclass";
pub const NAME: &str = "Name";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const SIBSP: &str = "SibSp";
pub const PARCH: &str = "Parch";
pub const TICKET: &str = "Ticket";
pub const FARE: &str = "Fare";
pub const CABIN: &str = "Cabin";
pub const EMBARKED: &str = "Embarked";

/// Cell spellings that mean "no value" in an optional column.
const MISSING: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

// ─── Column positions ────────────────────────────────────────────────────────

/// Positions of the known columns within a record. Optional columns may be
/// absent from the header entirely.
pub(crate) struct Columns {
  width:            usize,
  id:               usize,
  survived:         usize,
  passenger_class:  usize,
  name:             usize,
  sex:              usize,
  age:              Option<usize>,
  siblings_spouses: usize,
  parents_children: usize,
  ticket:           usize,
  fare:             usize,
  cabin:            Option<usize>,
  embarked:         Option<usize>,
}

impl Columns {
  pub fn from_header(header: &Record) -> Result<Self> {
    let find = |name: &str| header.fields.iter().position(|h| h.trim() == name);
    let require = |name: &'static str| find(name).ok_or(Error::MissingColumn(name));

    Ok(Self {
      width:            header.fields.len(),
      id:               require(PASSENGER_ID)?,
      survived:         require(SURVIVED)?,
      passenger_class:  require(PCLASS)?,
      name:             require(NAME)?,
      sex:              require(SEX)?,
      age:              find(AGE),
      siblings_spouses: require(SIBSP)?,
      parents_children: require(PARCH)?,
      ticket:           require(TICKET)?,
      fare:             require(FARE)?,
      cabin:            find(CABIN),
      embarked:         find(EMBARKED),
    })
  }

  /// Build one passenger from a data record.
  pub fn passenger(&self, record: &Record) -> Result<Passenger> {
    if record.fields.len() != self.width {
      return Err(Error::RaggedRow {
        line:     record.line,
        expected: self.width,
        found:    record.fields.len(),
      });
    }

    let cell = Cell { record };
    let passenger = Passenger {
      id:               cell.int(self.id, PASSENGER_ID)?,
      survived:         cell.int(self.survived, SURVIVED)?,
      passenger_class:  cell.int(self.passenger_class, PCLASS)?,
      name:             cell.text(self.name, NAME)?,
      sex:              cell.text(self.sex, SEX)?,
      age:              cell.opt_float(self.age, AGE)?,
      siblings_spouses: cell.int(self.siblings_spouses, SIBSP)?,
      parents_children: cell.int(self.parents_children, PARCH)?,
      ticket:           cell.text(self.ticket, TICKET)?,
      fare:             cell.float(self.fare, FARE)?,
      cabin:            cell.opt_text(self.cabin),
      embarked:         cell.opt_text(self.embarked),
    };

    passenger
      .validate()
      .map_err(|source| Error::Invalid { line: record.line, source })?;
    Ok(passenger)
  }
}

// ─── Cell coercion ───────────────────────────────────────────────────────────

struct Cell<'r> {
  record: &'r Record,
}

impl Cell<'_> {
  fn raw(&self, idx: usize) -> &str { &self.record.fields[idx] }

  fn required(&self, idx: usize, field: &'static str) -> Result<&str> {
    let raw = self.raw(idx);
    if raw.trim().is_empty() {
      return Err(Error::EmptyField { line: self.record.line, field });
    }
    Ok(raw)
  }

  fn invalid(&self, field: &'static str, value: &str, reason: String) -> Error {
    Error::InvalidField {
      line: self.record.line,
      field,
      value: value.to_owned(),
      reason,
    }
  }

  fn text(&self, idx: usize, field: &'static str) -> Result<String> {
    Ok(self.required(idx, field)?.to_owned())
  }

  /// Integers may also be written as an integral float (`3.0`).
  fn int(&self, idx: usize, field: &'static str) -> Result<i64> {
    let raw = self.required(idx, field)?.trim();
    if let Ok(n) = raw.parse::<i64>() {
      return Ok(n);
    }
    match raw.parse::<f64>() {
      Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
        Ok(f as i64)
      }
      Ok(_) => Err(self.invalid(field, raw, "not an integer".into())),
      Err(e) => Err(self.invalid(field, raw, e.to_string())),
    }
  }

  fn float(&self, idx: usize, field: &'static str) -> Result<f64> {
    let raw = self.required(idx, field)?.trim();
    raw
      .parse::<f64>()
      .map_err(|e| self.invalid(field, raw, e.to_string()))
  }

  fn opt_float(&self, idx: Option<usize>, field: &'static str) -> Result<Option<f64>> {
    let Some(idx) = idx else { return Ok(None) };
    let raw = self.raw(idx).trim();
    if MISSING.contains(&raw) {
      return Ok(None);
    }
    raw
      .parse::<f64>()
      .map(Some)
      .map_err(|e| self.invalid(field, raw, e.to_string()))
  }

  fn opt_text(&self, idx: Option<usize>) -> Option<String> {
    let raw = self.raw(idx?);
    if MISSING.contains(&raw.trim()) { None } else { Some(raw.to_owned()) }
  }
}
