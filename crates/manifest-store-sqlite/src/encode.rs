//! Conversions between [`Passenger`] / [`PassengerFilter`] and SQL.
//!
//! Column order in [`COLUMNS`] is the order [`passenger_from_row`] reads and
//! [`passenger_params`] binds.

use manifest_core::{filter::PassengerFilter, passenger::Passenger};
use rusqlite::types::Value;

// ─── Passenger rows ──────────────────────────────────────────────────────────

pub const COLUMNS: &str = "passenger_id, survived, pclass, name, sex, age, \
                           sibsp, parch, ticket, fare, cabin, embarked";

pub const INSERT: &str = "INSERT INTO passengers (
   passenger_id, survived, pclass, name, sex, age,
   sibsp, parch, ticket, fare, cabin, embarked
 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

pub fn passenger_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Passenger> {
  Ok(Passenger {
    id:               row.get(0)?,
    survived:         row.get(1)?,
    passenger_class:  row.get(2)?,
    name:             row.get(3)?,
    sex:              row.get(4)?,
    age:              row.get(5)?,
    siblings_spouses: row.get(6)?,
    parents_children: row.get(7)?,
    ticket:           row.get(8)?,
    fare:             row.get(9)?,
    cabin:            row.get(10)?,
    embarked:         row.get(11)?,
  })
}

pub fn passenger_params(p: &Passenger) -> [&dyn rusqlite::ToSql; 12] {
  [
    &p.id,
    &p.survived,
    &p.passenger_class,
    &p.name,
    &p.sex,
    &p.age,
    &p.siblings_spouses,
    &p.parents_children,
    &p.ticket,
    &p.fare,
    &p.cabin,
    &p.embarked,
  ]
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Render `filter` as a `WHERE` clause (empty when the filter is empty) and
/// the positional parameters it binds.
pub fn filter_clause(filter: &PassengerFilter) -> (String, Vec<Value>) {
  let mut conds: Vec<&'static str> = Vec::new();
  let mut params: Vec<Value> = Vec::new();

  if let Some(v) = filter.survived {
    conds.push("survived = ?");
    params.push(Value::Integer(v));
  }
  if let Some(v) = filter.passenger_class {
    conds.push("pclass = ?");
    params.push(Value::Integer(v));
  }
  if let Some(v) = &filter.sex {
    conds.push("sex = ?");
    params.push(Value::Text(v.clone()));
  }
  // NULL ages compare as NULL and so never satisfy either bound.
  if let Some(v) = filter.min_age {
    conds.push("age >= ?");
    params.push(Value::Real(v));
  }
  if let Some(v) = filter.max_age {
    conds.push("age <= ?");
    params.push(Value::Real(v));
  }
  if let Some(v) = &filter.embarked {
    conds.push("embarked = ?");
    params.push(Value::Text(v.clone()));
  }

  let clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  (clause, params)
}
