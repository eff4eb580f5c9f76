//! CSV codec for the passenger manifest.
//!
//! Converts the Titanic-style CSV layout into [`Passenger`] records. Pure
//! synchronous; no file, HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```
//! let csv = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
//!            1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n";
//! let passengers = manifest_csv::parse(csv).unwrap();
//! assert_eq!(passengers[0].name, "Braund, Mr. Owen Harris");
//! assert_eq!(passengers[0].cabin, None);
//! ```

pub mod error;
mod reader;
mod row;

pub use error::{Error, Result};
use manifest_core::passenger::Passenger;
pub use row::{
  AGE, CABIN, EMBARKED, FARE, NAME, PARCH, PASSENGER_ID, PCLASS, SEX, SIBSP,
  SURVIVED, TICKET,
};

/// Parse a whole CSV document.
///
/// The first record is the header; columns are matched by name. Fails on the
/// first malformed record; no partial result is returned.
pub fn parse(input: &str) -> Result<Vec<Passenger>> {
  let records = reader::records(input)?;
  let (header, rows) = records.split_first().ok_or(Error::MissingHeader)?;
  let columns = row::Columns::from_header(header)?;

  rows.iter().map(|r| columns.passenger(r)).collect()
}

/// Parse raw file contents, which must be UTF-8.
pub fn parse_bytes(input: &[u8]) -> Result<Vec<Passenger>> {
  parse(std::str::from_utf8(input)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &str =
    "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

  fn doc(rows: &[&str]) -> String {
    let mut s = String::from(HEADER);
    for r in rows {
      s.push('\n');
      s.push_str(r);
    }
    s.push('\n');
    s
  }

  #[test]
  fn parses_titanic_rows() {
    let input = doc(&[
      "1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S",
      "2,1,1,\"Cumings, Mrs. John Bradley (Florence Briggs Thayer)\",female,38,1,0,PC 17599,71.2833,C85,C",
      "6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q",
    ]);
    let ps = parse(&input).unwrap();
    assert_eq!(ps.len(), 3);

    let cumings = &ps[1];
    assert_eq!(cumings.id, 2);
    assert_eq!(cumings.survived, 1);
    assert_eq!(cumings.passenger_class, 1);
    assert_eq!(cumings.sex, "female");
    assert_eq!(cumings.age, Some(38.0));
    assert_eq!(cumings.siblings_spouses, 1);
    assert_eq!(cumings.ticket, "PC 17599");
    assert_eq!(cumings.fare, 71.2833);
    assert_eq!(cumings.cabin.as_deref(), Some("C85"));
    assert_eq!(cumings.embarked.as_deref(), Some("C"));

    let moran = &ps[2];
    assert_eq!(moran.id, 6);
    assert_eq!(moran.age, None);
    assert_eq!(moran.cabin, None);
  }

  #[test]
  fn source_ids_are_preserved() {
    let ps = parse(&doc(&[
      "892,0,3,Kelly,male,34.5,0,0,330911,7.8292,,Q",
      "17,1,2,Wirz,female,,0,0,315154,8.6625,,S",
    ]))
    .unwrap();
    let ids: Vec<i64> = ps.iter().map(|p| p.id).collect();
    assert_eq!(ids, [892, 17]);
  }

  #[test]
  fn header_only_yields_no_passengers() {
    assert!(parse(HEADER).unwrap().is_empty());
  }

  #[test]
  fn whitespace_only_lines_are_skipped() {
    let input = format!("{}   \n\t\n", doc(&["1,0,3,A,male,22,0,0,T,7.25,,S"]));
    let ps = parse(&input).unwrap();
    assert_eq!(ps.len(), 1);
    assert_eq!(ps[0].id, 1);
  }

  #[test]
  fn empty_input_has_no_header() {
    assert!(matches!(parse("").unwrap_err(), Error::MissingHeader));
  }

  #[test]
  fn columns_are_matched_by_name() {
    let input = "Name,Fare,Ticket,Parch,SibSp,Sex,Pclass,Survived,PassengerId,Extra\n\
                 Kelly,7.5,T1,0,0,male,3,0,5,ignored\n";
    let ps = parse(input).unwrap();
    assert_eq!(ps[0].id, 5);
    assert_eq!(ps[0].name, "Kelly");
    assert_eq!(ps[0].fare, 7.5);
    // optional columns absent from the header entirely
    assert_eq!(ps[0].age, None);
    assert_eq!(ps[0].embarked, None);
  }

  #[test]
  fn missing_required_column() {
    let input = "PassengerId,Survived,Pclass,Name,Sex,SibSp,Parch,Ticket\n";
    assert!(matches!(
      parse(input).unwrap_err(),
      Error::MissingColumn("Fare")
    ));
  }

  #[test]
  fn integral_floats_coerce_to_integers() {
    let ps = parse(&doc(&["3.0,1.0,2,A,female,4,1.0,2,T,10,,S"])).unwrap();
    assert_eq!(ps[0].id, 3);
    assert_eq!(ps[0].survived, 1);
    assert_eq!(ps[0].siblings_spouses, 1);
  }

  #[test]
  fn na_spellings_are_missing_optionals() {
    let ps = parse(&doc(&["1,0,3,A,male,NaN,0,0,T,7.25,NA,"])).unwrap();
    assert_eq!(ps[0].age, None);
    assert_eq!(ps[0].cabin, None);
    assert_eq!(ps[0].embarked, None);
  }

  #[test]
  fn unparseable_integer_is_invalid() {
    let err = parse(&doc(&[
      "1,0,3,A,male,22,0,0,T,7.25,,S",
      "2,yes,3,B,male,22,0,0,T,7.25,,S",
    ]))
    .unwrap_err();
    match err {
      Error::InvalidField { line, field, value, .. } => {
        assert_eq!(line, 3);
        assert_eq!(field, SURVIVED);
        assert_eq!(value, "yes");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn fractional_integer_is_invalid() {
    let err = parse(&doc(&["1,0,2.5,A,male,22,0,0,T,7.25,,S"])).unwrap_err();
    assert!(matches!(err, Error::InvalidField { field: PCLASS, .. }));
  }

  #[test]
  fn unparseable_age_is_invalid() {
    let err = parse(&doc(&["1,0,3,A,male,old,0,0,T,7.25,,S"])).unwrap_err();
    assert!(matches!(err, Error::InvalidField { field: AGE, .. }));
  }

  #[test]
  fn empty_required_field_is_invalid() {
    let err = parse(&doc(&["1,0,3,A,male,22,0,0,T,,,S"])).unwrap_err();
    assert!(matches!(err, Error::EmptyField { line: 2, field: FARE }));
  }

  #[test]
  fn negative_age_fails_validation() {
    let err = parse(&doc(&["1,0,3,A,male,-4,0,0,T,7.25,,S"])).unwrap_err();
    assert!(matches!(
      err,
      Error::Invalid {
        line: 2,
        source: manifest_core::Error::InvalidField { field: "Age", .. },
      }
    ));
  }

  #[test]
  fn bytes_must_be_utf8() {
    let mut input = doc(&["1,0,3,A,male,22,0,0,T,7.25,,S"]).into_bytes();
    assert_eq!(parse_bytes(&input).unwrap().len(), 1);

    input.extend_from_slice(b"2,0,3,\xff,male,22,0,0,T,7.25,,S\n");
    assert!(matches!(parse_bytes(&input).unwrap_err(), Error::Encoding(_)));
  }

  #[test]
  fn ragged_row_is_invalid() {
    let err = parse(&doc(&["1,0,3,A,male,22,0,0,T,7.25,S"])).unwrap_err();
    assert!(matches!(
      err,
      Error::RaggedRow { line: 2, expected: 12, found: 11 }
    ));
    assert_eq!(err.line(), Some(2));
  }
}
