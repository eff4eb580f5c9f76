//! Error types for the manifest-csv codec.
//!
//! Every variant describes malformed input; callers treat them all as
//! invalid data. Line numbers are 1-based and refer to the line on which the
//! offending record starts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("input is not valid UTF-8: {0}")]
  Encoding(#[from] std::str::Utf8Error),

  #[error("input has no header row")]
  MissingHeader,

  #[error("header is missing required column {0:?}")]
  MissingColumn(&'static str),

  #[error("line {line}: unterminated quoted field")]
  UnterminatedQuote { line: usize },

  #[error("line {line}: expected {expected} fields, found {found}")]
  RaggedRow {
    line:     usize,
    expected: usize,
    found:    usize,
  },

  #[error("line {line}: required field {field} is empty")]
  EmptyField { line: usize, field: &'static str },

  #[error("line {line}: {field} has invalid value {value:?}: {reason}")]
  InvalidField {
    line:   usize,
    field:  &'static str,
    value:  String,
    reason: String,
  },

  #[error("line {line}: {source}")]
  Invalid {
    line:   usize,
    #[source]
    source: manifest_core::Error,
  },
}

impl Error {
  /// The source line the error refers to, if any.
  pub fn line(&self) -> Option<usize> {
    match self {
      Self::Encoding(_) | Self::MissingHeader | Self::MissingColumn(_) => None,
      Self::UnterminatedQuote { line }
      | Self::RaggedRow { line, .. }
      | Self::EmptyField { line, .. }
      | Self::InvalidField { line, .. }
      | Self::Invalid { line, .. } => Some(*line),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
