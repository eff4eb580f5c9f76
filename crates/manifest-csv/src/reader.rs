//! RFC 4180 record splitter.
//!
//! Handles double-quoted fields (with `""` escapes and embedded commas or
//! line breaks), CRLF and LF line endings and a leading UTF-8 BOM. Blank and
//! whitespace-only lines are skipped. Text after a closing quote is kept literally rather
//! than rejected, as spreadsheet exports occasionally produce it.

use crate::error::{Error, Result};

/// One CSV record and the line it starts on.
#[derive(Debug, PartialEq)]
pub(crate) struct Record {
  pub line:   usize,
  pub fields: Vec<String>,
}

impl Record {
  /// An unquoted line holding nothing but whitespace.
  fn is_blank(&self) -> bool {
    self.fields.len() == 1 && self.fields[0].trim().is_empty()
  }
}

/// Split `input` into records.
pub(crate) fn records(input: &str) -> Result<Vec<Record>> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut out       = Vec::new();
  let mut fields    = Vec::new();
  let mut field     = String::new();
  let mut quoted    = false;
  let mut in_quotes = false;
  let mut line      = 1usize;
  let mut start     = 1usize;

  let mut chars = input.chars().peekable();
  while let Some(c) = chars.next() {
    if in_quotes {
      match c {
        '"' if chars.peek() == Some(&'"') => {
          chars.next();
          field.push('"');
        }
        '"' => in_quotes = false,
        '\n' => {
          line += 1;
          field.push('\n');
        }
        _ => field.push(c),
      }
      continue;
    }

    match c {
      '"' if field.is_empty() && !quoted => {
        in_quotes = true;
        quoted = true;
      }
      ',' => {
        fields.push(std::mem::take(&mut field));
        quoted = false;
      }
      '\r' | '\n' => {
        if c == '\r' && chars.peek() == Some(&'\n') {
          chars.next();
        }
        fields.push(std::mem::take(&mut field));
        let record = Record { line: start, fields: std::mem::take(&mut fields) };
        if quoted || !record.is_blank() {
          out.push(record);
        }
        quoted = false;
        line += 1;
        start = line;
      }
      _ => field.push(c),
    }
  }

  if in_quotes {
    return Err(Error::UnterminatedQuote { line: start });
  }
  if quoted || !field.is_empty() || !fields.is_empty() {
    fields.push(field);
    let record = Record { line: start, fields };
    if quoted || !record.is_blank() {
      out.push(record);
    }
  }

  Ok(out)
}
