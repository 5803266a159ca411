//! Bulk-load record parsing
//!
//! A record is a decimal key, then the first whitespace-delimited token of
//! the data, then the rest of that line verbatim:
//!
//! ```text
//! 6083 Santa Barbara, California
//! 100001 Abbott
//! ```
//!
//! The data is the first token joined directly to the remainder, so the
//! spacing inside the data is kept exactly as written. Blank lines between
//! records are skipped, and the data may start on the line after its key.

use std::io::BufRead;
use crate::error::{Error, Result};
use crate::entry::Entry;

/// Reads `Entry` records from a line-oriented stream.
///
/// Only whole lines are consumed, so a stream can be handed to several
/// readers in turn and each picks up where the last one stopped.
pub struct Records<R> {
  input: R,
  line: String,
  record: usize,
}

impl<R> Records<R>
where R: BufRead {
  pub fn new(input: R) -> Self {
    Self {
      input: input,
      line: String::new(),
      record: 0,
    }
  }

  /// Number of records started so far, including a malformed one.
  pub fn records_read(&self) -> usize {
    self.record
  }

  pub fn into_inner(self) -> R {
    self.input
  }

  /// Reads the next record, or `None` once the input is exhausted.
  pub fn read_record(&mut self) -> Result<Option<Entry>> {
    if !self.next_nonblank_line()? {
      return Ok(None);
    }
    self.record += 1;
    let record = self.record;

    let text = strip_terminator(&self.line).trim_start();
    let split = text.find(char::is_whitespace).unwrap_or(text.len());
    let (token, rest) = text.split_at(split);
    let key: u32 = token.parse().map_err(|e| {
      Error::Malformed {
        record: record,
        reason: format!("invalid key {:?}: {}", token, e),
      }
    })?;

    let mut data = rest.trim_start().to_string();
    if data.is_empty() {
      if !self.next_nonblank_line()? {
        return Err(Error::Malformed {
          record: record,
          reason: format!("key {} has no data", key),
        });
      }
      data = strip_terminator(&self.line).trim_start().to_string();
    }

    trace!("record {}: {} -> {:?}", record, key, data);
    Ok(Some(Entry::new(key, data)))
  }

  fn next_nonblank_line(&mut self) -> Result<bool> {
    loop {
      self.line.clear();
      if self.input.read_line(&mut self.line)? == 0 {
        return Ok(false);
      }
      if !self.line.trim().is_empty() {
        return Ok(true);
      }
    }
  }
}

impl<R> Iterator for Records<R>
where R: BufRead {
  type Item = Result<Entry>;

  fn next(&mut self) -> Option<Self::Item> {
    self.read_record().transpose()
  }
}

/// Reads at most `limit` records from the input.
pub fn read_records<R: BufRead>(input: R, limit: usize) -> Result<Vec<Entry>> {
  Records::new(input).take(limit).collect()
}

fn strip_terminator(line: &str) -> &str {
  let line = line.strip_suffix('\n').unwrap_or(line);
  line.strip_suffix('\r').unwrap_or(line)
}
