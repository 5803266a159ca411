//! Error types for the `chaintable` crate

use std::io;

/// Errors that can occur while constructing or bulk-loading a table
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// A table needs at least one bucket for `key % capacity` to be defined.
  #[error("a table must have at least one bucket")]
  ZeroCapacity,

  /// A strict bulk load reached the end of its input early.
  #[error("expected {expected} records but the input ended after {read}")]
  Truncated {
    expected: usize,
    read: usize,
  },

  /// A record could not be parsed.
  #[error("malformed record {record}: {reason}")]
  Malformed {
    /// One-based index of the record within the load.
    record: usize,
    reason: String,
  },

  /// Failed to read from the input stream.
  #[error("failed to read records: {0}")]
  Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
