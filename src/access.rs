//! Entry access accounting
//!
//! A `BucketTable` reports every read or write of an entry's key or data
//! to an `AccessCounter`. The default `NoCount` discards the reports; an
//! `AccessCount` keeps a running total that can be shared with the caller,
//! which is how the complexity checks in `harness` measure how many
//! entries an operation had to look at.

use std::cell::Cell;
use std::rc::Rc;

/// Receives one notification per entry field touch.
pub trait AccessCounter {
  /// Records a single read or write of an entry's key or data.
  fn touch(&self);
}

/// An `AccessCounter` that ignores every touch.
#[derive(Debug)]
#[derive(Copy)]
#[derive(Clone)]
#[derive(Default)]
pub struct NoCount;

impl AccessCounter for NoCount {
  #[inline]
  fn touch(&self) {}
}

/// A shared running total of entry touches.
///
/// Clones share the same total, so a caller can keep one handle and hand
/// another to a table.
#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
pub struct AccessCount {
  count: Rc<Cell<usize>>,
}

impl AccessCount {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of touches recorded so far.
  pub fn get(&self) -> usize {
    self.count.get()
  }

  pub fn reset(&self) {
    self.count.set(0);
  }
}

impl AccessCounter for AccessCount {
  fn touch(&self) {
    self.count.set(self.count.get() + 1);
  }
}
