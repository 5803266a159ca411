//! A fixed-capacity separate-chaining hash table
//!
//! `BucketTable` maps `u32` keys to string data through a fixed number of
//! buckets. It supports insert-or-update, lookup, swap-with-last removal,
//! a sorted dump of every entry, and bulk loading from a stream of
//! `<key> <data>` records. An `AccessCounter` can be attached to a table to
//! count how many entry fields each operation touched, which `harness`
//! uses to check the O(1) and O(n log n) bounds without a clock.

#[macro_use]
extern crate log;
extern crate env_logger;
extern crate thiserror;
#[cfg(test)]
extern crate rand;

pub mod access;
pub mod entry;
pub mod error;
pub mod harness;
pub mod load;
pub mod logger;
pub mod table;

pub use access::{AccessCount, AccessCounter, NoCount};
pub use entry::Entry;
pub use error::{Error, Result};
pub use table::{BucketTable, DEFAULT_CAPACITY};


///////////////////////////////////////////////////////////////////////////////
//// Utilities
///////////////////////////////////////////////////////////////////////////////




///////////////////////////////////////////////////////////////////////////////
//// Table Tests
///////////////////////////////////////////////////////////////////////////////



///////////////////////////////////////////////////////////////////////////////
//// Complexity Tests
///////////////////////////////////////////////////////////////////////////////



///////////////////////////////////////////////////////////////////////////////
//// Harness Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod harness_tests {
  use std::io::Cursor;
  use super::harness::*;
  use super::logger;
  use super::utilities::*;

  fn run_scenario(n: u32, text: &str) -> (bool, String) {
    logger::initialize_logger();
    let scenario = Scenario::from_number(n).expect("valid scenario number");
    let mut input = Cursor::new(text.as_bytes().to_vec());
    let mut out = Vec::new();
    let passed = scenario.run(&mut input, &mut out).unwrap();
    (passed, String::from_utf8(out).unwrap())
  }

  fn full_input() -> String {
    records_text(&gen_records(SIZE_SMALL + SIZE_LARGE + 100))
  }

  #[test]
  fn scenario_numbers() {
    assert_eq!(Scenario::from_number(1), Some(Scenario::Basic));
    assert_eq!(Scenario::from_number(6), Some(Scenario::OutputTime));
    assert_eq!(Scenario::from_number(0), None);
    assert_eq!(Scenario::from_number(7), None);
  }

  #[test]
  fn basic_scenario_passes() {
    let (passed, out) = run_scenario(1, &full_input());
    assert!(passed, "{}", out);
    assert!(out.ends_with("All tests passed.\n"));
  }

  #[test]
  fn basic_scenario_fails_on_empty_input() {
    let (passed, out) = run_scenario(1, "");
    assert!(!passed);
    assert!(out.contains("input holds no records"));
  }

  #[test]
  fn remove_scenario_passes() {
    let (passed, out) = run_scenario(2, &full_input());
    assert!(passed, "{}", out);
  }

  #[test]
  fn output_scenario_passes() {
    let (passed, out) = run_scenario(3, &full_input());
    assert!(passed, "{}", out);
    assert!(out.ends_with("Test passed.\n"));
  }

  #[test]
  fn output_scenario_handles_short_input() {
    let text = "100001 Abbott\n100002 Avocado\n6083 Santa Barbara, California\n";
    let (passed, out) = run_scenario(3, text);
    assert!(passed, "{}", out);
  }

  #[test]
  fn get_time_scenario_passes() {
    let (passed, out) = run_scenario(4, &full_input());
    assert!(passed, "{}", out);
  }

  #[test]
  fn remove_time_scenario_passes() {
    let (passed, out) = run_scenario(5, &full_input());
    assert!(passed, "{}", out);
  }

  #[test]
  fn output_time_scenario_passes() {
    let (passed, out) = run_scenario(6, &full_input());
    assert!(passed, "{}", out);
  }

  #[test]
  fn malformed_input_is_reported() {
    logger::initialize_logger();
    let mut input = Cursor::new(b"1 one\nbad key\n".to_vec());
    let mut out = Vec::new();
    assert!(Scenario::Output.run(&mut input, &mut out).is_err());
  }
}
