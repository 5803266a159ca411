//! Correctness and complexity scenarios
//!
//! Each scenario takes a rewindable stream of records, builds tables from
//! it, and writes a running report to `out`. The correctness scenarios
//! check put/get, remove and the sorted dump against the records
//! themselves. The timing scenarios do not use a clock: they attach an
//! `AccessCount` to a small and a large table loaded back to back from the
//! same stream and compare how many entry touches each needed.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Seek, SeekFrom, Write};
use crate::access::AccessCount;
use crate::entry::Entry;
use crate::error::Result;
use crate::load::read_records;
use crate::table::BucketTable;

/// Records loaded into the small table of a timing scenario.
pub const SIZE_SMALL: usize = 128;

/// Records loaded into the large table of a timing scenario.
pub const SIZE_LARGE: usize = 2048;

/// Records loaded for the sorted output check.
pub const OUTPUT_SIZE: usize = 1000;

/// Records loaded for the remove check.
pub const REMOVE_SIZE: usize = 100;

/// Largest allowed large/small ratio of average touches per call.
pub const TOO_SLOW_FOR_O1: f64 = 1.5;

/// Largest allowed large/small ratio of touches for the sorted dump.
pub const TOO_SLOW_FOR_NLOGN: f64 = 1000.0;

/// A numbered test scenario.
#[derive(Debug)]
#[derive(Copy)]
#[derive(Clone)]
#[derive(PartialEq)]
#[derive(Eq)]
pub enum Scenario {
  Basic,
  Remove,
  Output,
  GetTime,
  RemoveTime,
  OutputTime,
}

impl Scenario {
  /// Maps the scenario numbers 1 to 6 onto scenarios.
  pub fn from_number(n: u32) -> Option<Self> {
    match n {
      1 => Some(Scenario::Basic),
      2 => Some(Scenario::Remove),
      3 => Some(Scenario::Output),
      4 => Some(Scenario::GetTime),
      5 => Some(Scenario::RemoveTime),
      6 => Some(Scenario::OutputTime),
      _ => None,
    }
  }

  /// Runs the scenario. Returns whether every check passed.
  pub fn run<R, W>(self, input: &mut R, out: &mut W) -> Result<bool>
  where R: BufRead + Seek, W: Write {
    debug!("running scenario {:?}", self);
    match self {
      Scenario::Basic => basic_correct(input, out),
      Scenario::Remove => remove_correct(input, out),
      Scenario::Output => output_correct(input, out),
      Scenario::GetTime => {
        if !basic_correct(input, &mut io::sink())? {
          writeln!(out, "no get time test: incorrect basic tests.")?;
          return Ok(false);
        }
        let (small, large) = load_pair(input)?;
        get_time(small, large, out)
      }
      Scenario::RemoveTime => {
        if !remove_correct(input, &mut io::sink())? {
          writeln!(out, "no remove time test: incorrect remove.")?;
          return Ok(false);
        }
        let (small, large) = load_pair(input)?;
        remove_time(small, large, out)
      }
      Scenario::OutputTime => {
        if !output_correct(input, &mut io::sink())? {
          writeln!(out, "no output time test: incorrect output.")?;
          return Ok(false);
        }
        let (small, large) = load_pair(input)?;
        output_time(small, large, out)
      }
    }
  }
}

fn rewind<R: Seek>(input: &mut R) -> Result<()> {
  input.seek(SeekFrom::Start(0))?;
  Ok(())
}

fn fail<W: Write>(out: &mut W, msg: &str) -> Result<bool> {
  writeln!(out, "ERROR: {}", msg)?;
  writeln!(out, "Test failed.")?;
  Ok(false)
}

/// Reads `limit` records from the start of the input, keeping the last
/// data seen for a repeated key.
fn expected<R>(input: &mut R, limit: usize) -> Result<BTreeMap<u32, String>>
where R: BufRead + Seek {
  rewind(input)?;
  let mut map = BTreeMap::new();
  for e in read_records(&mut *input, limit)? {
    map.insert(e.get_key(), e.into_data());
  }
  rewind(input)?;
  Ok(map)
}

/// Put and get on a default table, then a bulk load of the whole input.
pub fn basic_correct<R, W>(input: &mut R, out: &mut W) -> Result<bool>
where R: BufRead + Seek, W: Write {
  writeln!(out, "\nTesting constructors, put and get.\n")?;

  writeln!(out, "Construct an empty table.")?;
  let mut t1: BucketTable = BucketTable::default();

  writeln!(out, "  Put some key+data pairs in the table.")?;
  let keys = [67453294, 13413, 12351235, 3463246, 457, 234, 141, 64631];
  let data = ["apple", "as", "dfs", "fshfd", "aser", "ffsdfh", "asdf", "hsd"];
  for (k, d) in keys.iter().zip(data.iter()) {
    t1.put(*k, *d);
  }

  writeln!(out, "  Verify get(key) returns correct data.")?;
  for (k, d) in keys.iter().zip(data.iter()) {
    if t1.get(*k).as_ref().map(String::as_str) != Some(*d) {
      return fail(out, &format!("mismatched data for key {}", k));
    }
  }
  if let Some(s) = t1.get(7) {
    return fail(out, &format!("get returned {:?} for missing key", s));
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "  Now put some Entry objects in the table.")?;
  t1.put_entry(Entry::new(134513, "hairy ape"));
  t1.put_entry(Entry::new(3213, "iguana"));
  t1.put_entry(Entry::new(1658142, "jack rabbit"));
  writeln!(out, "  Verify get(key) returns correct data again.")?;
  if t1.get(1658142).as_ref().map(String::as_str) != Some("jack rabbit") {
    return fail(out, "mismatched data for key 1658142");
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "  Now update data for existing entries with put.")?;
  t1.put(234, "shaved ape");
  if t1.get(234).as_ref().map(String::as_str) != Some("shaved ape") {
    return fail(out, "put(key, data) did not update entry");
  }
  t1.put_entry(Entry::new(3213, "mamba"));
  if t1.get(3213).as_ref().map(String::as_str) != Some("mamba") {
    return fail(out, "put(Entry) did not update entry");
  }
  if t1.len() != keys.len() + 3 {
    return fail(out, "updates added duplicate entries");
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "Construct large table from input stream.")?;
  let want = expected(input, usize::MAX)?;
  let count = read_records(&mut *input, usize::MAX)?.len();
  rewind(input)?;
  if count == 0 {
    return fail(out, "input holds no records");
  }
  let t2 = BucketTable::from_reader(count, input)?;
  writeln!(out, "  Verify successful get for every entry.")?;
  for (k, d) in &want {
    if t2.get(*k).as_ref() != Some(d) {
      return fail(out, &format!("mismatched data for key {}", k));
    }
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "All tests passed.")?;
  Ok(true)
}

/// Removes present, missing and already removed keys.
pub fn remove_correct<R, W>(input: &mut R, out: &mut W) -> Result<bool>
where R: BufRead + Seek, W: Write {
  writeln!(out, "\nTesting remove.\n")?;

  let want = expected(input, REMOVE_SIZE)?;
  writeln!(out, "Construct table from input stream.")?;
  let mut t = BucketTable::from_reader(REMOVE_SIZE, input)?;

  writeln!(out, "  Verify returns false for non-existing key.")?;
  let missing = (0u32..).find(|k| !want.contains_key(k)).unwrap_or(0);
  if t.remove(missing) {
    return fail(out, "returned true for missing key");
  }
  writeln!(out, "    Okay.")?;

  let step = (want.len() / 4).max(1);
  let picked: Vec<u32> = want.keys().cloned().step_by(step).take(4).collect();
  if picked.is_empty() {
    return fail(out, "input holds no records");
  }

  writeln!(out, "  Verify true for selected entries.")?;
  for k in &picked {
    if !t.remove(*k) {
      return fail(out, "returned false for existing key");
    }
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "  Now verify false for removed entries.")?;
  for k in &picked {
    if t.remove(*k) || t.remove(*k) {
      return fail(out, "true for remove same key twice");
    }
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "  Use get to verify removed entries gone.")?;
  for k in &picked {
    if t.get(*k).is_some() {
      return fail(out, "get finds removed entries");
    }
  }
  if t.len() != want.len() - picked.len() {
    return fail(out, "remove dropped the wrong number of entries");
  }
  writeln!(out, "    Okay.")?;

  writeln!(out, "All tests passed.")?;
  Ok(true)
}

/// Compares the sorted dump with the sorted input records.
pub fn output_correct<R, W>(input: &mut R, out: &mut W) -> Result<bool>
where R: BufRead + Seek, W: Write {
  writeln!(out, "\nTesting sorted output.\n")?;

  let want = expected(input, OUTPUT_SIZE)?;
  writeln!(out, "Construct table from input stream.")?;
  let t = BucketTable::from_reader(OUTPUT_SIZE, input)?;

  writeln!(out, "   Output table to stream.")?;
  let mut results = Vec::new();
  t.write_sorted(&mut results)?;
  let results = String::from_utf8_lossy(&results);
  let mut lines = results.lines();

  writeln!(out, "   Compare output to correct results.")?;
  for (k, d) in &want {
    let correct = format!("{}: {}", k, d);
    let line = lines.next().unwrap_or("");
    if line != correct {
      writeln!(out, "ERROR: mismatch at {:?}", line)?;
      return Ok(false);
    }
  }
  if let Some(extra) = lines.next() {
    writeln!(out, "ERROR: unexpected line {:?}", extra)?;
    return Ok(false);
  }

  writeln!(out, "Test passed.")?;
  Ok(true)
}

/// Loads the small and then the large table from the start of the input.
fn load_pair<R>(input: &mut R) -> Result<(BucketTable, BucketTable)>
where R: BufRead + Seek {
  rewind(input)?;
  let small = BucketTable::from_reader(SIZE_SMALL, input)?;
  let large = BucketTable::from_reader(SIZE_LARGE, input)?;
  Ok((small, large))
}

fn keys_of(t: &BucketTable) -> Vec<u32> {
  t.sorted().iter().map(Entry::get_key).collect()
}

/// Average touches per call of `op` over every key of the table.
fn per_call<F>(t: BucketTable, mut op: F) -> (f64, usize, usize)
where F: FnMut(&mut BucketTable<AccessCount>, u32) -> bool {
  let keys = keys_of(&t);
  let count = AccessCount::new();
  let mut t = t.counted_by(count.clone());

  let mut hits = 0;
  for k in &keys {
    if op(&mut t, *k) {
      hits += 1;
    }
  }

  let avg = if keys.is_empty() {
    0.0
  } else {
    count.get() as f64 / keys.len() as f64
  };
  trace!("{} calls, {} hits, {} touches", keys.len(), hits, count.get());
  (avg, hits, keys.len())
}

fn report_o1<W: Write>(out: &mut W, small: f64, large: f64) -> Result<bool> {
  let ratio = if small > 0.0 { large / small } else { 0.0 };
  writeln!(out, "  Average touches per call: small {:.3}, large {:.3}, ratio {:.3}",
           small, large, ratio)?;

  if small < 1.0 || large < 1.0 {
    writeln!(out, "Did not touch Entry objects.")?;
    writeln!(out, "Test failed.")?;
    Ok(false)
  } else if ratio > TOO_SLOW_FOR_O1 {
    writeln!(out, "Too many Entry accesses for O(1).")?;
    writeln!(out, "Test failed.")?;
    Ok(false)
  } else {
    writeln!(out, "Test passed.")?;
    Ok(true)
  }
}

fn get_time<W: Write>(small: BucketTable, large: BucketTable, out: &mut W) -> Result<bool> {
  writeln!(out, "Testing speed of function get.")?;

  let (avg_small, hits_small, n_small) = per_call(small, |t, k| t.get(k).is_some());
  let (avg_large, hits_large, n_large) = per_call(large, |t, k| t.get(k).is_some());
  if hits_small != n_small || hits_large != n_large {
    return fail(out, "get missed an entry in the table");
  }

  report_o1(out, avg_small, avg_large)
}

fn remove_time<W: Write>(small: BucketTable, large: BucketTable, out: &mut W) -> Result<bool> {
  writeln!(out, "Test speed of function remove.")?;

  let (avg_small, hits_small, n_small) = per_call(small, |t, k| t.remove(k));
  let (avg_large, hits_large, n_large) = per_call(large, |t, k| t.remove(k));
  if hits_small != n_small || hits_large != n_large {
    return fail(out, "Returned false for item in table.");
  }

  report_o1(out, avg_small, avg_large)
}

fn output_time<W: Write>(small: BucketTable, large: BucketTable, out: &mut W) -> Result<bool> {
  writeln!(out, "Test speed of sorted output function.")?;

  let entry_ratio = large.len() as f64 / small.len().max(1) as f64;

  let count = AccessCount::new();
  let small = small.counted_by(count.clone());
  small.write_sorted(&mut io::sink())?;
  let accesses_small = count.get();

  count.reset();
  let large = large.counted_by(count.clone());
  large.write_sorted(&mut io::sink())?;
  let accesses_large = count.get();

  let ratio = if accesses_small > 0 {
    accesses_large as f64 / accesses_small as f64
  } else {
    0.0
  };
  writeln!(out, "  Touches: small {}, large {}, ratio {:.3}",
           accesses_small, accesses_large, ratio)?;

  if ratio < entry_ratio {
    writeln!(out, "Did not sort Entry objects.")?;
    writeln!(out, "Test failed.")?;
    Ok(false)
  } else if ratio > TOO_SLOW_FOR_NLOGN {
    writeln!(out, "Too many Entry accesses for n log n.")?;
    writeln!(out, "Test failed.")?;
    Ok(false)
  } else {
    writeln!(out, "Test passed.")?;
    Ok(true)
  }
}
