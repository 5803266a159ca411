//! Fixed-capacity separate-chaining table
//!
//! A `BucketTable` maps `u32` keys to strings. It owns a fixed number of
//! buckets chosen at construction, and a key always lives in bucket
//! `key % capacity`. Each bucket is a `Vec<Entry>` searched linearly, so
//! `put`, `get` and `remove` cost one pass over a single bucket. The table
//! never rehashes: keeping the load low is up to the caller, usually by
//! sizing the table to the number of records it will hold.
//!
//! Removal moves the last entry of the bucket into the vacated slot, so
//! the order of entries inside a bucket is not meaningful. The only order
//! the table exposes is the ascending-key dump produced by `sorted`.

use std::fmt;
use std::io::{self, BufRead, Write};
use crate::access::{AccessCounter, NoCount};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::load::Records;

/// Bucket count used by `BucketTable::default()`.
pub const DEFAULT_CAPACITY: usize = 100;

/// A fixed-capacity hash table with one `Vec<Entry>` chain per bucket.
///
/// Every key or data read and write the table makes on a stored entry is
/// reported to its `AccessCounter`.
#[derive(Debug)]
#[derive(Clone)]
pub struct BucketTable<C = NoCount> {
  buckets: Vec<Vec<Entry>>,
  len: usize,
  counter: C,
}

impl BucketTable<NoCount> {
  /// Creates a table with `capacity` empty buckets.
  pub fn new(capacity: usize) -> Result<Self> {
    if capacity == 0 {
      return Err(Error::ZeroCapacity);
    }

    debug!("creating table with {} buckets", capacity);
    Ok(Self::with_buckets(capacity))
  }

  /// Creates a table with `count` buckets and fills it with up to `count`
  /// records read from `input`.
  ///
  /// If the input runs out first, the records read so far are kept and the
  /// shortfall is logged; compare `len()` against `count` to detect it.
  pub fn from_reader<R: BufRead>(count: usize, input: &mut R) -> Result<Self> {
    let mut table = Self::new(count)?;
    let read = table.load(count, input)?;
    if read < count {
      warn!("expected {} records, input ended after {}", count, read);
    }
    Ok(table)
  }

  /// Like `from_reader`, but a short input is an error.
  pub fn from_reader_exact<R: BufRead>(count: usize, input: &mut R) -> Result<Self> {
    let mut table = Self::new(count)?;
    let read = table.load(count, input)?;
    if read < count {
      return Err(Error::Truncated {
        expected: count,
        read: read,
      });
    }
    Ok(table)
  }

  fn with_buckets(capacity: usize) -> Self {
    Self {
      buckets: vec![Vec::new(); capacity],
      len: 0,
      counter: NoCount,
    }
  }
}

impl Default for BucketTable<NoCount> {
  fn default() -> Self {
    Self::with_buckets(DEFAULT_CAPACITY)
  }
}

impl<C> BucketTable<C>
where C: AccessCounter {
  /// Moves the contents into a table that reports entry touches to
  /// `counter`.
  pub fn counted_by<D: AccessCounter>(self, counter: D) -> BucketTable<D> {
    BucketTable {
      buckets: self.buckets,
      len: self.len,
      counter: counter,
    }
  }

  pub fn counter(&self) -> &C {
    &self.counter
  }

  /// Returns the number of buckets.
  pub fn capacity(&self) -> usize {
    self.buckets.len()
  }

  /// Returns the number of entries across all buckets.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns the number of entries chained in bucket `index`.
  ///
  /// # Panics
  ///
  /// Panics if `index >= self.capacity()`.
  pub fn bucket_len(&self, index: usize) -> usize {
    self.buckets[index].len()
  }

  /// Returns the bucket that `key` belongs to.
  pub fn hash(&self, key: u32) -> usize {
    key as usize % self.buckets.len()
  }

  /// Inserts `data` under `key`, replacing the data of an existing entry.
  pub fn put<S: Into<String>>(&mut self, key: u32, data: S) {
    let b = self.hash(key);
    match self.position(b, key) {
      Some(i) => {
        let entry = &mut self.buckets[b][i];
        entry.set_data(data);
        entry.set_key(key);
      }
      None => {
        self.buckets[b].push(Entry::new(key, data));
        self.len += 1;
      }
    }
    self.counter.touch();
    self.counter.touch();
  }

  pub fn put_entry(&mut self, entry: Entry) {
    let key = entry.get_key();
    self.put(key, entry.into_data());
  }

  /// Returns a copy of the data stored under `key`.
  pub fn get(&self, key: u32) -> Option<String> {
    let b = self.hash(key);
    self.position(b, key).map(|i| {
      self.counter.touch();
      self.buckets[b][i].get_data().to_string()
    })
  }

  /// Returns the data stored under `key`, or an empty string if there is
  /// none.
  ///
  /// A miss and an entry whose data is empty look the same here; prefer
  /// `get` unless the caller expects the empty-string convention.
  pub fn get_or_empty(&self, key: u32) -> String {
    self.get(key).unwrap_or_default()
  }

  /// Removes the entry for `key`. Returns `true` if there was one.
  ///
  /// The last entry of the bucket takes the removed entry's slot.
  pub fn remove(&mut self, key: u32) -> bool {
    let b = self.hash(key);
    match self.position(b, key) {
      Some(i) => {
        let last = self.buckets[b].len() - 1;
        if i != last {
          // key and data read from the last slot, then written into slot i
          for _ in 0..4 {
            self.counter.touch();
          }
        }
        self.buckets[b].swap_remove(i);
        self.len -= 1;
        true
      }
      None => {
        false
      }
    }
  }

  /// Returns every entry, sorted by ascending key.
  pub fn sorted(&self) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(self.len);
    for bucket in &self.buckets {
      for entry in bucket {
        self.counter.touch();
        self.counter.touch();
        entries.push(entry.clone());
      }
    }

    entries.sort_by(|a, b| {
      self.counter.touch();
      self.counter.touch();
      a.cmp(b)
    });
    entries
  }

  /// Writes the sorted dump, one `"<key>: <data>"` line per entry.
  pub fn write_sorted<W: Write>(&self, out: &mut W) -> io::Result<()> {
    for entry in self.sorted() {
      writeln!(out, "{}", entry)?;
    }
    Ok(())
  }

  /// Reads up to `count` records into the table. Returns how many were
  /// read.
  pub fn load<R: BufRead>(&mut self, count: usize, input: &mut R) -> Result<usize> {
    let mut records = Records::new(input);
    while records.records_read() < count {
      match records.read_record()? {
        Some(entry) => self.put_entry(entry),
        None => break,
      }
    }

    debug!("loaded {} records, table holds {}", records.records_read(), self.len);
    Ok(records.records_read())
  }

  fn position(&self, b: usize, key: u32) -> Option<usize> {
    self.buckets[b].iter().position(|entry| {
      self.counter.touch();
      entry.get_key() == key
    })
  }
}

impl<C> Extend<Entry> for BucketTable<C>
where C: AccessCounter {
  fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
    for entry in iter {
      self.put_entry(entry);
    }
  }
}

impl<C> fmt::Display for BucketTable<C>
where C: AccessCounter {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for entry in self.sorted() {
      writeln!(f, "{}", entry)?;
    }
    Ok(())
  }
}


#[cfg(test)]
mod table_tests {
  use std::io::Cursor;
  use crate::access::AccessCount;
  use super::*;

  #[test]
  fn zero_capacity_is_rejected() {
    match BucketTable::new(0) {
      Err(Error::ZeroCapacity) => {}
      other => panic!("unexpected result: {:?}", other),
    }

    let mut input = Cursor::new("1 one\n");
    assert!(BucketTable::from_reader(0, &mut input).is_err());
  }

  #[test]
  fn default_has_one_hundred_buckets() {
    let t: BucketTable = BucketTable::default();
    assert_eq!(t.capacity(), DEFAULT_CAPACITY);
    assert!(t.is_empty());
  }

  #[test]
  fn keys_land_in_their_hash_bucket() {
    let mut t = BucketTable::new(10).unwrap();
    for k in &[3, 13, 23, 7] {
      t.put(*k, "x");
    }

    assert_eq!(t.hash(23), 3);
    assert_eq!(t.bucket_len(3), 3);
    assert_eq!(t.bucket_len(7), 1);
    assert_eq!(t.bucket_len(0), 0);
    assert_eq!(t.len(), 4);
  }

  #[test]
  fn put_updates_in_place() {
    let mut t = BucketTable::new(10).unwrap();
    t.put(5, "first");
    t.put(15, "other");
    t.put(5, "second");

    assert_eq!(t.len(), 2);
    assert_eq!(t.bucket_len(5), 2);
    assert_eq!(t.get(5), Some("second".to_string()));
  }

  #[test]
  fn remove_moves_last_entry_into_slot() {
    let mut t = BucketTable::new(10).unwrap();
    for k in &[1, 11, 21, 31] {
      t.put(*k, k.to_string());
    }

    assert!(t.remove(11));
    assert_eq!(t.bucket_len(1), 3);
    assert_eq!(t.buckets[1][1].get_key(), 31);

    assert!(t.remove(31));
    assert!(t.remove(21));
    assert!(t.remove(1));
    assert_eq!(t.bucket_len(1), 0);
    assert!(t.is_empty());
  }

  #[test]
  fn empty_data_is_a_hit_for_get() {
    let mut t = BucketTable::new(4).unwrap();
    t.put(2, "");

    assert_eq!(t.get(2), Some(String::new()));
    assert_eq!(t.get_or_empty(2), "");
    assert_eq!(t.get(3), None);
    assert_eq!(t.get_or_empty(3), "");
  }

  #[test]
  fn short_input_keeps_partial_table() {
    let mut input = Cursor::new("1 one\n2 two\n");
    let t = BucketTable::from_reader(5, &mut input).unwrap();

    assert_eq!(t.capacity(), 5);
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(2), Some("two".to_string()));
  }

  #[test]
  fn short_input_fails_exact_load() {
    let mut input = Cursor::new("1 one\n2 two\n");
    match BucketTable::from_reader_exact(5, &mut input) {
      Err(Error::Truncated { expected, read }) => {
        assert_eq!(expected, 5);
        assert_eq!(read, 2);
      }
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn malformed_input_is_an_error() {
    let mut input = Cursor::new("1 one\nnope two\n");
    match BucketTable::from_reader(2, &mut input) {
      Err(Error::Malformed { record, .. }) => assert_eq!(record, 2),
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn counted_get_touches_scanned_keys_and_data() {
    let count = AccessCount::new();
    let mut t = BucketTable::new(10).unwrap().counted_by(count.clone());
    t.put(4, "a");
    t.put(14, "b");
    count.reset();

    assert_eq!(t.get(14), Some("b".to_string()));
    assert_eq!(count.get(), 3);

    count.reset();
    assert_eq!(t.get(24), None);
    assert_eq!(count.get(), 2);

    count.reset();
    assert_eq!(t.get(5), None);
    assert_eq!(count.get(), 0);
  }

  #[test]
  fn counted_remove_of_last_slot_only_scans() {
    let count = AccessCount::new();
    let mut t = BucketTable::new(10).unwrap().counted_by(count.clone());
    t.put(4, "a");
    t.put(14, "b");
    count.reset();

    assert!(t.remove(14));
    assert_eq!(count.get(), 2);

    t.put(14, "b");
    count.reset();
    assert!(t.remove(4));
    assert_eq!(count.get(), 5);
  }

  #[test]
  fn display_matches_write_sorted() {
    let mut t = BucketTable::new(3).unwrap();
    t.extend(vec![Entry::new(9, "nine"), Entry::new(2, "two")]);

    let mut out = Vec::new();
    t.write_sorted(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "2: two\n9: nine\n");
    assert_eq!(t.to_string(), "2: two\n9: nine\n");
  }
}
