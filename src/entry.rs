use std::cmp;
use std::fmt;

/// A `(key, data)` pair stored in a `BucketTable`.
///
/// Entries compare by key alone, so sorting a collection of them orders it
/// by ascending key.
#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
pub struct Entry {
  key: u32,
  data: String,
}

impl Entry {
  pub fn new<S: Into<String>>(key: u32, data: S) -> Self {
    Self {
      key: key,
      data: data.into(),
    }
  }

  pub fn get_key(&self) -> u32 {
    self.key
  }

  pub fn get_data(&self) -> &str {
    &self.data
  }

  pub fn set_key(&mut self, key: u32) {
    self.key = key;
  }

  pub fn set_data<S: Into<String>>(&mut self, data: S) {
    self.data = data.into();
  }

  pub fn into_data(self) -> String {
    self.data
  }
}

impl PartialEq for Entry {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key
  }
}

impl Eq for Entry {}

impl Ord for Entry {
  fn cmp(&self, other: &Self) -> cmp::Ordering {
    self.key.cmp(&other.key)
  }
}

impl PartialOrd for Entry {
  fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl fmt::Display for Entry {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: {}", self.key, self.data)
  }
}


#[cfg(test)]
mod entry_tests {
  use super::*;

  #[test]
  fn entry_accessors() {
    let mut e = Entry::new(134513, "hairy ape");
    assert_eq!(e.get_key(), 134513);
    assert_eq!(e.get_data(), "hairy ape");

    e.set_key(3213);
    e.set_data("iguana");
    assert_eq!(e.get_key(), 3213);
    assert_eq!(e.into_data(), "iguana");
  }

  #[test]
  fn entry_default_is_blank() {
    let e = Entry::default();
    assert_eq!(e.get_key(), 0);
    assert_eq!(e.get_data(), "");
  }

  #[test]
  fn entry_orders_by_key_only() {
    let mut v = vec![Entry::new(100002, "Avocado"),
                     Entry::new(6083, "Santa Barbara, California"),
                     Entry::new(100001, "Abbott")];
    v.sort();

    let keys: Vec<u32> = v.iter().map(|e| e.get_key()).collect();
    assert_eq!(keys, vec![6083, 100001, 100002]);
    assert_eq!(Entry::new(7, "a"), Entry::new(7, "b"));
  }

  #[test]
  fn entry_display() {
    let e = Entry::new(6083, "Santa Barbara, California");
    assert_eq!(e.to_string(), "6083: Santa Barbara, California");
    assert_eq!(Entry::new(1, "").to_string(), "1: ");
  }
}
