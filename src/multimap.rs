//! Sorted multimap baseline built on the standard library's `BTreeMap`.
//!
//! Not as interesting as the hand-written structures, but it is correct and
//! gives a library reference point to compare the trees against.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::record::Record;
use crate::SearchIndex;

/// Records grouped by key in a `BTreeMap`.
#[derive(Clone, Debug, Default)]
pub struct OrderedMultimap {
    map: BTreeMap<String, Vec<Record>>,
    len: usize,
}

impl OrderedMultimap {
    /// Create an empty multimap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record after any existing records with the same key.
    pub fn insert(&mut self, record: Record) {
        self.map
            .entry(record.country.clone())
            .or_default()
            .push(record);
        self.len += 1;
    }

    /// Records with `key`, in insertion order.
    pub fn get(&self, key: &str) -> &[Record] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.map.len()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Keys with their record counts, in key order.
    pub fn key_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.len()))
    }
}

impl SearchIndex for OrderedMultimap {
    fn name(&self) -> &'static str {
        "multimap"
    }

    fn add(&mut self, record: Record) -> Result<()> {
        self.insert(record);
        Ok(())
    }

    fn find_all(&self, key: &str) -> Vec<Record> {
        self.get(key).to_vec()
    }

    fn len(&self) -> usize {
        OrderedMultimap::len(self)
    }
}
