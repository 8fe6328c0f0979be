//! Linear scan baseline.

use crate::error::Result;
use crate::record::Record;
use crate::SearchIndex;

/// Every record whose key equals `key`, in original order.
pub fn find_all(records: &[Record], key: &str) -> Vec<Record> {
    records.iter().filter(|r| r.key() == key).cloned().collect()
}

/// A record list searched by exhaustive scan.
#[derive(Clone, Debug, Default)]
pub struct LinearScan {
    records: Vec<Record>,
}

impl LinearScan {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }
}

impl From<Vec<Record>> for LinearScan {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl SearchIndex for LinearScan {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn add(&mut self, record: Record) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn find_all(&self, key: &str) -> Vec<Record> {
        find_all(&self.records, key)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
