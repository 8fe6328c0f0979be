//! # keyed-search
//!
//! Keyed search structures for comparing lookup strategies over one record set.
//!
//! Every structure indexes [`Record`]s by their `country` key and answers
//! "all records with this key" queries:
//!
//! - [`linear`]: exhaustive scan, the O(n) baseline.
//! - [`BinarySearchTree`]: unbalanced; sorted input degenerates to a chain.
//! - [`RedBlackTree`]: self-balancing, O(log n) height.
//! - [`HashTable`]: fixed capacity, custom hash, quadratic probing.
//! - [`OrderedMultimap`]: `BTreeMap` reference point.
//!
//! Structures are built once by inserting records one by one in the caller's
//! order, then queried read-only. Duplicate keys are kept and returned
//! together.
//!
//! ## Example
//!
//! ```rust
//! use keyed_search::{Config, Record, SearchIndex, Structure};
//!
//! let records: Vec<Record> = ["A", "B", "A", "C", "B"]
//!     .into_iter()
//!     .map(Record::with_key)
//!     .collect();
//!
//! for structure in Structure::ALL {
//!     let index = structure.build(&records, &Config::default()).unwrap();
//!     assert_eq!(index.find_all("B").len(), 2);
//!     assert!(index.find_all("Z").is_empty());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod arena;
pub mod bst;
pub mod dataset;
pub mod error;
pub mod hash;
pub mod linear;
pub mod multimap;
pub mod rbtree;
pub mod record;
pub mod tree;

pub use bst::BinarySearchTree;
pub use error::{Error, Result};
pub use hash::HashTable;
pub use linear::LinearScan;
pub use multimap::OrderedMultimap;
pub use rbtree::{Color, RedBlackTree};
pub use record::Record;
pub use tree::ShapeEntry;

use std::fmt;
use std::str::FromStr;

/// Configuration for building search structures.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hash table slots per record
    pub hash_capacity_factor: usize,
    /// Lower bound on hash table capacity, so empty inputs still get a table
    pub min_hash_capacity: usize,
    /// Round the capacity up to a prime. With a prime capacity and a load
    /// factor of at most one half, quadratic probing always finds a free slot.
    pub prime_hash_capacity: bool,
}

impl Config {
    /// Hash table capacity for `records` records.
    pub fn hash_capacity(&self, records: usize) -> usize {
        let capacity = records
            .saturating_mul(self.hash_capacity_factor)
            .max(self.min_hash_capacity);
        if self.prime_hash_capacity {
            next_prime(capacity)
        } else {
            capacity
        }
    }
}

/// Smallest prime `>= n`.
fn next_prime(n: usize) -> usize {
    fn is_prime(n: usize) -> bool {
        if n < 4 {
            return n >= 2;
        }
        if n % 2 == 0 {
            return false;
        }
        let mut d = 3;
        while d <= n / d {
            if n % d == 0 {
                return false;
            }
            d += 2;
        }
        true
    }

    (n.max(2)..).find(|&c| is_prime(c)).unwrap_or(n)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_capacity_factor: 2,
            min_hash_capacity: 1,
            prime_hash_capacity: false,
        }
    }
}

/// The contract every structure implements: index records by key, then
/// return all records matching a query key.
pub trait SearchIndex {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Insert one record.
    fn add(&mut self, record: Record) -> Result<()>;

    /// All records whose key equals `key`, in structure-defined order.
    fn find_all(&self, key: &str) -> Vec<Record>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `records` one by one, in order.
    fn extend_from(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.add(record.clone())?;
        }
        Ok(())
    }
}

/// Selects one of the search structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Structure {
    Linear,
    Bst,
    RedBlack,
    Hash,
    Multimap,
}

impl Structure {
    /// Every structure, in report order.
    pub const ALL: [Structure; 5] = [
        Structure::Linear,
        Structure::Bst,
        Structure::RedBlack,
        Structure::Hash,
        Structure::Multimap,
    ];

    /// Name accepted by [`FromStr`] and reported by [`SearchIndex::name`].
    pub fn name(self) -> &'static str {
        match self {
            Structure::Linear => "linear",
            Structure::Bst => "bst",
            Structure::RedBlack => "rbtree",
            Structure::Hash => "hash",
            Structure::Multimap => "multimap",
        }
    }

    /// An empty index sized for `records` records.
    pub fn empty(self, records: usize, config: &Config) -> Result<Box<dyn SearchIndex>> {
        let index: Box<dyn SearchIndex> = match self {
            Structure::Linear => Box::new(LinearScan::with_capacity(records)),
            Structure::Bst => Box::new(BinarySearchTree::with_capacity(records)),
            Structure::RedBlack => Box::new(RedBlackTree::with_capacity(records)),
            Structure::Hash => Box::new(HashTable::with_capacity(config.hash_capacity(records))?),
            Structure::Multimap => Box::new(OrderedMultimap::new()),
        };
        Ok(index)
    }

    /// Build an index over `records`, inserted in order.
    pub fn build(self, records: &[Record], config: &Config) -> Result<Box<dyn SearchIndex>> {
        let mut index = self.empty(records.len(), config)?;
        index.extend_from(records)?;
        log::debug!("built {} over {} records", self.name(), index.len());
        Ok(index)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Structure {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Structure::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Structure::ALL.iter().map(|st| st.name()).collect();
                format!("unknown structure '{s}' (expected one of {})", names.join(", "))
            })
    }
}

/// Build a hash table over `records` sized by `config`, logging its collision count.
pub fn build_hash_table(records: &[Record], config: &Config) -> Result<HashTable> {
    let mut table = HashTable::with_capacity(config.hash_capacity(records.len()))?;
    table.extend_from(records)?;
    log::debug!(
        "hash table: {} records, capacity {}, {} collisions, load {:.2}",
        table.len(),
        table.capacity(),
        table.collisions(),
        table.load_factor()
    );
    Ok(table)
}

#[cfg(test)]
mod proptests;
