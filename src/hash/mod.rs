//! Fixed-capacity open-addressing hash table with quadratic probing.
//!
//! The slot array is allocated once by the caller and never grows. Probing
//! walks `(hash + attempt²) mod capacity`, which is not guaranteed to visit
//! every slot (that needs e.g. a prime capacity and a load factor of at most
//! one half) and revisits slots it has already seen. Insertion stops after
//! `capacity` attempts; an insertion that finds no free slot in that window
//! fails with [`Error::ProbeExhausted`]. Lookup visits each reachable slot
//! once.
//!
//! Records sharing a key are all stored, each in its own slot along the
//! key's probe sequence.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::SearchIndex;

/// Rolling 32-bit hash of `key` reduced modulo `capacity`.
///
/// Each byte is added to the accumulator, then the accumulator rotated left by
/// 13 bits is subtracted from it.
///
/// # Panics
/// Panics if `capacity` is zero.
#[inline]
pub fn hash_key(key: &str, capacity: usize) -> usize {
    let mut h: u32 = 0;
    for &b in key.as_bytes() {
        h = h.wrapping_add(u32::from(b));
        h = h.wrapping_sub(h.rotate_left(13));
    }
    h as usize % capacity
}

/// Slot index for the `attempt`-th probe: `(hash + attempt²) mod capacity`.
#[inline]
pub fn probe(hash: usize, attempt: usize, capacity: usize) -> usize {
    let step = (attempt as u128) * (attempt as u128);
    ((hash as u128 + step) % capacity as u128) as usize
}

/// An open-addressing hash table over [`Record`]s.
#[derive(Clone, Debug)]
pub struct HashTable {
    /// `None` marks an unoccupied slot.
    slots: Vec<Option<Record>>,
    len: usize,
    collisions: usize,
}

impl HashTable {
    /// Create a table with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![None; capacity],
            len: 0,
            collisions: 0,
        })
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Occupied slots divided by capacity.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Occupied slots with a different key met while inserting.
    ///
    /// Slots holding the same key are not counted: duplicates are expected
    /// and simply probe onward.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Insert a record into the first free slot on its probe sequence.
    ///
    /// Collisions met before a failure stay counted; they were real probes.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        let capacity = self.capacity();
        let hash = hash_key(record.key(), capacity);

        for attempt in 0..capacity {
            let idx = probe(hash, attempt, capacity);
            match &self.slots[idx] {
                None => {
                    log::trace!("{:?} -> slot {idx} (attempt {attempt})", record.key());
                    self.slots[idx] = Some(record);
                    self.len += 1;
                    return Ok(());
                }
                Some(existing) if existing.key() != record.key() => self.collisions += 1,
                Some(_) => {}
            }
        }

        Err(Error::ProbeExhausted {
            capacity,
            attempts: capacity,
        })
    }

    /// All records whose key equals `key`, in probe order.
    ///
    /// Stops at the first unoccupied slot. Every slot reachable from `hash`
    /// shows up within the first `capacity / 2 + 1` attempts, since
    /// `a²` and `(capacity - a)²` agree modulo `capacity`. Offsets can still
    /// repeat inside that window, so visited slots are skipped.
    pub fn find_all(&self, key: &str) -> Vec<Record> {
        let capacity = self.capacity();
        let hash = hash_key(key, capacity);
        let mut visited = VisitedSlots::new(capacity);
        let mut out = Vec::new();

        for attempt in 0..=capacity / 2 {
            let idx = probe(hash, attempt, capacity);
            if !visited.insert(idx) {
                continue;
            }
            match &self.slots[idx] {
                None => break,
                Some(r) if r.key() == key => out.push(r.clone()),
                Some(_) => {}
            }
        }

        out
    }
}

/// One bit per slot.
struct VisitedSlots {
    words: Vec<u64>,
}

impl VisitedSlots {
    fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
        }
    }

    /// Mark `idx`, returning `false` if it was already marked.
    #[inline]
    fn insert(&mut self, idx: usize) -> bool {
        let (word, bit) = (idx / 64, 1u64 << (idx % 64));
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        fresh
    }
}

impl SearchIndex for HashTable {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn add(&mut self, record: Record) -> Result<()> {
        self.insert(record)
    }

    fn find_all(&self, key: &str) -> Vec<Record> {
        HashTable::find_all(self, key)
    }

    fn len(&self) -> usize {
        HashTable::len(self)
    }
}
