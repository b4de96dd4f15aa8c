//! Append-only deduplicating value column.

use ahash::RandomState;
use hashbrown::HashTable;
use std::hash::{BuildHasher, Hash};

use crate::error::ColumnError;

/// Stable identity of a value stored in a [`MemoryColumn`].
pub type DedupKey = u32;

/// MemoryColumn stores each distinct value once and hands out a small
/// integer key for it.
///
/// Keys are assigned in first-seen order starting at 0. Adding a value equal
/// to one already stored returns the existing key, so storage grows with
/// the number of distinct values rather than the number of insertions.
///
/// The lookup table holds only keys; values live once, in `items`.
#[derive(Debug, Clone)]
pub struct MemoryColumn<T> {
    items: Vec<T>,
    keys: HashTable<DedupKey>,
    hasher: RandomState,
}

impl<T> Default for MemoryColumn<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            keys: HashTable::new(),
            hasher: RandomState::new(),
        }
    }
}

impl<T: Eq + Hash> MemoryColumn<T> {
    /// Create an empty column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty column with room for `capacity` distinct values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            keys: HashTable::with_capacity(capacity),
            hasher: RandomState::new(),
        }
    }

    /// Get the number of distinct values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the column is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a value, returning the key of the stored copy.
    ///
    /// Fails with [`ColumnError::CapacityExceeded`] once every [`DedupKey`]
    /// is taken.
    pub fn add(&mut self, item: T) -> Result<DedupKey, ColumnError> {
        let hash = self.hasher.hash_one(&item);
        let items = &self.items;
        if let Some(&key) = self.keys.find(hash, |&k| items[k as usize] == item) {
            return Ok(key);
        }

        let key = next_key(self.items.len())?;
        self.items.push(item);

        let Self {
            items,
            keys,
            hasher,
        } = self;
        keys.insert_unique(hash, key, |&k| hasher.hash_one(&items[k as usize]));
        Ok(key)
    }

    /// Get the value for a key returned by [`add`](Self::add).
    ///
    /// Panics if `key` was not produced by this column.
    pub(crate) fn get(&self, key: DedupKey) -> &T {
        &self.items[key as usize]
    }
}

/// Key for the value stored after `len` existing ones.
fn next_key(len: usize) -> Result<DedupKey, ColumnError> {
    DedupKey::try_from(len).map_err(|_| ColumnError::CapacityExceeded { len })
}
