//! Sorted, non-overlapping interval list with binary-search point lookup.

use crate::error::IntervalError;

/// IntervalList maps closed key ranges `[start, end]` to values.
///
/// Intervals must be appended in strictly ascending order: each new
/// interval has to start after the end of the previous one. Only the last
/// inserted end is compared, which keeps building linear in the number of
/// intervals.
///
/// # Examples
/// ```
/// use iplookup::index::IntervalList;
///
/// let mut list = IntervalList::new();
/// list.add(1u64, 5, "a").unwrap();
/// list.add(10u64, 10, "b").unwrap();
///
/// assert_eq!(list.get(3), Some(&"a"));
/// assert_eq!(list.get(10), Some(&"b"));
/// assert_eq!(list.get(7), None);
/// ```
#[derive(Debug, Clone)]
pub struct IntervalList<K, V> {
    /// Interval starts, ascending (searched on lookup)
    starts: Vec<K>,
    /// Interval ends, parallel to `starts`
    ends: Vec<K>,
    /// Interval values, parallel to `starts`
    values: Vec<V>,
}

impl<K, V> Default for IntervalList<K, V> {
    fn default() -> Self {
        Self {
            starts: Vec::new(),
            ends: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<K: Ord + Copy, V> IntervalList<K, V> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with room for `capacity` intervals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            starts: Vec::with_capacity(capacity),
            ends: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of stored intervals.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Check if the list holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Append the interval `[start, end]` with its value.
    ///
    /// Fails with [`IntervalError::InvalidRange`] if `end < start`, and with
    /// [`IntervalError::UnsortedOrOverlapping`] if `start` is not strictly
    /// greater than the end of the last appended interval.
    pub fn add(&mut self, start: K, end: K, value: V) -> Result<(), IntervalError> {
        self.validate_add(start, end)?;

        self.starts.push(start);
        self.ends.push(end);
        self.values.push(value);
        Ok(())
    }

    /// Check whether `[start, end]` could be appended without inserting it.
    pub fn validate_add(&self, start: K, end: K) -> Result<(), IntervalError> {
        if end < start {
            return Err(IntervalError::InvalidRange);
        }

        match self.ends.last() {
            Some(&last_end) if start <= last_end => Err(IntervalError::UnsortedOrOverlapping),
            _ => Ok(()),
        }
    }

    /// Get the value of the interval containing `key`.
    pub fn get(&self, key: K) -> Option<&V> {
        self.find_interval_index(key).map(|idx| &self.values[idx])
    }

    fn find_interval_index(&self, key: K) -> Option<usize> {
        let idx = self.find_lower_or_equal_index(key)?;

        // The key falls in the gap after this interval
        if self.ends[idx] < key {
            return None;
        }

        Some(idx)
    }

    /// Position of the greatest start that is `<= key`.
    fn find_lower_or_equal_index(&self, key: K) -> Option<usize> {
        match self.starts.binary_search(&key) {
            Ok(idx) => Some(idx),
            // No predecessor
            Err(0) => None,
            Err(insert_at) => Some(insert_at - 1),
        }
    }
}
