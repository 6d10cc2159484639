use std::{fmt, mem};

use tracing::{debug, trace};

use crate::{
    error::{ResizeError, Result},
    hashing::{HashFn, hash_function_1},
    prime::{next_prime, normalize_capacity},
    DEFAULT_CAPACITY,
};

/// A slot entry containing a key-value pair
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Flag indicating whether this entry has been removed (tombstone)
    tombstone: bool,
}

impl<V> Entry<V> {
    /// Creates a live entry
    fn new(key: String, value: V) -> Self {
        Self { key, value, tombstone: false }
    }
}

/// Quadratic probe sequence over a table of `capacity` slots.
///
/// Yields `(initial + p²) mod capacity` for `p = 0, 1, 2, …`, stopping after `capacity` indices.
#[derive(Debug, Clone)]
struct ProbeSequence {
    /// Index the sequence starts from
    initial: usize,
    /// `p² mod capacity` for the next index to yield
    offset: usize,
    /// Number of indices yielded so far
    probe: usize,
    /// Number of slots in the table
    capacity: usize,
}

impl ProbeSequence {
    /// Starts a sequence at `initial`, which must be below `capacity`
    fn new(initial: usize, capacity: usize) -> Self {
        Self { initial, offset: 0, probe: 0, capacity }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.probe >= self.capacity {
            return None;
        }
        let index = (self.initial + self.offset) % self.capacity;

        // (p + 1)² = p² + 2p + 1, kept reduced so nothing grows past 3 * capacity
        self.offset = (self.offset + 2 * self.probe + 1) % self.capacity;
        self.probe += 1;

        Some(index)
    }
}

/// A string-keyed hash map using open addressing with quadratic probing.
///
/// The table length is always prime. Removed entries stay in their slot as tombstones so that
/// probe sequences running through them keep working; tombstones are dropped the next time the
/// table is rebuilt.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbingMap<V> {
    /// The slots storing the entries
    slots: Vec<Option<Entry<V>>>,
    /// Current number of live entries in the table
    size: usize,
    /// Function used to place keys in the table
    hash_fn: HashFn,
}

impl<V> Default for ProbingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ProbingMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V> FromIterator<(String, V)> for ProbingMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> ProbingMap<V> {
    /// Load factor at which `put` doubles the table before inserting
    pub const MAX_LOAD: f64 = 0.5;

    /// Creates a new `ProbingMap` with the default capacity and [`hash_function_1`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, hash_function_1)
    }

    /// Creates a new `ProbingMap` with room for at least `capacity` slots.
    ///
    /// The capacity is raised to the next prime, bumping even requests by one first, so a
    /// request for 2 yields 3.
    #[must_use]
    pub fn with_capacity(capacity: usize, hash_fn: HashFn) -> Self {
        Self::with_exact_capacity(next_prime(capacity), hash_fn)
    }

    /// Creates an empty table with exactly `capacity` slots
    fn with_exact_capacity(capacity: usize, hash_fn: HashFn) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, size: 0, hash_fn }
    }

    /// Gets the initial probe index for a key
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn initial_index(&self, key: &str) -> usize {
        // The remainder is below the capacity, which always fits in usize
        ((self.hash_fn)(key) % self.slots.len() as u64) as usize
    }

    /// Probe sequence for a key over the current table
    fn probe(&self, key: &str) -> ProbeSequence {
        ProbeSequence::new(self.initial_index(key), self.slots.len())
    }

    /// Finds the slot `put` should write `key` into.
    ///
    /// That is the first slot on the key's probe sequence holding the key (live or tombstoned)
    /// or, failing that, the first empty slot. Returns `None` when the sequence is exhausted
    /// without reaching either.
    fn find_slot(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match self.slots.get(index)? {
                None => return Some(index),
                Some(entry) if entry.key == key => return Some(index),
                Some(_) => {}
            }
        }
        None
    }

    /// Finds the slot holding the live entry for `key`.
    ///
    /// Stops at the first empty slot, or at a tombstone carrying `key`, since `put` always
    /// rewrites a key's own tombstone instead of placing it further along.
    fn find_live(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match self.slots.get(index)? {
                None => return None,
                Some(entry) if entry.key == key => {
                    return if entry.tombstone { None } else { Some(index) };
                }
                Some(_) => {}
            }
        }
        None
    }

    /// Inserts a key-value pair into the table, returning the value it replaced.
    ///
    /// If the load factor has reached [`Self::MAX_LOAD`] the table is doubled (and re-primed)
    /// before the insert.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();

        if self.table_load() >= Self::MAX_LOAD {
            trace!(size = self.size, capacity = self.capacity(), "load threshold reached");
            self.resize(self.capacity().saturating_mul(2));
        }

        let index = loop {
            if let Some(index) = self.find_slot(&key) {
                break index;
            }
            // Every slot on the sequence is a tombstone or another key; compact and retry
            debug!(capacity = self.capacity(), "probe sequence exhausted, compacting tombstones");
            self.rebuild(self.capacity());
        };

        let slot = self.slots.get_mut(index)?;
        match slot {
            Some(entry) if !entry.tombstone => Some(mem::replace(&mut entry.value, value)),
            // Empty, or this key's own tombstone: both take a fresh entry
            _ => {
                *slot = Some(Entry::new(key, value));
                self.size = self.size.saturating_add(1);
                None
            }
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_live(key)?;
        self.slots.get(index)?.as_ref().map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_live(key)?;
        self.slots.get_mut(index)?.as_mut().map(|entry| &mut entry.value)
    }

    /// Returns true if the table holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_live(key).is_some()
    }

    /// Marks the entry for `key` as a tombstone, returning whether there was one.
    ///
    /// Removing an absent key does nothing.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(index) = self.find_live(key) else {
            return false;
        };
        match self.slots.get_mut(index) {
            Some(Some(entry)) => {
                entry.tombstone = true;
                self.size = self.size.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Clears the map, emptying every slot. The capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
    }

    /// Resizes the table to `new_capacity`, normalized to a prime.
    ///
    /// Requests that do not exceed the current size are ignored silently; use
    /// [`Self::try_resize`] to find out whether the request was honoured.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            debug!(%err, "ignoring resize request");
        }
    }

    /// Resizes the table to `new_capacity`, normalized to a prime, and returns the new capacity.
    ///
    /// Every live entry is rehashed into a freshly allocated table. A prime request is kept
    /// as-is, so 2 stays 2.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::BelowSize`] if `new_capacity` does not exceed the number of live
    /// entries. The map is left untouched.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<usize> {
        if new_capacity <= self.size {
            return Err(ResizeError::BelowSize { requested: new_capacity, size: self.size });
        }
        self.rebuild(normalize_capacity(new_capacity));
        Ok(self.capacity())
    }

    /// Replaces the table with one of exactly `capacity` slots and reinserts the live entries.
    ///
    /// Reinsertion goes through `put`, so the fresh table may grow further on its own.
    fn rebuild(&mut self, capacity: usize) {
        debug!(from = self.capacity(), to = capacity, size = self.size, "rebuilding table");

        let fresh = Self::with_exact_capacity(capacity, self.hash_fn);
        let old = mem::replace(self, fresh);
        for entry in old.slots.into_iter().flatten() {
            if !entry.tombstone {
                self.put(entry.key, entry.value);
            }
        }
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map has no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor: live entries over slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of slots without a live entry.
    ///
    /// Tombstones count as empty here.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size)
    }

    /// Returns an iterator over the live key-value pairs, in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.slots.iter() }
    }
}

impl<'a, V> IntoIterator for &'a ProbingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Display for ProbingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                None => writeln!(f, "{index}: None")?,
                Some(entry) if entry.tombstone => {
                    writeln!(f, "{index}: {:?} -> {:?} (tombstone)", entry.key, entry.value)?;
                }
                Some(entry) => writeln!(f, "{index}: {:?} -> {:?}", entry.key, entry.value)?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live key-value pairs of a [`ProbingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots of the table
    slots: std::slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().flatten().find(|entry| !entry.tombstone).map(|entry| {
            (entry.key.as_str(), &entry.value)
        })
    }
}
