use std::{fmt, mem};

use tracing::{debug, trace};

use crate::{
    chain::{self, Chain},
    error::{ResizeError, Result},
    hashing::{HashFn, hash_function_1},
    prime::{next_prime, normalize_capacity},
    DEFAULT_CAPACITY,
};

/// A string-keyed hash map using separate chaining.
///
/// Each bucket of the prime-sized table is a [`Chain`] holding every key that hashes to it, in
/// insertion order. The table doubles (and is re-primed) once the load factor reaches
/// [`Self::MAX_LOAD`].
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ChainingMap<V> {
    /// One chain per bucket
    buckets: Vec<Chain<V>>,
    /// Current number of entries across all chains
    size: usize,
    /// Function used to place keys in the table
    hash_fn: HashFn,
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ChainingMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V> FromIterator<(String, V)> for ChainingMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> ChainingMap<V> {
    /// Load factor at which `put` doubles the table before inserting
    pub const MAX_LOAD: f64 = 1.0;

    /// Creates a new `ChainingMap` with the default capacity and [`hash_function_1`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, hash_function_1)
    }

    /// Creates a new `ChainingMap` with at least `capacity` buckets, raised to the next prime
    #[must_use]
    pub fn with_capacity(capacity: usize, hash_fn: HashFn) -> Self {
        Self::with_exact_capacity(next_prime(capacity), hash_fn)
    }

    /// Creates an empty table with exactly `capacity` buckets
    fn with_exact_capacity(capacity: usize, hash_fn: HashFn) -> Self {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Chain::new);
        Self { buckets, size: 0, hash_fn }
    }

    /// Gets the bucket index for a key
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        ((self.hash_fn)(key) % self.buckets.len() as u64) as usize
    }

    /// The chain `key` belongs to
    fn bucket(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// An existing node for the key is unlinked and the new pair appended to the chain's tail,
    /// so updates move a key to the back of its bucket.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();

        if self.table_load() >= Self::MAX_LOAD {
            trace!(size = self.size, capacity = self.capacity(), "load threshold reached");
            self.resize(self.capacity().saturating_mul(2));
        }

        let index = self.bucket_index(&key);
        let chain = self.buckets.get_mut(index)?;

        let previous = chain.remove(&key);
        chain.push_back(key, value);
        if previous.is_none() {
            self.size = self.size.saturating_add(1);
        }
        previous
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.find(key)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)?.find_mut(key)
    }

    /// Returns true if the map contains `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks the entry for `key`, returning whether there was one.
    ///
    /// Removing an absent key does nothing.
    pub fn remove(&mut self, key: &str) -> bool {
        let index = self.bucket_index(key);
        let Some(chain) = self.buckets.get_mut(index) else {
            return false;
        };
        if chain.remove(key).is_none() {
            return false;
        }
        self.size = self.size.saturating_sub(1);
        true
    }

    /// Clears the map, replacing every bucket with an empty chain. The capacity is unchanged.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = Chain::new();
        }
        self.size = 0;
    }

    /// Resizes the table to `new_capacity`, normalized to a prime.
    ///
    /// A request for zero buckets is ignored silently; use [`Self::try_resize`] to find out
    /// whether the request was honoured.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            debug!(%err, "ignoring resize request");
        }
    }

    /// Resizes the table to `new_capacity`, normalized to a prime, and returns the new capacity.
    ///
    /// The request may be smaller than the number of entries: every entry is reinserted with
    /// `put`, which grows the fresh table again whenever it fills up.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::ZeroCapacity`] if `new_capacity` is 0. The map is left untouched.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<usize> {
        if new_capacity < 1 {
            return Err(ResizeError::ZeroCapacity);
        }
        self.rebuild(normalize_capacity(new_capacity));
        Ok(self.capacity())
    }

    /// Replaces the table with one of exactly `capacity` buckets and moves every entry over
    fn rebuild(&mut self, capacity: usize) {
        debug!(from = self.capacity(), to = capacity, size = self.size, "rebuilding table");

        let fresh = Self::with_exact_capacity(capacity, self.hash_fn);
        let old = mem::replace(self, fresh);
        for (key, value) in old.buckets.into_iter().flatten() {
            self.put(key, value);
        }
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor: entries over buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of buckets whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket and in chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), current: None }
    }
}

impl<'a, V> IntoIterator for &'a ChainingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Display for ChainingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of a [`ChainingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: std::slice::Iter<'a, Chain<V>>,
    /// Position within the bucket being visited
    current: Option<chain::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}
