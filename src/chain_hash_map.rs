//! Separate-chaining hash table with load-factor driven resizing.

use core::hash::{BuildHasher, Hash, Hasher};
use std::collections::hash_map::RandomState;

use crate::chain::ChainList;
use crate::map::{Entries, Map, MapError};

/// Default bucket count for `new()`; also the shrink floor of such maps.
pub const DEFAULT_CAPACITY: usize = 10;

/// Hash map resolving collisions through per-bucket chains.
///
/// A bucket is either empty or owns exactly one [`ChainList`]; the bucket
/// index is the key's digest reduced modulo the current capacity. After
/// an insert that brings the load factor (`size / capacity`) to 0.7 or
/// above, the table doubles its capacity; after a removal that brings it
/// to 0.3 or below, the table halves, but never below the capacity it
/// was created with. Either way every entry is rehashed into a freshly
/// sized bucket array before the mutating call returns.
///
/// The hasher is any `BuildHasher` (`RandomState` by default, so digests
/// are stable for the lifetime of a map but differ between maps). Tests
/// that need full buckets swap in a constant hasher.
pub struct ChainHashMap<K, V, S = RandomState> {
    buckets: Vec<Option<ChainList<K, V>>>,
    size: usize,
    initial_capacity: usize,
    hasher: S,
}

impl<K, V> ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a map whose starting capacity (and shrink floor) is
    /// `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = capacity.max(1);
        Self {
            buckets: empty_buckets(capacity),
            size: 0,
            initial_capacity: capacity,
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current bucket count. Grows and shrinks with the load factor;
    /// never drops below the initial capacity.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn make_hash(&self, key: &K) -> u64 {
        let mut h = self.hasher.build_hasher();
        key.hash(&mut h);
        h.finish()
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.make_hash(key) % self.buckets.len() as u64) as usize
    }

    pub fn get(&self, key: &K) -> Result<&V, MapError> {
        self.buckets[self.bucket_index(key)]
            .as_ref()
            .and_then(|chain| chain.find(key))
            .ok_or(MapError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Insert `key -> value`. An existing key is overwritten in place and
    /// leaves `size` (and therefore the resize decision) unchanged.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.bucket_index(&key);
        let chain = self.buckets[index].get_or_insert_with(ChainList::new);
        if let Some(slot) = chain.find_mut(&key) {
            *slot = value;
            return;
        }
        chain.push_back(key, value);
        self.size += 1;
        if 10 * self.size >= 7 * self.buckets.len() {
            self.rehash(self.buckets.len() * 2);
        }
    }

    /// Remove the entry under `key` and return its value.
    ///
    /// The size counter changes only after the chain confirms a splice,
    /// so a failed removal (empty bucket, or missing key in a populated
    /// bucket) leaves the table exactly as it was.
    pub fn remove(&mut self, key: &K) -> Result<V, MapError> {
        let index = self.bucket_index(key);
        let chain = self.buckets[index].as_mut().ok_or(MapError::KeyNotFound)?;
        let value = chain.remove(key)?;
        self.size -= 1;
        if chain.is_empty() {
            self.buckets[index] = None;
        }
        let capacity = self.buckets.len();
        if 10 * self.size <= 3 * capacity && capacity / 2 >= self.initial_capacity {
            self.rehash(capacity / 2);
        }
        Ok(value)
    }

    /// Drop every entry and return to the initial capacity.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.initial_capacity);
        self.size = 0;
    }

    /// Bucket-order traversal, head to tail within each bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flatten().flat_map(ChainList::iter)
    }

    /// Owned pairs sorted by key: the shape the sorted dumps and the
    /// k-way merge collaborator consume.
    pub fn sorted_pairs(&self) -> Vec<(K, V)>
    where
        K: Ord + Clone,
        V: Clone,
    {
        let mut pairs: Vec<(K, V)> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Move every entry into a bucket array of `new_capacity` slots.
    /// Synchronous and total: the whole table is rebuilt before control
    /// returns to the mutating operation.
    fn rehash(&mut self, new_capacity: usize) {
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for chain in old.into_iter().flatten() {
            for (key, value) in chain {
                let index = self.bucket_index(&key);
                self.buckets[index]
                    .get_or_insert_with(ChainList::new)
                    .push_back(key, value);
            }
        }
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Option<ChainList<K, V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

impl<K, V> Default for ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Map<K, V> for ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Result<&V, MapError> {
        ChainHashMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        ChainHashMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Result<V, MapError> {
        ChainHashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        ChainHashMap::clear(self);
    }

    fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(ChainHashMap::iter(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_size() {
        let mut m: ChainHashMap<String, i32> = ChainHashMap::new();
        m.insert("k".to_string(), 1);
        m.insert("k".to_string(), 2);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&"k".to_string()), Ok(&2));
    }

    #[test]
    fn emptied_bucket_slot_is_released() {
        let mut m: ChainHashMap<String, i32> = ChainHashMap::new();
        m.insert("k".to_string(), 1);
        m.remove(&"k".to_string()).unwrap();
        assert!(m.buckets.iter().all(Option::is_none));
    }
}
