//! The mapping contract: the capability set every backend exposes, plus
//! the derived operations built once on top of it.

use core::fmt;
use std::iter::Sum;

/// Typed failures of container operations.
///
/// Failed operations never mutate the container: a `KeyNotFound` from
/// `get`, `remove`, or `pop` leaves size and structure exactly as before
/// the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested key is not present.
    KeyNotFound,
    /// The container holds no entries (`pop_item` on an empty map).
    Empty,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::KeyNotFound => write!(f, "key not found"),
            MapError::Empty => write!(f, "container is empty"),
        }
    }
}

impl std::error::Error for MapError {}

/// Borrowed view over a backend's entries in its native iteration order.
///
/// Yields `(&K, &V)` pairs: views, never live handles into the
/// structure. Each call to [`Map::iter`] starts a fresh traversal.
pub struct Entries<'a, K, V> {
    inner: Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = (&'a K, &'a V)> + 'a,
    {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// The contract shared by every backend.
///
/// Backends implement the six core operations; everything else is a
/// provided method written against those six, so derived behavior is
/// identical no matter which backend sits underneath. The trait is
/// dyn-compatible: `Box<dyn Map<K, V>>` works for callers that pick a
/// backend at runtime.
pub trait Map<K, V> {
    /// Borrow the value stored under `key`.
    fn get(&self, key: &K) -> Result<&V, MapError>;

    /// Insert `key -> value`, overwriting in place when the key exists.
    /// Overwrites do not change `len`.
    fn insert(&mut self, key: K, value: V);

    /// Remove the entry under `key` and return its value. Absent keys
    /// are an error and leave the container untouched.
    fn remove(&mut self, key: &K) -> Result<V, MapError>;

    /// Number of distinct keys stored.
    fn len(&self) -> usize;

    /// Drop every entry. The hash backend also returns to its initial
    /// capacity.
    fn clear(&mut self);

    /// Traverse all entries in the backend's native order.
    fn iter(&self) -> Entries<'_, K, V>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Borrow the value under `key`, or `default` when absent. Never
    /// fails.
    fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        match self.get(key) {
            Ok(value) => value,
            Err(_) => default,
        }
    }

    /// Remove and return the value under `key`. When the key is absent,
    /// returns `default` if one was supplied, otherwise `KeyNotFound`.
    fn pop(&mut self, key: &K, default: Option<V>) -> Result<V, MapError> {
        match self.remove(key) {
            Ok(value) => Ok(value),
            Err(MapError::KeyNotFound) => default.ok_or(MapError::KeyNotFound),
            Err(other) => Err(other),
        }
    }

    /// Remove and return the LAST `(key, value)` pair in this backend's
    /// iteration order. Fails with `Empty` on an empty container.
    ///
    /// The pair is order-dependent by definition; each backend documents
    /// its iteration order and the tests pin it down.
    fn pop_item(&mut self) -> Result<(K, V), MapError>
    where
        K: Clone,
    {
        let last = {
            let mut last = None;
            for (key, _) in self.iter() {
                last = Some(key.clone());
            }
            last.ok_or(MapError::Empty)?
        };
        let value = self.remove(&last)?;
        Ok((last, value))
    }

    /// Return the existing value under `key`, inserting `default` first
    /// when the key is absent.
    fn set_default(&mut self, key: K, default: V) -> &V
    where
        K: Clone,
    {
        if !self.contains_key(&key) {
            self.insert(key.clone(), default);
        }
        self.get(&key).expect("key present after insert")
    }

    /// Insert every pair from `source`, overwriting on key collision.
    fn update_from<I>(&mut self, source: I)
    where
        I: IntoIterator<Item = (K, V)>,
        Self: Sized,
    {
        for (key, value) in source {
            self.insert(key, value);
        }
    }

    /// True when both containers hold the same size and every pair of
    /// `self` is present in `other` with an equal value. Symmetric even
    /// across different backends (equal sizes force the key sets to
    /// coincide).
    fn eq_map(&self, other: &dyn Map<K, V>) -> bool
    where
        V: PartialEq,
    {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| matches!(other.get(key), Ok(found) if found == value))
    }

    /// Sum of all stored values. Value types that cannot be added are
    /// rejected at compile time by the `Sum` bound.
    fn sum_values(&self) -> V
    where
        V: for<'a> Sum<&'a V>,
    {
        self.iter().map(|(_, value)| value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::MapError;

    #[test]
    fn error_display_is_stable() {
        assert_eq!(MapError::KeyNotFound.to_string(), "key not found");
        assert_eq!(MapError::Empty.to_string(), "container is empty");
    }
}
