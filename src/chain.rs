//! Collision-chain storage: a singly linked key/value list that backs one
//! hash bucket.

use slotmap::{new_key_type, SlotMap};

use crate::map::MapError;

new_key_type! {
    /// Stable arena index of one chain node.
    struct LinkKey;
}

#[derive(Debug)]
struct Link<K, V> {
    key: K,
    value: V,
    next: Option<LinkKey>,
}

/// Singly linked sequence of entries, owned exclusively by one bucket
/// slot. Nodes live in a slotmap arena addressed by stable keys; the list
/// tracks its head and tail so appends are O(1).
///
/// A key appears at most once per chain. The list itself does not enforce
/// this on `push_back` (the hash table checks for an existing entry before
/// appending), but `update` and `remove` only ever touch the first match,
/// so a violated invariant cannot corrupt links.
#[derive(Debug)]
pub struct ChainList<K, V> {
    links: SlotMap<LinkKey, Link<K, V>>,
    head: Option<LinkKey>,
    tail: Option<LinkKey>,
}

impl<K, V> ChainList<K, V> {
    pub fn new() -> Self {
        Self {
            links: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Append an entry at the tail.
    pub fn push_back(&mut self, key: K, value: V) {
        let link = self.links.insert(Link {
            key,
            value,
            next: None,
        });
        match self.tail {
            Some(tail) => self.links[tail].next = Some(link),
            None => self.head = Some(link),
        }
        self.tail = Some(link);
    }

    /// Head-to-tail traversal. Restartable: every call begins a fresh
    /// walk from the head.
    pub fn iter(&self) -> ChainIter<'_, K, V> {
        ChainIter {
            list: self,
            cursor: self.head,
        }
    }
}

impl<K: Eq, V> ChainList<K, V> {
    pub fn find(&self, key: &K) -> Option<&V> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut cursor = self.head;
        while let Some(cur) = cursor {
            if self.links[cur].key == *key {
                return Some(&mut self.links[cur].value);
            }
            cursor = self.links[cur].next;
        }
        None
    }

    /// Overwrite the value stored under `key`.
    pub fn update(&mut self, key: &K, value: V) -> Result<(), MapError> {
        match self.find_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MapError::KeyNotFound),
        }
    }

    /// Splice out the first entry matching `key` and return its value.
    ///
    /// Walks with a trailing predecessor so head removal (including the
    /// chain becoming empty) relinks correctly. An absent key is an
    /// error, never a silent no-op.
    pub fn remove(&mut self, key: &K) -> Result<V, MapError> {
        let mut prev: Option<LinkKey> = None;
        let mut cursor = self.head;
        while let Some(cur) = cursor {
            if self.links[cur].key == *key {
                let next = self.links[cur].next;
                match prev {
                    Some(prev) => self.links[prev].next = next,
                    None => self.head = next,
                }
                if self.tail == Some(cur) {
                    self.tail = prev;
                }
                let link = self.links.remove(cur).expect("cursor is a live link");
                return Ok(link.value);
            }
            prev = Some(cur);
            cursor = self.links[cur].next;
        }
        Err(MapError::KeyNotFound)
    }
}

impl<K, V> Default for ChainList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChainIter<'a, K, V> {
    list: &'a ChainList<K, V>,
    cursor: Option<LinkKey>,
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cursor?;
        let link = &self.list.links[cur];
        self.cursor = link.next;
        Some((&link.key, &link.value))
    }
}

/// Consuming head-to-tail traversal; the hash table rehashes through it.
pub struct ChainIntoIter<K, V> {
    links: SlotMap<LinkKey, Link<K, V>>,
    cursor: Option<LinkKey>,
}

impl<K, V> Iterator for ChainIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cursor?;
        let link = self.links.remove(cur).expect("cursor is a live link");
        self.cursor = link.next;
        Some((link.key, link.value))
    }
}

impl<K, V> IntoIterator for ChainList<K, V> {
    type Item = (K, V);
    type IntoIter = ChainIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        ChainIntoIter {
            links: self.links,
            cursor: self.head,
        }
    }
}
