//! Ordered map over a binary search tree.

use core::cmp::Ordering;

use slotmap::{new_key_type, SlotMap};

use crate::map::{Entries, Map, MapError};

new_key_type! {
    /// Stable arena index of one tree node.
    struct NodeKey;
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
}

/// Which child slot of a parent a descent step took.
#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Binary search tree keyed by any totally ordered type.
///
/// For every node, all keys in its left subtree compare strictly less
/// and all keys in its right subtree strictly greater; inserting an
/// existing key overwrites the value in place instead of adding a node.
/// Nodes live in a slotmap arena, and every walk (lookup, insert,
/// delete, iteration) is iterative, so adversarial insert orders cannot
/// exhaust the call stack.
///
/// Keys that cannot be totally ordered are rejected at compile time by
/// the `K: Ord` bound; there is no runtime ordering failure.
///
/// The contract's iteration order is pre-order (node, left subtree,
/// right subtree). [`TreeMap::iter_in_order`] yields the sorted
/// alternative.
#[derive(Debug)]
pub struct TreeMap<K, V> {
    nodes: SlotMap<NodeKey, Node<K, V>>,
    root: Option<NodeKey>,
}

impl<K, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Discard the whole tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Pre-order traversal: node, then left subtree, then right subtree.
    pub fn iter(&self) -> PreOrder<'_, K, V> {
        PreOrder {
            nodes: &self.nodes,
            stack: self.root.into_iter().collect(),
        }
    }

    /// In-order traversal; keys come out strictly increasing.
    pub fn iter_in_order(&self) -> InOrder<'_, K, V> {
        let mut iter = InOrder {
            nodes: &self.nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    pub fn get(&self, key: &K) -> Result<&V, MapError> {
        let mut cursor = self.root;
        while let Some(cur) = cursor {
            let node = &self.nodes[cur];
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Ok(&node.value),
            };
        }
        Err(MapError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Insert `key -> value`; an equal key overwrites its node's value in
    /// place and adds nothing.
    pub fn insert(&mut self, key: K, value: V) {
        let Some(root) = self.root else {
            let node = self.new_node(key, value);
            self.root = Some(node);
            return;
        };
        let mut cur = root;
        loop {
            match key.cmp(&self.nodes[cur].key) {
                Ordering::Less => match self.nodes[cur].left {
                    Some(next) => cur = next,
                    None => {
                        let node = self.new_node(key, value);
                        self.nodes[cur].left = Some(node);
                        return;
                    }
                },
                Ordering::Greater => match self.nodes[cur].right {
                    Some(next) => cur = next,
                    None => {
                        let node = self.new_node(key, value);
                        self.nodes[cur].right = Some(node);
                        return;
                    }
                },
                Ordering::Equal => {
                    self.nodes[cur].value = value;
                    return;
                }
            }
        }
    }

    /// Remove the entry under `key` and return its value.
    ///
    /// Deletion by cases, with the parent link tracked during descent:
    /// - leaf: detach from the parent (or empty the tree);
    /// - one child: the child subtree moves up intact;
    /// - two children: the in-order successor (the leftmost node of the
    ///   right subtree) replaces the deleted entry, and the successor's
    ///   own node, which has at most a right child, is spliced out of the
    ///   right subtree.
    ///
    /// An absent key is an error and leaves size and structure untouched.
    pub fn remove(&mut self, key: &K) -> Result<V, MapError> {
        let mut parent: Option<(NodeKey, Side)> = None;
        let mut cur = self.root.ok_or(MapError::KeyNotFound)?;
        loop {
            match key.cmp(&self.nodes[cur].key) {
                Ordering::Less => {
                    let next = self.nodes[cur].left.ok_or(MapError::KeyNotFound)?;
                    parent = Some((cur, Side::Left));
                    cur = next;
                }
                Ordering::Greater => {
                    let next = self.nodes[cur].right.ok_or(MapError::KeyNotFound)?;
                    parent = Some((cur, Side::Right));
                    cur = next;
                }
                Ordering::Equal => break,
            }
        }

        match (self.nodes[cur].left, self.nodes[cur].right) {
            (None, None) => {
                self.relink(parent, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                self.relink(parent, Some(child));
            }
            (Some(_), Some(right)) => {
                let mut succ_parent = (cur, Side::Right);
                let mut succ = right;
                while let Some(next) = self.nodes[succ].left {
                    succ_parent = (succ, Side::Left);
                    succ = next;
                }
                let succ_right = self.nodes[succ].right;
                self.relink(Some(succ_parent), succ_right);
                let succ_node = self.nodes.remove(succ).expect("successor is live");
                let node = &mut self.nodes[cur];
                node.key = succ_node.key;
                let removed = std::mem::replace(&mut node.value, succ_node.value);
                return Ok(removed);
            }
        }
        let node = self.nodes.remove(cur).expect("detached node is live");
        Ok(node.value)
    }

    fn new_node(&mut self, key: K, value: V) -> NodeKey {
        self.nodes.insert(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }

    fn relink(&mut self, parent: Option<(NodeKey, Side)>, child: Option<NodeKey>) {
        match parent {
            Some((p, Side::Left)) => self.nodes[p].left = child,
            Some((p, Side::Right)) => self.nodes[p].right = child,
            None => self.root = child,
        }
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Map<K, V> for TreeMap<K, V> {
    fn get(&self, key: &K) -> Result<&V, MapError> {
        TreeMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        TreeMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Result<V, MapError> {
        TreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        TreeMap::clear(self);
    }

    /// Pre-order, as documented on the type.
    fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(TreeMap::iter(self))
    }
}

/// Explicit-stack pre-order walk.
pub struct PreOrder<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    stack: Vec<NodeKey>,
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;
        let node = &self.nodes[cur];
        // right below left, so the left subtree pops first
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some((&node.key, &node.value))
    }
}

/// Explicit-stack in-order walk.
pub struct InOrder<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    stack: Vec<NodeKey>,
}

impl<'a, K, V> InOrder<'a, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<NodeKey>) {
        while let Some(cur) = cursor {
            self.stack.push(cur);
            cursor = self.nodes[cur].left;
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;
        let node = &self.nodes[cur];
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preorder_visits_node_left_right() {
        let mut t = TreeMap::new();
        for key in [10, 7, 12, 9, 8, 6] {
            t.insert(key, key * 10);
        }
        let keys: Vec<i32> = t.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, [10, 7, 6, 9, 8, 12]);
    }

    #[test]
    fn in_order_is_sorted() {
        let mut t = TreeMap::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            t.insert(key, ());
        }
        let keys: Vec<i32> = t.iter_in_order().map(|(k, _)| *k).collect();
        assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
    }
}
