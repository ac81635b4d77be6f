//! twinmap: one mapping contract, two interchangeable backends.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: let callers program against a single map contract and swap the
//!   concrete data structure without code changes, with each layer small
//!   enough to be reasoned about independently.
//! - Layers:
//!   - `Map<K, V>`: the minimal capability set (lookup, insert, remove,
//!     iteration, size, clear) plus derived operations (`get_or`, `pop`,
//!     `pop_item`, `set_default`, `update_from`, `eq_map`, `sum_values`)
//!     implemented once against that set and shared by every backend.
//!   - `ChainList<K, V>`: singly linked collision chain stored in a
//!     slotmap arena with a tracked tail; one hash bucket's contents.
//!   - `ChainHashMap<K, V, S>`: separate-chaining table. The digest is
//!     reduced modulo the bucket count; the table doubles at 0.7 load,
//!     halves at 0.3, and never shrinks below its initial capacity.
//!   - `TreeMap<K, V>`: binary search tree over a slotmap node arena with
//!     iterative descent and three-case deletion.
//!   - `persist` / `wordfreq` / `corpus`: collaborators that only consume
//!     the contract: line-oriented persistence, word-frequency counting,
//!     k-way merging of sorted dumps, and a per-page counting pipeline.
//!
//! Constraints
//! - Single-threaded containers: no locks, no atomics, no background
//!   threads. Callers serialize access; the corpus worker pool honors this
//!   by giving every page its own fresh table.
//! - Every operation runs to completion or fails with a typed error and
//!   no partial state. Failed lookups and removals leave size and
//!   structure untouched. Resizes rebuild the whole bucket array before
//!   returning; no intermediate state is observable.
//! - Containers never log or print; observable side effects belong to the
//!   collaborator layer.
//!
//! Iteration orders
//! - `ChainHashMap` iterates in bucket order, head to tail within each
//!   bucket. The order changes across resizes.
//! - `TreeMap` iterates pre-order through the contract; `iter_in_order`
//!   is the sorted alternative for callers that need ordered pairs.
//!
//! Why slotmap arenas?
//! - Chain and tree nodes are owned exclusively by their container, with
//!   no shared or back pointers reachable by callers. Stable arena keys
//!   make that single-owner shape explicit while keeping every link
//!   operation in safe code.

pub mod chain;
pub mod chain_hash_map;
pub mod corpus;
pub mod map;
mod map_proptest;
pub mod persist;
pub mod tree_map;
pub mod wordfreq;

// Public surface
pub use chain::ChainList;
pub use chain_hash_map::ChainHashMap;
pub use map::{Entries, Map, MapError};
pub use persist::PersistError;
pub use tree_map::TreeMap;
