#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so the
// state-machine suite can assert on capacity alongside the public
// surface.

use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

use crate::chain_hash_map::{ChainHashMap, DEFAULT_CAPACITY};
use crate::map::{Map, MapError};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Pop(usize),
    Contains(usize),
    PopItem,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> String {
    pool[i].clone()
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Pop),
            idx.clone().prop_map(OpI::Contains),
            Just(OpI::PopItem),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `get`/`contains_key`/`remove`/`pop` parity with the model; failed
//   removals leave size untouched.
// - `pop_item` removes exactly one pair that the model also held, and
//   only fails (`Empty`) on an empty container.
// - `iter` yields each live entry exactly once; key sets match.
// - After every op: size parity, the load factor stays below 0.7, and
//   capacity never drops below the initial floor; above the floor, the
//   load factor stays above 0.3.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainHashMap<String, i32> = ChainHashMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = key_from(&pool, i);
                    sut.insert(k.clone(), v);
                    model.insert(k, v);
                }
                OpI::Remove(i) => {
                    let k = key_from(&pool, i);
                    match (sut.remove(&k), model.remove(&k)) {
                        (Ok(sv), Some(mv)) => prop_assert_eq!(sv, mv),
                        (Err(MapError::KeyNotFound), None) => {}
                        (s, m) => prop_assert!(false, "remove mismatch: {:?} vs {:?}", s, m),
                    }
                }
                OpI::Get(i) => {
                    let k = key_from(&pool, i);
                    prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
                }
                OpI::Pop(i) => {
                    let k = key_from(&pool, i);
                    let popped = sut.pop(&k, Some(-1)).expect("pop with default never fails");
                    match model.remove(&k) {
                        Some(mv) => prop_assert_eq!(popped, mv),
                        None => prop_assert_eq!(popped, -1),
                    }
                }
                OpI::Contains(i) => {
                    let k = key_from(&pool, i);
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
                OpI::PopItem => match sut.pop_item() {
                    Ok((k, v)) => {
                        let mv = model.remove(&k);
                        prop_assert_eq!(mv, Some(v));
                    }
                    Err(MapError::Empty) => prop_assert!(model.is_empty()),
                    Err(other) => prop_assert!(false, "unexpected pop_item error: {:?}", other),
                },
                OpI::Iterate => {
                    let s_keys: BTreeSet<String> = sut.iter().map(|(k, _)| k.clone()).collect();
                    let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                    prop_assert_eq!(s_keys, m_keys);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.capacity() >= DEFAULT_CAPACITY);
            prop_assert!(10 * sut.len() < 7 * sut.capacity(), "load factor reached 0.7");
            prop_assert!(
                sut.capacity() == DEFAULT_CAPACITY || 10 * sut.len() > 3 * sut.capacity(),
                "shrink lagged: size {} capacity {}",
                sut.len(),
                sut.capacity()
            );
        }
    }
}

// Constant hasher funnels every key into one bucket, stressing chain
// scans, splices, and rehashing of a single long chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: the same state-machine invariants under worst-case collision
// behavior. Every operation degenerates to chain traversal; the size and
// load-factor post-conditions must still hold because resizing counts
// entries, not occupied buckets.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: ChainHashMap<String, i32, ConstBuildHasher> =
            ChainHashMap::with_hasher(ConstBuildHasher);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = key_from(&pool, i);
                    sut.insert(k.clone(), v);
                    model.insert(k, v);
                }
                OpI::Remove(i) => {
                    let k = key_from(&pool, i);
                    match (sut.remove(&k), model.remove(&k)) {
                        (Ok(sv), Some(mv)) => prop_assert_eq!(sv, mv),
                        (Err(MapError::KeyNotFound), None) => {}
                        (s, m) => prop_assert!(false, "remove mismatch: {:?} vs {:?}", s, m),
                    }
                }
                OpI::Get(i) => {
                    let k = key_from(&pool, i);
                    prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
                }
                OpI::Pop(i) => {
                    let k = key_from(&pool, i);
                    let popped = sut.pop(&k, Some(-1)).expect("pop with default never fails");
                    match model.remove(&k) {
                        Some(mv) => prop_assert_eq!(popped, mv),
                        None => prop_assert_eq!(popped, -1),
                    }
                }
                OpI::Contains(i) => {
                    let k = key_from(&pool, i);
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
                OpI::PopItem => match sut.pop_item() {
                    Ok((k, v)) => {
                        let mv = model.remove(&k);
                        prop_assert_eq!(mv, Some(v));
                    }
                    Err(MapError::Empty) => prop_assert!(model.is_empty()),
                    Err(other) => prop_assert!(false, "unexpected pop_item error: {:?}", other),
                },
                OpI::Iterate => {
                    let s_keys: BTreeSet<String> = sut.iter().map(|(k, _)| k.clone()).collect();
                    let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                    prop_assert_eq!(s_keys, m_keys);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.capacity() >= DEFAULT_CAPACITY);
            prop_assert!(10 * sut.len() < 7 * sut.capacity(), "load factor reached 0.7");
        }
    }
}
