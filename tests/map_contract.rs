// Mapping-contract test suite, run against both backends.
//
// Each check documents what behavior is being verified. The derived
// operations are provided methods of the `Map` trait, so one generic
// suite proves them identical regardless of the backend underneath:
// - get_or/pop/pop_item/set_default/update_from behave like the
//   documented contract, including their failure cases.
// - Equality is order-insensitive, symmetric, and works across backends.
// - Failed operations leave size and other entries untouched.
use twinmap::{ChainHashMap, Map, MapError, TreeMap};

fn filled<M: Map<String, i64> + Default>(pairs: &[(&str, i64)]) -> M {
    let mut map = M::default();
    for (k, v) in pairs {
        map.insert((*k).to_string(), *v);
    }
    map
}

// Check: round-trip, overwrite-in-place, contains, is_empty.
fn check_basic_ops<M: Map<String, i64> + Default>() {
    let mut map = M::default();
    assert!(map.is_empty());

    map.insert("one".to_string(), 1);
    map.insert("two".to_string(), 2);
    assert_eq!(map.get(&"one".to_string()), Ok(&1));
    assert_eq!(map.len(), 2);

    // overwrite: same size, new value
    map.insert("one".to_string(), 10);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"one".to_string()), Ok(&10));

    assert!(map.contains_key(&"two".to_string()));
    assert!(!map.contains_key(&"three".to_string()));
    assert_eq!(map.get(&"three".to_string()), Err(MapError::KeyNotFound));
}

// Check: get_or never fails; pop honors its optional default; a failed
// pop without default mutates nothing.
fn check_get_or_and_pop<M: Map<String, i64> + Default>() {
    let mut map: M = filled(&[("a", 1), ("b", 2)]);

    assert_eq!(*map.get_or(&"a".to_string(), &0), 1);
    assert_eq!(*map.get_or(&"zz".to_string(), &0), 0);

    assert_eq!(map.pop(&"a".to_string(), None), Ok(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.pop(&"a".to_string(), Some(-7)), Ok(-7));
    assert_eq!(map.pop(&"a".to_string(), None), Err(MapError::KeyNotFound));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"b".to_string()), Ok(&2));
}

// Check: pop_item removes exactly one held pair, drains the container to
// empty, then fails with Empty.
fn check_pop_item<M: Map<String, i64> + Default>() {
    let mut map: M = filled(&[("a", 1), ("b", 2), ("c", 3)]);

    let mut drained = Vec::new();
    while let Ok((key, value)) = map.pop_item() {
        assert!(!map.contains_key(&key));
        drained.push((key, value));
    }
    assert!(map.is_empty());
    drained.sort();
    assert_eq!(
        drained,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );
    assert_eq!(map.pop_item(), Err(MapError::Empty));
}

// Check: set_default returns the existing value untouched, or inserts
// and returns the default.
fn check_set_default<M: Map<String, i64> + Default>() {
    let mut map: M = filled(&[("a", 1)]);

    assert_eq!(*map.set_default("a".to_string(), 99), 1);
    assert_eq!(map.len(), 1);

    assert_eq!(*map.set_default("b".to_string(), 42), 42);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"b".to_string()), Ok(&42));
}

// Check: update_from inserts everything and overwrites on collision.
fn check_update_from<M: Map<String, i64> + Default>() {
    let mut map: M = filled(&[("a", 1), ("b", 2)]);
    map.update_from(vec![("b".to_string(), 20), ("c".to_string(), 3)]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&"b".to_string()), Ok(&20));
    assert_eq!(map.get(&"c".to_string()), Ok(&3));
}

// Check: sum_values adds every stored value.
fn check_sum_values<M: Map<String, i64> + Default>() {
    let map: M = filled(&[("a", 1), ("b", 2), ("c", 39)]);
    assert_eq!(map.sum_values(), 42);
    let empty = M::default();
    assert_eq!(empty.sum_values(), 0);
}

// Check: clear empties the container and leaves it usable.
fn check_clear<M: Map<String, i64> + Default>() {
    let mut map: M = filled(&[("a", 1), ("b", 2)]);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.iter().count(), 0);
    map.insert("x".to_string(), 9);
    assert_eq!(map.get(&"x".to_string()), Ok(&9));
}

#[test]
fn hash_map_satisfies_the_contract() {
    check_basic_ops::<ChainHashMap<String, i64>>();
    check_get_or_and_pop::<ChainHashMap<String, i64>>();
    check_pop_item::<ChainHashMap<String, i64>>();
    check_set_default::<ChainHashMap<String, i64>>();
    check_update_from::<ChainHashMap<String, i64>>();
    check_sum_values::<ChainHashMap<String, i64>>();
    check_clear::<ChainHashMap<String, i64>>();
}

#[test]
fn tree_map_satisfies_the_contract() {
    check_basic_ops::<TreeMap<String, i64>>();
    check_get_or_and_pop::<TreeMap<String, i64>>();
    check_pop_item::<TreeMap<String, i64>>();
    check_set_default::<TreeMap<String, i64>>();
    check_update_from::<TreeMap<String, i64>>();
    check_sum_values::<TreeMap<String, i64>>();
    check_clear::<TreeMap<String, i64>>();
}

// Test: equality is insertion-order-insensitive and symmetric.
// Verifies: same pairs inserted in different orders compare equal both
// ways; one differing value breaks equality both ways.
#[test]
fn equality_ignores_insertion_order() {
    let left: ChainHashMap<String, i64> = filled(&[("a", 1), ("b", 2), ("c", 3)]);
    let right: ChainHashMap<String, i64> = filled(&[("c", 3), ("a", 1), ("b", 2)]);
    assert!(left.eq_map(&right));
    assert!(right.eq_map(&left));

    let differing: ChainHashMap<String, i64> = filled(&[("a", 1), ("b", 2), ("c", 4)]);
    assert!(!left.eq_map(&differing));
    assert!(!differing.eq_map(&left));

    let smaller: ChainHashMap<String, i64> = filled(&[("a", 1), ("b", 2)]);
    assert!(!left.eq_map(&smaller));
    assert!(!smaller.eq_map(&left));
}

// Test: equality works across backends because it only uses the
// contract.
#[test]
fn equality_across_backends() {
    let hash: ChainHashMap<String, i64> = filled(&[("a", 1), ("b", 2)]);
    let tree: TreeMap<String, i64> = filled(&[("b", 2), ("a", 1)]);
    assert!(hash.eq_map(&tree));
    assert!(tree.eq_map(&hash));
}

// Test: callers can hold both backends behind `dyn Map` and swap them
// without code changes.
#[test]
fn backends_are_interchangeable_behind_dyn() {
    let mut maps: Vec<Box<dyn Map<String, i64>>> = vec![
        Box::new(ChainHashMap::new()),
        Box::new(TreeMap::new()),
    ];
    for map in &mut maps {
        map.insert("k".to_string(), 5);
        map.insert("j".to_string(), 7);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"k".to_string()), Ok(&5));
        assert_eq!(map.remove(&"j".to_string()), Ok(7));
        assert_eq!(map.len(), 1);
    }
    let (hash, tree) = (&maps[0], &maps[1]);
    assert!(hash.eq_map(tree.as_ref()));
}

// Test: pop_item order is pinned per backend; the tree's pre-order
// makes the last pair the rightmost key.
#[test]
fn tree_pop_item_takes_the_preorder_last_pair() {
    let mut tree: TreeMap<i32, i32> = TreeMap::new();
    for key in [2, 1, 3] {
        tree.insert(key, key * 10);
    }
    // pre-order 2, 1, 3: the last visited pair is (3, 30)
    assert_eq!(tree.pop_item(), Ok((3, 30)));
    assert_eq!(tree.len(), 2);
}
