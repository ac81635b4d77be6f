use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use twinmap::{ChainHashMap, TreeMap};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_hash_insert(c: &mut Criterion) {
    c.bench_function("chain_hash_map_insert_10k", |b| {
        b.iter_batched(
            ChainHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_hash_get_hit(c: &mut Criterion) {
    c.bench_function("chain_hash_map_get_hit", |b| {
        let mut m = ChainHashMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            m.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_hash_get_miss(c: &mut Criterion) {
    c.bench_function("chain_hash_map_get_miss", |b| {
        let mut m = ChainHashMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.insert(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(m.get(&k).is_ok());
        })
    });
}

fn bench_tree_insert(c: &mut Criterion) {
    c.bench_function("tree_map_insert_10k", |b| {
        b.iter_batched(
            TreeMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(3).take(10_000).enumerate() {
                    m.insert(x, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_tree_get_hit(c: &mut Criterion) {
    c.bench_function("tree_map_get_hit", |b| {
        let mut m = TreeMap::new();
        let keys: Vec<u64> = lcg(5).take(20_000).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(*k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

criterion_group!(
    benches,
    bench_hash_insert,
    bench_hash_get_hit,
    bench_hash_get_miss,
    bench_tree_insert,
    bench_tree_get_hit
);
criterion_main!(benches);
