//! Criterion benchmarks for LinkedHeap
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_ops
//!
//! # Only the key-change workloads
//! cargo bench --bench heap_ops -- replace_key
//! ```
//!
//! `std::collections::BinaryHeap` (with `Reverse`) is measured alongside as an
//! array-backed baseline for the push/pop workload.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linked_heap::linked_heap::LinkedHeap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const SIZES: [usize; 3] = [1 << 10, 1 << 14, 1 << 17];

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen()).collect()
}

fn benchmark_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    for &n in &SIZES {
        let keys = random_keys(n, 1);

        group.bench_with_input(BenchmarkId::new("linked_heap", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = LinkedHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.insert(k, ()).unwrap();
                }
                while let Ok(entry) = heap.remove_min() {
                    black_box(entry);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("std_binary_heap", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = BinaryHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.push(Reverse(k));
                }
                while let Some(k) = heap.pop() {
                    black_box(k);
                }
            })
        });
    }
    group.finish();
}

fn benchmark_replace_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_key");
    for &n in &SIZES {
        let keys = random_keys(n, 2);
        let mut rng = StdRng::seed_from_u64(3);
        let updates: Vec<(usize, u64)> = (0..n).map(|_| (rng.gen_range(0..n), rng.gen())).collect();

        group.bench_with_input(BenchmarkId::new("random", n), &updates, |b, updates| {
            let mut heap = LinkedHeap::with_capacity(n);
            let handles: Vec<_> = keys.iter().map(|&k| heap.insert(k, ()).unwrap()).collect();
            b.iter(|| {
                for &(i, key) in updates {
                    black_box(heap.replace_key(&handles[i], key).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn benchmark_remove_by_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for &n in &SIZES {
        let keys = random_keys(n, 4);

        group.bench_with_input(BenchmarkId::new("every_other", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = LinkedHeap::with_capacity(keys.len());
                let handles: Vec<_> = keys.iter().map(|&k| heap.insert(k, ()).unwrap()).collect();
                for handle in handles.iter().step_by(2) {
                    black_box(heap.remove(handle).unwrap());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_pop,
    benchmark_replace_key,
    benchmark_remove_by_handle
);
criterion_main!(benches);
