//! Heap operation benchmarks
//!
//! Measures the three hot paths of `TernaryHeap` on reproducible random
//! input, with `std::collections::BinaryHeap` as a baseline where the
//! operation has a std counterpart.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_perf
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dynamic_ternary_heap::{Entry, TernaryHeap};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Linear congruential generator for reproducible benchmarks
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 16
    }
}

fn random_priorities(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next() % 1_000_000).collect()
}

/// Push everything, then drain
fn benchmark_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");

    for &n in &SIZES {
        let priorities = random_priorities(n, 12345);

        group.bench_with_input(BenchmarkId::new("ternary", n), &priorities, |b, ps| {
            b.iter(|| {
                let mut heap = TernaryHeap::with_capacity(ps.len());
                for (i, &p) in ps.iter().enumerate() {
                    heap.push(p, i);
                }
                let mut last = 0;
                while let Ok(element) = heap.extract_minimum() {
                    last = *element.borrow().priority();
                }
                black_box(last)
            });
        });

        group.bench_with_input(BenchmarkId::new("std_binary", n), &priorities, |b, ps| {
            b.iter(|| {
                let mut heap = BinaryHeap::with_capacity(ps.len());
                for (i, &p) in ps.iter().enumerate() {
                    heap.push(Reverse((p, i)));
                }
                let mut last = 0;
                while let Some(Reverse((p, _))) = heap.pop() {
                    last = p;
                }
                black_box(last)
            });
        });
    }

    group.finish();
}

/// Dijkstra-like access pattern: every element is lowered a few times
/// before it is extracted
fn benchmark_decrease_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_priority");

    for &n in &SIZES {
        let priorities = random_priorities(n, 777);
        let mut rng = Lcg::new(4242);
        let targets: Vec<usize> = (0..n * 3).map(|_| rng.next() as usize % n).collect();

        group.bench_with_input(BenchmarkId::new("ternary", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap = TernaryHeap::with_capacity(n);
                let elements: Vec<_> = priorities
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| heap.push(p + 1_000_000, i))
                    .collect();
                for &t in &targets {
                    let element = &elements[t];
                    let current = *element.borrow().priority();
                    if current > 0 {
                        let _ = heap.decrease_priority(element, current / 2);
                    }
                }
                black_box(heap.len())
            });
        });
    }

    group.finish();
}

/// Floyd construction against one insert per element
fn benchmark_bulk_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_build");

    for &n in &SIZES {
        let priorities = random_priorities(n, 99);

        group.bench_with_input(BenchmarkId::new("from_elements", n), &priorities, |b, ps| {
            b.iter(|| {
                let elements = ps.iter().enumerate().map(|(i, &p)| Entry::shared(p, i));
                let heap = TernaryHeap::from_elements(elements).map(|h| h.len());
                black_box(heap)
            });
        });

        group.bench_with_input(BenchmarkId::new("repeated_insert", n), &priorities, |b, ps| {
            b.iter(|| {
                let mut heap = TernaryHeap::with_capacity(ps.len());
                for (i, &p) in ps.iter().enumerate() {
                    heap.push(p, i);
                }
                black_box(heap.len())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_pop,
    benchmark_decrease_priority,
    benchmark_bulk_build,
);

criterion_main!(benches);
