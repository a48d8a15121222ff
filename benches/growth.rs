//! Criterion benchmarks for buffer growth, filtering and heap construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use contig::{BinaryHeap, GrowableBuffer, HeapNode};

/// Deterministic pseudo-random priorities.
fn priorities(n: usize) -> Vec<u32> {
    let mut state = 0x9e37_79b9u32;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        })
        .collect()
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for size in [16, 1024, 65536] {
        group.bench_with_input(BenchmarkId::new("push", size), &size, |b, &size| {
            b.iter(|| {
                let mut buf = GrowableBuffer::new();
                for i in 0..size {
                    buf.push(black_box(i)).unwrap();
                }
                black_box(buf)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_baseline", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..size {
                    vec.push(black_box(i));
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("append_default", size), &size, |b, &size| {
            b.iter(|| {
                let mut buf: GrowableBuffer<usize> = GrowableBuffer::new();
                for (i, slot) in buf.append_default(size).unwrap().iter_mut().enumerate() {
                    *slot = i;
                }
                black_box(buf)
            });
        });
    }

    group.finish();
}

fn bench_keep_if(c: &mut Criterion) {
    let mut group = c.benchmark_group("keep_if");
    let input = priorities(4096);

    for (name, modulus) in [("keep_half", 2), ("keep_most", 16)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut buf = GrowableBuffer::from_slice(&input).unwrap();
                buf.retain(|x| x % modulus != 0);
                black_box(buf)
            });
        });
    }

    group.finish();
}

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap");

    for size in [64, 4096] {
        let input = priorities(size);

        group.bench_with_input(BenchmarkId::new("push_each", size), &input, |b, input| {
            b.iter(|| {
                let mut heap: BinaryHeap<u32> = BinaryHeap::new();
                for p in input {
                    heap.push(*p, ()).unwrap();
                }
                black_box(heap)
            });
        });

        group.bench_with_input(BenchmarkId::new("bulk_extend", size), &input, |b, input| {
            b.iter(|| {
                let mut heap: BinaryHeap<u32> = BinaryHeap::new();
                heap.bulk_extend(input.iter().map(|p| HeapNode::new(*p, ())))
                    .unwrap();
                black_box(heap)
            });
        });

        group.bench_with_input(BenchmarkId::new("drain", size), &input, |b, input| {
            b.iter(|| {
                let mut heap: BinaryHeap<u32> =
                    input.iter().map(|p| HeapNode::new(*p, ())).collect();
                while let Some(node) = heap.pop() {
                    black_box(node);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_keep_if, bench_heap);
criterion_main!(benches);
