use criterion::{criterion_group, criterion_main, Criterion};
use pms::pipeline_merge_sort;
use std::hint::black_box;

fn input(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(7919) % 256) as u8).collect()
}

fn pipeline_1024_bench(c: &mut Criterion) {
    let values = input(1024);
    c.bench_function("pipeline merge sort 1024", |b| {
        b.iter(|| pipeline_merge_sort(black_box(&values)))
    });
}

fn std_sort_1024_bench(c: &mut Criterion) {
    let values = input(1024);
    c.bench_function("std sort_unstable 1024", |b| {
        b.iter(|| {
            let mut v = black_box(values.clone());
            v.sort_unstable();
            v
        })
    });
}

criterion_group!(benches, pipeline_1024_bench, std_sort_1024_bench);
criterion_main!(benches);
