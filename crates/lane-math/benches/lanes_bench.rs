// SPDX-License-Identifier: LGPL-3.0-or-later

//! Criterion benchmarks for lane operations and buffer kernels.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lane_math::lanes::{LaneTraits, Portable, Scalar};
use lane_math::math::{horizontal, packed};

/// Deterministic buffer in `[-1, 1]`.
fn signal(len: usize) -> Vec<f32> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as i32) as f32 / (i32::MAX as f32)
        })
        .collect()
}

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanes_f64x3");
    type P = LaneTraits<f64, 3, Portable>;
    type S = LaneTraits<f64, 3, Scalar>;
    let a = [0.25, -1.5, 3.0];
    let b = [2.0, 0.5, -0.75];

    group.bench_function("portable/fm_add+dot", |bench| {
        let (x, y) = (P::from_array(a), P::from_array(b));
        bench.iter(|| P::dot(P::fm_add(black_box(x), black_box(y), x), y))
    });
    group.bench_function("scalar/fm_add+dot", |bench| {
        let (x, y) = (S::from_array(a), S::from_array(b));
        bench.iter(|| S::dot(S::fm_add(black_box(x), black_box(y), x), y))
    });
    group.bench_function("portable/sin", |bench| {
        let x = P::from_array(a);
        bench.iter(|| P::sin(black_box(x)))
    });
    group.finish();
}

fn bench_packed(c: &mut Criterion) {
    let mut group = c.benchmark_group("packed");
    for &len in &[63usize, 256, 4096] {
        let a = signal(len);
        let b = signal(len + 1);
        let mut dst = vec![0.0f32; len];
        group.bench_with_input(BenchmarkId::new("mul", len), &len, |bench, _| {
            bench.iter(|| packed::single::mul(black_box(&mut dst), black_box(&a), black_box(&b)))
        });
        group.bench_with_input(BenchmarkId::new("sin", len), &len, |bench, _| {
            bench.iter(|| packed::single::sin(black_box(&mut dst), black_box(&a)))
        });
    }
    group.finish();
}

fn bench_horizontal(c: &mut Criterion) {
    let mut group = c.benchmark_group("horizontal");
    for &len in &[63usize, 256, 4096] {
        let a = signal(len);
        group.bench_with_input(BenchmarkId::new("sum", len), &len, |bench, _| {
            bench.iter(|| horizontal::single::sum(black_box(&a)))
        });
        group.bench_with_input(BenchmarkId::new("min_max", len), &len, |bench, _| {
            bench.iter(|| horizontal::single::min_max(black_box(&a)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backends, bench_packed, bench_horizontal);
criterion_main!(benches);
