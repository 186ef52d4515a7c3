//! Benchmarks for the host-side launch path.
//!
//! Mask sampling and table construction run once per kernel launch, so
//! their cost is paid on the critical path of every training step. The
//! swizzle benchmark measures the per-work-item arithmetic a kernel
//! re-evaluates redundantly instead of reading a shared table.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use blockdrop_rs::kernels::{
    blockwise_dropout_mask, mask_to_increment_table, structured_dropout_mask,
    structured_mask_to_increment_table, threadblock_swizzle,
};
use candle_core::{DType, Device, Tensor};

/// Matrix sizes spanning small layers to large MLP blocks.
const MATRIX_SIZES: &[usize] = &[512, 2048, 8192];
const BLOCK_SIZE: (usize, usize) = (32, 32);
const BLOCK_K: usize = 32;

fn benchmark_mask_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_generation");
    let device = Device::Cpu;

    for &size in MATRIX_SIZES {
        let x = Tensor::zeros((size, size), DType::F32, &device).unwrap();

        group.bench_with_input(BenchmarkId::new("unstructured", size), &x, |b, x| {
            b.iter(|| blockwise_dropout_mask(x, BLOCK_SIZE, 0.5).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("structured", size), &x, |b, x| {
            b.iter(|| structured_dropout_mask(x, BLOCK_SIZE, 0.5).unwrap());
        });
    }
    group.finish();
}

fn benchmark_table_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("increment_table");
    let device = Device::Cpu;

    for &size in MATRIX_SIZES {
        let x = Tensor::zeros((size, size), DType::F32, &device).unwrap();
        let mask = blockwise_dropout_mask(&x, BLOCK_SIZE, 0.5).unwrap();
        let sel = structured_dropout_mask(&x, BLOCK_SIZE, 0.5).unwrap();

        group.bench_with_input(BenchmarkId::new("unstructured", size), &mask, |b, mask| {
            b.iter(|| mask_to_increment_table(mask, BLOCK_K).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("structured", size), &sel, |b, sel| {
            b.iter(|| structured_mask_to_increment_table(sel, BLOCK_K).unwrap());
        });
    }
    group.finish();
}

fn benchmark_swizzle(c: &mut Criterion) {
    let mut group = c.benchmark_group("swizzle");

    for &(grid_m, grid_n) in &[(64usize, 64usize), (256, 256)] {
        let id = format!("{grid_m}x{grid_n}");
        group.bench_function(BenchmarkId::new("full_grid", &id), |b| {
            b.iter(|| {
                let mut acc = 0usize;
                for pid in 0..grid_m * grid_n {
                    let (m, n) = threadblock_swizzle(pid, grid_m, grid_n, 8);
                    acc = acc.wrapping_add(m ^ n);
                }
                acc
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_mask_generation,
    benchmark_table_construction,
    benchmark_swizzle
);
criterion_main!(benches);
