//! Test utilities and fixtures for the increment-table integration tests.
//!
//! The walkers here are reference consumers: they apply the exact walk
//! rule the external reduction kernel uses (first entry of a row is an
//! absolute element offset, every later entry accumulates), so the
//! pipeline tests compare builder output against what a kernel would
//! actually see.

use blockdrop_rs::kernels::{IncrementTable, StructuredIncrementTable};
use candle_core::{Device, Tensor};

/// Build a `U8` mask tensor from literal rows (`1` = dropped).
pub fn mask_from_rows(rows: &[&[u8]]) -> Tensor {
    let height = rows.len();
    let width = rows[0].len();
    let flat: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Tensor::from_vec(flat, (height, width), &Device::Cpu).unwrap()
}

/// Walk one row span by the consumer contract.
pub fn walk_span(span: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(span.len());
    let mut pos = 0i64;
    for (j, &step) in span.iter().enumerate() {
        pos = if j == 0 { step } else { pos + step };
        out.push(pos);
    }
    out
}

/// Reconstruct the absolute kept-block offsets of every row of an
/// unstructured table. Fully dropped rows yield empty vectors and are
/// never dereferenced.
pub fn reconstruct_unstructured(table: &IncrementTable) -> Vec<Vec<i64>> {
    (0..table.rows()).map(|r| walk_span(table.row_span(r))).collect()
}

/// Reconstruct the absolute kept-block offsets of every row of a
/// structured table (fixed `k` iterations per row).
pub fn reconstruct_structured(table: &StructuredIncrementTable) -> Vec<Vec<i64>> {
    (0..table.rows).map(|r| walk_span(table.row(r))).collect()
}

/// The expected offsets for a mask: `col * block_k` for every kept cell,
/// ascending per row.
pub fn kept_offsets(mask: &Tensor, block_k: usize) -> Vec<Vec<i64>> {
    let grid = mask.to_vec2::<u8>().unwrap();
    grid.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell == 0)
                .map(|(col, _)| (col * block_k) as i64)
                .collect()
        })
        .collect()
}
