// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Blockwise dropout example demonstrating the full launch-path pipeline.
//!
//! This example shows how to:
//! - Sample an unstructured block mask and build its increment table
//! - Sample a structured selection and build the dense table
//! - Map linear tile ids to 2D coordinates with the threadblock swizzle
//!
//! Run with: `cargo run --example blockwise_dropout`

use anyhow::Result;
use blockdrop_rs::kernels::{
    blockwise_dropout_mask, mask_to_increment_table, structured_dropout_mask,
    structured_mask_to_increment_table, threadblock_swizzle, BlockGrid,
};
use blockdrop_rs::memory::{format_bytes, unstructured_table_bytes};
use candle_core::{DType, Device, Tensor};

fn main() -> Result<()> {
    println!("=== Blockwise Dropout Example ===\n");

    let device = Device::Cpu;
    let (m, n) = (128, 160);
    let block_size = (32, 32);
    let block_k = 32;
    let p = 0.4;

    let grid = BlockGrid::for_matrix(m, n, block_size);
    println!("Matrix {m}x{n}, blocks {}x{}:", block_size.0, block_size.1);
    println!("  Block grid: {}x{} ({} blocks)", grid.rows, grid.cols, grid.num_blocks());
    println!(
        "  Worst-case table size: {}\n",
        format_bytes(unstructured_table_bytes(grid))
    );

    let x = Tensor::zeros((m, n), DType::F32, &device)?;

    // Unstructured: i.i.d. Bernoulli per block, jagged rows.
    println!("Unstructured mask (p = {p}):");
    let mask = blockwise_dropout_mask(&x, block_size, p)?;
    for row in mask.to_vec2::<u8>()? {
        println!("  {row:?}");
    }

    let table = mask_to_increment_table(&mask, block_k)?;
    println!("  table     = {:?}", table.table);
    println!("  row_index = {:?}", table.row_index);
    println!("  row_width = {:?}\n", table.row_width);

    // Structured: every row keeps the same number of column blocks.
    println!("Structured selection (p = {p}):");
    let sel = structured_dropout_mask(&x, block_size, p)?;
    let stable = structured_mask_to_increment_table(&sel, block_k)?;
    println!("  kept indices = {:?}", sel.to_vec2::<u32>()?);
    for r in 0..stable.rows {
        println!("  row {r} increments = {:?}", stable.row(r));
    }
    println!();

    // Swizzled tile traversal for a 4x4 launch grid, bands of 2 rows.
    println!("Swizzled traversal (grid 4x4, GROUP_M = 2):");
    let order: Vec<(usize, usize)> = (0..16).map(|pid| threadblock_swizzle(pid, 4, 4, 2)).collect();
    println!("  {order:?}");

    Ok(())
}
