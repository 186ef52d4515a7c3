// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Blockwise dropout index construction for tiled matmul kernels.
//!
//! Everything here runs on the host control path, once per kernel launch,
//! and produces immutable inputs for the parallel kernel:
//!
//! - [`mask`] - Bernoulli block-drop grids and structured per-row
//!   kept-column selections
//! - [`increment`] - Skip-distance tables a kernel walks with O(1) state
//! - [`swizzle`] - Linear-tile-id to 2D-coordinate remapping for cache
//!   reuse
//!
//! ## Data flow
//!
//! ```text
//! mask generation -> increment table -> (table, metadata) at kernel launch
//! swizzle: evaluated per work-item inside the kernel's tile loop
//! ```

pub mod increment;
pub mod mask;
pub mod swizzle;

pub use increment::{
    mask_to_increment_table, structured_mask_to_increment_table, IncrementTable,
    StructuredIncrementTable,
};
pub use mask::{blockwise_dropout_mask, structured_dropout_mask, BlockGrid};
pub use swizzle::threadblock_swizzle;
