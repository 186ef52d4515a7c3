//! # blockdrop-rs
//!
//! Index structures for blockwise dropout in tiled matrix-multiplication kernels.
//!
//! Blockwise dropout keeps or drops rectangular blocks of a matrix rather than
//! individual scalars. A tiled reduction kernel iterating over the K dimension
//! must jump directly from one kept block to the next without scanning dropped
//! ones. This crate, built on [Candle](https://github.com/huggingface/candle),
//! provides the host-side pieces of that scheme:
//!
//! - Blockwise dropout masks (unstructured, jagged per row) and structured
//!   per-row kept-column selections (uniform width)
//! - Increment tables: compact skip-distance structures a kernel can walk with
//!   O(1) state per step
//! - Threadblock swizzling for cache-friendly tile visitation order
//! - Memory estimation utilities for launch planning
//!
//! ## Status
//!
//! Mask generation and table construction run on the host control path, once
//! per kernel launch. The consuming matmul kernel is external to this crate;
//! its input contract is documented on each builder.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blockdrop_rs::kernels::{blockwise_dropout_mask, mask_to_increment_table};
//! use candle_core::{Device, Tensor};
//!
//! let x = Tensor::zeros((256, 512), candle_core::DType::F32, &Device::Cpu)?;
//! let mask = blockwise_dropout_mask(&x, (32, 32), 0.5)?;
//! let table = mask_to_increment_table(&mask, 32)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod kernels;
pub mod memory;

pub use error::{BlockdropError, Result};
