// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Error types for blockdrop-rs.

use thiserror::Error;

/// Result type alias for blockdrop-rs operations.
pub type Result<T> = std::result::Result<T, BlockdropError>;

/// Errors that can occur in blockdrop-rs operations.
///
/// All errors are raised synchronously at construction time with no
/// partial output; callers should treat any of them as a signal to
/// abort the current kernel launch.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BlockdropError {
    /// Input dimensionality or blocking incompatible with the operation.
    #[error("invalid shape: expected {expected}, got {actual:?}")]
    InvalidShape {
        /// What the operation requires
        expected: &'static str,
        /// Actual input dimensions
        actual: Vec<usize>,
    },

    /// Drop probability outside `[0, 1]`.
    #[error("invalid probability: {0} is not in [0, 1]")]
    InvalidProbability(f64),

    /// Candle error.
    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),
}
