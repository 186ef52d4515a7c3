// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Pointer increment tables for skipping dropped blocks.
//!
//! A tiled reduction kernel walking the K dimension of a block-dropped
//! operand needs to jump from one kept block straight to the next. The
//! increment table encodes, per kept block, the element distance from the
//! previous kept block's start; the first entry of every row is the
//! absolute column offset. A kernel therefore needs one running pointer
//! and no scanning of dropped blocks.
//!
//! ## Layouts
//!
//! - [`IncrementTable`] (unstructured masks): rows keep varying numbers of
//!   blocks, so entries live in one flat arena plus per-row start/width
//!   arrays, CSR-style.
//! - [`StructuredIncrementTable`] (structured selections): every row keeps
//!   exactly `k` blocks, so the table is a dense `rows x k` grid with no
//!   row metadata at all.
//!
//! ## Consumer contract
//!
//! For row `r`, iterate `row_width[r]` entries starting at `row_index[r]`
//! (unstructured) or `k` entries unconditionally (structured); treat the
//! first entry as an absolute offset and accumulate each subsequent entry.
//! A row with `row_width[r] == 0` has no kept blocks and must not be
//! dereferenced.

use candle_core::{Device, Tensor};

use crate::error::{BlockdropError, Result};

/// Skip-distance table for an unstructured (jagged) blockwise dropout mask.
///
/// One flat entry buffer plus per-row offset/width arrays; see the module
/// docs for the walk rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementTable {
    /// One entry per kept block, row-major. Entry `row_index[r]` is the
    /// absolute element offset of row `r`'s first kept block; later entries
    /// in the row's span are element distances from the previous kept block.
    pub table: Vec<i64>,
    /// Start of each row's span in `table`; non-decreasing, starts at 0.
    pub row_index: Vec<usize>,
    /// Number of kept blocks per row; `sum == table.len()`.
    pub row_width: Vec<usize>,
}

impl IncrementTable {
    /// Number of mask rows the table covers.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_width.len()
    }

    /// Total number of kept blocks across all rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the mask dropped every block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The span of entries for row `r`. Empty for a fully dropped row.
    ///
    /// # Panics
    /// Panics if `r` is out of bounds.
    #[must_use]
    pub fn row_span(&self, r: usize) -> &[i64] {
        let start = self.row_index[r];
        &self.table[start..start + self.row_width[r]]
    }

    /// Convert to `I64` tensors `(table, row_index, row_width)` for kernel
    /// launch handoff.
    ///
    /// # Errors
    /// Returns error if tensor creation fails.
    pub fn to_tensors(&self, device: &Device) -> Result<(Tensor, Tensor, Tensor)> {
        let table = Tensor::from_vec(self.table.clone(), self.table.len(), device)?;
        let index: Vec<i64> = self.row_index.iter().map(|&v| v as i64).collect();
        let width: Vec<i64> = self.row_width.iter().map(|&v| v as i64).collect();
        let rows = self.row_index.len();
        Ok((
            table,
            Tensor::from_vec(index, rows, device)?,
            Tensor::from_vec(width, rows, device)?,
        ))
    }
}

/// Convert an unstructured blockwise dropout mask to an increment table.
///
/// # Arguments
/// * `mask` - Rank-2 `U8` block grid, `1` = block dropped
/// * `block_k` - Element width of one column block
///
/// # Returns
/// An [`IncrementTable`] whose row spans reconstruct, via the
/// absolute-then-accumulate walk, the ascending `col * block_k` offsets of
/// every kept block per row.
///
/// # Errors
/// Returns `InvalidShape` if `mask` is not rank 2; candle errors propagate
/// if `mask` is not a `U8` tensor.
pub fn mask_to_increment_table(mask: &Tensor, block_k: usize) -> Result<IncrementTable> {
    if mask.rank() != 2 {
        return Err(BlockdropError::InvalidShape {
            expected: "rank-2 block mask",
            actual: mask.dims().to_vec(),
        });
    }
    let grid = mask.to_vec2::<u8>()?;

    let row_width: Vec<usize> = grid
        .iter()
        .map(|row| row.iter().filter(|&&cell| cell == 0).count())
        .collect();

    // Exclusive prefix sum: row_index[r] = kept blocks in rows 0..r.
    let mut row_index = Vec::with_capacity(row_width.len());
    let mut total = 0usize;
    for &width in &row_width {
        row_index.push(total);
        total += width;
    }

    // Absolute element offsets of every kept block, row-major.
    let mut offsets = Vec::with_capacity(total);
    for row in &grid {
        for (col, &cell) in row.iter().enumerate() {
            if cell == 0 {
                offsets.push((col * block_k) as i64);
            }
        }
    }

    // Flat first difference over the whole enumeration. Only valid within a
    // row; row boundaries are corrected below.
    let mut table = Vec::with_capacity(total);
    let mut prev = 0i64;
    for &offset in &offsets {
        table.push(offset - prev);
        prev = offset;
    }

    // Each row's first entry must hold the absolute offset, not the delta
    // from the previous row's last kept block. Boundaries past the end of
    // the table are skipped; that happens when the entire last row is
    // dropped.
    for &start in &row_index {
        if start < table.len() {
            table[start] = offsets[start];
        }
    }

    let degenerate = row_width.iter().filter(|&&w| w == 0).count();
    tracing::debug!(
        "increment table: {} kept blocks across {} rows ({} fully dropped)",
        total,
        row_width.len(),
        degenerate
    );

    Ok(IncrementTable {
        table,
        row_index,
        row_width,
    })
}

/// Skip-distance table for a structured selection.
///
/// Dense row-major `rows x width` grid; every row has exactly `width`
/// entries, so no per-row metadata is needed and a kernel can loop a fixed
/// number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredIncrementTable {
    /// Entries, row-major. Same walk rule as the unstructured table.
    pub table: Vec<i64>,
    /// Number of rows.
    pub rows: usize,
    /// Kept blocks per row (`k`).
    pub width: usize,
}

impl StructuredIncrementTable {
    /// The entries for row `r`.
    ///
    /// # Panics
    /// Panics if `r` is out of bounds.
    #[must_use]
    pub fn row(&self, r: usize) -> &[i64] {
        &self.table[r * self.width..(r + 1) * self.width]
    }

    /// Convert to an `I64` tensor of shape `(rows, width)` for kernel
    /// launch handoff.
    ///
    /// # Errors
    /// Returns error if tensor creation fails.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        Ok(Tensor::from_vec(
            self.table.clone(),
            (self.rows, self.width),
            device,
        )?)
    }
}

/// Convert a structured kept-index selection to a dense increment table.
///
/// Row-wise first difference with an implicit leading zero, scaled by
/// `block_k`: entry `[r][0]` is `indices[r][0] * block_k` (absolute), entry
/// `[r][j]` is `(indices[r][j] - indices[r][j-1]) * block_k`. Rows are
/// assumed ascending, as produced by
/// [`structured_dropout_mask`](super::mask::structured_dropout_mask).
///
/// # Arguments
/// * `indices` - Rank-2 `U32` grid of kept column-block indices
/// * `block_k` - Element width of one column block
///
/// # Errors
/// Returns `InvalidShape` if `indices` is not rank 2; candle errors
/// propagate if `indices` is not a `U32` tensor.
pub fn structured_mask_to_increment_table(
    indices: &Tensor,
    block_k: usize,
) -> Result<StructuredIncrementTable> {
    if indices.rank() != 2 {
        return Err(BlockdropError::InvalidShape {
            expected: "rank-2 kept-index grid",
            actual: indices.dims().to_vec(),
        });
    }
    let (rows, width) = indices.dims2()?;

    if width == 0 {
        return Ok(StructuredIncrementTable {
            table: Vec::new(),
            rows,
            width,
        });
    }

    let grid = indices.to_vec2::<u32>()?;
    let mut table = Vec::with_capacity(rows * width);
    for row in &grid {
        let mut prev = 0i64;
        for &idx in row {
            let cur = i64::from(idx);
            table.push((cur - prev) * block_k as i64);
            prev = cur;
        }
    }

    Ok(StructuredIncrementTable { table, rows, width })
}
