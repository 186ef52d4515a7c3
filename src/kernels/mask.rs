//! Blockwise dropout mask generation.
//!
//! Dropout here operates on rectangular blocks of a matrix: each block is
//! independently kept or dropped as a unit. Two flavors are provided:
//!
//! - **Unstructured**: every block-grid cell is an i.i.d. Bernoulli draw, so
//!   each row may keep a different number of blocks (jagged).
//! - **Structured**: every row keeps exactly `k = round(cols * (1 - p))`
//!   column blocks, so a consuming kernel can loop a fixed `k` times with no
//!   per-row width lookup.
//!
//! Masks are sampled on the CPU device regardless of where the input tensor
//! lives; only the input's shape is read.

use candle_core::{Device, Tensor};

use crate::error::{BlockdropError, Result};

/// Logical partition of an `M x N` matrix into equal-size blocks.
///
/// The final row/column of blocks may be partial but still counts as one
/// grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    /// Number of block rows, `ceil(M / block_rows)`.
    pub rows: usize,
    /// Number of block columns, `ceil(N / block_cols)`.
    pub cols: usize,
}

impl BlockGrid {
    /// Compute the block grid covering an `m x n` matrix.
    ///
    /// # Arguments
    /// * `m` - Matrix rows
    /// * `n` - Matrix columns
    /// * `block_size` - Block extent as `(block_rows, block_cols)`, both non-zero
    #[must_use]
    pub fn for_matrix(m: usize, n: usize, block_size: (usize, usize)) -> Self {
        debug_assert!(block_size.0 > 0 && block_size.1 > 0);
        Self {
            rows: m.div_ceil(block_size.0),
            cols: n.div_ceil(block_size.1),
        }
    }

    /// Total number of blocks in the grid.
    #[must_use]
    pub fn num_blocks(&self) -> usize {
        self.rows * self.cols
    }
}

fn validate_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(BlockdropError::InvalidProbability(p));
    }
    Ok(())
}

fn validate_block_size(block_size: (usize, usize)) -> Result<()> {
    if block_size.0 == 0 || block_size.1 == 0 {
        return Err(BlockdropError::InvalidShape {
            expected: "non-zero block dimensions",
            actual: vec![block_size.0, block_size.1],
        });
    }
    Ok(())
}

/// Sample an unstructured blockwise dropout mask for a matrix.
///
/// Each block-grid cell is independently `1` (dropped) with probability `p`.
/// Leading dimensions of `x` are treated as batch dimensions and carried
/// through to the mask shape.
///
/// # Arguments
/// * `x` - Input tensor of shape `[..., m, n]`; only the shape is read
/// * `block_size` - Block extent as `(block_rows, block_cols)`
/// * `p` - Drop probability in `[0, 1]`
///
/// # Returns
/// `U8` tensor of shape `[..., ceil(m / block_rows), ceil(n / block_cols)]`
/// on the CPU device, `1` = block dropped.
///
/// # Errors
/// Returns `InvalidProbability` if `p` is outside `[0, 1]`, `InvalidShape`
/// if `x` has rank < 2 or a block dimension is zero.
pub fn blockwise_dropout_mask(
    x: &Tensor,
    block_size: (usize, usize),
    p: f64,
) -> Result<Tensor> {
    validate_probability(p)?;
    validate_block_size(block_size)?;

    let dims = x.dims();
    if dims.len() < 2 {
        return Err(BlockdropError::InvalidShape {
            expected: "rank >= 2 input (leading dims are batch)",
            actual: dims.to_vec(),
        });
    }

    let (m, n) = (dims[dims.len() - 2], dims[dims.len() - 1]);
    let grid = BlockGrid::for_matrix(m, n, block_size);

    let mut mask_shape = dims[..dims.len() - 2].to_vec();
    mask_shape.push(grid.rows);
    mask_shape.push(grid.cols);

    let noise = Tensor::rand(0f32, 1f32, mask_shape, &Device::Cpu)?;
    let mask = noise.lt(p as f32)?;

    tracing::debug!(
        "sampled {}x{} block mask (p={}) for input shape {:?}",
        grid.rows,
        grid.cols,
        p,
        dims
    );
    Ok(mask)
}

/// Sample a structured dropout selection for a 2D matrix.
///
/// Every row of the block grid keeps exactly `k = round(cols * (1 - p))`
/// column blocks, drawn as the first `k` entries of an independent uniform
/// random permutation per row and then sorted ascending. Sortedness is what
/// lets the increment-table builder accumulate monotonic offsets.
///
/// Batched input is rejected: the uniform-width selection is only defined
/// per single matrix.
///
/// # Arguments
/// * `x` - Input tensor of shape `[m, n]`; only the shape is read
/// * `block_size` - Block extent as `(block_rows, block_cols)`
/// * `p` - Drop probability in `[0, 1]`
///
/// # Returns
/// `U32` tensor of shape `[ceil(m / block_rows), k]` on the CPU device;
/// each row holds the kept column-block indices in ascending order.
///
/// # Errors
/// Returns `InvalidProbability` if `p` is outside `[0, 1]`, `InvalidShape`
/// if `x` is not rank 2 or a block dimension is zero.
pub fn structured_dropout_mask(
    x: &Tensor,
    block_size: (usize, usize),
    p: f64,
) -> Result<Tensor> {
    validate_probability(p)?;
    validate_block_size(block_size)?;

    let dims = x.dims();
    if dims.len() != 2 {
        return Err(BlockdropError::InvalidShape {
            expected: "rank-2 input (structured selection is per single matrix)",
            actual: dims.to_vec(),
        });
    }

    let grid = BlockGrid::for_matrix(dims[0], dims[1], block_size);
    let k = ((grid.cols as f64) * (1.0 - p)).round() as usize;

    if k == 0 {
        return Ok(Tensor::from_vec(
            Vec::<u32>::new(),
            (grid.rows, 0),
            &Device::Cpu,
        )?);
    }

    // Argsort of uniform noise is a uniform random permutation per row.
    let noise = Tensor::rand(0f32, 1f32, (grid.rows, grid.cols), &Device::Cpu)?;
    let perm = noise.arg_sort_last_dim(true)?;
    let mut kept = perm.narrow(1, 0, k)?.to_vec2::<u32>()?;
    for row in &mut kept {
        row.sort_unstable();
    }

    tracing::debug!(
        "structured selection: {} rows keeping {}/{} column blocks (p={})",
        grid.rows,
        k,
        grid.cols,
        p
    );

    let flat: Vec<u32> = kept.into_iter().flatten().collect();
    Ok(Tensor::from_vec(flat, (grid.rows, k), &Device::Cpu)?)
}
