// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Threadblock swizzling for cache-friendly tile traversal.
//!
//! A matmul launch grid assigns one linear id per output tile. Visiting
//! tiles in plain row-major order streams the full B operand for every
//! single row of A tiles. Grouped ordering instead walks bands of up to
//! `GROUP_M` tile rows column-major, so consecutive work-items share the
//! same band of A tiles across many B columns before the band advances.
//!
//! The mapping is closed-form arithmetic with no stored state. Every
//! work-item re-evaluates it independently; nothing is precomputed or
//! shared, so no cross-work-item synchronization exists for this path.

/// Map a linear tile id to a `(tile_m, tile_n)` coordinate in grouped order.
///
/// Tiles are grouped into bands of up to `group_m` rows. Within a band the
/// traversal is column-major; the last band may be partial and wraps at its
/// actual height. The mapping is a bijection from `[0, grid_m * grid_n)`
/// onto the tile grid for any positive `grid_m`, `grid_n`, `group_m`.
///
/// # Arguments
/// * `pid` - Linear tile id, `pid < grid_m * grid_n`
/// * `grid_m` - Number of tiles along the M output dimension
/// * `grid_n` - Number of tiles along the N output dimension
/// * `group_m` - Tile rows per band
#[must_use]
pub fn threadblock_swizzle(
    pid: usize,
    grid_m: usize,
    grid_n: usize,
    group_m: usize,
) -> (usize, usize) {
    debug_assert!(grid_m > 0 && grid_n > 0 && group_m > 0);
    debug_assert!(pid < grid_m * grid_n);

    let width = group_m * grid_n;
    let group_id = pid / width;
    let group_size = group_m.min(grid_m - group_id * group_m);
    let tile_m = group_id * group_m + pid % group_size;
    let tile_n = (pid % width) / group_size;
    (tile_m, tile_n)
}
