//! Memory estimation utilities for launch planning.
//!
//! Increment tables are built on the host and copied to the device at
//! kernel launch; these helpers size those buffers ahead of time.

use crate::kernels::BlockGrid;

const ENTRY_BYTES: usize = std::mem::size_of::<i64>();

/// Worst-case bytes for an unstructured increment table over `grid`.
///
/// Covers the case where every block is kept: one table entry per block
/// plus the per-row index and width arrays.
#[must_use]
pub fn unstructured_table_bytes(grid: BlockGrid) -> usize {
    grid.num_blocks() * ENTRY_BYTES + 2 * grid.rows * ENTRY_BYTES
}

/// Expected bytes for an unstructured increment table at drop probability `p`.
///
/// The table length is binomial with mean `num_blocks * (1 - p)`; the
/// per-row metadata arrays are fixed-size regardless of the draw.
#[must_use]
pub fn expected_unstructured_table_bytes(grid: BlockGrid, p: f64) -> usize {
    let expected_kept = (grid.num_blocks() as f64 * (1.0 - p)).ceil() as usize;
    expected_kept * ENTRY_BYTES + 2 * grid.rows * ENTRY_BYTES
}

/// Exact bytes for a structured increment table of `rows` rows keeping `k`
/// blocks each. No per-row metadata exists in the structured layout.
#[must_use]
pub fn structured_table_bytes(rows: usize, k: usize) -> usize {
    rows * k * ENTRY_BYTES
}

/// Format a byte count for logs (B / KB / MB / GB).
#[must_use]
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstructured_bounds() {
        let grid = BlockGrid { rows: 8, cols: 16 };
        let worst = unstructured_table_bytes(grid);
        assert_eq!(worst, (128 + 16) * 8);

        // Expected size shrinks with p but metadata stays fixed.
        let dense = expected_unstructured_table_bytes(grid, 0.0);
        let sparse = expected_unstructured_table_bytes(grid, 0.9);
        assert_eq!(dense, worst);
        assert!(sparse < dense);
        assert!(sparse >= 2 * 8 * 8);
    }

    #[test]
    fn test_structured_exact() {
        assert_eq!(structured_table_bytes(8, 4), 8 * 4 * 8);
        assert_eq!(structured_table_bytes(8, 0), 0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}
