use super::{GridLayout, Placement, RowLayout};
use crate::types::{MergeError, Result};

// =============================================================================
// Grid Creation
// =============================================================================

/// Compute the grid for blocks of the given `(width, height)` sizes.
///
/// Rows hold consecutive blocks, at most `columns_per_row` each. A row is
/// as tall as its tallest block and blocks are top-aligned within it.
/// The canvas is as wide as the widest row and as tall as all rows plus
/// the spacing between them.
///
/// # Errors
/// [`MergeError::NoImages`] for an empty size list and
/// [`MergeError::Config`] when `columns_per_row` is zero.
pub fn compute_grid(
    sizes: &[(u32, u32)],
    columns_per_row: usize,
    spacing: u32,
) -> Result<GridLayout> {
    if sizes.is_empty() {
        return Err(MergeError::NoImages);
    }
    if columns_per_row == 0 {
        return Err(MergeError::Config(
            "Columns per row must be greater than 0".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(sizes.len().div_ceil(columns_per_row));
    let mut placements = Vec::with_capacity(sizes.len());
    let mut y = 0u32;

    for (row_index, row) in sizes.chunks(columns_per_row).enumerate() {
        if row_index > 0 {
            y += spacing;
        }

        let mut x = 0u32;
        for (column, &(width, _)) in row.iter().enumerate() {
            if column > 0 {
                x += spacing;
            }
            placements.push(Placement { x, y });
            x += width;
        }

        let height = row.iter().map(|&(_, h)| h).max().unwrap_or(0);
        rows.push(RowLayout {
            start: row_index * columns_per_row,
            len: row.len(),
            y,
            height,
            width: x,
        });
        y += height;
    }

    let width = rows.iter().map(|row| row.width).max().unwrap_or(0);

    Ok(GridLayout {
        rows,
        placements,
        width,
        height: y,
    })
}

// =============================================================================
// Tests
// =============================================================================
