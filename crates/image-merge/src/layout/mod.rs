//! Grid layout calculation
//!
//! Blocks are chunked row-major into rows of at most `columns_per_row`,
//! in input order. This module computes where each block lands and how
//! large the canvas must be; it never touches pixels.

mod grid;

pub use grid::compute_grid;

/// Placement of one block on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

/// One row of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    /// Index of the first block in this row
    pub start: usize,
    /// Number of blocks in this row
    pub len: usize,
    /// Offset of the row's top edge
    pub y: u32,
    /// Tallest block in the row
    pub height: u32,
    /// Block widths plus spacing between them
    pub width: u32,
}

/// Full grid arrangement for a sequence of blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: Vec<RowLayout>,
    /// One placement per block, in input order
    pub placements: Vec<Placement>,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
