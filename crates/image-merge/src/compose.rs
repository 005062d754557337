//! Grid compositing - pasting blocks onto the final canvas

use crate::layout::compute_grid;
use crate::types::{Block, Result};
use image::imageops;
use image::{Rgba, RgbaImage};

/// Arrange `blocks` row-major and paste them onto one canvas.
///
/// A single block is returned as is. Gaps left by spacing or by blocks
/// shorter than their row are filled with `background`.
pub fn compose_grid(
    mut blocks: Vec<Block>,
    columns_per_row: usize,
    spacing: u32,
    background: Rgba<u8>,
) -> Result<RgbaImage> {
    let sizes: Vec<(u32, u32)> = blocks.iter().map(|b| (b.width(), b.height())).collect();
    let grid = compute_grid(&sizes, columns_per_row, spacing)?;

    if blocks.len() == 1 {
        if let Some(block) = blocks.pop() {
            return Ok(block.into_image());
        }
    }

    let mut canvas = RgbaImage::from_pixel(grid.width, grid.height, background);
    for (block, placement) in blocks.iter().zip(&grid.placements) {
        imageops::replace(
            &mut canvas,
            block.image(),
            placement.x as i64,
            placement.y as i64,
        );
    }

    log::info!(
        "Composed {} block(s) in {} row(s) into {}x{}",
        blocks.len(),
        grid.row_count(),
        grid.width,
        grid.height
    );
    Ok(canvas)
}
