//! Merge pipeline
//!
//! Loading → resize policy → block building → grid compositing. Each call
//! owns everything it touches, so merges can run from any thread.

use crate::block::{LabelRenderer, build_block};
use crate::compose::compose_grid;
use crate::options::MergeOptions;
use crate::resize::resize_item;
use crate::source::{SourceLoader, is_pdf_path};
use crate::types::*;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Result of merging a list of files
#[derive(Debug)]
pub struct MergeOutcome {
    pub canvas: RgbaImage,
    /// Number of blocks on the canvas (PDF pages count individually)
    pub block_count: usize,
    /// Inputs the loader had to skip
    pub skipped: Vec<SkippedInput>,
}

/// Merge already loaded items into one canvas
pub fn merge_images(items: Vec<LabeledImage>, options: &MergeOptions) -> Result<RgbaImage> {
    options.validate()?;
    if items.is_empty() {
        return Err(MergeError::NoImages);
    }

    let renderer = LabelRenderer::new(options, items.iter().map(|item| item.label.as_str()))?;
    merge_with_renderer(items, options, &renderer)
}

/// Merge with a caller-provided label renderer
pub fn merge_with_renderer(
    items: Vec<LabeledImage>,
    options: &MergeOptions,
    renderer: &LabelRenderer,
) -> Result<RgbaImage> {
    if options.direction == Direction::Horizontal {
        log::debug!("Horizontal direction requested, grid still fills row by row");
    }

    let blocks = items
        .into_iter()
        .map(|item| build_block(&resize_item(item, options.max_image_size), renderer))
        .collect();

    compose_grid(
        blocks,
        options.columns_per_row,
        options.spacing,
        options.background_color.into(),
    )
}

/// Load `paths` in order and merge whatever loaded.
///
/// # Errors
/// [`MergeError::NothingLoaded`] when every input was skipped.
pub fn merge_files(paths: &[impl AsRef<Path>], options: &MergeOptions) -> Result<MergeOutcome> {
    options.validate()?;

    let loader = SourceLoader::new(options.pdf_dpi);
    let report = loader.load(paths);

    if report.items.is_empty() {
        return Err(MergeError::NothingLoaded {
            requested: paths.len(),
            pdf_requested: paths.iter().any(|p| is_pdf_path(p)),
            pdf_backend_available: loader.pdf_available(),
        });
    }

    let block_count = report.items.len();
    let canvas = merge_images(report.items, options)?;

    Ok(MergeOutcome {
        canvas,
        block_count,
        skipped: report.skipped,
    })
}

/// [`merge_files`] on the blocking thread pool
pub async fn merge_files_async(paths: Vec<PathBuf>, options: MergeOptions) -> Result<MergeOutcome> {
    tokio::task::spawn_blocking(move || merge_files(&paths, &options)).await?
}
