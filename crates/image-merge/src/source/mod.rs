//! Source loading - turning input paths into labeled RGBA bitmaps
//!
//! Raster files become one entry each. PDFs are rasterized page by page
//! and contribute one entry per page, kept contiguous at the position of
//! their file. Any per-file failure drops that file entirely and is
//! reported in [`LoadReport::skipped`]; it never aborts the batch.

mod pdf;
mod raster;

pub use pdf::PdfRasterizer;

use crate::constants::{DEFAULT_PDF_DPI, PDF_EXTENSION, SUPPORTED_EXTENSIONS};
use crate::types::*;
use std::path::Path;

/// Loads ordered input paths into [`LabeledImage`]s
pub struct SourceLoader {
    pdf: Option<PdfRasterizer>,
    dpi: f32,
}

impl SourceLoader {
    /// Create a loader, binding the PDF backend if it is available
    pub fn new(dpi: f32) -> Self {
        let pdf = PdfRasterizer::bind();
        if pdf.is_none() {
            log::debug!("PDF backend unavailable, PDF inputs will be skipped");
        }
        Self { pdf, dpi }
    }

    /// Create a loader that never renders PDFs
    pub fn without_pdf(dpi: f32) -> Self {
        Self { pdf: None, dpi }
    }

    pub fn pdf_available(&self) -> bool {
        self.pdf.is_some()
    }

    /// Load every path in order, skipping the ones that fail
    pub fn load(&self, paths: &[impl AsRef<Path>]) -> LoadReport {
        let mut report = LoadReport::default();

        for path in paths {
            let path = path.as_ref();
            match self.load_path(path) {
                Ok(items) => {
                    for item in &items {
                        log::debug!(
                            "Loaded '{}' ({}x{})",
                            item.label,
                            item.width(),
                            item.height()
                        );
                    }
                    report.items.extend(items);
                }
                Err(error) => {
                    log::warn!("Skipping {}: {}", path.display(), error);
                    report.skipped.push(SkippedInput {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Load the entries contributed by a single path
    pub fn load_path(&self, path: &Path) -> std::result::Result<Vec<LabeledImage>, LoadError> {
        if !path.is_file() {
            return Err(LoadError::Missing);
        }

        let extension = lowercase_extension(path);
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(LoadError::Unsupported(extension));
        }

        let stem = file_stem_label(path);

        if extension == PDF_EXTENSION {
            let rasterizer = self.pdf.as_ref().ok_or(LoadError::PdfBackendUnavailable)?;
            let pages = rasterizer.render_pages(path, self.dpi)?;
            let page_count = pages.len();
            return Ok(pages
                .into_iter()
                .enumerate()
                .map(|(i, image)| LabeledImage::new(page_label(&stem, i + 1, page_count), image))
                .collect());
        }

        let image = raster::load_raster(path)?;
        Ok(vec![LabeledImage::new(stem, image)])
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PDF_DPI)
    }
}

/// Load paths with a freshly bound loader
pub fn load_images(paths: &[impl AsRef<Path>], dpi: f32) -> LoadReport {
    SourceLoader::new(dpi).load(paths)
}

/// Check whether a path has one of the accepted input extensions
pub fn is_supported_path(path: impl AsRef<Path>) -> bool {
    SUPPORTED_EXTENSIONS.contains(&lowercase_extension(path.as_ref()).as_str())
}

pub(crate) fn is_pdf_path(path: impl AsRef<Path>) -> bool {
    lowercase_extension(path.as_ref()) == PDF_EXTENSION
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// File name without its extension
pub fn file_stem_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Label for a PDF page; single-page documents keep the bare stem
pub fn page_label(stem: &str, page_number: usize, page_count: usize) -> String {
    if page_count > 1 {
        format!("{} ({})", stem, page_number)
    } else {
        stem.to_string()
    }
}
