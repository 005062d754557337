use crate::types::LoadError;
use image::RgbaImage;
use std::path::Path;

#[cfg(all(feature = "pdf", not(target_arch = "wasm32")))]
use crate::constants::PDF_POINTS_PER_INCH;
#[cfg(all(feature = "pdf", not(target_arch = "wasm32")))]
use pdfium_render::prelude::*;

/// Rasterizes PDF pages through pdfium
#[cfg(all(feature = "pdf", not(target_arch = "wasm32")))]
pub struct PdfRasterizer {
    pdfium: Pdfium,
}

#[cfg(all(feature = "pdf", not(target_arch = "wasm32")))]
impl PdfRasterizer {
    /// Bind pdfium, trying the vendored library first, then falling back to system
    pub fn bind() -> Option<Self> {
        // Relative to the working directory, which is the workspace root under cargo
        let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
            p.push("vendor/pdfium/lib");
            if p.exists() { Some(p) } else { None }
        });

        if let Some(vendor_path) = vendor_path {
            if let Ok(binding) =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
            {
                return Some(Self {
                    pdfium: Pdfium::new(binding),
                });
            }
        }

        match Pdfium::bind_to_system_library() {
            Ok(binding) => Some(Self {
                pdfium: Pdfium::new(binding),
            }),
            Err(e) => {
                log::debug!("Failed to bind pdfium: {}", e);
                None
            }
        }
    }

    /// Render every page at `dpi`, all or nothing.
    ///
    /// The document handle is released when this returns, whichever page failed.
    pub fn render_pages(&self, path: &Path, dpi: f32) -> Result<Vec<RgbaImage>, LoadError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| LoadError::Pdf(format!("Failed to open {}: {}", path.display(), e)))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(dpi / PDF_POINTS_PER_INCH);

        let pages = document.pages();
        let mut images = Vec::with_capacity(pages.len() as usize);
        for (index, page) in pages.iter().enumerate() {
            let bitmap = page.render_with_config(&config).map_err(|e| {
                LoadError::Pdf(format!("Failed to render page {}: {}", index + 1, e))
            })?;
            let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
            let image = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(
                || LoadError::Pdf(format!("Page {} produced a truncated bitmap", index + 1)),
            )?;
            images.push(image);
        }

        Ok(images)
    }
}

/// Placeholder used when the crate is built without PDF support
#[cfg(not(all(feature = "pdf", not(target_arch = "wasm32"))))]
pub struct PdfRasterizer {
    _private: (),
}

#[cfg(not(all(feature = "pdf", not(target_arch = "wasm32"))))]
impl PdfRasterizer {
    pub fn bind() -> Option<Self> {
        None
    }

    pub fn render_pages(&self, _path: &Path, _dpi: f32) -> Result<Vec<RgbaImage>, LoadError> {
        Err(LoadError::PdfBackendUnavailable)
    }
}
