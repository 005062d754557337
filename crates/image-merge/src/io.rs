//! Encoding and saving the merged canvas

use crate::constants::JPEG_QUALITY;
use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, keeps alpha
    Png,
    /// Alpha flattened onto the background color
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from the path's extension, PNG unless it is JPEG
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match lowercase_extension(path.as_ref()).as_str() {
            "jpg" | "jpeg" => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Append `.png` to paths that do not already end in a writable extension
pub fn normalize_output_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match lowercase_extension(path).as_str() {
        "png" | "jpg" | "jpeg" => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".png");
            PathBuf::from(name)
        }
    }
}

/// Composite every pixel over an opaque `background`
pub fn flatten_alpha(canvas: &RgbaImage, background: Rgba<u8>) -> RgbImage {
    let blend = |src: u8, bg: u8, alpha: u8| -> u8 {
        let alpha = alpha as u32;
        ((src as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
    };

    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgba([r, g, b, a]) = *canvas.get_pixel(x, y);
        Rgb([
            blend(r, background[0], a),
            blend(g, background[1], a),
            blend(b, background[2], a),
        ])
    })
}

/// Encode the canvas in memory
pub fn encode_canvas(
    canvas: &RgbaImage,
    format: OutputFormat,
    background: Rgba<u8>,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        }
        OutputFormat::Jpeg => {
            let flattened = flatten_alpha(canvas, background);
            flattened.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))?;
        }
    }
    Ok(bytes)
}

/// Save the canvas, returning the path actually written
pub fn save_canvas(
    canvas: &RgbaImage,
    path: impl AsRef<Path>,
    background: Rgba<u8>,
) -> Result<PathBuf> {
    let path = normalize_output_path(path);
    let bytes = encode_canvas(canvas, OutputFormat::from_path(&path), background)?;
    std::fs::write(&path, bytes)?;
    log::info!("Saved {}", path.display());
    Ok(path)
}

/// Save the canvas, encoding on the blocking thread pool
pub async fn save_canvas_async(
    canvas: RgbaImage,
    path: impl AsRef<Path>,
    background: Rgba<u8>,
) -> Result<PathBuf> {
    let path = normalize_output_path(path);
    let format = OutputFormat::from_path(&path);
    let bytes =
        tokio::task::spawn_blocking(move || encode_canvas(&canvas, format, background)).await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved {}", path.display());
    Ok(path)
}
