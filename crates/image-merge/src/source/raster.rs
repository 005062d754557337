use crate::types::LoadError;
use image::{ImageReader, RgbaImage};
use std::path::Path;

/// Decode a raster file into RGBA
pub(super) fn load_raster(path: &Path) -> Result<RgbaImage, LoadError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.into_rgba8())
}
