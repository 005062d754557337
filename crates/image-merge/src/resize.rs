//! Optional downscaling applied to every image before its block is built

use crate::types::LabeledImage;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Dimensions after bounding the longer side by `max_side`.
///
/// `max_side == 0` disables the policy. Images already within bounds keep
/// their size.
pub fn scaled_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    if max_side == 0 || (width <= max_side && height <= max_side) {
        return (width, height);
    }

    let scale = |side: u32, pivot: u32| -> u32 {
        let scaled = (side as f64 * max_side as f64 / pivot as f64).round() as u32;
        scaled.clamp(1, max_side)
    };

    if width >= height {
        (max_side, scale(height, width))
    } else {
        (scale(width, height), max_side)
    }
}

/// Copy of `image` whose longer side is at most `max_side`
pub fn resize_to_max(image: &RgbaImage, max_side: u32) -> RgbaImage {
    let (width, height) = scaled_dimensions(image.width(), image.height(), max_side);
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Apply the policy to a loaded item, passing it through untouched when no
/// scaling is needed
pub(crate) fn resize_item(item: LabeledImage, max_side: u32) -> LabeledImage {
    let (width, height) = scaled_dimensions(item.width(), item.height(), max_side);
    if (width, height) == item.image.dimensions() {
        return item;
    }
    log::debug!(
        "Resizing '{}' from {}x{} to {}x{}",
        item.label,
        item.width(),
        item.height(),
        width,
        height
    );
    LabeledImage {
        image: imageops::resize(&item.image, width, height, FilterType::Lanczos3),
        label: item.label,
    }
}
