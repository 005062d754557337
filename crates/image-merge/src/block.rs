//! Block building - one label bar stacked on its image

use crate::label::{
    LabelFont, LabelMetrics, fit_label, label_offset_y, label_width_budget, resolve_font,
};
use crate::options::MergeOptions;
use crate::types::{Block, LabeledImage, Result};
use image::imageops;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Everything needed to draw label bars for one merge call.
///
/// The font is resolved once so every block of a merge shares it.
#[derive(Debug)]
pub struct LabelRenderer {
    font: LabelFont,
    metrics: LabelMetrics,
    label_height: u32,
    padding: u32,
    background: Rgba<u8>,
    text_color: Rgba<u8>,
    outline: Option<Rgba<u8>>,
}

impl LabelRenderer {
    /// Resolve a font able to draw every label in `labels`
    pub fn new<'a>(
        options: &MergeOptions,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let sample: String = labels.into_iter().collect();
        let font = resolve_font(
            options.font_size,
            options.bold,
            &options.font_candidates,
            &sample,
        )?;
        Ok(Self::with_font(font, options))
    }

    pub fn with_font(font: LabelFont, options: &MergeOptions) -> Self {
        Self {
            font,
            metrics: LabelMetrics {
                use_estimate: options.use_text_width_estimate,
                char_width: options.estimate_char_width,
                text_height: options.estimate_text_height,
            },
            label_height: options.label_height,
            padding: options.padding,
            background: options.background_color.into(),
            text_color: options.text_color.into(),
            outline: options
                .draw_outline
                .then(|| options.outline_color.into()),
        }
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    pub fn label_height(&self) -> u32 {
        self.label_height
    }

    /// Label text as it will be drawn above an image `image_width` wide
    pub fn fitted_label(&self, label: &str, image_width: u32) -> String {
        let budget = label_width_budget(image_width, self.padding);
        fit_label(label, &self.font, budget, &self.metrics)
    }
}

/// Compose a block: background-filled label bar with the fitted label,
/// the image pasted below it and an optional one-pixel outline.
///
/// The block is exactly as wide as the image. Image pixels replace the
/// background, alpha included.
pub fn build_block(item: &LabeledImage, renderer: &LabelRenderer) -> Block {
    let width = item.width();
    let height = renderer.label_height + item.height();
    let mut canvas = RgbaImage::from_pixel(width, height, renderer.background);

    let text = renderer.fitted_label(&item.label, width);
    let text_y = label_offset_y(&text, &renderer.font, renderer.label_height, &renderer.metrics);
    renderer.font.draw(
        &mut canvas,
        renderer.text_color,
        renderer.padding as i32,
        text_y,
        &text,
    );

    imageops::replace(&mut canvas, &item.image, 0, renderer.label_height as i64);

    if let Some(color) = renderer.outline {
        draw_hollow_rect_mut(&mut canvas, Rect::at(0, 0).of_size(width, height), color);
    }

    log::debug!("Built block '{}' ({}x{})", text, width, height);
    Block::from_image(canvas)
}
