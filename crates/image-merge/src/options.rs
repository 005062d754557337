use crate::constants::*;
use crate::label::FontSource;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-call merge configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MergeOptions {
    // Grid
    pub direction: Direction,
    pub spacing: u32,
    pub columns_per_row: usize,

    // Images
    /// Longest allowed image side in pixels, 0 disables resizing
    pub max_image_size: u32,
    pub pdf_dpi: f32,

    // Label bar
    pub label_height: u32,
    pub padding: u32,
    pub font_size: f32,
    pub bold: bool,
    /// Tried before the platform font list
    pub font_candidates: Vec<FontSource>,
    pub use_text_width_estimate: bool,
    pub estimate_char_width: u32,
    pub estimate_text_height: u32,

    // Colors
    pub background_color: Color,
    pub text_color: Color,
    pub draw_outline: bool,
    pub outline_color: Color,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Vertical,
            spacing: 0,
            columns_per_row: DEFAULT_COLUMNS_PER_ROW,
            max_image_size: 0,
            pdf_dpi: DEFAULT_PDF_DPI,
            label_height: DEFAULT_LABEL_HEIGHT,
            padding: DEFAULT_PADDING,
            font_size: DEFAULT_FONT_SIZE,
            bold: true,
            font_candidates: Vec::new(),
            use_text_width_estimate: false,
            estimate_char_width: ESTIMATE_CHAR_WIDTH,
            estimate_text_height: ESTIMATE_TEXT_HEIGHT,
            background_color: Color::WHITE,
            text_color: Color::BLACK,
            draw_outline: true,
            outline_color: Color::BLACK,
        }
    }
}

impl MergeOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| MergeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MergeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.label_height == 0 {
            return Err(MergeError::Config(
                "Label height must be greater than 0".to_string(),
            ));
        }

        if self.columns_per_row == 0 {
            return Err(MergeError::Config(
                "Columns per row must be greater than 0".to_string(),
            ));
        }

        if self.pdf_dpi.is_nan() || self.pdf_dpi <= 0.0 {
            return Err(MergeError::Config(format!(
                "PDF resolution must be positive, got {}",
                self.pdf_dpi
            )));
        }

        if self.font_size.is_nan() || self.font_size <= 0.0 {
            return Err(MergeError::Config(format!(
                "Font size must be positive, got {}",
                self.font_size
            )));
        }

        if self.use_text_width_estimate && self.estimate_char_width == 0 {
            return Err(MergeError::Config(
                "Estimated character width must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
