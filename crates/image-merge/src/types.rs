use image::{Rgba, RgbaImage};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Font error: {0}")]
    Font(String),
    /// The compositor was handed an empty block list
    #[error("No images to merge")]
    NoImages,
    /// Every requested input was skipped by the loader
    #[error("Nothing could be loaded from {requested} input file(s)")]
    NothingLoaded {
        requested: usize,
        pdf_requested: bool,
        pdf_backend_available: bool,
    },
}

impl MergeError {
    /// A short suggestion for the end user, when one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            MergeError::NothingLoaded {
                pdf_requested: true,
                pdf_backend_available: false,
                ..
            } => Some("PDF support needs the pdfium library (place it in vendor/pdfium/lib or install it system-wide)"),
            MergeError::NothingLoaded { .. } => {
                Some("Check that the files exist and are supported image or PDF files")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

/// Why a single input produced no entries
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found")]
    Missing,
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("PDF rendering backend unavailable")]
    PdfBackendUnavailable,
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// One loaded source item: a label and its RGBA bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledImage {
    pub label: String,
    pub image: RgbaImage,
}

impl LabeledImage {
    pub fn new(label: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A label bar stacked on top of its image, laid out as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    image: RgbaImage,
}

impl Block {
    pub(crate) fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// An input the loader skipped, kept for diagnostics
#[derive(Debug)]
pub struct SkippedInput {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Result of loading a batch of paths
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully loaded items, in merge order
    pub items: Vec<LabeledImage>,
    pub skipped: Vec<SkippedInput>,
}

/// Requested stacking direction.
///
/// The grid always fills row-major; this value is carried through for
/// front ends but does not change the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// RGBA color, serialized as `[r, g, b, a]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0, 255]);

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color([r, g, b, a])
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Some(Color([channel(0)?, channel(2)?, channel(4)?, alpha]))
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba(color.0)
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| format!("invalid color '{}', expected #RRGGBB or #RRGGBBAA", s))
    }
}
