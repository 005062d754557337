//! Shared constants for image merging
//!
//! Defaults for the merge options and the fixed numbers used by the
//! label fitting fallbacks live here.

// =============================================================================
// Input
// =============================================================================

/// File extensions accepted as merge inputs (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif", "pdf",
];

/// Extension handled by the PDF loader
pub const PDF_EXTENSION: &str = "pdf";

/// PDF user space units per inch
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Resolution PDF pages are rasterized at
pub const DEFAULT_PDF_DPI: f32 = 150.0;

// =============================================================================
// Layout
// =============================================================================

/// Height of the label bar above each image (pixels)
pub const DEFAULT_LABEL_HEIGHT: u32 = 44;

/// Blocks per grid row
pub const DEFAULT_COLUMNS_PER_ROW: usize = 3;

/// Horizontal inset of the label text (pixels)
pub const DEFAULT_PADDING: u32 = 10;

// =============================================================================
// Labels
// =============================================================================

/// Label font size (pixels)
pub const DEFAULT_FONT_SIZE: f32 = 28.0;

/// Narrowest width budget a label is ever fitted to (pixels)
pub const MIN_LABEL_WIDTH: u32 = 80;

/// Appended to truncated labels
pub const ELLIPSIS: char = '…';

/// Average character width used when text width is estimated (pixels)
pub const ESTIMATE_CHAR_WIDTH: u32 = 10;

/// Text height used when text height is estimated (pixels)
pub const ESTIMATE_TEXT_HEIGHT: u32 = 24;

/// Character width assumed when glyph measurement fails (pixels)
pub const FALLBACK_CHAR_WIDTH: u32 = 18;

// =============================================================================
// Output
// =============================================================================

/// JPEG encoder quality
pub const JPEG_QUALITY: u8 = 95;
