use crate::types::{MergeError, Result};
use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bold face compiled into the crate, the end of every fallback chain
pub(crate) const EMBEDDED_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");

/// A font file to try, with the face index for collections (`.ttc`)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontSource {
    pub path: PathBuf,
    #[cfg_attr(feature = "serde", serde(default))]
    pub index: u32,
}

impl FontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_index(path, 0)
    }

    pub fn with_index(path: impl Into<PathBuf>, index: u32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }
}

// CJK-capable faces come before Latin-only ones of the same weight
const BOLD_FONTS: &[(&str, u32)] = &[
    ("/System/Library/Fonts/AppleSDGothicNeo.ttc", 6),
    ("C:/Windows/Fonts/malgunbd.ttf", 0),
    ("/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc", 0),
    ("/System/Library/Fonts/Supplemental/Arial Bold.ttf", 0),
    ("/System/Library/Fonts/Helvetica.ttc", 1),
    ("C:/Windows/Fonts/arialbd.ttf", 0),
    ("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf", 0),
];

const REGULAR_FONTS: &[(&str, u32)] = &[
    ("/System/Library/Fonts/AppleSDGothicNeo.ttc", 0),
    ("C:/Windows/Fonts/malgun.ttf", 0),
    ("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc", 0),
    ("/System/Library/Fonts/Supplemental/Arial.ttf", 0),
    ("/System/Library/Fonts/Helvetica.ttc", 0),
    ("C:/Windows/Fonts/arial.ttf", 0),
    ("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", 0),
];

/// Platform font files, bold faces first when `bold` is set
pub fn default_font_candidates(bold: bool) -> Vec<FontSource> {
    let bold_fonts = if bold { BOLD_FONTS } else { &[] };
    bold_fonts
        .iter()
        .chain(REGULAR_FONTS)
        .map(|&(path, index)| FontSource::with_index(path, index))
        .collect()
}

/// Pixel extent of a run of text as drawn at the origin.
///
/// `top` is the distance from the draw position down to the first inked
/// row; `height` spans the inked rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub top: i32,
    pub height: u32,
}

/// Anything that can size a run of label text
pub trait TextMeasure {
    /// `None` when no usable metrics can be produced
    fn measure(&self, text: &str) -> Option<TextExtent>;
}

/// Where a [`LabelFont`] was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    File(FontSource),
    Embedded,
}

/// Outline font used for label text
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    scale: PxScale,
    origin: FontOrigin,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont")
            .field("origin", &self.origin)
            .field("scale", &self.scale.y)
            .finish()
    }
}

impl LabelFont {
    /// The bundled bold face at `size` pixels
    pub fn embedded(size: f32) -> Result<Self> {
        let font = FontArc::try_from_slice(EMBEDDED_FONT)
            .map_err(|e| MergeError::Font(format!("Failed to parse embedded font: {}", e)))?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
            origin: FontOrigin::Embedded,
        })
    }

    /// Load a font file, `None` when it is missing or not a font
    pub fn from_source(source: &FontSource, size: f32) -> Option<Self> {
        let data = std::fs::read(&source.path).ok()?;
        let font = match FontVec::try_from_vec_and_index(data, source.index) {
            Ok(font) => font,
            Err(e) => {
                log::debug!("Ignoring {}: {}", source.path.display(), e);
                return None;
            }
        };
        Some(Self {
            font: FontArc::new(font),
            scale: PxScale::from(size),
            origin: FontOrigin::File(source.clone()),
        })
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    pub fn is_embedded(&self) -> bool {
        self.origin == FontOrigin::Embedded
    }

    /// Whether every visible character of `text` has a glyph in this face
    pub fn covers(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| self.font.glyph_id(c).0 != 0)
    }

    /// Draw `text` with its layout origin at (`x`, `y`), clipped to the canvas
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

impl TextMeasure for LabelFont {
    fn measure(&self, text: &str) -> Option<TextExtent> {
        if text.is_empty() {
            return Some(TextExtent::default());
        }
        measure_outline(&self.font, self.scale, text)
    }
}

/// Lays glyphs out on a baseline at the font's ascent, the same origin
/// `draw_text_mut` uses.
fn measure_outline(font: &impl Font, scale: PxScale, text: &str) -> Option<TextExtent> {
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent();
    if !ascent.is_finite() {
        return None;
    }

    let mut width = 0.0f32;
    let mut previous = None;
    let mut ink_top = f32::MAX;
    let mut ink_bottom = f32::MIN;

    for c in text.chars() {
        let glyph_id = scaled.glyph_id(c);
        if let Some(previous) = previous {
            width += scaled.kern(previous, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(scale, point(width, ascent));
        width += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            ink_top = ink_top.min(bounds.min.y);
            ink_bottom = ink_bottom.max(bounds.max.y);
        }
    }

    if !width.is_finite() || width <= 0.0 {
        return None;
    }

    let (top, height) = if ink_top <= ink_bottom {
        (ink_top.floor() as i32, (ink_bottom - ink_top).ceil() as u32)
    } else {
        // Only whitespace, nothing inked
        (0, 0)
    };

    Some(TextExtent {
        width: width.ceil() as u32,
        top,
        height,
    })
}

/// Resolve a label font able to draw `sample`.
///
/// Tries `preferred` in order, then the platform candidates, taking the
/// first face that covers every character of `sample`. When none does,
/// the embedded face is used if it covers the sample, otherwise the first
/// font that loaded at all. Only fails if the embedded face is unreadable.
pub fn resolve_font(
    size: f32,
    bold: bool,
    preferred: &[FontSource],
    sample: &str,
) -> Result<LabelFont> {
    let mut first_loaded: Option<LabelFont> = None;

    for source in preferred.iter().cloned().chain(default_font_candidates(bold)) {
        let Some(font) = LabelFont::from_source(&source, size) else {
            continue;
        };
        if font.covers(sample) {
            log::debug!(
                "Using label font {} (face {})",
                source.path.display(),
                source.index
            );
            return Ok(font);
        }
        log::debug!("{} is missing glyphs for some labels", source.path.display());
        first_loaded.get_or_insert(font);
    }

    let embedded = LabelFont::embedded(size)?;
    match first_loaded {
        Some(font) if !embedded.covers(sample) => {
            log::warn!("No font covers every label, some characters may not render");
            Ok(font)
        }
        _ => {
            log::debug!("Using the embedded label font");
            Ok(embedded)
        }
    }
}

/// Whether `font` produces usable text metrics; decides once whether
/// label widths are measured or estimated
pub fn probe_text_metrics(font: &impl TextMeasure) -> bool {
    font.measure("Ag")
        .is_some_and(|extent| extent.width > 0 && extent.height > 0)
}
