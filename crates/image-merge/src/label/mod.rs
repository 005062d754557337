//! Label rendering
//!
//! Resolves a font for the label bar, measures text and shortens labels
//! with an ellipsis until they fit the width they are given.

mod fit;
mod font;

pub use fit::{LabelMetrics, fit_label, label_offset_y, label_width_budget};
pub use font::{
    FontOrigin, FontSource, LabelFont, TextExtent, TextMeasure, default_font_candidates,
    probe_text_metrics, resolve_font,
};
