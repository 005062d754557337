use super::font::TextMeasure;
use crate::constants::{ELLIPSIS, FALLBACK_CHAR_WIDTH, MIN_LABEL_WIDTH};

/// How label text is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMetrics {
    /// Skip glyph measurement and size text from the fixed estimates
    pub use_estimate: bool,
    pub char_width: u32,
    pub text_height: u32,
}

/// Width available to label text on an image `image_width` pixels wide
pub fn label_width_budget(image_width: u32, padding: u32) -> u32 {
    image_width
        .saturating_sub(padding.saturating_mul(2))
        .max(MIN_LABEL_WIDTH)
}

/// Shorten `label` with a trailing ellipsis until it fits `max_width`.
///
/// A label that already fits is returned unchanged, and at least one
/// character of the original is always kept. When `font` cannot measure
/// text the width is estimated at [`FALLBACK_CHAR_WIDTH`] per character.
pub fn fit_label(
    label: &str,
    font: &impl TextMeasure,
    max_width: u32,
    metrics: &LabelMetrics,
) -> String {
    if metrics.use_estimate {
        return fit_by_estimate(label, max_width, metrics.char_width);
    }

    match font.measure(label) {
        Some(extent) if extent.width <= max_width => label.to_string(),
        Some(_) => fit_by_glyphs(label, font, max_width),
        None => fit_by_estimate(label, max_width, FALLBACK_CHAR_WIDTH),
    }
}

fn fit_by_glyphs(label: &str, font: &impl TextMeasure, max_width: u32) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= 1 {
        return label.to_string();
    }

    for keep in (1..chars.len()).rev() {
        let candidate = truncated(&chars, keep);
        match font.measure(&candidate) {
            Some(extent) if extent.width <= max_width => return candidate,
            Some(_) => {}
            None => return fit_by_estimate(label, max_width, FALLBACK_CHAR_WIDTH),
        }
    }

    truncated(&chars, 1)
}

/// Every character, the ellipsis included, counts as `char_width`
fn fit_by_estimate(label: &str, max_width: u32, char_width: u32) -> String {
    let chars: Vec<char> = label.chars().collect();
    let char_width = char_width.max(1) as u64;
    if chars.len() as u64 * char_width <= max_width as u64 {
        return label.to_string();
    }

    let keep = ((max_width as u64 / char_width) as usize)
        .saturating_sub(1)
        .max(1);
    if chars.len() <= keep {
        return label.to_string();
    }
    truncated(&chars, keep)
}

fn truncated(chars: &[char], keep: usize) -> String {
    let mut text: String = chars[..keep].iter().collect();
    text.push(ELLIPSIS);
    text
}

/// Vertical draw offset that centers `text` in a bar `label_height` tall.
///
/// Uses the inked glyph height when it can be measured, the fixed
/// estimate otherwise.
pub fn label_offset_y(
    text: &str,
    font: &impl TextMeasure,
    label_height: u32,
    metrics: &LabelMetrics,
) -> i32 {
    let centered = |text_height: u32| (label_height as i32 - text_height as i32).div_euclid(2);

    if metrics.use_estimate {
        return centered(metrics.text_height);
    }

    match font.measure(text) {
        Some(extent) if extent.height > 0 => centered(extent.height) - extent.top,
        _ => centered(metrics.text_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::TextExtent;

    /// Fixed advance per character, every glyph `height` tall
    struct Monospace {
        advance: u32,
        height: u32,
    }

    impl TextMeasure for Monospace {
        fn measure(&self, text: &str) -> Option<TextExtent> {
            let count = text.chars().count() as u32;
            Some(TextExtent {
                width: count * self.advance,
                top: 2,
                height: if count == 0 { 0 } else { self.height },
            })
        }
    }

    /// A font whose metrics are always unavailable
    struct Unmeasurable;

    impl TextMeasure for Unmeasurable {
        fn measure(&self, _text: &str) -> Option<TextExtent> {
            None
        }
    }

    const MONO: Monospace = Monospace {
        advance: 6,
        height: 14,
    };

    fn glyph_metrics() -> LabelMetrics {
        LabelMetrics {
            use_estimate: false,
            char_width: 10,
            text_height: 24,
        }
    }

    fn estimate_metrics() -> LabelMetrics {
        LabelMetrics {
            use_estimate: true,
            ..glyph_metrics()
        }
    }

    #[test]
    fn test_budget_has_floor() {
        assert_eq!(label_width_budget(500, 10), 480);
        assert_eq!(label_width_budget(90, 10), 80);
        assert_eq!(label_width_budget(10, 10), 80);
    }

    #[test]
    fn test_fitting_label_is_unchanged() {
        assert_eq!(fit_label("short", &MONO, 80, &glyph_metrics()), "short");
    }

    #[test]
    fn test_long_label_is_truncated_to_fit() {
        let label = "a_rather_long_file_name_for_a_small_image";
        let fitted = fit_label(label, &MONO, 80, &glyph_metrics());

        assert!(fitted.ends_with(ELLIPSIS));
        assert!(MONO.measure(&fitted).unwrap().width <= 80);
        // 13 chars * 6 = 78 fits, 14 would not
        assert_eq!(fitted.chars().count(), 13);
        assert!(label.starts_with(fitted.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn test_fitting_is_idempotent() {
        let wide = Monospace {
            advance: 12,
            height: 14,
        };
        for label in ["x", "abc", "a_rather_long_label_name", "사진_모음_2024"] {
            let once = fit_label(label, &wide, 80, &glyph_metrics());
            let twice = fit_label(&once, &wide, 80, &glyph_metrics());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_truncation_keeps_one_character() {
        let huge = Monospace {
            advance: 120,
            height: 14,
        };
        let fitted = fit_label("wide", &huge, 80, &glyph_metrics());
        assert_eq!(fitted, format!("w{}", ELLIPSIS));

        // A single character is never shortened further
        assert_eq!(fit_label("W", &huge, 80, &glyph_metrics()), "W");
        assert_eq!(fit_label("", &huge, 80, &glyph_metrics()), "");
    }

    #[test]
    fn test_estimate_truncation() {
        // 80 / 10 = 8 slots, one reserved for the ellipsis
        let fitted = fit_label("abcdefghijklmnop", &MONO, 80, &estimate_metrics());
        assert_eq!(fitted, format!("abcdefg{}", ELLIPSIS));
        assert_eq!(fit_label(&fitted, &MONO, 80, &estimate_metrics()), fitted);

        assert_eq!(fit_label("abcdefgh", &MONO, 80, &estimate_metrics()), "abcdefgh");
    }

    #[test]
    fn test_estimate_keeps_one_character_on_tiny_budget() {
        assert_eq!(fit_by_estimate("abcdef", 5, 10), format!("a{}", ELLIPSIS));
        assert_eq!(fit_by_estimate("a", 5, 10), "a");
    }

    #[test]
    fn test_unmeasurable_font_falls_back_to_wide_estimate() {
        // 180 / 18 = 10 slots, one reserved for the ellipsis
        let label = "abcdefghijklmnopqrstuvwxyz";
        let fitted = fit_label(label, &Unmeasurable, 180, &glyph_metrics());
        assert_eq!(fitted, format!("abcdefghi{}", ELLIPSIS));
        assert_eq!(fit_label(&fitted, &Unmeasurable, 180, &glyph_metrics()), fitted);

        // 10 * 18 = 180 still fits
        assert_eq!(
            fit_label("abcdefghij", &Unmeasurable, 180, &glyph_metrics()),
            "abcdefghij"
        );
    }

    #[test]
    fn test_offset_centers_measured_text() {
        // 14px tall ink starting 2px below the origin, in a 44px bar
        assert_eq!(label_offset_y("Label", &MONO, 44, &glyph_metrics()), 13);
        // Estimated height of 24
        assert_eq!(label_offset_y("Label", &MONO, 44, &estimate_metrics()), 10);
        // Nothing inked, falls back to the estimate
        assert_eq!(label_offset_y("", &MONO, 44, &glyph_metrics()), 10);
    }

    #[test]
    fn test_offset_uses_estimate_when_unmeasurable() {
        let metrics = LabelMetrics {
            text_height: 30,
            ..glyph_metrics()
        };
        assert_eq!(label_offset_y("Label", &Unmeasurable, 44, &metrics), 7);
    }
}
