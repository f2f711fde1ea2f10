//! Approximate text measurement.
//!
//! Text boxes are sized with a character-count heuristic rather than real
//! glyph metrics: every character is assumed to be `0.6 * font_size` wide.
//! The estimate is good enough to give labels a sensible footprint; it is
//! not suitable for pixel-accurate layout.

use crate::geometry::Size;

/// Average glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Font metrics that drive the size estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub font_size: f64,
    pub line_height: f64,
    pub padding: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            line_height: 1.25,
            padding: 6.0,
        }
    }
}

/// Estimates the footprint of `text` rendered with the given metrics.
///
/// The text is split on line breaks; an empty string counts as a single
/// empty line. Width is driven by the longest line, height by the number
/// of lines, and both include the padding on each side.
///
/// # Examples
///
/// ```
/// # use scenic_core::text::{estimate_size, FontMetrics};
/// let size = estimate_size("Hello", FontMetrics::default());
///
/// // 5 chars * 20 * 0.6 + 2 * 6
/// assert_eq!(size.width(), 72.0);
/// // 1 line * 20 * 1.25 + 2 * 6
/// assert_eq!(size.height(), 37.0);
/// ```
pub fn estimate_size(text: &str, metrics: FontMetrics) -> Size {
    let (line_count, max_chars) = text
        .lines()
        .fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
    let line_count = line_count.max(1);

    let width = max_chars as f64 * metrics.font_size * GLYPH_WIDTH_RATIO + 2.0 * metrics.padding;
    let height = line_count as f64 * metrics.font_size * metrics.line_height + 2.0 * metrics.padding;

    Size::new(width, height)
}
