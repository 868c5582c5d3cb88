//! Single-line text measurement and line breaking.

pub mod wrapper;

pub use wrapper::break_lines;

use folio_style::ParagraphFormat;

/// Measures single lines of text. Supplied by the host; layout only needs
/// widths for line breaking and a line height per paragraph format.
pub trait TextMeasurer {
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    fn line_height(&self, format: &ParagraphFormat) -> f32 {
        format.line_height.unwrap_or(format.font_size * 1.2)
    }
}

/// Monospaced metrics: every character is `char_width` em wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub char_width: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self { char_width: 0.5 }
    }
}

impl TextMeasurer for FixedMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.char_width
    }
}
