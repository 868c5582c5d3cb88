use crate::dimension::length;
use folio_types::Color;
use serde::{Deserialize, Serialize};

/// Formatting of a paragraph, also used as the default format of a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphFormat {
    #[serde(deserialize_with = "length::deserialize")]
    pub font_size: f32,
    /// Explicit line height; derived from the font size when absent.
    #[serde(
        deserialize_with = "length::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_height: Option<f32>,
    #[serde(deserialize_with = "length::deserialize")]
    pub space_before: f32,
    #[serde(deserialize_with = "length::deserialize")]
    pub space_after: f32,
    #[serde(deserialize_with = "length::deserialize")]
    pub left_indent: f32,
    #[serde(deserialize_with = "length::deserialize")]
    pub right_indent: f32,
    pub keep_together: bool,
    pub keep_with_next: bool,
    /// Forbids a single line at the top or the bottom of an area.
    pub widow_control: bool,
    pub page_break_before: bool,
    pub color: Color,
}

impl Default for ParagraphFormat {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            line_height: None,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            keep_together: false,
            keep_with_next: false,
            widow_control: true,
            page_break_before: false,
            color: Color::BLACK,
        }
    }
}

impl ParagraphFormat {
    /// A heading-like format: kept together and with the element that follows.
    pub fn heading(font_size: f32) -> Self {
        Self {
            font_size,
            keep_together: true,
            keep_with_next: true,
            ..Self::default()
        }
    }
}
