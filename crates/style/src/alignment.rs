use serde::{Deserialize, Serialize};

/// Where a cell's content sits inside the cell's padded inner rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Horizontal placement of a whole table inside its area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a row's declared height combines with the height of its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowHeightRule {
    /// Padding plus content; the declared height is ignored.
    Auto,
    /// The larger of the declared height and padding plus content.
    #[default]
    AtLeast,
    /// Always the declared height, even if content overflows.
    Exactly,
}

impl RowHeightRule {
    pub fn resolve(&self, declared: f32, padded_content: f32) -> f32 {
        match self {
            RowHeightRule::Exactly => declared,
            RowHeightRule::Auto => padded_content,
            RowHeightRule::AtLeast => declared.max(padded_content),
        }
    }
}
