use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// How many following elements the keep-with-next lookahead may format
    /// before it gives up and assumes they fit.
    ///
    /// Bounds the work done for long chains of elements that all want to stay
    /// with their successor. Defaults to `10`.
    pub max_combine_elements: usize,

    /// Maximum depth of tables nested inside table cells.
    ///
    /// Formatting a cell runs a full flow pass, so nesting is recursion.
    /// Documents nested deeper fail with `LayoutError::NestingTooDeep`.
    /// Defaults to `64`.
    pub max_nesting_depth: usize,

    /// Slack allowed when comparing heights, in points. Defaults to `0.001`.
    pub tolerance: f32,

    /// Upper bound on the number of pages a single section may produce.
    ///
    /// Reaching it surfaces `LayoutError::OutOfSpace` instead of looping on
    /// content that never fits. Defaults to `10000`.
    pub max_pages: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_combine_elements: 10,
            max_nesting_depth: 64,
            tolerance: 0.001,
            max_pages: 10_000,
        }
    }
}
