use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Malformed table: {0}.")]
    MalformedTable(String),
    #[error("No cell found to anchor the boundary below row {0}.")]
    MissingRowCell(usize),
    #[error("Row boundary for row {0} has not been computed.")]
    MissingRowBoundary(usize),
    #[error("Tables are nested {depth} levels deep; the limit is {limit}.")]
    NestingTooDeep { depth: usize, limit: usize },
    #[error("Ran out of pages with {remaining} elements left to place.")]
    OutOfSpace { remaining: usize },
    #[error("State mismatch: Expected state for {0}, got {1}.")]
    StateMismatch(&'static str, &'static str),
}

pub mod algorithms;
pub mod config;
pub mod format_info;
pub mod interface;
pub mod nodes;
pub mod pages;
pub mod painting;
pub mod render_record;
pub mod text;

pub use self::algorithms::{FlowCursor, FlowOutcome, TopDownFormatter};
pub use self::config::LayoutConfig;
pub use self::format_info::FormatInfo;
pub use self::interface::{AreaSource, ElementRenderer, FieldInfos, LayoutEnvironment, LayoutInfo};
pub use self::pages::{paginate_section, render_pages, Page, PageAreaSource};
pub use self::painting::{Canvas, DrawCommand, RecordingCanvas};
pub use self::render_record::RenderRecord;
pub use self::text::{FixedMetrics, TextMeasurer};

// Re-export geometry types used across the API
pub use folio_types::{Point, Rect};

#[cfg(test)]
mod table_test;
#[cfg(test)]
mod test_utils;
