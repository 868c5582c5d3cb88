//! Tables: row-wise splitting across areas with merged cells, repeated
//! heading rows and nested tables in cells.

pub mod boundary;
pub mod format_info;
pub mod formatted_cell;
pub mod merged_cells;
mod renderer;

pub use boundary::RowBoundaryMap;
pub use format_info::{TableFormatInfo, TableProgress, TableStructure};
pub use formatted_cell::{CellMetrics, FormattedCell};
pub use merged_cells::{MergedCell, MergedCellList};
pub use renderer::TableRenderer;
