pub mod alignment;
pub mod border;
pub mod dimension;
pub mod paragraph;
pub mod parsers;

pub use alignment::{RowAlignment, RowHeightRule, VerticalAlignment};
pub use border::{Border, BorderSide, BorderStyle, Borders, Shading};
pub use dimension::{length, Margins, PageSize};
pub use paragraph::ParagraphFormat;
pub use parsers::StyleParseError;
