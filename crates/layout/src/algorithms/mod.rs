pub mod pagination;
pub mod top_down;

pub use pagination::{check_fit, margin_max, FitAnalysis};
pub use top_down::{FlowCursor, FlowOutcome, TopDownFormatter};
