use folio_layout::LayoutError;
use thiserror::Error;

/// Errors surfaced while loading and paginating a document.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
