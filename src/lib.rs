//! folio lays out documents of paragraphs, images and tables onto pages.
//!
//! The engine itself lives in `folio-layout`; this crate ties it to JSON
//! document loading and multi-section pagination.

pub mod error;

pub use error::FolioError;
pub use folio_idf::{
    Cell, Column, Document, Element, Image, ImageAnchor, PageSetup, Paragraph, Row, Section, Table,
};
pub use folio_layout::{
    Canvas, DrawCommand, FixedMetrics, LayoutConfig, LayoutError, Page, RecordingCanvas,
    RenderRecord, TextMeasurer,
};
pub use folio_style as style;
pub use folio_types::{Point, Rect};

use log::{debug, info};
use std::fs;
use std::path::Path;

/// The pages one section of a document was laid out on.
#[derive(Debug)]
pub struct LaidOutSection<'a> {
    /// 1-based position of the section in the document.
    pub number: usize,
    pub page_setup: PageSetup,
    pub pages: Vec<Page<'a>>,
}

pub fn load_document(path: impl AsRef<Path>) -> Result<Document, FolioError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<LayoutConfig, FolioError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Paginates every section in order. Page numbers run on across sections;
/// each section starts on a fresh page.
pub fn paginate_document<'a>(
    document: &'a Document,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<LaidOutSection<'a>>, FolioError> {
    let mut sections = Vec::with_capacity(document.sections.len());
    let mut next_page = 1;
    for (index, section) in document.sections.iter().enumerate() {
        let number = index + 1;
        let pages = folio_layout::paginate_section(section, number, config, measurer, next_page)?;
        debug!("Section {} starts on page {}.", number, next_page);
        next_page += pages.len();
        sections.push(LaidOutSection {
            number,
            page_setup: section.page_setup,
            pages,
        });
    }
    info!(
        "Laid out {} sections on {} pages.",
        sections.len(),
        next_page - 1
    );
    Ok(sections)
}

/// Draws every page of every section onto `canvas`.
pub fn render_document(sections: &[LaidOutSection<'_>], canvas: &mut dyn Canvas) -> Result<(), FolioError> {
    for section in sections {
        folio_layout::render_pages(&section.pages, &section.page_setup, canvas)?;
    }
    Ok(())
}
