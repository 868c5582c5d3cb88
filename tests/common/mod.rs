pub mod fixtures;

use folio::{Document, FixedMetrics, FolioError, LayoutConfig, RecordingCanvas};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a laid out document produced, detached from the document.
pub struct Rendered {
    /// Page numbers per section, in order.
    pub sections: Vec<Vec<usize>>,
    pub canvas: RecordingCanvas,
}

impl Rendered {
    pub fn page_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn text_count(&self, text: &str) -> usize {
        self.canvas.texts().filter(|(t, _)| *t == text).count()
    }

    /// Index of the page each drawn text with `text` landed on.
    pub fn pages_of(&self, text: &str) -> Vec<usize> {
        let mut page = 0;
        let mut found = Vec::new();
        for command in &self.canvas.commands {
            match command {
                folio::DrawCommand::BeginPage { number, .. } => page = *number,
                folio::DrawCommand::Text { text: t, .. } if t == text => found.push(page),
                _ => {}
            }
        }
        found
    }
}

pub fn render_json(document: &Value) -> Result<Rendered, FolioError> {
    render_json_with(document, &LayoutConfig::default())
}

pub fn render_json_with(document: &Value, config: &LayoutConfig) -> Result<Rendered, FolioError> {
    let document: Document = serde_json::from_value(document.clone())?;
    let sections = folio::paginate_document(&document, config, &FixedMetrics::default())?;
    let mut canvas = RecordingCanvas::new();
    folio::render_document(&sections, &mut canvas)?;
    Ok(Rendered {
        sections: sections
            .iter()
            .map(|s| s.pages.iter().map(|p| p.number).collect())
            .collect(),
        canvas,
    })
}
