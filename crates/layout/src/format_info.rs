//! Per-kind state describing how much of an element one placement covers.
//!
//! A `FormatInfo` is produced by a renderer's `format` and handed back to it
//! as `previous` when the element continues on the next area.

use crate::nodes::table::TableFormatInfo;
use crate::LayoutError;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatInfo<'a> {
    Paragraph(ParagraphFormatInfo),
    Image(AtomicFormatInfo),
    PageBreak(AtomicFormatInfo),
    Table(Box<TableFormatInfo<'a>>),
}

impl<'a> FormatInfo<'a> {
    /// Nothing of the element was placed.
    pub fn is_empty(&self) -> bool {
        match self {
            FormatInfo::Paragraph(p) => p.is_empty(),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => !a.placed,
            FormatInfo::Table(t) => t.is_empty(),
        }
    }

    /// The placement contains the beginning of the element.
    pub fn is_starting(&self) -> bool {
        match self {
            FormatInfo::Paragraph(p) => p.is_starting(),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => a.placed,
            FormatInfo::Table(t) => t.is_starting(),
        }
    }

    /// The beginning was placed in a form the element accepts (e.g. not a lone line).
    pub fn starting_is_complete(&self) -> bool {
        match self {
            FormatInfo::Paragraph(p) => p.starting_is_complete(),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => a.placed,
            FormatInfo::Table(t) => t.starting_is_complete(),
        }
    }

    /// The placement contains the end of the element.
    pub fn is_ending(&self) -> bool {
        match self {
            FormatInfo::Paragraph(p) => p.is_ending(),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => a.placed,
            FormatInfo::Table(t) => t.is_ending(),
        }
    }

    pub fn ending_is_complete(&self) -> bool {
        match self {
            FormatInfo::Paragraph(p) => p.ending_is_complete(),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => a.placed,
            FormatInfo::Table(t) => t.ending_is_complete(),
        }
    }

    /// The whole element was placed in one piece. Tables never report this.
    pub fn is_complete(&self) -> bool {
        match self {
            FormatInfo::Paragraph(p) => p.is_complete(),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => a.placed,
            FormatInfo::Table(_) => false,
        }
    }

    /// Drops the trailing unit of the placement. Returns the height removed,
    /// or `None` when the whole placement was dropped.
    pub fn remove_ending(&mut self) -> Option<f32> {
        match self {
            FormatInfo::Paragraph(p) => Some(p.remove_ending()),
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => {
                a.placed = false;
                None
            }
            FormatInfo::Table(t) => {
                t.remove_ending();
                None
            }
        }
    }

    pub fn as_table(&self) -> Result<&TableFormatInfo<'a>, LayoutError> {
        match self {
            FormatInfo::Table(t) => Ok(&**t),
            _ => Err(LayoutError::StateMismatch("Table", self.variant_name())),
        }
    }

    pub fn as_paragraph(&self) -> Result<&ParagraphFormatInfo, LayoutError> {
        match self {
            FormatInfo::Paragraph(p) => Ok(p),
            _ => Err(LayoutError::StateMismatch("Paragraph", self.variant_name())),
        }
    }

    pub fn as_atomic(&self) -> Result<&AtomicFormatInfo, LayoutError> {
        match self {
            FormatInfo::Image(a) | FormatInfo::PageBreak(a) => Ok(a),
            _ => Err(LayoutError::StateMismatch("Image", self.variant_name())),
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            FormatInfo::Paragraph(_) => "Paragraph",
            FormatInfo::Image(_) => "Image",
            FormatInfo::PageBreak(_) => "PageBreak",
            FormatInfo::Table(_) => "Table",
        }
    }
}

/// Lines `start_line..end_line` of a wrapped paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphFormatInfo {
    /// All lines of the paragraph, shared between its placements.
    pub lines: Rc<[String]>,
    pub start_line: usize,
    pub end_line: usize,
    pub line_height: f32,
    pub font_size: f32,
    pub widow_control: bool,
}

impl ParagraphFormatInfo {
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    pub fn placed_lines(&self) -> &[String] {
        &self.lines[self.start_line..self.end_line]
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }

    pub fn is_starting(&self) -> bool {
        self.start_line == 0 && !self.is_empty()
    }

    pub fn is_ending(&self) -> bool {
        self.end_line == self.lines.len() && !self.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.start_line == 0 && self.end_line == self.lines.len()
    }

    fn satisfies_widow_control(&self) -> bool {
        !self.widow_control || self.line_count() >= 2 || self.is_complete()
    }

    pub fn starting_is_complete(&self) -> bool {
        if !self.is_starting() {
            return !self.is_empty();
        }
        self.satisfies_widow_control()
    }

    pub fn ending_is_complete(&self) -> bool {
        self.is_ending() && self.satisfies_widow_control()
    }

    /// Drops the last line. Under widow control a single line left behind
    /// goes as well. Returns the height removed.
    pub fn remove_ending(&mut self) -> f32 {
        let count = self.line_count();
        if count == 0 {
            return 0.0;
        }
        let removed = if self.widow_control && count == 2 { 2 } else { 1 };
        self.end_line -= removed;
        removed as f32 * self.line_height
    }
}

/// Placement of an element that is never split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomicFormatInfo {
    pub placed: bool,
}
