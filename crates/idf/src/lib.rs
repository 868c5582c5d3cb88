//! The document tree consumed by the layout engine.
//!
//! A [`Document`] is a list of [`Section`]s, each with its own page setup and a
//! flat sequence of flowable [`Element`]s. Tables nest further element
//! sequences inside their cells. The tree is read-only once built; layout
//! never mutates it.

pub mod table;

pub use table::{Cell, Column, Row, Table};

use folio_style::{length, Margins, PageSize, ParagraphFormat};
use folio_types::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub page_setup: PageSetup,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Section {
    pub fn new(page_setup: PageSetup) -> Self {
        Self {
            page_setup,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub size: PageSize,
    pub margins: Margins,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margins: Margins::all(72.0),
        }
    }
}

impl PageSetup {
    pub fn custom(width: f32, height: f32, margins: Margins) -> Self {
        Self {
            size: PageSize::Custom { width, height },
            margins,
        }
    }

    pub fn page_width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    pub fn page_height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    /// Height left for content between the top and bottom margins, never negative.
    pub fn usable_height(&self) -> f32 {
        (self.page_height() - self.margins.vertical()).max(0.0)
    }

    pub fn usable_width(&self) -> f32 {
        (self.page_width() - self.margins.horizontal()).max(0.0)
    }

    /// The content rectangle of a page in page coordinates.
    pub fn content_area(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.usable_width(),
            self.usable_height(),
        )
    }
}

/// A flowable block of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Paragraph(Paragraph),
    Table(Box<Table>),
    Image(Image),
    PageBreak,
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Paragraph(_) => "Paragraph",
            Element::Table(_) => "Table",
            Element::Image(_) => "Image",
            Element::PageBreak => "PageBreak",
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Element::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<Paragraph> for Element {
    fn from(paragraph: Paragraph) -> Self {
        Element::Paragraph(paragraph)
    }
}

impl From<Table> for Element {
    fn from(table: Table) -> Self {
        Element::Table(Box::new(table))
    }
}

impl From<Image> for Element {
    fn from(image: Image) -> Self {
        Element::Image(image)
    }
}

/// A run of plain text wrapped into lines at layout time.
///
/// The text may contain the fields `{page}` and `{section}`, which are
/// substituted with the numbers of the area the paragraph is placed on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub text: String,
    #[serde(default)]
    pub format: ParagraphFormat,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ParagraphFormat::default(),
        }
    }

    pub fn with_format(text: impl Into<String>, format: ParagraphFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

/// A fixed-size picture. Images are never split.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub source: String,
    #[serde(deserialize_with = "length::deserialize")]
    pub width: f32,
    #[serde(deserialize_with = "length::deserialize")]
    pub height: f32,
    #[serde(default)]
    pub keep_with_next: bool,
    #[serde(default)]
    pub anchor: ImageAnchor,
    /// Distance below the anchor's top edge. Ignored for inline images.
    #[serde(default, deserialize_with = "length::deserialize")]
    pub offset: f32,
}

impl Image {
    pub fn new(source: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
            keep_with_next: false,
            anchor: ImageAnchor::Inline,
            offset: 0.0,
        }
    }

    /// Pins the image `offset` below the top of `anchor`, outside the flow.
    pub fn anchored(mut self, anchor: ImageAnchor, offset: f32) -> Self {
        self.anchor = anchor;
        self.offset = offset;
        self
    }
}

/// What an image is positioned against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageAnchor {
    /// Flows below the previous element.
    #[default]
    Inline,
    /// The top of the area the image falls on. Takes no flow space.
    AreaTop,
    /// The top edge of the page. Takes no flow space.
    Page,
}
