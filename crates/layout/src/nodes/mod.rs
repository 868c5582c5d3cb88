pub mod image;
pub mod page_break;
pub mod paragraph;
pub mod table;

use crate::format_info::FormatInfo;
use crate::interface::{ElementRenderer, FieldInfos, LayoutEnvironment, LayoutInfo};
use crate::painting::Canvas;
use crate::render_record::RenderRecord;
use crate::LayoutError;
use folio_idf::Element;
use folio_types::{Point, Rect};

pub use image::ImageRenderer;
pub use page_break::PageBreakRenderer;
pub use paragraph::ParagraphRenderer;
pub use table::TableRenderer;

/// The renderer for one document element, dispatched by element kind.
#[derive(Debug)]
pub enum RenderNode<'a> {
    Paragraph(ParagraphRenderer<'a>),
    Table(TableRenderer<'a>),
    Image(ImageRenderer<'a>),
    PageBreak(PageBreakRenderer<'a>),
}

impl<'a> RenderNode<'a> {
    pub fn create(element: &'a Element, fields: FieldInfos) -> Self {
        match element {
            Element::Paragraph(p) => RenderNode::Paragraph(ParagraphRenderer::new(element, p, fields)),
            Element::Table(t) => RenderNode::Table(TableRenderer::new(element, t, fields)),
            Element::Image(i) => RenderNode::Image(ImageRenderer::new(element, i)),
            Element::PageBreak => RenderNode::PageBreak(PageBreakRenderer::new(element)),
        }
    }

    fn inner(&self) -> &dyn ElementRenderer<'a> {
        match self {
            RenderNode::Paragraph(r) => r,
            RenderNode::Table(r) => r,
            RenderNode::Image(r) => r,
            RenderNode::PageBreak(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ElementRenderer<'a> {
        match self {
            RenderNode::Paragraph(r) => r,
            RenderNode::Table(r) => r,
            RenderNode::Image(r) => r,
            RenderNode::PageBreak(r) => r,
        }
    }
}

impl<'a> ElementRenderer<'a> for RenderNode<'a> {
    fn initial_layout_info(&self) -> LayoutInfo {
        self.inner().initial_layout_info()
    }

    fn format(
        &mut self,
        env: &LayoutEnvironment,
        area: Rect,
        previous: Option<&FormatInfo<'a>>,
    ) -> Result<RenderRecord<'a>, LayoutError> {
        self.inner_mut().format(env, area, previous)
    }

    fn render(
        &self,
        record: &RenderRecord<'a>,
        canvas: &mut dyn Canvas,
        offset: Point,
    ) -> Result<(), LayoutError> {
        self.inner().render(record, canvas, offset)
    }

    fn set_max_element_height(&mut self, height: f32) {
        self.inner_mut().set_max_element_height(height)
    }
}

/// Draws a sequence of records, each with the renderer of its own element.
pub fn render_records<'a>(
    records: &[RenderRecord<'a>],
    canvas: &mut dyn Canvas,
    offset: Point,
) -> Result<(), LayoutError> {
    for record in records {
        if record.is_empty() {
            continue;
        }
        RenderNode::create(record.element, FieldInfos::default()).render(record, canvas, offset)?;
    }
    Ok(())
}
