use crate::format_info::{AtomicFormatInfo, FormatInfo};
use crate::interface::{ElementRenderer, LayoutEnvironment, LayoutInfo};
use crate::painting::Canvas;
use crate::render_record::RenderRecord;
use crate::LayoutError;
use folio_idf::Element;
use folio_types::{Point, Rect};

/// Fills the rest of the current area so that following content starts on
/// the next one. Inside an unbounded area it takes no space.
#[derive(Debug, Clone)]
pub struct PageBreakRenderer<'a> {
    element: &'a Element,
}

impl<'a> PageBreakRenderer<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }
}

impl<'a> ElementRenderer<'a> for PageBreakRenderer<'a> {
    fn initial_layout_info(&self) -> LayoutInfo {
        LayoutInfo::default()
    }

    fn format(
        &mut self,
        _env: &LayoutEnvironment,
        area: Rect,
        _previous: Option<&FormatInfo<'a>>,
    ) -> Result<RenderRecord<'a>, LayoutError> {
        let height = if area.is_unbounded() {
            0.0
        } else {
            area.height.max(0.0)
        };
        let layout = LayoutInfo {
            content_area: Rect::new(area.x, area.y, area.width, height),
            ..LayoutInfo::default()
        };
        Ok(RenderRecord::new(
            self.element,
            FormatInfo::PageBreak(AtomicFormatInfo { placed: true }),
            layout,
        ))
    }

    fn render(
        &self,
        _record: &RenderRecord<'a>,
        _canvas: &mut dyn Canvas,
        _offset: Point,
    ) -> Result<(), LayoutError> {
        Ok(())
    }

    fn set_max_element_height(&mut self, _height: f32) {}
}
