use crate::algorithms::pagination::check_fit;
use crate::format_info::{AtomicFormatInfo, FormatInfo};
use crate::interface::{ElementRenderer, Floating, LayoutEnvironment, LayoutInfo, VerticalReference};
use crate::painting::Canvas;
use crate::render_record::RenderRecord;
use crate::LayoutError;
use folio_idf::{Element, Image, ImageAnchor};
use folio_types::{Point, Rect, UNBOUNDED};

/// Places an image in one piece or not at all.
#[derive(Debug, Clone)]
pub struct ImageRenderer<'a> {
    element: &'a Element,
    image: &'a Image,
    max_height: f32,
}

impl<'a> ImageRenderer<'a> {
    pub fn new(element: &'a Element, image: &'a Image) -> Self {
        Self {
            element,
            image,
            max_height: UNBOUNDED,
        }
    }
}

impl<'a> ElementRenderer<'a> for ImageRenderer<'a> {
    fn initial_layout_info(&self) -> LayoutInfo {
        let (floating, vertical_reference, margin_top) = match self.image.anchor {
            ImageAnchor::Inline => (Floating::TopBottom, VerticalReference::PreviousElement, 0.0),
            ImageAnchor::AreaTop => (Floating::None, VerticalReference::AreaTop, self.image.offset),
            ImageAnchor::Page => (Floating::None, VerticalReference::Page, self.image.offset),
        };
        LayoutInfo {
            keep_together: true,
            keep_with_next: self.image.keep_with_next,
            floating,
            vertical_reference,
            margin_top,
            ..LayoutInfo::default()
        }
    }

    fn format(
        &mut self,
        env: &LayoutEnvironment,
        area: Rect,
        previous: Option<&FormatInfo<'a>>,
    ) -> Result<RenderRecord<'a>, LayoutError> {
        if let Some(prev) = previous {
            prev.as_atomic()?;
        }
        // An image taller than any area is laid out at the largest height
        // allowed and drawn overflowing.
        let height = self.image.height.min(self.max_height);
        // Anchored images take no flow space, so only the area size limits them.
        let room = match self.image.anchor {
            ImageAnchor::Inline => area.height,
            ImageAnchor::AreaTop | ImageAnchor::Page => self.max_height,
        };
        let placed = check_fit(0.0, height, room, env.tolerance()).fits;

        let layout = LayoutInfo {
            content_area: Rect::new(
                area.x,
                area.y,
                self.image.width,
                if placed { height } else { 0.0 },
            ),
            starting_height: height,
            trailing_height: height,
            min_width: self.image.width,
            ..self.initial_layout_info()
        };
        Ok(RenderRecord::new(
            self.element,
            FormatInfo::Image(AtomicFormatInfo { placed }),
            layout,
        ))
    }

    fn render(
        &self,
        record: &RenderRecord<'a>,
        canvas: &mut dyn Canvas,
        offset: Point,
    ) -> Result<(), LayoutError> {
        if !record.format_info.as_atomic()?.placed {
            return Ok(());
        }
        let area = record.layout_info.content_area;
        canvas.draw_image(
            &self.image.source,
            Rect::new(
                offset.x + area.x,
                offset.y + area.y,
                self.image.width,
                self.image.height,
            ),
        );
        Ok(())
    }

    fn set_max_element_height(&mut self, height: f32) {
        self.max_height = height;
    }
}
