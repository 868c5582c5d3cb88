use crate::algorithms::pagination::check_fit;
use crate::format_info::{FormatInfo, ParagraphFormatInfo};
use crate::interface::{ElementRenderer, FieldInfos, LayoutEnvironment, LayoutInfo};
use crate::painting::Canvas;
use crate::render_record::RenderRecord;
use crate::text::break_lines;
use crate::LayoutError;
use folio_idf::{Element, Paragraph};
use folio_types::{Point, Rect, UNBOUNDED};
use std::rc::Rc;

/// Lays out a paragraph line by line. Lines are the unit of splitting.
#[derive(Debug, Clone)]
pub struct ParagraphRenderer<'a> {
    element: &'a Element,
    paragraph: &'a Paragraph,
    fields: FieldInfos,
    max_height: f32,
}

impl<'a> ParagraphRenderer<'a> {
    pub fn new(element: &'a Element, paragraph: &'a Paragraph, fields: FieldInfos) -> Self {
        Self {
            element,
            paragraph,
            fields,
            max_height: UNBOUNDED,
        }
    }

    /// The paragraph text with its field placeholders filled in.
    fn resolved_text(&self) -> String {
        self.paragraph
            .text
            .replace("{page}", &self.fields.page_number.to_string())
            .replace("{section}", &self.fields.section_number.to_string())
    }

    fn text_width(&self, area: Rect) -> f32 {
        let format = &self.paragraph.format;
        (area.width - format.left_indent - format.right_indent).max(0.0)
    }
}

impl<'a> ElementRenderer<'a> for ParagraphRenderer<'a> {
    fn initial_layout_info(&self) -> LayoutInfo {
        let format = &self.paragraph.format;
        LayoutInfo {
            margin_top: format.space_before,
            margin_bottom: format.space_after,
            keep_together: format.keep_together,
            keep_with_next: format.keep_with_next,
            left: format.left_indent,
            page_break_before: format.page_break_before,
            ..LayoutInfo::default()
        }
    }

    fn format(
        &mut self,
        env: &LayoutEnvironment,
        area: Rect,
        previous: Option<&FormatInfo<'a>>,
    ) -> Result<RenderRecord<'a>, LayoutError> {
        let format = &self.paragraph.format;
        let line_height = env.measurer.line_height(format);
        let width = self.text_width(area);

        let (lines, start_line): (Rc<[String]>, usize) = match previous {
            Some(prev) => {
                let prev = prev.as_paragraph()?;
                (Rc::clone(&prev.lines), prev.end_line)
            }
            None => {
                let text = self.resolved_text();
                let lines = break_lines(&text, width, format.font_size, env.measurer);
                (lines.into(), 0)
            }
        };

        let available = area.height.min(self.max_height);
        let mut end_line = start_line;
        let mut used = 0.0;
        while end_line < lines.len() && check_fit(used, line_height, available, env.tolerance()).fits {
            used += line_height;
            end_line += 1;
        }

        let starting = start_line == 0;
        let info = ParagraphFormatInfo {
            lines,
            start_line,
            end_line,
            line_height,
            font_size: format.font_size,
            widow_control: format.widow_control,
        };
        let layout = LayoutInfo {
            content_area: Rect::new(
                area.x + format.left_indent,
                area.y,
                width,
                info.line_count() as f32 * line_height,
            ),
            margin_top: if starting { format.space_before } else { 0.0 },
            starting_height: line_height,
            trailing_height: line_height,
            page_break_before: starting && format.page_break_before,
            ..self.initial_layout_info()
        };
        Ok(RenderRecord::new(self.element, FormatInfo::Paragraph(info), layout))
    }

    fn render(
        &self,
        record: &RenderRecord<'a>,
        canvas: &mut dyn Canvas,
        offset: Point,
    ) -> Result<(), LayoutError> {
        let info = record.format_info.as_paragraph()?;
        let area = record.layout_info.content_area;
        let color = self.paragraph.format.color;
        for (i, line) in info.placed_lines().iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = area.y + i as f32 * info.line_height + info.font_size;
            canvas.draw_text(
                line,
                Point::new(offset.x + area.x, offset.y + baseline),
                info.font_size,
                color,
            );
        }
        Ok(())
    }

    fn set_max_element_height(&mut self, height: f32) {
        self.max_height = height;
    }
}
