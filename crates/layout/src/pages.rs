//! Pages as the area source of a section's top-level flow.

use crate::algorithms::top_down::{FlowCursor, TopDownFormatter};
use crate::config::LayoutConfig;
use crate::interface::{AreaSource, ElementAlignment, FieldInfos, LayoutEnvironment, LayoutInfo, VerticalReference};
use crate::nodes::render_records;
use crate::painting::Canvas;
use crate::render_record::RenderRecord;
use crate::text::TextMeasurer;
use crate::LayoutError;
use folio_idf::{PageSetup, Section};
use folio_types::{Point, Rect};
use log::{debug, warn};

/// One laid out page and the records placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub number: usize,
    pub content_area: Rect,
    pub records: Vec<RenderRecord<'a>>,
}

/// Hands out one content area per page, up to a page limit.
#[derive(Debug)]
pub struct PageAreaSource<'a> {
    setup: PageSetup,
    pages: Vec<Page<'a>>,
    max_pages: usize,
    first_page_number: usize,
    section_number: usize,
}

impl<'a> PageAreaSource<'a> {
    pub fn new(setup: PageSetup, max_pages: usize, first_page_number: usize, section_number: usize) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            max_pages,
            first_page_number,
            section_number,
        }
    }

    pub fn pages(&self) -> &[Page<'a>] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page<'a>> {
        self.pages
    }

    fn has_room(&self) -> bool {
        self.pages.len() < self.max_pages
    }
}

impl<'a> AreaSource<'a> for PageAreaSource<'a> {
    fn next_area(&mut self) -> Option<Rect> {
        if !self.has_room() {
            warn!("Page limit of {} reached.", self.max_pages);
            return None;
        }
        let area = self.setup.content_area();
        let number = self.first_page_number + self.pages.len();
        debug!("Starting page {}.", number);
        self.pages.push(Page {
            number,
            content_area: area,
            records: Vec::new(),
        });
        Some(area)
    }

    fn probe_next_area(&self) -> Option<Rect> {
        self.has_room().then(|| self.setup.content_area())
    }

    fn store_render_records(&mut self, records: Vec<RenderRecord<'a>>) {
        match self.pages.last_mut() {
            Some(page) => page.records.extend(records),
            None if records.is_empty() => {}
            None => warn!("Dropping {} records stored before the first page.", records.len()),
        }
    }

    fn replace_last_record(&mut self, record: RenderRecord<'a>) {
        let Some(page) = self.pages.iter_mut().rev().find(|p| !p.records.is_empty()) else {
            return;
        };
        page.records.pop();
        if !record.is_empty() {
            page.records.push(record);
        }
    }

    fn position_vertically(&self, layout: &mut LayoutInfo) -> bool {
        let area = self.setup.content_area();
        let y = match layout.vertical_reference {
            VerticalReference::PreviousElement => return false,
            VerticalReference::AreaTop => area.y + layout.margin_top,
            VerticalReference::Page => layout.margin_top,
        };
        layout.content_area.y = y;
        true
    }

    fn position_horizontally(&self, layout: &mut LayoutInfo) -> bool {
        let area = self.setup.content_area();
        let content = &mut layout.content_area;
        let x = match layout.horizontal_alignment {
            ElementAlignment::Near => area.x + layout.left,
            ElementAlignment::Center => area.x + (area.width - content.width) / 2.0,
            ElementAlignment::Far => area.right() - content.width,
        };
        let moved = x != content.x;
        content.x = x;
        moved
    }

    fn is_area_break_before(&self, layout: &LayoutInfo) -> bool {
        layout.page_break_before
    }

    fn field_infos(&self) -> FieldInfos {
        FieldInfos {
            page_number: self.first_page_number + self.pages.len().saturating_sub(1),
            section_number: self.section_number,
        }
    }
}

/// Lays out the elements of one section onto pages numbered from `first_page`.
pub fn paginate_section<'a>(
    section: &'a Section,
    section_number: usize,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
    first_page: usize,
) -> Result<Vec<Page<'a>>, LayoutError> {
    let setup = section.page_setup;
    let env = LayoutEnvironment::new(config, measurer, setup.usable_height());
    let mut source = PageAreaSource::new(setup, config.max_pages, first_page, section_number);
    let formatter = TopDownFormatter::new(&section.elements, env);

    let outcome = formatter.format_on_areas(&mut source, FlowCursor::start())?;
    if !outcome.finished {
        return Err(LayoutError::OutOfSpace {
            remaining: section.elements.len() - outcome.cursor.index,
        });
    }
    debug!(
        "Section {} laid out on {} pages.",
        section_number,
        source.pages().len()
    );
    Ok(source.into_pages())
}

/// Draws laid out pages, each preceded by `begin_page`.
pub fn render_pages(pages: &[Page<'_>], setup: &PageSetup, canvas: &mut dyn Canvas) -> Result<(), LayoutError> {
    for page in pages {
        canvas.begin_page(page.number, setup.page_width(), setup.page_height());
        render_records(&page.records, canvas, Point::zero())?;
    }
    Ok(())
}
