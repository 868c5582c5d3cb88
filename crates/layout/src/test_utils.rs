use crate::config::LayoutConfig;
use crate::pages::{paginate_section, Page};
use crate::render_record::RenderRecord;
use crate::text::FixedMetrics;
use crate::LayoutError;
use folio_idf::{Element, PageSetup, Paragraph, Section, Table};
use folio_style::{Margins, ParagraphFormat, RowHeightRule};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A page whose content area is 280pt wide and `usable_height` tall.
pub fn small_page(usable_height: f32) -> PageSetup {
    PageSetup::custom(300.0, usable_height + 20.0, Margins::all(10.0))
}

/// A paragraph in the default 10pt format, 12pt per line.
pub fn body_paragraph(text: &str) -> Element {
    Element::Paragraph(Paragraph::new(text))
}

/// A paragraph of `count` hard lines.
pub fn lines_paragraph(count: usize) -> Element {
    let text: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
    body_paragraph(&text.join("\n"))
}

pub fn heading(text: &str) -> Element {
    Element::Paragraph(Paragraph::with_format(text, ParagraphFormat::heading(10.0)))
}

/// A table of one-line text cells with every row exactly `row_height` tall.
pub fn text_table(widths: &[f32], heading_rows: usize, body_rows: usize, row_height: f32) -> Table {
    let mut table = Table::new();
    for width in widths {
        table.add_column(*width);
    }
    for r in 0..heading_rows + body_rows {
        let row = table.add_row();
        row.height(row_height, RowHeightRule::Exactly);
        if r < heading_rows {
            row.heading();
        }
        for (c, cell) in row.cells.iter_mut().enumerate() {
            if r < heading_rows {
                cell.add_paragraph(format!("Header {c}"));
            } else {
                cell.add_paragraph(format!("R{r}C{c}"));
            }
        }
    }
    table
}

pub fn section_of(setup: PageSetup, elements: Vec<Element>) -> Section {
    Section {
        page_setup: setup,
        elements,
    }
}

pub fn layout_section<'a>(
    section: &'a Section,
    config: &LayoutConfig,
) -> Result<Vec<Page<'a>>, LayoutError> {
    let metrics = FixedMetrics::default();
    paginate_section(section, 1, config, &metrics, 1)
}

/// The records of every page, flattened, with the page index they are on.
pub fn placed<'p, 'a>(pages: &'p [Page<'a>]) -> Vec<(usize, &'p RenderRecord<'a>)> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(i, page)| page.records.iter().map(move |r| (i, r)))
        .collect()
}

/// `(start_line, end_line)` of a paragraph record.
pub fn line_range(record: &RenderRecord<'_>) -> (usize, usize) {
    let info = record.format_info.as_paragraph().unwrap();
    (info.start_line, info.end_line)
}

/// `(start_row, end_row)` of a table record.
pub fn row_range(record: &RenderRecord<'_>) -> (usize, usize) {
    let info = record.format_info.as_table().unwrap();
    (info.start_row.unwrap(), info.end_row.unwrap())
}
