use crate::config::LayoutConfig;
use crate::interface::{ElementRenderer, FieldInfos, LayoutEnvironment};
use crate::nodes::table::TableProgress;
use crate::nodes::RenderNode;
use crate::pages::render_pages;
use crate::painting::RecordingCanvas;
use crate::test_utils::*;
use crate::text::FixedMetrics;
use crate::LayoutError;
use folio_idf::{Element, Table};
use folio_style::{Border, Borders, RowHeightRule, VerticalAlignment};
use folio_types::{CellId, Color, Rect};

fn wrap_in_cell(inner: Table) -> Table {
    let mut outer = Table::new();
    outer.add_column(250.0);
    outer.add_row().cells[0].add(inner);
    outer
}

#[test]
fn heading_rows_repeat_on_every_page() {
    init_logger();
    let table = text_table(&[200.0], 3, 50, 20.0);
    let section = section_of(small_page(130.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    assert_eq!(pages.len(), 17);
    assert_eq!(row_range(&pages[0].records[0]), (3, 5));
    assert_eq!(pages[0].records[0].layout_info.content_area.height, 120.0);

    let mut next_row = 3;
    for page in &pages {
        assert_eq!(page.records.len(), 1);
        let (start, end) = row_range(&page.records[0]);
        assert_eq!(start, next_row);
        next_row = end + 1;
    }
    assert_eq!(next_row, 53);

    let last = pages.last().unwrap().records[0].format_info.as_table().unwrap();
    assert_eq!(last.progress(), TableProgress::Finished);
    assert_eq!(last.last_header_row(), Some(2));
    let boundaries: Vec<(usize, f32)> = last.boundaries.iter().collect();
    assert_eq!(boundaries.len(), 54);
    assert!(boundaries.windows(2).all(|w| w[0].0 + 1 == w[1].0 && w[0].1 < w[1].1));
}

#[test]
fn repeated_headings_are_drawn_on_each_page() {
    let table = text_table(&[100.0], 1, 10, 20.0);
    let section = section_of(small_page(100.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();
    let mut canvas = RecordingCanvas::new();
    render_pages(&pages, &section.page_setup, &mut canvas).unwrap();

    assert_eq!(pages.len(), 3);
    let headings = canvas.texts().filter(|(t, _)| *t == "Header 0").count();
    assert_eq!(headings, 3);
    let body = canvas.texts().filter(|(t, _)| t.starts_with('R')).count();
    assert_eq!(body, 10);
}

#[test]
fn table_of_only_headings_has_no_repeated_rows() {
    let table = text_table(&[100.0], 3, 0, 20.0);
    let section = section_of(small_page(200.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    let info = pages[0].records[0].format_info.as_table().unwrap();
    assert_eq!(info.last_header_row(), None);
    assert_eq!(row_range(&pages[0].records[0]), (0, 2));
    assert!(info.is_ending());
}

#[test]
fn merged_rows_stay_on_one_page() {
    let mut table = text_table(&[100.0, 100.0], 0, 3, 30.0);
    table.cell_mut(1, 0).unwrap().merge_down = 1;
    table.cell_mut(2, 0).unwrap().elements.clear();
    let section = section_of(small_page(70.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(row_range(&pages[0].records[0]), (0, 0));
    assert_eq!(row_range(&pages[1].records[0]), (1, 2));
    assert_eq!(pages[1].records[0].layout_info.content_area.height, 60.0);
}

#[test]
fn keep_together_table_moves_to_the_next_page() {
    let mut table = text_table(&[100.0], 0, 3, 20.0);
    table.keep_together = true;
    let section = section_of(small_page(70.0), vec![lines_paragraph(3), table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].records.len(), 1);
    assert_eq!(row_range(&pages[1].records[0]), (0, 2));
    assert!(!pages[1].records[0].layout_info.keep_together);
}

#[test]
fn nested_table_taller_than_a_page_continues_across_pages() {
    init_logger();
    let inner = text_table(&[200.0], 0, 30, 20.0);
    let section = section_of(small_page(130.0), vec![wrap_in_cell(inner).into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    assert_eq!(pages.len(), 5);
    for (i, page) in pages.iter().enumerate() {
        let outer = page.records[0].format_info.as_table().unwrap();
        assert_eq!(outer.start_row, Some(0));
        let cell = outer.cell(CellId::new(0, 0)).unwrap();
        assert_eq!(row_range(&cell.records()[0]), (6 * i, 6 * i + 5));
        assert_eq!(cell.is_done(), i == 4);
    }
    let last = pages[4].records[0].format_info.as_table().unwrap();
    assert_eq!(last.progress(), TableProgress::Finished);
}

#[test]
fn malformed_tables_fail_layout() {
    let mut no_columns = Table::new();
    no_columns.rows.push(Default::default());
    let section = section_of(small_page(100.0), vec![no_columns.into()]);
    let err = layout_section(&section, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, LayoutError::MalformedTable(_)));
}

#[test]
fn nesting_is_limited_by_config() {
    let config = LayoutConfig {
        max_nesting_depth: 3,
        ..LayoutConfig::default()
    };
    let three_levels = wrap_in_cell(wrap_in_cell(text_table(&[50.0], 0, 1, 20.0)));
    let section = section_of(small_page(200.0), vec![three_levels.clone().into()]);
    assert!(layout_section(&section, &config).is_ok());

    let four_levels = wrap_in_cell(three_levels);
    let section = section_of(small_page(200.0), vec![four_levels.into()]);
    let err = layout_section(&section, &config).unwrap_err();
    assert_eq!(err, LayoutError::NestingTooDeep { depth: 4, limit: 3 });
}

#[test]
fn cell_content_is_aligned_vertically() {
    let mut table = text_table(&[100.0, 100.0], 0, 1, 60.0);
    table.cell_mut(0, 1).unwrap().vertical_alignment = VerticalAlignment::Bottom;
    table.cell_mut(0, 0).unwrap().vertical_alignment = VerticalAlignment::Top;
    let section = section_of(small_page(200.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();
    let mut canvas = RecordingCanvas::new();
    render_pages(&pages, &section.page_setup, &mut canvas).unwrap();

    let origins: Vec<_> = canvas.texts().map(|(_, origin)| origin).collect();
    assert_eq!(origins.len(), 2);
    assert_eq!(origins[0].y, 10.0 + 10.0);
    assert_eq!(origins[1].y - origins[0].y, 60.0 - 12.0);
    assert_eq!(origins[1].x - origins[0].x, 100.0);
}

#[test]
fn reformatting_is_idempotent() {
    let element: Element = text_table(&[100.0, 80.0], 1, 12, 15.0).into();
    let config = LayoutConfig::default();
    let metrics = FixedMetrics::default();
    let env = LayoutEnvironment::new(&config, &metrics, 100.0);
    let area = Rect::new(0.0, 0.0, 180.0, 100.0);

    let mut renderer = RenderNode::create(&element, FieldInfos::default());
    renderer.set_max_element_height(100.0);
    let first = renderer.format(&env, area, None).unwrap();
    let second = renderer.format(&env, area, None).unwrap();
    assert_eq!(first, second);

    let next = renderer.format(&env, area, Some(&first.format_info)).unwrap();
    let again = renderer.format(&env, area, Some(&first.format_info)).unwrap();
    assert_eq!(next, again);
    assert_eq!(row_range(&next).0, row_range(&first).1 + 1);
}

#[test]
fn borders_widen_and_shift_the_table() {
    let mut table = text_table(&[100.0, 100.0], 0, 2, 20.0);
    table.borders = Some(Borders::all(Border::new(1.0, Color::BLACK)));
    let section = section_of(small_page(200.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    let layout = &pages[0].records[0].layout_info;
    assert_eq!(layout.content_area.x, 9.0);
    assert_eq!(layout.content_area.width, 201.0);
    // Top border, then two rows each closed by a bottom border.
    assert_eq!(layout.content_area.height, 1.0 + 21.0 + 21.0);
}

#[test]
fn table_without_rows_is_placed_empty_handed() {
    let mut table = Table::new();
    table.add_column(100.0);
    let section = section_of(small_page(100.0), vec![table.into(), body_paragraph("after")]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    assert_eq!(pages.len(), 1);
    let record = &pages[0].records[0];
    assert!(!record.is_empty());
    assert!(record.format_info.is_ending());
    assert_eq!(record.layout_info.content_area.height, 0.0);
    assert_eq!(pages[0].records[1].layout_info.content_area.y, 10.0);
}

#[test]
fn row_height_rules_shape_the_rows() {
    let mut table = text_table(&[100.0], 0, 3, 30.0);
    table.rows[0].height(5.0, RowHeightRule::AtLeast);
    table.rows[1].height(5.0, RowHeightRule::Auto);
    table.rows[1].padding(2.0, 2.0);
    let section = section_of(small_page(200.0), vec![table.into()]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    let info = pages[0].records[0].format_info.as_table().unwrap();
    assert_eq!(info.boundaries.get(1).unwrap(), 12.0);
    assert_eq!(info.boundaries.get(2).unwrap(), 12.0 + 16.0);
    assert_eq!(info.boundaries.get(3).unwrap(), 28.0 + 30.0);
}

#[test]
fn first_rows_that_do_not_fit_move_to_the_next_page() {
    let table = text_table(&[100.0], 0, 3, 30.0);
    let element: Element = table.into();
    let section = section_of(small_page(100.0), vec![lines_paragraph(7), element]);
    let pages = layout_section(&section, &LayoutConfig::default()).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].records.len(), 1);
    assert!(pages[0].records[0].format_info.as_paragraph().is_ok());
    assert_eq!(row_range(&pages[1].records[0]), (0, 2));

    let table_records: Vec<_> = placed(&pages)
        .into_iter()
        .filter(|(_, r)| r.belongs_to(&section.elements[1]))
        .collect();
    assert_eq!(table_records.len(), 1);
    assert_eq!(table_records[0].0, 1);
}

#[test]
fn continuing_cell_waits_for_an_area_with_room() {
    init_logger();
    let element: Element = wrap_in_cell(text_table(&[200.0], 0, 30, 20.0)).into();
    let config = LayoutConfig::default();
    let metrics = FixedMetrics::default();
    let env = LayoutEnvironment::new(&config, &metrics, 130.0);

    let mut renderer = RenderNode::create(&element, FieldInfos::default());
    renderer.set_max_element_height(130.0);
    let first = renderer
        .format(&env, Rect::new(0.0, 0.0, 250.0, 130.0), None)
        .unwrap();
    let cell = first.format_info.as_table().unwrap().cell(CellId::new(0, 0)).unwrap();
    assert!(!cell.is_done());

    let squeezed = renderer
        .format(&env, Rect::new(0.0, 0.0, 250.0, 5.0), Some(&first.format_info))
        .unwrap();
    assert!(squeezed.is_empty());

    let next = renderer
        .format(&env, Rect::new(0.0, 0.0, 250.0, 130.0), Some(&first.format_info))
        .unwrap();
    let cell = next.format_info.as_table().unwrap().cell(CellId::new(0, 0)).unwrap();
    assert_eq!(row_range(&cell.records()[0]), (6, 11));
}
