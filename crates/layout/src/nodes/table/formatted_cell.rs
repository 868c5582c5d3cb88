//! Formatting the content of one table cell through a nested flow pass.

use super::merged_cells::MergedCell;
use crate::algorithms::top_down::{FlowCursor, TopDownFormatter};
use crate::interface::{AreaSource, FieldInfos, LayoutEnvironment, LayoutInfo};
use crate::render_record::{total_height, RenderRecord};
use crate::LayoutError;
use folio_idf::{Cell, Table};
use folio_style::{BorderSide, RowHeightRule};
use folio_types::{CellId, Rect, UNBOUNDED};

/// Horizontal and vertical space around a cell's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Width of the covered columns less the right border.
    pub inner_width: f32,
    /// `inner_width` less the left and right column padding.
    pub content_width: f32,
    pub left_padding: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
    pub height_rule: RowHeightRule,
    pub row_height: f32,
    pub bottom_border: f32,
    /// Height a cell with no content left still takes.
    pub empty_line_height: f32,
}

impl CellMetrics {
    pub fn new(table: &Table, cell: &Cell, merged: &MergedCell, env: &LayoutEnvironment) -> Self {
        let id = merged.id;
        let columns = &table.columns[id.column..=merged.last_column()];
        let covered_width: f32 = columns.iter().map(|c| c.width).sum();
        let inner_width = covered_width - merged.borders.width(BorderSide::Right);
        let left_padding = columns.first().map_or(0.0, |c| c.left_padding);
        let right_padding = columns.last().map_or(0.0, |c| c.right_padding);
        let row = &table.rows[id.row];
        let format = cell.format.as_ref().unwrap_or(&table.format);

        Self {
            inner_width,
            content_width: (inner_width - left_padding - right_padding).max(0.0),
            left_padding,
            top_padding: row.top_padding,
            bottom_padding: row.bottom_padding,
            height_rule: row.height_rule,
            row_height: row.height,
            bottom_border: merged.borders.width(BorderSide::Bottom),
            empty_line_height: env.measurer.line_height(format)
                + format.space_before
                + format.space_after,
        }
    }
}

/// The formatting state of one cell, carried between the areas a table
/// spans.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedCell<'a> {
    cell: &'a Cell,
    pub id: CellId,
    pub metrics: CellMetrics,
    fields: FieldInfos,
    cursor: FlowCursor<'a>,
    done: bool,
    consumed: bool,
    content_height: f32,
    records: Vec<RenderRecord<'a>>,
}

impl<'a> FormattedCell<'a> {
    pub fn new(cell: &'a Cell, id: CellId, metrics: CellMetrics, fields: FieldInfos) -> Self {
        Self {
            cell,
            id,
            metrics,
            fields,
            cursor: FlowCursor::start(),
            done: false,
            consumed: false,
            content_height: 0.0,
            records: Vec::new(),
        }
    }

    /// Formats the whole content against an unbounded height to learn its
    /// natural height. The resume position is left untouched so a later
    /// bounded pass starts from the beginning.
    pub fn measure(&mut self, env: &LayoutEnvironment) -> Result<(), LayoutError> {
        let (finished, _, records) = self.run(env, UNBOUNDED, self.cursor.clone())?;
        self.content_height = self.extent(&records);
        self.records = records;
        self.done = finished;
        Ok(())
    }

    /// Formats the content still to be placed against `constraint`.
    ///
    /// A cell already done is left as is unless `force` is set.
    pub fn reformat(
        &mut self,
        env: &LayoutEnvironment,
        constraint: f32,
        force: bool,
    ) -> Result<(), LayoutError> {
        if self.done && !force {
            return Ok(());
        }
        let constraint = constraint.max(0.0);
        let (finished, cursor, records) = self.run(env, constraint, self.cursor.clone())?;
        self.content_height = self.extent(&records);
        self.records = records;
        self.cursor = cursor;
        self.done = finished && self.content_height <= constraint + env.tolerance();
        Ok(())
    }

    /// Marks the content as placed on an earlier area. The cell keeps only
    /// the height of an empty line.
    pub fn consume(&mut self) {
        self.records.clear();
        self.content_height = self.metrics.empty_line_height;
        self.done = true;
        self.consumed = true;
    }

    fn run(
        &self,
        env: &LayoutEnvironment,
        height: f32,
        cursor: FlowCursor<'a>,
    ) -> Result<(bool, FlowCursor<'a>, Vec<RenderRecord<'a>>), LayoutError> {
        let area = Rect::new(0.0, 0.0, self.metrics.content_width, height);
        let mut source = CellAreaSource::new(area, self.fields);
        let formatter = TopDownFormatter::new(&self.cell.elements, *env);
        let outcome = formatter.format_on_areas(&mut source, cursor)?;
        Ok((outcome.finished, outcome.cursor, source.records))
    }

    fn extent(&self, records: &[RenderRecord<'a>]) -> f32 {
        if records.is_empty() {
            self.metrics.empty_line_height
        } else {
            total_height(records)
        }
    }

    pub fn cell(&self) -> &'a Cell {
        self.cell
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Whether the cell may be split across areas.
    pub fn is_splittable(&self) -> bool {
        !self.consumed && self.cell.has_nested_table()
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Height between the top boundary of the cell and its bottom border.
    pub fn inner_height(&self) -> f32 {
        let m = &self.metrics;
        m.height_rule
            .resolve(m.row_height, m.top_padding + self.content_height + m.bottom_padding)
    }

    /// Space the cell takes below its top boundary.
    pub fn occupied_height(&self) -> f32 {
        self.inner_height() + self.metrics.bottom_border
    }

    pub fn records(&self) -> &[RenderRecord<'a>] {
        &self.records
    }
}

/// Hands a cell's flow pass a single area and collects what is placed on it.
struct CellAreaSource<'a> {
    area: Option<Rect>,
    fields: FieldInfos,
    records: Vec<RenderRecord<'a>>,
}

impl<'a> CellAreaSource<'a> {
    fn new(area: Rect, fields: FieldInfos) -> Self {
        Self {
            area: Some(area),
            fields,
            records: Vec::new(),
        }
    }
}

impl<'a> AreaSource<'a> for CellAreaSource<'a> {
    fn next_area(&mut self) -> Option<Rect> {
        self.area.take()
    }

    fn probe_next_area(&self) -> Option<Rect> {
        None
    }

    fn store_render_records(&mut self, records: Vec<RenderRecord<'a>>) {
        self.records.extend(records);
    }

    fn replace_last_record(&mut self, record: RenderRecord<'a>) {
        self.records.pop();
        if !record.is_empty() {
            self.records.push(record);
        }
    }

    fn position_vertically(&self, _layout: &mut LayoutInfo) -> bool {
        false
    }

    fn position_horizontally(&self, _layout: &mut LayoutInfo) -> bool {
        false
    }

    fn is_area_break_before(&self, _layout: &LayoutInfo) -> bool {
        false
    }

    fn field_infos(&self) -> FieldInfos {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::nodes::table::merged_cells::MergedCellList;
    use crate::text::FixedMetrics;

    fn cell_table(lines: usize) -> Table {
        let mut table = Table::new();
        table.add_column(100.0).padding(5.0, 5.0);
        let row = table.add_row();
        row.padding(2.0, 3.0);
        let cell = &mut row.cells[0];
        for i in 0..lines {
            cell.add_paragraph(format!("line {i}"));
        }
        table
    }

    #[test]
    fn measure_reports_the_natural_height() {
        let config = LayoutConfig::default();
        let metrics = FixedMetrics::default();
        let env = LayoutEnvironment::new(&config, &metrics, 0.0);
        let table = cell_table(3);
        let merged = MergedCellList::new(&table).unwrap();
        let origin = &merged.cells()[0];
        let cell_metrics = CellMetrics::new(&table, &table.rows[0].cells[0], origin, &env);
        assert_eq!(cell_metrics.content_width, 90.0);

        let mut cell = FormattedCell::new(&table.rows[0].cells[0], origin.id, cell_metrics, FieldInfos::default());
        cell.measure(&env).unwrap();
        assert!(cell.is_done());
        assert_eq!(cell.content_height(), 36.0);
        assert_eq!(cell.inner_height(), 41.0);
        assert_eq!(cell.records().len(), 3);
    }

    #[test]
    fn empty_cells_take_one_line() {
        let config = LayoutConfig::default();
        let metrics = FixedMetrics::default();
        let env = LayoutEnvironment::new(&config, &metrics, 0.0);
        let table = cell_table(0);
        let merged = MergedCellList::new(&table).unwrap();
        let origin = &merged.cells()[0];
        let cell_metrics = CellMetrics::new(&table, &table.rows[0].cells[0], origin, &env);

        let mut cell = FormattedCell::new(&table.rows[0].cells[0], origin.id, cell_metrics, FieldInfos::default());
        cell.measure(&env).unwrap();
        assert_eq!(cell.content_height(), 12.0);

        cell.consume();
        assert!(cell.is_done());
        assert!(cell.records().is_empty());
        assert!(!cell.is_splittable());
    }

    #[test]
    fn bounded_reformat_resumes_where_it_stopped() {
        let config = LayoutConfig::default();
        let metrics = FixedMetrics::default();
        let env = LayoutEnvironment::new(&config, &metrics, 0.0);
        let table = cell_table(4);
        let merged = MergedCellList::new(&table).unwrap();
        let origin = &merged.cells()[0];
        let cell_metrics = CellMetrics::new(&table, &table.rows[0].cells[0], origin, &env);

        let mut cell = FormattedCell::new(&table.rows[0].cells[0], origin.id, cell_metrics, FieldInfos::default());
        cell.reformat(&env, 25.0, false).unwrap();
        assert!(!cell.is_done());
        assert_eq!(cell.records().len(), 2);

        cell.reformat(&env, 100.0, false).unwrap();
        assert!(cell.is_done());
        assert_eq!(cell.records().len(), 2);
        assert_eq!(cell.content_height(), 24.0);
    }
}
