use super::boundary::RowBoundaryMap;
use super::format_info::{TableFormatInfo, TableStructure};
use super::formatted_cell::{CellMetrics, FormattedCell};
use super::merged_cells::MergedCellList;
use crate::format_info::FormatInfo;
use crate::interface::{ElementAlignment, ElementRenderer, FieldInfos, LayoutEnvironment, LayoutInfo};
use crate::nodes::render_records;
use crate::painting::box_painter::{paint_borders, paint_shading};
use crate::painting::Canvas;
use crate::render_record::RenderRecord;
use crate::LayoutError;
use folio_idf::{Element, Table};
use folio_style::{BorderSide, RowAlignment, VerticalAlignment};
use folio_types::{CellId, Point, Rect, UNBOUNDED};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct TableRenderer<'a> {
    element: &'a Element,
    table: &'a Table,
    fields: FieldInfos,
    max_height: f32,
}

/// A row group probed against the area, not yet committed.
struct Trial<'a> {
    cells: Vec<FormattedCell<'a>>,
    boundaries: RowBoundaryMap,
}

impl<'a> TableRenderer<'a> {
    pub fn new(element: &'a Element, table: &'a Table, fields: FieldInfos) -> Self {
        Self {
            element,
            table,
            fields,
            max_height: UNBOUNDED,
        }
    }

    /// Resolves the table's structure and measures every cell.
    fn initialize(&self, env: &LayoutEnvironment) -> Result<TableFormatInfo<'a>, LayoutError> {
        let merged = MergedCellList::new(self.table)?;
        let connectivity = merged.connectivity();
        let rows = merged.row_count();

        let heading_rows = self
            .table
            .rows
            .iter()
            .take_while(|r| r.heading_format)
            .count();
        let last_header_row = connectivity[..heading_rows]
            .iter()
            .copied()
            .max()
            .filter(|last| *last + 1 < rows);

        let left_border_offset = merged
            .cells()
            .iter()
            .filter(|c| c.id.column == 0)
            .map(|c| c.borders.width(BorderSide::Left))
            .fold(0.0, f32::max);

        let mut cells = BTreeMap::new();
        for origin in merged.cells() {
            let cell = &self.table.rows[origin.id.row].cells[origin.id.column];
            let metrics = CellMetrics::new(self.table, cell, origin, env);
            let mut formatted = FormattedCell::new(cell, origin.id, metrics, self.fields);
            formatted.measure(env)?;
            cells.insert(origin.id, formatted);
        }

        let structure = TableStructure {
            merged,
            connectivity,
            last_header_row,
            left_border_offset,
        };
        debug!(
            "Table with {} rows, headings up to {:?}.",
            rows, structure.last_header_row
        );
        Ok(TableFormatInfo {
            start_row: None,
            end_row: None,
            last_group_start: None,
            is_ending: false,
            structure: Rc::new(structure),
            cells,
            boundaries: RowBoundaryMap::new(),
            top_height: 0.0,
        })
    }

    /// The state to continue from and the row to start at.
    fn resume(&self, previous: &TableFormatInfo<'a>) -> (TableFormatInfo<'a>, usize) {
        let mut info = previous.clone();
        let first_body = info.structure.first_body_row();
        let start = match (previous.end_row, previous.last_group_start) {
            (Some(end), Some(group)) if !previous.last_group_is_done() => {
                // Content already placed stays on the previous area.
                for origin in info.structure.merged.cells_in_rows(group, end) {
                    if let Some(cell) = info.cells.get_mut(&origin.id) {
                        if cell.is_done() && !cell.is_consumed() {
                            cell.consume();
                        }
                    }
                }
                group
            }
            (Some(end), _) => end + 1,
            (None, _) => first_body,
        };
        info.boundaries.truncate_after(start);
        (info, start)
    }

    fn layout_alignment(&self) -> ElementAlignment {
        match self.table.alignment {
            RowAlignment::Left => ElementAlignment::Near,
            RowAlignment::Center => ElementAlignment::Center,
            RowAlignment::Right => ElementAlignment::Far,
        }
    }

    fn left_indent(&self, structure: &TableStructure) -> f32 {
        match self.table.left_indent {
            Some(indent) => indent,
            None if self.table.alignment == RowAlignment::Left => {
                let padding = self.table.columns.first().map_or(0.0, |c| c.left_padding);
                -(structure.left_border_offset + padding)
            }
            None => 0.0,
        }
    }

    fn occupied(cells: &BTreeMap<CellId, FormattedCell<'a>>, id: CellId) -> f32 {
        cells.get(&id).map_or(0.0, FormattedCell::occupied_height)
    }

    /// Reformats the cells of rows `row..=group_end` that may change against
    /// the space left in `available`, on copies.
    #[allow(clippy::too_many_arguments)]
    fn probe_group(
        &self,
        env: &LayoutEnvironment,
        info: &TableFormatInfo<'a>,
        boundaries: &RowBoundaryMap,
        start: usize,
        row: usize,
        group_end: usize,
        available: f32,
    ) -> Result<Trial<'a>, LayoutError> {
        let merged = &info.structure.merged;
        let mut cells = Vec::new();
        for origin in merged.cells_in_rows(row, group_end) {
            let Some(current) = info.cells.get(&origin.id) else {
                return Err(LayoutError::MissingRowCell(origin.id.row));
            };
            let mut cell = current.clone();
            if !cell.is_consumed() && (!cell.is_done() || cell.is_splittable()) {
                let m = cell.metrics;
                let above = info.top_height + boundaries.get(origin.id.row)? - boundaries.get(start)?;
                let constraint =
                    available - above - m.top_padding - m.bottom_padding - m.bottom_border;
                cell.reformat(env, constraint, true)?;
            }
            cells.push(cell);
        }

        let mut trial_bounds = boundaries.clone();
        trial_bounds.truncate_after(row);
        trial_bounds.extend_to(group_end + 1, merged, |origin| {
            cells
                .iter()
                .find(|c| c.id == origin.id)
                .map_or_else(|| Self::occupied(&info.cells, origin.id), FormattedCell::occupied_height)
        })?;
        Ok(Trial {
            cells,
            boundaries: trial_bounds,
        })
    }

    fn empty_record(&self, mut info: TableFormatInfo<'a>, area: Rect) -> RenderRecord<'a> {
        info.remove_ending();
        let layout = LayoutInfo {
            content_area: Rect::new(area.x, area.y, 0.0, 0.0),
            ..self.initial_layout_info()
        };
        RenderRecord::new(self.element, FormatInfo::Table(Box::new(info)), layout)
    }

    fn render_cell(
        &self,
        info: &TableFormatInfo<'a>,
        id: CellId,
        top: f32,
        table_x: f32,
        continued_top: bool,
        canvas: &mut dyn Canvas,
    ) -> Result<(), LayoutError> {
        let merged = &info.structure.merged;
        let (Some(origin), Some(cell)) = (merged.get(id), info.cells.get(&id)) else {
            return Err(LayoutError::MissingRowCell(id.row));
        };
        let m = cell.metrics;
        let row_top = info.boundaries.get(id.row)?;
        let row_bottom = info.boundaries.get(origin.last_row() + 1)?;
        let x = table_x
            + info.structure.left_border_offset
            + self.table.columns[..id.column].iter().map(|c| c.width).sum::<f32>();
        let inner = Rect::new(x, top, m.inner_width, row_bottom - row_top - m.bottom_border);

        let source = cell.cell();
        paint_shading(canvas, inner, source.shading.as_ref().or(self.table.shading.as_ref()));

        let records = cell.records();
        if !records.is_empty() {
            let content_top = records.first().map_or(0.0, RenderRecord::outer_top);
            let room = inner.height - m.top_padding - m.bottom_padding;
            let slack = (room - cell.content_height()).max(0.0);
            let shift = match source.vertical_alignment {
                VerticalAlignment::Top => 0.0,
                VerticalAlignment::Center => slack / 2.0,
                VerticalAlignment::Bottom => slack,
            };
            let origin_point = Point::new(
                inner.x + m.left_padding,
                inner.y + m.top_padding + shift - content_top,
            );
            render_records(records, canvas, origin_point)?;
        }

        let mut borders = origin.borders;
        if continued_top {
            borders.top = origin.own_borders.top;
        }
        paint_borders(canvas, inner, &borders);
        Ok(())
    }
}

impl<'a> ElementRenderer<'a> for TableRenderer<'a> {
    fn initial_layout_info(&self) -> LayoutInfo {
        LayoutInfo {
            keep_together: self.table.keep_together,
            horizontal_alignment: self.layout_alignment(),
            ..LayoutInfo::default()
        }
    }

    fn format(
        &mut self,
        env: &LayoutEnvironment,
        area: Rect,
        previous: Option<&FormatInfo<'a>>,
    ) -> Result<RenderRecord<'a>, LayoutError> {
        let tolerance = env.tolerance();
        let cell_env = env.nested()?;

        let (mut info, start) = match previous {
            Some(prev) => self.resume(prev.as_table()?),
            None => {
                let info = self.initialize(&cell_env)?;
                let start = info.structure.first_body_row();
                (info, start)
            }
        };
        let structure = Rc::clone(&info.structure);
        let merged = &structure.merged;
        let rows = structure.row_count();
        let first_body = structure.first_body_row();
        let left = self.left_indent(&structure);
        let width = structure.left_border_offset + self.table.total_width();

        if rows == 0 {
            info.is_ending = true;
            let layout = LayoutInfo {
                content_area: Rect::new(area.x + left, area.y, width, 0.0),
                left,
                ..self.initial_layout_info()
            };
            return Ok(RenderRecord::new(self.element, FormatInfo::Table(Box::new(info)), layout));
        }

        info.top_height = match structure.last_header_row {
            Some(last) => {
                info.boundaries
                    .extend_to(last + 1, merged, |c| Self::occupied(&info.cells, c.id))?;
                info.boundaries.get(last + 1)? + merged.top_border_width(0)
            }
            None if start == first_body => merged.top_border_width(0),
            None => merged.top_border_width(start),
        };
        let available = area.height;

        let mut end_row = None;
        let mut group_start = None;
        let mut height = 0.0;
        let mut row = start;
        let mut first_group = true;
        while row < rows {
            let group_end = structure.connectivity[row];
            let cells_snapshot = &info.cells;
            info.boundaries
                .extend_to(group_end + 1, merged, |c| Self::occupied(cells_snapshot, c.id))?;
            let top_offset = info.top_height - info.boundaries.get(start)?;
            let mut candidate = top_offset + info.boundaries.get(group_end + 1)?;

            let group: Vec<&FormattedCell<'a>> = merged
                .cells_in_rows(row, group_end)
                .filter_map(|c| info.cells.get(&c.id))
                .collect();
            let unfinished = group.iter().any(|c| !c.is_done());
            let splittable = group.iter().any(|c| c.is_splittable());

            let mut trial = None;
            if unfinished || (candidate > available + tolerance && splittable) {
                let probe = self.probe_group(
                    &cell_env,
                    &info,
                    &info.boundaries,
                    start,
                    row,
                    group_end,
                    available,
                )?;
                candidate = top_offset + probe.boundaries.get(group_end + 1)?;
                trial = Some(probe);
            }

            if first_group {
                let limit = self.max_height - tolerance;
                if candidate > limit {
                    warn!(
                        "Table rows {}..={} are taller than any area ({:.2} > {:.2}); clamping.",
                        row, group_end, candidate, limit
                    );
                    candidate = limit;
                }
                if candidate > available + tolerance && !unfinished {
                    debug!("Table rows from {} do not fit into {:.2}.", row, available);
                    return Ok(self.empty_record(info, area));
                }
                first_group = false;
            }
            // Groups that do not fit wait for the next area, including a first group still continuing a cell.
            if candidate > available + tolerance {
                break;
            }

            let group_done = match trial {
                Some(Trial { cells, boundaries }) => {
                    let done = cells.iter().all(FormattedCell::is_done);
                    for cell in cells {
                        info.cells.insert(cell.id, cell);
                    }
                    info.boundaries = boundaries;
                    done
                }
                None => !unfinished,
            };
            height = candidate;
            end_row = Some(group_end);
            group_start = Some(row);
            if !group_done {
                break;
            }
            row = group_end + 1;
        }

        let Some(end) = end_row else {
            return Ok(self.empty_record(info, area));
        };
        info.start_row = Some(start);
        info.end_row = Some(end);
        info.last_group_start = group_start;
        info.is_ending = end + 1 == rows && info.cells.values().all(FormattedCell::is_done);

        let starting = start == first_body;
        let last_group_top = info.boundaries.get(group_start.unwrap_or(start))?;
        let first_group_bottom = info.boundaries.get(structure.connectivity[start] + 1)?;
        debug!(
            "Table rows {}..={} placed, height {:.2}, ending: {}.",
            start, end, height, info.is_ending
        );

        let layout = LayoutInfo {
            content_area: Rect::new(area.x + left, area.y, width, height),
            keep_together: self.table.keep_together && !(starting && info.is_ending),
            starting_height: info.top_height + first_group_bottom - info.boundaries.get(start)?,
            trailing_height: info.boundaries.get(end + 1)? - last_group_top,
            horizontal_alignment: self.layout_alignment(),
            left,
            min_width: width,
            ..LayoutInfo::default()
        };
        Ok(RenderRecord::new(self.element, FormatInfo::Table(Box::new(info)), layout))
    }

    fn render(
        &self,
        record: &RenderRecord<'a>,
        canvas: &mut dyn Canvas,
        offset: Point,
    ) -> Result<(), LayoutError> {
        let info = record.format_info.as_table()?;
        let (Some(start), Some(end)) = (info.start_row, info.end_row) else {
            return Ok(());
        };
        let structure = &info.structure;
        let merged = &structure.merged;
        let area = record.layout_info.content_area;
        let table_x = offset.x + area.x;
        let table_y = offset.y + area.y;
        let top_border = merged.top_border_width(0);

        if let Some(last) = structure.last_header_row {
            for origin in merged.cells_in_rows(0, last) {
                let top = table_y + top_border + info.boundaries.get(origin.id.row)?;
                self.render_cell(info, origin.id, top, table_x, false, canvas)?;
            }
        }

        let body_origin = info.boundaries.get(start)?;
        let continued = start != structure.first_body_row() && structure.last_header_row.is_none();
        for origin in merged.cells_in_rows(start, end) {
            let top = table_y + info.top_height + info.boundaries.get(origin.id.row)? - body_origin;
            let continued_top = continued && origin.id.row == start;
            self.render_cell(info, origin.id, top, table_x, continued_top, canvas)?;
        }
        Ok(())
    }

    fn set_max_element_height(&mut self, height: f32) {
        self.max_height = height;
    }
}
