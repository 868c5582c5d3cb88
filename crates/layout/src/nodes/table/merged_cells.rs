//! Resolution of merged cells and their effective borders.

use crate::LayoutError;
use folio_idf::Table;
use folio_style::Borders;
use folio_types::CellId;

/// A cell that is not covered by another cell's merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCell {
    pub id: CellId,
    pub merge_right: usize,
    pub merge_down: usize,
    /// The cell's own borders, falling back to the table's.
    pub own_borders: Borders,
    /// The borders actually drawn: a top or left side shared with a neighbour
    /// that already draws its bottom or right side is dropped.
    pub borders: Borders,
}

impl MergedCell {
    pub fn last_row(&self) -> usize {
        self.id.row + self.merge_down
    }

    pub fn last_column(&self) -> usize {
        self.id.column + self.merge_right
    }

    pub fn covers_row(&self, row: usize) -> bool {
        self.id.row <= row && row <= self.last_row()
    }
}

/// All origin cells of a table in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCellList {
    cells: Vec<MergedCell>,
    row_count: usize,
    column_count: usize,
    keep_with: Vec<usize>,
}

impl MergedCellList {
    /// Resolves the merges of `table`, rejecting tables whose merges are out
    /// of range or overlap.
    pub fn new(table: &Table) -> Result<Self, LayoutError> {
        let columns = table.columns.len();
        if columns == 0 {
            return Err(LayoutError::MalformedTable("table has no columns".into()));
        }
        let rows = table.rows.len();
        let mut owner: Vec<Option<usize>> = vec![None; rows * columns];
        let mut cells: Vec<MergedCell> = Vec::new();

        for (r, row) in table.rows.iter().enumerate() {
            if row.cells.len() != columns {
                return Err(LayoutError::MalformedTable(format!(
                    "row {} has {} cells but the table has {} columns",
                    r,
                    row.cells.len(),
                    columns
                )));
            }
            for (c, cell) in row.cells.iter().enumerate() {
                let id = CellId::new(r, c);
                if owner[r * columns + c].is_some() {
                    if cell.merge_right > 0 || cell.merge_down > 0 {
                        return Err(LayoutError::MalformedTable(format!(
                            "cell {} is covered by another merge but merges itself",
                            id
                        )));
                    }
                    continue;
                }
                if c + cell.merge_right >= columns || r + cell.merge_down >= rows {
                    return Err(LayoutError::MalformedTable(format!(
                        "merge of cell {} reaches outside the table",
                        id
                    )));
                }

                let index = cells.len();
                for rr in r..=r + cell.merge_down {
                    for cc in c..=c + cell.merge_right {
                        let slot = &mut owner[rr * columns + cc];
                        if slot.is_some() {
                            return Err(LayoutError::MalformedTable(format!(
                                "merge of cell {} overlaps cell ({}, {})",
                                id, rr, cc
                            )));
                        }
                        *slot = Some(index);
                    }
                }

                let own_borders = cell.borders.or(table.borders).unwrap_or_default();
                cells.push(MergedCell {
                    id,
                    merge_right: cell.merge_right,
                    merge_down: cell.merge_down,
                    own_borders,
                    borders: own_borders,
                });
            }
        }

        // Shared edges are drawn once, by the cell above or to the left.
        for i in 0..cells.len() {
            let MergedCell { id, .. } = cells[i];
            if id.row > 0 {
                if let Some(above) = owner[(id.row - 1) * columns + id.column] {
                    if cells[above].own_borders.bottom.is_some_and(|b| b.visible_width() > 0.0) {
                        cells[i].borders.top = None;
                    }
                }
            }
            if id.column > 0 {
                if let Some(left) = owner[id.row * columns + id.column - 1] {
                    if cells[left].own_borders.right.is_some_and(|b| b.visible_width() > 0.0) {
                        cells[i].borders.left = None;
                    }
                }
            }
        }

        Ok(Self {
            cells,
            row_count: rows,
            column_count: columns,
            keep_with: table.rows.iter().map(|r| r.keep_with).collect(),
        })
    }

    pub fn cells(&self) -> &[MergedCell] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn get(&self, id: CellId) -> Option<&MergedCell> {
        self.cells
            .binary_search_by(|c| c.id.cmp(&id))
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Origin cells of rows `from..=to`.
    pub fn cells_in_rows(&self, from: usize, to: usize) -> impl Iterator<Item = &MergedCell> {
        self.cells
            .iter()
            .filter(move |c| c.id.row >= from && c.id.row <= to)
    }

    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = &MergedCell> {
        self.cells_in_rows(row, row)
    }

    /// Cells whose last covered row is `row`.
    pub fn cells_ending_at(&self, row: usize) -> impl Iterator<Item = &MergedCell> {
        self.cells.iter().filter(move |c| c.last_row() == row)
    }

    /// Among the cells covering `row`, the one whose merge ends first.
    ///
    /// Its last row decides where the next row boundary lies.
    pub fn min_merged_cell(&self, row: usize) -> Result<&MergedCell, LayoutError> {
        self.cells
            .iter()
            .filter(|c| c.covers_row(row))
            .min_by_key(|c| c.last_row())
            .ok_or(LayoutError::MissingRowCell(row))
    }

    /// Widest visible top border among the cells starting in `row`.
    pub fn top_border_width(&self, row: usize) -> f32 {
        self.row_cells(row)
            .map(|c| c.own_borders.top.map_or(0.0, |b| b.visible_width()))
            .fold(0.0, f32::max)
    }

    /// Last row that must stay on the same area as `row`, following vertical
    /// merges and keep-with constraints transitively.
    pub fn last_connected_row(&self, row: usize) -> usize {
        if self.row_count == 0 {
            return row;
        }
        let last_index = self.row_count - 1;
        let mut last = (row + self.keep_with.get(row).copied().unwrap_or(0)).min(last_index);
        let mut r = row;
        while r <= last {
            for cell in self.row_cells(r) {
                last = last.max(cell.last_row());
            }
            last = last.max(r + self.keep_with[r]).min(last_index);
            r += 1;
        }
        last
    }

    /// Last column that must stay beside `column`, following horizontal
    /// merges transitively.
    pub fn last_connected_column(&self, column: usize) -> usize {
        if self.column_count == 0 {
            return column;
        }
        let last_index = self.column_count - 1;
        let mut last = column.min(last_index);
        let mut c = column;
        while c <= last {
            for cell in self.cells.iter().filter(|cell| cell.id.column == c) {
                last = last.max(cell.last_column());
            }
            c += 1;
        }
        last.min(last_index)
    }

    /// `last_connected_row` for every row.
    pub fn connectivity(&self) -> Vec<usize> {
        (0..self.row_count).map(|r| self.last_connected_row(r)).collect()
    }
}
