use super::boundary::RowBoundaryMap;
use super::formatted_cell::FormattedCell;
use super::merged_cells::MergedCellList;
use folio_types::CellId;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Facts about a table that do not change while it is laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStructure {
    pub merged: MergedCellList,
    /// For each row, the last row connected to it by merges or keep-with.
    pub connectivity: Vec<usize>,
    /// Last repeated heading row. `None` when the table has no heading rows
    /// or consists of nothing but heading rows.
    pub last_header_row: Option<usize>,
    /// Width of the left border of the first column.
    pub left_border_offset: f32,
}

impl TableStructure {
    pub fn first_body_row(&self) -> usize {
        self.last_header_row.map_or(0, |h| h + 1)
    }

    pub fn row_count(&self) -> usize {
        self.merged.row_count()
    }
}

/// Where a table stands in its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableProgress {
    NotFormatted,
    PartiallyPlaced { start: usize, end: usize },
    Finished,
}

/// The rows of a table placed on one area, with the cell state needed to
/// continue on the next.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFormatInfo<'a> {
    pub start_row: Option<usize>,
    pub end_row: Option<usize>,
    /// First row of the last row group placed. A group whose cells are not
    /// all done is resumed on the next area.
    pub last_group_start: Option<usize>,
    pub is_ending: bool,
    pub structure: Rc<TableStructure>,
    pub cells: BTreeMap<CellId, FormattedCell<'a>>,
    pub boundaries: RowBoundaryMap,
    /// Height above the first placed body row: top border plus repeated headings.
    pub top_height: f32,
}

impl<'a> TableFormatInfo<'a> {
    pub fn last_header_row(&self) -> Option<usize> {
        self.structure.last_header_row
    }

    pub fn is_empty(&self) -> bool {
        self.start_row.is_none() && !self.is_ending
    }

    pub fn is_starting(&self) -> bool {
        self.start_row == Some(self.structure.first_body_row())
    }

    pub fn starting_is_complete(&self) -> bool {
        self.start_row.is_some() || self.is_ending
    }

    pub fn is_ending(&self) -> bool {
        self.is_ending
    }

    pub fn ending_is_complete(&self) -> bool {
        self.is_ending
    }

    /// Drops the whole placement; a table gives up all of its rows on this area.
    pub fn remove_ending(&mut self) {
        self.start_row = None;
        self.end_row = None;
        self.last_group_start = None;
        self.is_ending = false;
    }

    pub fn progress(&self) -> TableProgress {
        match (self.start_row, self.end_row) {
            _ if self.is_ending => TableProgress::Finished,
            (Some(start), Some(end)) => TableProgress::PartiallyPlaced { start, end },
            _ => TableProgress::NotFormatted,
        }
    }

    pub fn cell(&self, id: CellId) -> Option<&FormattedCell<'a>> {
        self.cells.get(&id)
    }

    /// Whether every cell of the last placed group has all its content placed.
    pub(crate) fn last_group_is_done(&self) -> bool {
        match (self.last_group_start, self.end_row) {
            (Some(from), Some(to)) => self
                .structure
                .merged
                .cells_in_rows(from, to)
                .all(|c| self.cells.get(&c.id).is_some_and(FormattedCell::is_done)),
            _ => true,
        }
    }
}
