use super::merged_cells::{MergedCell, MergedCellList};
use crate::LayoutError;
use std::collections::BTreeMap;

/// Offsets of row top edges from the top of a table's first row.
///
/// Built lazily: a row's entry is added once every cell ending in the row
/// above it has a known height. Values never decrease with the row index.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBoundaryMap {
    positions: BTreeMap<usize, f32>,
}

impl Default for RowBoundaryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RowBoundaryMap {
    pub fn new() -> Self {
        Self {
            positions: BTreeMap::from([(0, 0.0)]),
        }
    }

    pub fn get(&self, row: usize) -> Result<f32, LayoutError> {
        self.positions
            .get(&row)
            .copied()
            .ok_or(LayoutError::MissingRowBoundary(row))
    }

    pub fn contains(&self, row: usize) -> bool {
        self.positions.contains_key(&row)
    }

    pub fn last_row(&self) -> usize {
        self.positions.keys().next_back().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.positions.iter().map(|(r, p)| (*r, *p))
    }

    /// Adds entries until `row` has one.
    ///
    /// `height` yields the space a cell takes below its top boundary: its
    /// inner height plus its bottom border.
    pub fn extend_to<F>(
        &mut self,
        row: usize,
        cells: &MergedCellList,
        mut height: F,
    ) -> Result<(), LayoutError>
    where
        F: FnMut(&MergedCell) -> f32,
    {
        while self.last_row() < row {
            let last_row = self.last_row();
            if last_row >= cells.row_count() {
                return Err(LayoutError::MissingRowBoundary(row));
            }
            let anchor = cells.min_merged_cell(last_row)?;
            let next_row = anchor.last_row() + 1;

            let mut position = self.get(last_row)?;
            for cell in cells.cells_ending_at(next_row - 1) {
                let bottom = self.get(cell.id.row)? + height(cell);
                position = position.max(bottom);
            }
            self.positions.insert(next_row, position);
        }
        if !self.contains(row) {
            return Err(LayoutError::MissingRowBoundary(row));
        }
        Ok(())
    }

    /// Forgets every entry after `row`.
    pub fn truncate_after(&mut self, row: usize) {
        self.positions.split_off(&(row + 1));
    }
}
