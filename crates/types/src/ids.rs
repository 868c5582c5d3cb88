//! Identifiers used to key layout state without relying on object identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a table cell by the row and column it originates in.
///
/// Ordering is row-major, so a `BTreeMap<CellId, _>` iterates cells the way
/// a table is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub column: usize,
}

impl CellId {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(usize, usize)> for CellId {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}
