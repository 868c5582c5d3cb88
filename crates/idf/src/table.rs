use crate::{Element, Paragraph};
use folio_style::{
    length, Borders, ParagraphFormat, RowAlignment, RowHeightRule, Shading, VerticalAlignment,
};
use serde::{Deserialize, Serialize};

/// A grid of cells. Every row holds one [`Cell`] per column; cells covered by
/// another cell's merge are present but ignored during layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Borders for cells that declare none of their own.
    #[serde(default)]
    pub borders: Option<Borders>,
    #[serde(default)]
    pub shading: Option<Shading>,
    /// Move the table to a fresh area rather than split it, when possible.
    #[serde(default)]
    pub keep_together: bool,
    #[serde(default)]
    pub alignment: RowAlignment,
    #[serde(default, deserialize_with = "length::deserialize_option")]
    pub left_indent: Option<f32>,
    /// Default paragraph format of the cells.
    #[serde(default)]
    pub format: ParagraphFormat,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, width: f32) -> &mut Column {
        self.columns.push(Column::new(width));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Appends a row with one empty cell per column.
    pub fn add_row(&mut self) -> &mut Row {
        let cells = (0..self.columns.len()).map(|_| Cell::default()).collect();
        self.rows.push(Row {
            cells,
            ..Row::default()
        });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column))
    }

    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(deserialize_with = "length::deserialize")]
    pub width: f32,
    #[serde(default, deserialize_with = "length::deserialize")]
    pub left_padding: f32,
    #[serde(default, deserialize_with = "length::deserialize")]
    pub right_padding: f32,
}

impl Column {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            left_padding: 0.0,
            right_padding: 0.0,
        }
    }

    pub fn padding(&mut self, left: f32, right: f32) -> &mut Self {
        self.left_padding = left;
        self.right_padding = right;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, deserialize_with = "length::deserialize")]
    pub height: f32,
    #[serde(default)]
    pub height_rule: RowHeightRule,
    #[serde(default, deserialize_with = "length::deserialize")]
    pub top_padding: f32,
    #[serde(default, deserialize_with = "length::deserialize")]
    pub bottom_padding: f32,
    /// Leading heading rows are repeated at the top of every area the table spans.
    #[serde(default)]
    pub heading_format: bool,
    /// Number of following rows that must stay on the same area as this one.
    #[serde(default)]
    pub keep_with: usize,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn heading(&mut self) -> &mut Self {
        self.heading_format = true;
        self
    }

    pub fn height(&mut self, height: f32, rule: RowHeightRule) -> &mut Self {
        self.height = height;
        self.height_rule = rule;
        self
    }

    pub fn padding(&mut self, top: f32, bottom: f32) -> &mut Self {
        self.top_padding = top;
        self.bottom_padding = bottom;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Number of additional columns to the right this cell spans.
    #[serde(default)]
    pub merge_right: usize,
    /// Number of additional rows below this cell spans.
    #[serde(default)]
    pub merge_down: usize,
    #[serde(default)]
    pub borders: Option<Borders>,
    #[serde(default)]
    pub shading: Option<Shading>,
    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
    /// Format used to size the cell when it has no content.
    #[serde(default)]
    pub format: Option<ParagraphFormat>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Cell {
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(Element::Paragraph(Paragraph::new(text)));
        self
    }

    pub fn add(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn has_nested_table(&self) -> bool {
        self.elements
            .iter()
            .any(|element| matches!(element, Element::Table(_)))
    }
}
