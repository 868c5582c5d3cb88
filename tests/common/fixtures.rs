use serde_json::{json, Value};

/// A page whose content area is 280pt wide and `usable_height` tall.
pub fn page_setup(usable_height: f32) -> Value {
    json!({
        "size": { "width": 300, "height": usable_height + 20.0 },
        "margins": "10pt"
    })
}

pub fn section(usable_height: f32, elements: Vec<Value>) -> Value {
    json!({ "pageSetup": page_setup(usable_height), "elements": elements })
}

pub fn document(sections: Vec<Value>) -> Value {
    json!({ "sections": sections })
}

/// A 10pt paragraph with 10pt lines.
pub fn paragraph(text: &str) -> Value {
    json!({ "type": "paragraph", "text": text, "format": { "lineHeight": 10 } })
}

pub fn paragraph_with(text: &str, format: Value) -> Value {
    json!({ "type": "paragraph", "text": text, "format": format })
}

pub fn page_break() -> Value {
    json!({ "type": "pageBreak" })
}

pub fn image(source: &str, width: f32, height: f32) -> Value {
    json!({ "type": "image", "source": source, "width": width, "height": height })
}

pub fn cell(text: &str) -> Value {
    json!({ "elements": [{ "type": "paragraph", "text": text }] })
}

/// A row exactly `height` tall.
pub fn row(height: f32, cells: Vec<Value>) -> Value {
    json!({ "height": height, "heightRule": "exactly", "cells": cells })
}

pub fn heading_row(height: f32, cells: Vec<Value>) -> Value {
    json!({ "height": height, "heightRule": "exactly", "headingFormat": true, "cells": cells })
}

pub fn table(widths: &[f32], rows: Vec<Value>) -> Value {
    let columns: Vec<Value> = widths.iter().map(|w| json!({ "width": w })).collect();
    json!({ "type": "table", "columns": columns, "rows": rows })
}

/// One heading row and `body_rows` rows of single-column text cells.
pub fn ledger_table(body_rows: usize, row_height: f32) -> Value {
    let mut rows = vec![heading_row(row_height, vec![cell("Item")])];
    rows.extend((0..body_rows).map(|r| row(row_height, vec![cell(&format!("Entry {r}"))])));
    table(&[200.0], rows)
}
