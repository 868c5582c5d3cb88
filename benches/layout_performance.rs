//! Layout engine micro-benchmarks
//!
//! Measures pagination of long paragraphs, large tables and nested tables.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio::{Document, FixedMetrics, LayoutConfig};
use serde_json::{Value, json};
use std::hint::black_box;

fn page_setup() -> Value {
    json!({ "size": "A4", "margins": "1cm" })
}

fn document_of(elements: Vec<Value>) -> Document {
    serde_json::from_value(json!({
        "sections": [{ "pageSetup": page_setup(), "elements": elements }]
    }))
    .expect("Failed to build document")
}

/// Paragraphs of lorem-like text
fn text_document(paragraphs: usize) -> Document {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
    let elements = (0..paragraphs)
        .map(|_| json!({ "type": "paragraph", "text": text, "format": { "spaceAfter": 6 } }))
        .collect();
    document_of(elements)
}

/// A three-column table with two heading rows
fn table_json(rows: usize) -> Value {
    let heading = |label: &str| {
        json!({
            "headingFormat": true,
            "cells": [
                { "elements": [{ "type": "paragraph", "text": label }] },
                { "elements": [{ "type": "paragraph", "text": "Quantity" }] },
                { "elements": [{ "type": "paragraph", "text": "Amount" }] }
            ]
        })
    };
    let mut all_rows = vec![heading("Item"), heading("Details")];
    all_rows.extend((0..rows).map(|i| {
        json!({
            "topPadding": 2,
            "bottomPadding": 2,
            "cells": [
                { "elements": [{ "type": "paragraph", "text": format!("Row {} Col 1", i) }] },
                { "elements": [{ "type": "paragraph", "text": format!("Row {} Col 2", i) }] },
                { "elements": [{ "type": "paragraph", "text": format!("Row {} Col 3", i) }] }
            ]
        })
    }));
    json!({
        "type": "table",
        "columns": [{ "width": 240 }, { "width": 120 }, { "width": 120 }],
        "borders": "0.5pt solid",
        "rows": all_rows
    })
}

fn paginate(document: &Document) -> usize {
    let config = LayoutConfig::default();
    let sections = folio::paginate_document(document, &config, &FixedMetrics::default())
        .expect("Failed to paginate");
    sections.iter().map(|s| s.pages.len()).sum()
}

fn benchmark_layout_paragraphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_paragraphs");

    for count in [10, 100, 1000] {
        let document = text_document(count);
        group.bench_with_input(BenchmarkId::new("paragraphs", count), &document, |b, doc| {
            b.iter(|| black_box(paginate(doc)));
        });
    }

    group.finish();
}

fn benchmark_layout_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_tables");

    for row_count in [10, 100, 1000] {
        let document = document_of(vec![table_json(row_count)]);
        group.bench_with_input(BenchmarkId::new("rows", row_count), &document, |b, doc| {
            b.iter(|| black_box(paginate(doc)));
        });
    }

    group.finish();
}

fn benchmark_layout_nested_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_nested_tables");

    for row_count in [10, 100] {
        let outer = json!({
            "type": "table",
            "columns": [{ "width": 520 }],
            "rows": [{ "cells": [{ "elements": [table_json(row_count)] }] }]
        });
        let document = document_of(vec![outer]);
        group.bench_with_input(BenchmarkId::new("inner_rows", row_count), &document, |b, doc| {
            b.iter(|| black_box(paginate(doc)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_layout_paragraphs,
    benchmark_layout_tables,
    benchmark_layout_nested_tables
);
criterion_main!(benches);
