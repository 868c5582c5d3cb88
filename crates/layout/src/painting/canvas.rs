//! The drawing surface formatted records are rendered onto.

use folio_types::{Color, Point, Rect};

/// Drawing operations a renderer may issue. Coordinates are absolute page
/// coordinates in points, y growing downwards.
pub trait Canvas {
    fn begin_page(&mut self, number: usize, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Color);
    /// `origin` is the baseline start of the text.
    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color);
    fn draw_image(&mut self, source: &str, rect: Rect);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    BeginPage {
        number: usize,
        width: f32,
        height: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f32,
        color: Color,
    },
    Image {
        source: String,
        rect: Rect,
    },
}

/// A canvas that keeps every operation in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }

    pub fn page_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::BeginPage { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn begin_page(&mut self, number: usize, width: f32, height: f32) {
        self.commands.push(DrawCommand::BeginPage {
            number,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size,
            color,
        });
    }

    fn draw_image(&mut self, source: &str, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            source: source.to_string(),
            rect,
        });
    }
}
