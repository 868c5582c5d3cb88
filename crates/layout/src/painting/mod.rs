pub mod box_painter;
pub mod canvas;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
