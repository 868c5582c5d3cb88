use super::canvas::Canvas;
use folio_style::{Border, Borders, Shading};
use folio_types::{Point, Rect};

/// Fills the inner rectangle of a cell with its shading.
pub fn paint_shading(canvas: &mut dyn Canvas, inner: Rect, shading: Option<&Shading>) {
    if let Some(shading) = shading.filter(|s| s.is_visible()) {
        if inner.width > 0.0 && inner.height > 0.0 {
            canvas.fill_rect(inner, shading.color);
        }
    }
}

/// Draws the borders around an inner rectangle.
///
/// The left and top borders lie outside `inner`, the right and bottom ones
/// start at its right and bottom edges. Each side is a filled rectangle so
/// that adjacent sides meet without gaps; diagonals are lines across `inner`.
pub fn paint_borders(canvas: &mut dyn Canvas, inner: Rect, borders: &Borders) {
    let top = visible(&borders.top);
    let bottom = visible(&borders.bottom);
    let left = visible(&borders.left);
    let right = visible(&borders.right);

    let top_w = top.map_or(0.0, |b| b.width);
    let bottom_w = bottom.map_or(0.0, |b| b.width);
    let left_w = left.map_or(0.0, |b| b.width);
    let right_w = right.map_or(0.0, |b| b.width);

    let outer_y = inner.y - top_w;
    let outer_height = top_w + inner.height + bottom_w;
    let outer_x = inner.x - left_w;
    let outer_width = left_w + inner.width + right_w;

    if let Some(border) = right {
        canvas.fill_rect(
            Rect::new(inner.right(), outer_y, right_w, outer_height),
            border.color,
        );
    }
    if let Some(border) = left {
        canvas.fill_rect(Rect::new(outer_x, outer_y, left_w, outer_height), border.color);
    }
    if let Some(border) = bottom {
        canvas.fill_rect(
            Rect::new(outer_x, inner.bottom(), outer_width, bottom_w),
            border.color,
        );
    }
    if let Some(border) = top {
        canvas.fill_rect(Rect::new(outer_x, outer_y, outer_width, top_w), border.color);
    }

    if let Some(border) = visible(&borders.diagonal_down) {
        canvas.draw_line(
            Point::new(inner.x, inner.y),
            Point::new(inner.right(), inner.bottom()),
            border.width,
            border.color,
        );
    }
    if let Some(border) = visible(&borders.diagonal_up) {
        canvas.draw_line(
            Point::new(inner.x, inner.bottom()),
            Point::new(inner.right(), inner.y),
            border.width,
            border.color,
        );
    }
}

fn visible(border: &Option<Border>) -> Option<&Border> {
    border.as_ref().filter(|b| b.visible_width() > 0.0)
}
