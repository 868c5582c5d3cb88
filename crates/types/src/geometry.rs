use serde::{Deserialize, Serialize};

/// Height used for areas that have no practical lower bound.
pub const UNBOUNDED: f32 = f32::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// An axis-aligned rectangle. Used both for drawable areas handed out by an
/// area source and for the content area of a formatted element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin that is `width` wide and has no lower bound.
    pub fn unbounded(width: f32) -> Self {
        Self::new(0.0, 0.0, width, UNBOUNDED)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_unbounded(&self) -> bool {
        self.height >= UNBOUNDED
    }

    /// Shrinks the rectangle from the top by `distance`.
    ///
    /// The height may become zero or negative; callers treat a non-positive
    /// height as "nothing fits". An unbounded rectangle stays unbounded.
    pub fn lower(&self, distance: f32) -> Rect {
        let height = if self.is_unbounded() {
            UNBOUNDED
        } else {
            self.height - distance
        };
        Rect {
            x: self.x,
            y: self.y + distance,
            width: self.width,
            height,
        }
    }

    /// Returns the smallest rectangle covering both `self` and `other`.
    pub fn unite(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let height = if self.is_unbounded() || other.is_unbounded() {
            UNBOUNDED
        } else {
            self.bottom().max(other.bottom()) - y
        };
        Rect {
            x,
            y,
            width: right - x,
            height,
        }
    }

    /// Moves the rectangle by the given offsets.
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn with_height(&self, height: f32) -> Rect {
        Rect { height, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_shrinks_from_the_top() {
        let area = Rect::new(10.0, 20.0, 100.0, 50.0);
        let lowered = area.lower(15.0);
        assert_eq!(lowered, Rect::new(10.0, 35.0, 100.0, 35.0));
    }

    #[test]
    fn lower_keeps_unbounded_height() {
        let area = Rect::unbounded(80.0).lower(1000.0);
        assert!(area.is_unbounded());
        assert_eq!(area.y, 1000.0);
    }

    #[test]
    fn unite_covers_both() {
        let a = Rect::new(0.0, 100.0, 50.0, 20.0);
        let b = Rect::new(0.0, 100.0, 50.0, 300.0);
        assert_eq!(a.unite(&b), Rect::new(0.0, 100.0, 50.0, 300.0));

        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.unite(&c), Rect::new(0.0, 0.0, 50.0, 120.0));
    }
}
