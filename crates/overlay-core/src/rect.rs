use serde::{Deserialize, Serialize};

/// A point in virtual-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle representing a window's or monitor's position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from a top-left corner and a size.
    pub fn at(origin: Point, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Number of pixels the two rectangles share along the horizontal axis.
    pub fn horizontal_overlap(&self, other: &Rect) -> i32 {
        let left = self.x.max(other.x);
        let right = self.right().min(other.right());
        (right - left).max(0)
    }

    /// Number of pixels the two rectangles share along the vertical axis.
    ///
    /// A positive value means the rectangles share vertical space.
    pub fn vertical_overlap(&self, other: &Rect) -> i32 {
        let top = self.y.max(other.y);
        let bottom = self.bottom().min(other.bottom());
        (bottom - top).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_of_disjoint_rects_is_zero() {
        // Arrange
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(200, 200, 50, 50);

        // Act / Assert
        assert_eq!(a.horizontal_overlap(&b), 0);
        assert_eq!(a.vertical_overlap(&b), 0);
    }

    #[test]
    fn overlap_of_partially_covering_rects() {
        // Arrange
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(60, -20, 100, 50);

        // Act / Assert
        assert_eq!(a.horizontal_overlap(&b), 40);
        assert_eq!(a.vertical_overlap(&b), 30);
    }
}
