/// A rectangle in native screen coordinates (origin top-left, Y down).
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

    /// X coordinate of the right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point, biased toward the upper-left pixel for even sizes.
    pub fn center(&self) -> (i32, i32) {
        ((self.x + self.right() - 1) / 2, (self.y + self.bottom() - 1) / 2)
    }

    /// Whether the point lies inside the rectangle (edges half-open).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_biases_toward_upper_left() {
        let r = Rect::new(0, 0, 100, 50);
        assert_eq!(r.center(), (49, 24));
    }

    #[test]
    fn center_of_odd_sized_rect_is_exact() {
        let r = Rect::new(10, 10, 11, 11);
        assert_eq!(r.center(), (15, 15));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0, 0, 1920, 1080);
        assert!(r.contains(0, 0));
        assert!(r.contains(1919, 1079));
        assert!(!r.contains(1920, 0));
        assert!(!r.contains(0, 1080));
    }

    #[test]
    fn contains_handles_negative_origins() {
        // A monitor positioned left of the primary.
        let r = Rect::new(-1920, 0, 1920, 1080);
        assert!(r.contains(-1, 500));
        assert!(!r.contains(0, 500));
    }
}
