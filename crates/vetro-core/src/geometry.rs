use crate::rect::Rect;

/// Screen-wide metrics the coordinate model depends on.
///
/// Callers see a bottom-up convention (origin at the primary monitor's
/// bottom-left, Y increasing upward) while the OS reports top-down
/// coordinates. The primary monitor's height is the flip reference, so
/// this must be refreshed before any conversion after a display change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenGeometry {
    /// Bounding box of all monitors, in native coordinates.
    pub virtual_screen: Rect,
    /// Height of the primary monitor in pixels.
    pub primary_height: i32,
}

impl ScreenGeometry {
    /// Flips an edge coordinate between native and public conventions.
    ///
    /// The mapping is its own inverse: a native bottom edge becomes a
    /// public bottom edge and vice versa.
    pub fn flip_y(&self, y: i32) -> i32 {
        self.primary_height - y
    }

    /// Flips a pixel coordinate (e.g. the cursor) between conventions.
    ///
    /// Pixels address a cell rather than an edge, hence the extra -1.
    /// Also self-inverse.
    pub fn flip_pixel_y(&self, y: i32) -> i32 {
        self.primary_height - y - 1
    }
}
