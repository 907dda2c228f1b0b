//! Window frame metrics and the borderless-transition math.
//!
//! Removing chrome must leave the client area visually where it was, so
//! the new outer bounds are derived from the chrome thickness. Sides and
//! bottom are assumed to share one thickness (half the horizontal delta);
//! whatever remains of the vertical delta is the title bar.

use crate::rect::Rect;

/// Outer bounds plus client-area size for one window, in native
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMetrics {
    pub bounds: Rect,
    pub client_width: i32,
    pub client_height: i32,
}

impl FrameMetrics {
    /// Total horizontal chrome (left + right border).
    pub fn chrome_width(&self) -> i32 {
        self.bounds.width - self.client_width
    }

    /// Total vertical chrome (title bar + bottom border).
    pub fn chrome_height(&self) -> i32 {
        self.bounds.height - self.client_height
    }
}

/// Outer bounds after removing chrome: the window shrinks to its client
/// size, shifted so the client area does not move.
pub fn borderless_bounds(current: &FrameMetrics) -> Rect {
    let new_width = current.client_width;
    let new_height = current.client_height;
    // One side's border width; the bottom is assumed to match it.
    let bw = (current.bounds.width - new_width) / 2;
    Rect::new(
        current.bounds.x + bw,
        current.bounds.y + ((current.bounds.height - new_height) - bw),
        new_width,
        new_height,
    )
}

/// Outer bounds after restoring chrome, using the deltas saved when the
/// window was attached (the current style carries no chrome to measure).
pub fn restored_bounds(current: &FrameMetrics, original: &FrameMetrics) -> Rect {
    let dx = original.chrome_width();
    let dy = original.chrome_height();
    let bw = dx / 2;
    Rect::new(
        current.bounds.x - bw,
        current.bounds.y - (dy - bw),
        current.client_width + dx,
        current.client_height + dy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 500x400 client with a 5px border on each side, a 30px title bar
    /// and a 10px bottom border (10px total horizontal chrome, 40px
    /// total vertical chrome).
    fn framed_window() -> FrameMetrics {
        FrameMetrics {
            bounds: Rect::new(100, 100, 510, 440),
            client_width: 500,
            client_height: 400,
        }
    }

    #[test]
    fn borderless_preserves_the_client_size_exactly() {
        let target = borderless_bounds(&framed_window());
        assert_eq!(target.width, 500);
        assert_eq!(target.height, 400);
    }

    #[test]
    fn borderless_splits_chrome_between_top_and_bottom() {
        let target = borderless_bounds(&framed_window());
        // bw = 5: sides shift in by 5, the top eats the remaining 35.
        assert_eq!(target.x, 105);
        assert_eq!(target.y, 135);
    }

    #[test]
    fn restore_round_trips_through_borderless() {
        let original = framed_window();
        let shrunk = borderless_bounds(&original);

        // While borderless, outer bounds equal the client area.
        let current = FrameMetrics {
            bounds: shrunk,
            client_width: shrunk.width,
            client_height: shrunk.height,
        };
        let restored = restored_bounds(&current, &original);
        assert_eq!(restored, original.bounds);
    }

    #[test]
    fn restore_applies_original_deltas_to_the_current_client() {
        let original = framed_window();
        // The window was resized while borderless.
        let current = FrameMetrics {
            bounds: Rect::new(300, 300, 800, 600),
            client_width: 800,
            client_height: 600,
        };
        let restored = restored_bounds(&current, &original);
        assert_eq!(restored.width, 810);
        assert_eq!(restored.height, 640);
        assert_eq!(restored.x, 295);
        assert_eq!(restored.y, 265);
    }

    #[test]
    fn chromeless_window_keeps_its_bounds() {
        // A popup window with no chrome at all: entering borderless
        // changes nothing.
        let popup = FrameMetrics {
            bounds: Rect::new(50, 60, 640, 480),
            client_width: 640,
            client_height: 480,
        };
        assert_eq!(borderless_bounds(&popup), popup.bounds);
    }
}
