//! Ordered monitor registry.
//!
//! The OS enumerates monitors in an arbitrary order, so the registry
//! re-sorts every snapshot into a deterministic left-to-right order and
//! exposes that logical index space to callers. The ordering is a pure
//! function of the rectangles, never of enumeration order.

use crate::error::{ControlError, ControlResult};
use crate::geometry::ScreenGeometry;
use crate::rect::Rect;

/// Upper bound on tracked monitors. Enumeration results beyond this are
/// discarded.
pub const MAX_MONITORS: usize = 32;

/// Raw display configuration as reported by the platform, in OS
/// enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenSnapshot {
    pub monitors: Vec<Rect>,
    pub geometry: ScreenGeometry,
}

/// The sorted monitor table plus the screen geometry it was built with.
///
/// A fresh layout is empty; nothing is known until the first snapshot is
/// applied (first attach or first display-change event).
#[derive(Debug, Default)]
pub struct MonitorLayout {
    monitors: Vec<Rect>,
    geometry: ScreenGeometry,
}

impl MonitorLayout {
    /// Replaces the registry with a new snapshot: truncates to
    /// [`MAX_MONITORS`], sorts, and adopts the snapshot's geometry.
    ///
    /// Ordering: A before B if `A.left < B.left`, ties broken by the
    /// larger native bottom edge (the monitor closer to the public
    /// origin comes first). The sort is stable, so the mapping is
    /// deterministic for any enumeration order of the same rectangles.
    pub fn apply(&mut self, snapshot: ScreenSnapshot) {
        let mut monitors = snapshot.monitors;
        monitors.truncate(MAX_MONITORS);
        monitors.sort_by(|a, b| a.x.cmp(&b.x).then(b.bottom().cmp(&a.bottom())));
        self.monitors = monitors;
        self.geometry = snapshot.geometry;
    }

    pub fn count(&self) -> usize {
        self.monitors.len()
    }

    pub fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }

    /// Rectangle of the monitor at the given logical index, converted to
    /// public coordinates (y measures the monitor's bottom edge upward
    /// from the primary's bottom edge).
    pub fn public_rect(&self, index: i32) -> ControlResult<Rect> {
        let rect = usize::try_from(index)
            .ok()
            .and_then(|i| self.monitors.get(i))
            .ok_or(ControlError::MonitorIndexOutOfRange {
                index,
                count: self.monitors.len(),
            })?;
        Ok(Rect::new(
            rect.x,
            self.geometry.flip_y(rect.bottom()),
            rect.width,
            rect.height,
        ))
    }

    /// Logical index of the monitor containing the given native point.
    ///
    /// Falls back to the primary monitor (the one whose rect starts at
    /// the native origin), then to index 0. Always in `[0, count)` when
    /// the registry is non-empty.
    pub fn index_containing(&self, point: (i32, i32)) -> usize {
        let mut primary = 0;
        for (i, rect) in self.monitors.iter().enumerate() {
            if rect.contains(point.0, point.1) {
                return i;
            }
            if rect.x == 0 && rect.y == 0 {
                primary = i;
            }
        }
        primary
    }

    /// Logical index of the primary monitor (rect at the native origin),
    /// or 0 if none qualifies.
    pub fn primary_index(&self) -> usize {
        self.monitors
            .iter()
            .position(|r| r.x == 0 && r.y == 0)
            .unwrap_or(0)
    }
}
