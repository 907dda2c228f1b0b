//! The seam between the window state machine and the OS.
//!
//! The controller never issues OS calls directly; it drives this trait.
//! `vetro-windows` provides the Win32 implementation, and the controller
//! tests drive an in-memory fake through the same surface.

use crate::error::ControlResult;
use crate::frame::FrameMetrics;
use crate::monitor::ScreenSnapshot;
use crate::rect::Rect;

/// Raw OS window handle, pointer-sized. Zero means "no window".
pub type RawHandle = usize;

/// Live show state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowState {
    Normal,
    Maximized,
    Minimized,
}

/// Show-state transitions the controller requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    /// Restore to the normal (non-maximized, non-minimized) state.
    Normal,
    Maximize,
    /// Make the window visible without changing its size state.
    Show,
}

/// Per-window state captured at attach and restored at detach.
///
/// `saved` is the platform's own payload (styles, placement) restored
/// wholesale; the core keeps only the pieces its math needs.
#[derive(Debug, Clone)]
pub struct WindowBaseline<P> {
    /// Outer bounds and client size at attach time. The chrome deltas
    /// feed the borderless-restore math.
    pub frame: FrameMetrics,
    /// Whether the extended style already carried the layered bit, which
    /// click-through disable must then leave in place.
    pub was_layered: bool,
    /// Opaque platform payload.
    pub saved: P,
}

/// Operations the controller needs from the OS windowing layer.
pub trait WindowSystem {
    /// Platform payload stored inside [`WindowBaseline`].
    type Saved;

    /// Whether the handle still names a live window.
    fn is_valid(&self, handle: RawHandle) -> bool;

    /// Finds a top-level window of the current process, preferring an
    /// owner window over the owned window itself.
    fn find_process_window(&self) -> Option<RawHandle>;

    /// The active window, if it belongs to the current process.
    fn active_process_window(&self) -> Option<RawHandle>;

    /// The current process id.
    fn process_id(&self) -> u32;

    /// Captures the window's baseline (styles, placement, frame).
    fn capture(&mut self, handle: RawHandle) -> ControlResult<WindowBaseline<Self::Saved>>;

    /// Restores style, extended style, and placement from a baseline.
    fn restore(&mut self, handle: RawHandle, saved: &Self::Saved);

    /// Enumerates monitors and reads the virtual-screen metrics.
    fn screen_snapshot(&mut self) -> ControlResult<ScreenSnapshot>;

    /// Current outer bounds and client size.
    fn frame(&self, handle: RawHandle) -> ControlResult<FrameMetrics>;

    /// Repositions without resizing or changing Z order.
    fn move_window(&mut self, handle: RawHandle, x: i32, y: i32) -> ControlResult<()>;

    /// Moves and resizes with a frame-changed update so the new style is
    /// re-evaluated.
    fn set_bounds(&mut self, handle: RawHandle, bounds: Rect) -> ControlResult<()>;

    fn show_state(&self, handle: RawHandle) -> ShowState;

    fn set_show_state(&mut self, handle: RawHandle, command: ShowCommand);

    /// Coaxes the window into repainting after a style change that did
    /// not move it.
    fn force_redraw(&mut self, handle: RawHandle);

    /// Swaps the style for a bare visible popup (no caption, no frame).
    fn apply_borderless_style(&mut self, handle: RawHandle);

    /// Restores only the style word from the baseline.
    fn restore_style(&mut self, handle: RawHandle, saved: &Self::Saved);

    /// Moves the window into or out of the topmost Z band without
    /// moving, resizing, or activating it.
    fn set_topmost(&mut self, handle: RawHandle, topmost: bool);

    /// Toggles input transparency. On disable, the layered style bit is
    /// kept when `keep_layered` is set (color-key transparency or a
    /// window that was layered to begin with).
    fn set_click_through(&mut self, handle: RawHandle, enabled: bool, keep_layered: bool);

    /// Extends (or resets) the composition glass across the client area.
    fn set_glass(&mut self, handle: RawHandle, enabled: bool);

    /// Marks the window layered and keys out the given color.
    fn apply_color_key(&mut self, handle: RawHandle, color: u32);

    /// Undoes the color key and restores the baseline extended style.
    fn clear_color_key(&mut self, handle: RawHandle, saved: &Self::Saved);

    /// Installs the message-interception shim. A no-op if the shim is
    /// already installed on this handle.
    fn install_shim(&mut self, handle: RawHandle);

    /// Removes the shim, restoring the original message handling.
    fn remove_shim(&mut self, handle: RawHandle);

    /// Tells the OS whether the window accepts dropped files.
    fn set_drop_accept(&mut self, handle: RawHandle, accept: bool);

    /// Cursor position in native coordinates.
    fn cursor_position(&self) -> ControlResult<(i32, i32)>;

    fn set_cursor_position(&mut self, x: i32, y: i32) -> ControlResult<()>;
}
