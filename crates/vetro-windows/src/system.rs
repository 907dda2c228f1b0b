use vetro_core::error::ControlResult;
use vetro_core::frame::FrameMetrics;
use vetro_core::monitor::ScreenSnapshot;
use vetro_core::platform::{RawHandle, ShowCommand, ShowState, WindowBaseline, WindowSystem};
use vetro_core::rect::Rect;

use crate::window::SavedWindow;
use crate::{cursor, drop, monitor, process, subclass, transparency, window};

/// Win32-backed implementation of the platform seam.
///
/// Stateless: every operation re-queries the OS, which is itself the
/// source of truth for window state. The shim bookkeeping lives in
/// [`crate::subclass`] because the window procedure must reach it
/// without a reference to this value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }
}

impl WindowSystem for Win32WindowSystem {
    type Saved = SavedWindow;

    fn is_valid(&self, handle: RawHandle) -> bool {
        window::is_valid(handle)
    }

    fn find_process_window(&self) -> Option<RawHandle> {
        process::find_process_window()
    }

    fn active_process_window(&self) -> Option<RawHandle> {
        process::active_process_window()
    }

    fn process_id(&self) -> u32 {
        process::process_id()
    }

    fn capture(&mut self, handle: RawHandle) -> ControlResult<WindowBaseline<SavedWindow>> {
        window::capture(handle)
    }

    fn restore(&mut self, handle: RawHandle, saved: &SavedWindow) {
        window::restore(handle, saved);
    }

    fn screen_snapshot(&mut self) -> ControlResult<ScreenSnapshot> {
        monitor::screen_snapshot()
    }

    fn frame(&self, handle: RawHandle) -> ControlResult<FrameMetrics> {
        window::frame(handle)
    }

    fn move_window(&mut self, handle: RawHandle, x: i32, y: i32) -> ControlResult<()> {
        window::move_window(handle, x, y)
    }

    fn set_bounds(&mut self, handle: RawHandle, bounds: Rect) -> ControlResult<()> {
        window::set_bounds(handle, bounds)
    }

    fn show_state(&self, handle: RawHandle) -> ShowState {
        window::show_state(handle)
    }

    fn set_show_state(&mut self, handle: RawHandle, command: ShowCommand) {
        window::set_show_state(handle, command);
    }

    fn force_redraw(&mut self, handle: RawHandle) {
        window::force_redraw(handle);
    }

    fn apply_borderless_style(&mut self, handle: RawHandle) {
        window::apply_borderless_style(handle);
    }

    fn restore_style(&mut self, handle: RawHandle, saved: &SavedWindow) {
        window::restore_style(handle, saved);
    }

    fn set_topmost(&mut self, handle: RawHandle, topmost: bool) {
        window::set_topmost(handle, topmost);
    }

    fn set_click_through(&mut self, handle: RawHandle, enabled: bool, keep_layered: bool) {
        window::set_click_through(handle, enabled, keep_layered);
    }

    fn set_glass(&mut self, handle: RawHandle, enabled: bool) {
        transparency::set_glass(handle, enabled);
    }

    fn apply_color_key(&mut self, handle: RawHandle, color: u32) {
        transparency::apply_color_key(handle, color);
    }

    fn clear_color_key(&mut self, handle: RawHandle, saved: &SavedWindow) {
        transparency::clear_color_key(handle, saved);
    }

    fn install_shim(&mut self, handle: RawHandle) {
        subclass::install(handle);
    }

    fn remove_shim(&mut self, handle: RawHandle) {
        subclass::remove(handle);
    }

    fn set_drop_accept(&mut self, handle: RawHandle, accept: bool) {
        drop::set_drop_accept(handle, accept);
    }

    fn cursor_position(&self) -> ControlResult<(i32, i32)> {
        cursor::position()
    }

    fn set_cursor_position(&mut self, x: i32, y: i32) -> ControlResult<()> {
        cursor::set_position(x, y)
    }
}
