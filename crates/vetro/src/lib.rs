#![cfg(windows)]
// Exported symbol names follow the host binding convention.
#![allow(non_snake_case)]

//! C ABI for game-engine hosts.
//!
//! Exported symbols are bound by name from the host's managed side. All
//! coordinates at this boundary are `f32` in the public bottom-up
//! convention (origin at the primary monitor's bottom-left, Y upward);
//! `BOOL` is a 32-bit int. Out-pointers are zeroed on failure and null
//! out-pointers fail the call.

use std::ffi::c_void;

use vetro_core::log_warn;
use vetro_core::modes::TransparentType;
use vetro_core::rect::Rect;

mod state;

const TRUE: i32 = 1;
const FALSE: i32 = 0;

// ── attachment ───────────────────────────────────────────────────

/// Attaches the window behind the raw handle. A null handle detaches.
#[unsafe(no_mangle)]
pub extern "system" fn AttachWindowHandle(handle: *mut c_void) -> i32 {
    match state::plugin().controller.attach(handle as usize) {
        Ok(()) => TRUE,
        Err(e) => {
            log_warn!("attach by handle failed: {e}");
            FALSE
        }
    }
}

/// Finds a top-level window of this process, preferring an owner window
/// over an owned one, and attaches it.
#[unsafe(no_mangle)]
pub extern "system" fn AttachMyOwnerWindow() -> i32 {
    match state::plugin().controller.attach_process_window() {
        Ok(()) => TRUE,
        Err(e) => {
            log_warn!("owner window attach failed: {e}");
            FALSE
        }
    }
}

/// Alias of [`AttachMyOwnerWindow`], kept so either binding works.
#[unsafe(no_mangle)]
pub extern "system" fn AttachMyWindow() -> i32 {
    AttachMyOwnerWindow()
}

/// Attaches the active window if it belongs to this process.
#[unsafe(no_mangle)]
pub extern "system" fn AttachMyActiveWindow() -> i32 {
    match state::plugin().controller.attach_active_window() {
        Ok(()) => TRUE,
        Err(e) => {
            log_warn!("active window attach failed: {e}");
            FALSE
        }
    }
}

/// Restores and releases the attached window. Always succeeds.
#[unsafe(no_mangle)]
pub extern "system" fn DetachWindow() -> i32 {
    state::plugin().controller.detach();
    TRUE
}

// ── queries ──────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "system" fn IsActive() -> i32 {
    i32::from(state::plugin().controller.is_active())
}

#[unsafe(no_mangle)]
pub extern "system" fn IsTransparent() -> i32 {
    i32::from(state::plugin().controller.modes().transparent)
}

#[unsafe(no_mangle)]
pub extern "system" fn IsBorderless() -> i32 {
    i32::from(state::plugin().controller.modes().borderless)
}

#[unsafe(no_mangle)]
pub extern "system" fn IsTopmost() -> i32 {
    i32::from(state::plugin().controller.modes().topmost)
}

#[unsafe(no_mangle)]
pub extern "system" fn IsMaximized() -> i32 {
    i32::from(state::plugin().controller.is_maximized())
}

#[unsafe(no_mangle)]
pub extern "system" fn IsMinimized() -> i32 {
    i32::from(state::plugin().controller.is_minimized())
}

/// The attached window's raw handle, or null.
#[unsafe(no_mangle)]
pub extern "system" fn GetWindowHandle() -> *mut c_void {
    state::plugin().controller.attached_handle() as *mut c_void
}

#[unsafe(no_mangle)]
pub extern "system" fn GetMyProcessId() -> u32 {
    state::plugin().controller.process_id()
}

// ── visual modes ─────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "system" fn SetTransparent(enabled: i32) {
    state::plugin().controller.set_transparent(enabled != 0);
}

/// Selects the transparency technique: 0 none, 1 alpha-composite,
/// 2 color-key.
#[unsafe(no_mangle)]
pub extern "system" fn SetTransparentType(kind: i32) {
    let kind = TransparentType::from_raw(kind);
    state::plugin().controller.set_transparent_type(kind);
}

/// Sets the color keyed out under the color-key technique, as
/// `0x00BBGGRR`.
#[unsafe(no_mangle)]
pub extern "system" fn SetKeyColor(color: u32) {
    state::plugin().controller.set_key_color(color);
}

#[unsafe(no_mangle)]
pub extern "system" fn SetBorderless(enabled: i32) {
    state::plugin().controller.set_borderless(enabled != 0);
}

#[unsafe(no_mangle)]
pub extern "system" fn SetTopmost(enabled: i32) {
    state::plugin().controller.set_topmost(enabled != 0);
}

#[unsafe(no_mangle)]
pub extern "system" fn SetMaximized(enabled: i32) {
    state::plugin().controller.set_maximized(enabled != 0);
}

#[unsafe(no_mangle)]
pub extern "system" fn SetClickThrough(enabled: i32) {
    state::plugin().controller.set_click_through(enabled != 0);
}

/// Tells the OS whether the attached window accepts dropped files.
/// FALSE with no window attached.
#[unsafe(no_mangle)]
pub extern "system" fn SetAllowDrop(enabled: i32) -> i32 {
    let result = state::plugin().controller.set_allow_drop(enabled != 0);
    i32::from(result.is_ok())
}

// ── position and size ────────────────────────────────────────────

/// Moves the window's bottom-left corner to the given public
/// coordinates.
#[unsafe(no_mangle)]
pub extern "system" fn SetPosition(x: f32, y: f32) -> i32 {
    i32::from(state::plugin().controller.set_position(x, y).is_ok())
}

/// Writes the window's bottom-left corner in public coordinates.
///
/// # Safety
/// `x` and `y` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn GetPosition(x: *mut f32, y: *mut f32) -> i32 {
    if x.is_null() || y.is_null() {
        return FALSE;
    }
    let (ok, (px, py)) = match state::plugin().controller.position() {
        Ok(pair) => (true, pair),
        Err(_) => (false, (0.0, 0.0)),
    };
    // SAFETY: checked non-null; the host passes writable floats.
    unsafe {
        *x = px;
        *y = py;
    }
    i32::from(ok)
}

/// Resizes the window, keeping its bottom edge anchored.
#[unsafe(no_mangle)]
pub extern "system" fn SetSize(width: f32, height: f32) -> i32 {
    i32::from(state::plugin().controller.set_size(width, height).is_ok())
}

/// Writes the window's outer size in pixels.
///
/// # Safety
/// `width` and `height` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn GetSize(width: *mut f32, height: *mut f32) -> i32 {
    if width.is_null() || height.is_null() {
        return FALSE;
    }
    let (ok, (w, h)) = match state::plugin().controller.size() {
        Ok(pair) => (true, pair),
        Err(_) => (false, (0.0, 0.0)),
    };
    // SAFETY: checked non-null; the host passes writable floats.
    unsafe {
        *width = w;
        *height = h;
    }
    i32::from(ok)
}

// ── monitors ─────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "system" fn GetMonitorCount() -> i32 {
    state::plugin().controller.monitor_count() as i32
}

/// Writes the public-coordinate rectangle of the monitor at a logical
/// index. FALSE (and zeroed outputs) when the index is out of range.
///
/// # Safety
/// All four out-pointers must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn GetMonitorRectangle(
    index: i32,
    x: *mut f32,
    y: *mut f32,
    width: *mut f32,
    height: *mut f32,
) -> i32 {
    if x.is_null() || y.is_null() || width.is_null() || height.is_null() {
        return FALSE;
    }
    let (ok, rect) = match state::plugin().controller.monitor_rect(index) {
        Ok(rect) => (true, rect),
        Err(_) => (false, Rect::default()),
    };
    // SAFETY: checked non-null; the host passes writable floats.
    unsafe {
        *x = rect.x as f32;
        *y = rect.y as f32;
        *width = rect.width as f32;
        *height = rect.height as f32;
    }
    i32::from(ok)
}

/// Logical index of the monitor under the attached window's center,
/// falling back to the primary monitor.
#[unsafe(no_mangle)]
pub extern "system" fn GetCurrentMonitor() -> i32 {
    state::plugin().controller.current_monitor()
}

// ── cursor ───────────────────────────────────────────────────────

/// Writes the cursor position in public coordinates. Works without an
/// attached window.
///
/// # Safety
/// `x` and `y` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn GetCursorPosition(x: *mut f32, y: *mut f32) -> i32 {
    if x.is_null() || y.is_null() {
        return FALSE;
    }
    let (ok, (px, py)) = match state::plugin().controller.cursor_position() {
        Ok(pair) => (true, pair),
        Err(_) => (false, (0.0, 0.0)),
    };
    // SAFETY: checked non-null; the host passes writable floats.
    unsafe {
        *x = px;
        *y = py;
    }
    i32::from(ok)
}

#[unsafe(no_mangle)]
pub extern "system" fn SetCursorPosition(x: f32, y: f32) -> i32 {
    i32::from(state::plugin().controller.set_cursor_position(x, y).is_ok())
}

// ── callbacks ────────────────────────────────────────────────────

/// Registers the drop-files callback. FALSE for null, leaving any prior
/// registration untouched.
#[unsafe(no_mangle)]
pub extern "system" fn RegisterDropFilesCallback(
    callback: Option<state::DropFilesCallback>,
) -> i32 {
    match callback {
        Some(callback) => {
            state::set_drop_files_callback(callback);
            TRUE
        }
        None => FALSE,
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn UnregisterDropFilesCallback() -> i32 {
    state::clear_drop_files_callback();
    TRUE
}

/// Registers the monitor-changed callback. FALSE for null, leaving any
/// prior registration untouched.
#[unsafe(no_mangle)]
pub extern "system" fn RegisterMonitorChangedCallback(
    callback: Option<state::MonitorChangedCallback>,
) -> i32 {
    match callback {
        Some(callback) => {
            state::set_monitor_changed_callback(callback);
            TRUE
        }
        None => FALSE,
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn UnregisterMonitorChangedCallback() -> i32 {
    state::clear_monitor_changed_callback();
    TRUE
}
