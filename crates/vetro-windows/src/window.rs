use std::mem;

use vetro_core::error::{ControlError, ControlResult};
use vetro_core::frame::FrameMetrics;
use vetro_core::platform::{RawHandle, ShowCommand, ShowState, WindowBaseline};
use vetro_core::rect::Rect;

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GWL_STYLE, GetClientRect, GetWindowLongPtrW, GetWindowPlacement, GetWindowRect,
    HWND_NOTOPMOST, HWND_TOPMOST, IsIconic, IsWindow, IsWindowVisible, IsZoomed,
    SW_MAXIMIZE, SW_MINIMIZE, SW_NORMAL, SW_SHOW, SWP_ASYNCWINDOWPOS, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongPtrW,
    SetWindowPlacement, SetWindowPos, ShowWindow, WINDOWPLACEMENT, WS_EX_LAYERED,
    WS_EX_TRANSPARENT, WS_POPUP, WS_VISIBLE,
};

/// Builds an `HWND` from a raw handle value (pointer-sized integer).
pub(crate) fn hwnd(handle: RawHandle) -> HWND {
    HWND(handle as *mut _)
}

/// Style words and placement captured at attach time and restored
/// wholesale at detach.
#[derive(Clone, Copy)]
pub struct SavedWindow {
    pub style: isize,
    pub ex_style: isize,
    pub placement: WINDOWPLACEMENT,
}

/// Whether the handle still names a live window.
pub fn is_valid(handle: RawHandle) -> bool {
    if handle == 0 {
        return false;
    }
    // SAFETY: IsWindow is a simple query that returns a BOOL.
    unsafe { IsWindow(hwnd(handle)).as_bool() }
}

/// Captures the window's styles, placement, and frame geometry.
///
/// This is the baseline a later detach restores, so a window handed
/// back to its application looks exactly as it did before.
pub fn capture(handle: RawHandle) -> ControlResult<WindowBaseline<SavedWindow>> {
    let frame = frame(handle)?;
    let hwnd = hwnd(handle);

    let mut placement = WINDOWPLACEMENT {
        length: mem::size_of::<WINDOWPLACEMENT>() as u32,
        ..Default::default()
    };
    // SAFETY: writes into a caller-owned WINDOWPLACEMENT of the
    // advertised length.
    unsafe { GetWindowPlacement(hwnd, &mut placement) }
        .map_err(|e| ControlError::platform("GetWindowPlacement", e))?;

    // SAFETY: style queries on a valid HWND.
    let (style, ex_style) = unsafe {
        (
            GetWindowLongPtrW(hwnd, GWL_STYLE),
            GetWindowLongPtrW(hwnd, GWL_EXSTYLE),
        )
    };

    Ok(WindowBaseline {
        frame,
        was_layered: (ex_style as u32 & WS_EX_LAYERED.0) != 0,
        saved: SavedWindow {
            style,
            ex_style,
            placement,
        },
    })
}

/// Restores style, extended style, and placement from a baseline.
pub fn restore(handle: RawHandle, saved: &SavedWindow) {
    let hwnd = hwnd(handle);
    // SAFETY: writing back values previously read from this window.
    unsafe {
        SetWindowLongPtrW(hwnd, GWL_STYLE, saved.style);
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, saved.ex_style);
        let _ = SetWindowPlacement(hwnd, &saved.placement);
    }
}

/// Current outer bounds and client size.
pub fn frame(handle: RawHandle) -> ControlResult<FrameMetrics> {
    let hwnd = hwnd(handle);
    let mut window = RECT::default();
    let mut client = RECT::default();
    // SAFETY: both calls write into caller-owned RECTs.
    unsafe { GetWindowRect(hwnd, &mut window) }
        .map_err(|e| ControlError::platform("GetWindowRect", e))?;
    unsafe { GetClientRect(hwnd, &mut client) }
        .map_err(|e| ControlError::platform("GetClientRect", e))?;

    Ok(FrameMetrics {
        bounds: Rect::new(
            window.left,
            window.top,
            window.right - window.left,
            window.bottom - window.top,
        ),
        client_width: client.right - client.left,
        client_height: client.bottom - client.top,
    })
}

/// Repositions the window without resizing or changing Z order.
pub fn move_window(handle: RawHandle, x: i32, y: i32) -> ControlResult<()> {
    let flags =
        SWP_NOACTIVATE | SWP_NOOWNERZORDER | SWP_NOSIZE | SWP_NOZORDER | SWP_ASYNCWINDOWPOS;
    // SAFETY: SetWindowPos with a valid HWND is safe.
    unsafe { SetWindowPos(hwnd(handle), None, x, y, 0, 0, flags) }
        .map_err(|e| ControlError::platform("SetWindowPos", e))
}

/// Moves and resizes with a frame-changed update so a freshly swapped
/// style is re-evaluated along the way.
pub fn set_bounds(handle: RawHandle, bounds: Rect) -> ControlResult<()> {
    let flags =
        SWP_NOZORDER | SWP_FRAMECHANGED | SWP_NOOWNERZORDER | SWP_NOACTIVATE | SWP_ASYNCWINDOWPOS;
    // SAFETY: SetWindowPos with a valid HWND is safe.
    unsafe {
        SetWindowPos(
            hwnd(handle),
            None,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            flags,
        )
    }
    .map_err(|e| ControlError::platform("SetWindowPos", e))
}

pub fn show_state(handle: RawHandle) -> ShowState {
    let hwnd = hwnd(handle);
    // SAFETY: simple queries returning BOOLs.
    unsafe {
        if IsZoomed(hwnd).as_bool() {
            ShowState::Maximized
        } else if IsIconic(hwnd).as_bool() {
            ShowState::Minimized
        } else {
            ShowState::Normal
        }
    }
}

pub fn set_show_state(handle: RawHandle, command: ShowCommand) {
    let cmd = match command {
        ShowCommand::Normal => SW_NORMAL,
        ShowCommand::Maximize => SW_MAXIMIZE,
        ShowCommand::Show => SW_SHOW,
    };
    // SAFETY: ShowWindow with a valid HWND is safe.
    unsafe {
        let _ = ShowWindow(hwnd(handle), cmd);
    }
}

/// Forces the window to re-evaluate its frame and repaint.
///
/// A style change alone does not repaint; the frame is only re-read on
/// an actual size event. Maximized windows are bounced through minimize,
/// normal ones get a one-pixel resize and back.
pub fn force_redraw(handle: RawHandle) {
    let hwnd = hwnd(handle);
    // SAFETY: show and resize calls on a valid HWND.
    unsafe {
        if IsZoomed(hwnd).as_bool() {
            let _ = ShowWindow(hwnd, SW_MINIMIZE);
            let _ = ShowWindow(hwnd, SW_MAXIMIZE);
        } else if IsIconic(hwnd).as_bool() {
            // Repaints on its own when restored.
        } else if IsWindowVisible(hwnd).as_bool() {
            let mut rect = RECT::default();
            if GetWindowRect(hwnd, &mut rect).is_err() {
                return;
            }
            let (w, h) = (rect.right - rect.left, rect.bottom - rect.top);
            let flags = SWP_NOMOVE
                | SWP_NOZORDER
                | SWP_FRAMECHANGED
                | SWP_NOOWNERZORDER
                | SWP_NOACTIVATE
                | SWP_ASYNCWINDOWPOS;
            let _ = SetWindowPos(hwnd, None, 0, 0, w + 1, h + 1, flags);
            let _ = SetWindowPos(hwnd, None, 0, 0, w, h, flags);
            let _ = ShowWindow(hwnd, SW_SHOW);
        }
    }
}

/// Swaps the style word for a bare visible popup. The caller follows up
/// with a resize or redraw so the change takes effect.
pub fn apply_borderless_style(handle: RawHandle) {
    // SAFETY: writing the style word of a window owned by this process.
    unsafe {
        SetWindowLongPtrW(
            hwnd(handle),
            GWL_STYLE,
            (WS_VISIBLE.0 | WS_POPUP.0) as isize,
        );
    }
}

/// Restores only the style word from the baseline.
pub fn restore_style(handle: RawHandle, saved: &SavedWindow) {
    // SAFETY: writing back a value previously read from this window.
    unsafe {
        SetWindowLongPtrW(hwnd(handle), GWL_STYLE, saved.style);
    }
}

/// Moves the window into or out of the topmost Z band. Never moves,
/// resizes, or activates it.
pub fn set_topmost(handle: RawHandle, topmost: bool) {
    let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
    let flags =
        SWP_NOSIZE | SWP_NOMOVE | SWP_NOOWNERZORDER | SWP_NOACTIVATE | SWP_ASYNCWINDOWPOS;
    // SAFETY: SetWindowPos with a valid HWND is safe.
    unsafe {
        let _ = SetWindowPos(hwnd(handle), Some(insert_after), 0, 0, 0, 0, flags);
    }
}

/// Toggles `WS_EX_TRANSPARENT` so mouse input falls through the window.
///
/// Enabling also sets the layered bit, which the hit-test pass-through
/// requires. Disabling clears the layered bit only when `keep_layered`
/// says nothing else still needs it.
pub fn set_click_through(handle: RawHandle, enabled: bool, keep_layered: bool) {
    let hwnd = hwnd(handle);
    // SAFETY: read-modify-write of the extended style word.
    unsafe {
        let mut ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        if enabled {
            ex_style |= (WS_EX_TRANSPARENT.0 | WS_EX_LAYERED.0) as isize;
        } else {
            ex_style &= !(WS_EX_TRANSPARENT.0 as isize);
            if !keep_layered {
                ex_style &= !(WS_EX_LAYERED.0 as isize);
            }
        }
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style);
    }
}
