//! Window subclassing for event interception.
//!
//! The shim replaces the attached window's procedure, decodes the two
//! messages the library reacts to (file drops and display changes) into
//! [`PlatformEvent`]s, and always chains to the original procedure so
//! the window keeps behaving normally.

use std::ffi::c_void;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicIsize, Ordering};

use vetro_core::event::PlatformEvent;
use vetro_core::platform::RawHandle;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Shell::{DragFinish, HDROP};
use windows::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, DefWindowProcW, GWLP_WNDPROC, SetWindowLongPtrW, WM_DISPLAYCHANGE,
    WM_DROPFILES, WNDPROC,
};

/// Handler the embedding layer registers to consume decoded events.
pub type EventSink = fn(PlatformEvent);

static EVENT_SINK: OnceLock<EventSink> = OnceLock::new();

/// The window currently carrying the shim, and the procedure it
/// replaced. At most one window is subclassed at a time; these are
/// atomics because the message loop reads them while the attach path
/// writes them.
static SHIM_TARGET: AtomicIsize = AtomicIsize::new(0);
static ORIGINAL_PROC: AtomicIsize = AtomicIsize::new(0);

/// Registers the sink that receives decoded shim events. The first
/// caller wins; later calls are ignored.
pub fn set_event_sink(sink: EventSink) {
    let _ = EVENT_SINK.set(sink);
}

/// Subclasses the window. A no-op if this window already carries the
/// shim; any shim left on another window is removed first.
pub fn install(handle: RawHandle) {
    let target = handle as isize;
    if SHIM_TARGET.load(Ordering::Acquire) == target {
        return;
    }
    remove_current();

    let hwnd = crate::window::hwnd(handle);
    // SAFETY: subclassing a window of this process. The previous
    // procedure is preserved so every message still reaches it.
    let previous = unsafe { SetWindowLongPtrW(hwnd, GWLP_WNDPROC, shim_proc as usize as isize) };
    if previous != 0 {
        ORIGINAL_PROC.store(previous, Ordering::Release);
        SHIM_TARGET.store(target, Ordering::Release);
    }
}

/// Removes the shim if this window carries it, restoring the original
/// window procedure.
pub fn remove(handle: RawHandle) {
    if SHIM_TARGET.load(Ordering::Acquire) != handle as isize {
        return;
    }
    remove_current();
}

fn remove_current() {
    let target = SHIM_TARGET.swap(0, Ordering::AcqRel);
    let original = ORIGINAL_PROC.swap(0, Ordering::AcqRel);
    if target == 0 || original == 0 {
        return;
    }
    // SAFETY: restoring the procedure read at install time on the same
    // window.
    unsafe {
        SetWindowLongPtrW(HWND(target as *mut c_void), GWLP_WNDPROC, original);
    }
}

/// Replacement window procedure.
///
/// Decodes drops and display changes, forwards them to the sink, then
/// chains to the original procedure for every message including the
/// decoded ones.
unsafe extern "system" fn shim_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_DROPFILES => {
            let hdrop = HDROP(wparam.0 as *mut c_void);
            let paths = crate::drop::read_dropped_files(hdrop);
            // SAFETY: the HDROP came with this message and is released
            // exactly once.
            unsafe { DragFinish(hdrop) };
            if !paths.is_empty()
                && let Some(sink) = EVENT_SINK.get()
            {
                sink(PlatformEvent::FilesDropped(paths));
            }
        }
        WM_DISPLAYCHANGE => {
            if let Some(sink) = EVENT_SINK.get() {
                sink(PlatformEvent::DisplayChanged);
            }
        }
        _ => {}
    }

    let original = ORIGINAL_PROC.load(Ordering::Acquire);
    if original != 0 {
        // SAFETY: chaining to the procedure this shim replaced; the
        // value is a WNDPROC read from the same window.
        unsafe {
            let proc: WNDPROC = std::mem::transmute(original);
            CallWindowProcW(proc, hwnd, msg, wparam, lparam)
        }
    } else {
        // SAFETY: standard fallback handling for an unchained message.
        unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
    }
}
