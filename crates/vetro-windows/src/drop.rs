use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;

use vetro_core::platform::RawHandle;

use windows::Win32::UI::Shell::{DragAcceptFiles, DragQueryFileW, HDROP};

use crate::window::hwnd;

/// Tells the shell whether the window accepts dropped files. Acceptance
/// alone only makes `WM_DROPFILES` arrive; the shim decodes it.
pub fn set_drop_accept(handle: RawHandle, accept: bool) {
    // SAFETY: registers the window with the shell's drop tracking.
    unsafe { DragAcceptFiles(hwnd(handle), accept) };
}

/// Decodes the file list carried by a `WM_DROPFILES` message.
///
/// The caller still owns the `HDROP` and must release it with
/// `DragFinish` after this returns.
pub fn read_dropped_files(hdrop: HDROP) -> Vec<PathBuf> {
    // SAFETY: DragQueryFileW with index 0xFFFFFFFF yields the file
    // count; per-index calls yield the length, then the contents.
    unsafe {
        let count = DragQueryFileW(hdrop, u32::MAX, None);
        let mut paths = Vec::with_capacity(count as usize);

        for i in 0..count {
            let length = DragQueryFileW(hdrop, i, None) as usize;
            if length == 0 {
                continue;
            }
            // Room for the terminating NUL the API writes.
            let mut buffer = vec![0u16; length + 1];
            let copied = DragQueryFileW(hdrop, i, Some(&mut buffer)) as usize;
            paths.push(PathBuf::from(OsString::from_wide(&buffer[..copied])));
        }

        paths
    }
}
