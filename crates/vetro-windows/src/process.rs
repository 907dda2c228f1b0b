use vetro_core::platform::RawHandle;

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::Input::KeyboardAndMouse::GetActiveWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GWLP_HWNDPARENT, GetWindowLongPtrW, GetWindowThreadProcessId,
};
use windows::core::BOOL;

/// The current process id.
pub fn process_id() -> u32 {
    // SAFETY: reads a process-global identifier.
    unsafe { GetCurrentProcessId() }
}

/// Finds a top-level window belonging to this process.
///
/// When the first match is an owned window (as game-engine child
/// windows often are), its owner is preferred so the attachment lands
/// on the real main window.
pub fn find_process_window() -> Option<RawHandle> {
    let mut found: RawHandle = 0;

    // SAFETY: the callback runs synchronously and `found` outlives the
    // call. EnumWindows reports an error when the callback stops the
    // enumeration early, so its result is deliberately ignored.
    unsafe {
        let _ = EnumWindows(
            Some(find_window_callback),
            LPARAM(&mut found as *mut _ as isize),
        );
    }

    (found != 0).then_some(found)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to keep enumerating, `FALSE` once a window of the
/// current process has been recorded through the LPARAM pointer.
unsafe extern "system" fn find_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: queries on the enumerated handle; lparam points at the
    // RawHandle owned by find_process_window.
    unsafe {
        let mut pid = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut pid));
        if pid != GetCurrentProcessId() {
            return BOOL(1);
        }

        // For a top-level window this index holds the owner, if any.
        let owner = GetWindowLongPtrW(hwnd, GWLP_HWNDPARENT);
        let found = &mut *(lparam.0 as *mut RawHandle);
        *found = if owner != 0 {
            owner as usize
        } else {
            hwnd.0 as usize
        };
    }

    BOOL(0) // stop: first match wins
}

/// The active window, if it belongs to the current process.
pub fn active_process_window() -> Option<RawHandle> {
    // SAFETY: simple queries on the calling thread's input state.
    unsafe {
        let hwnd = GetActiveWindow();
        if hwnd.is_invalid() {
            return None;
        }
        let mut pid = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut pid));
        (pid == GetCurrentProcessId()).then_some(hwnd.0 as usize)
    }
}
