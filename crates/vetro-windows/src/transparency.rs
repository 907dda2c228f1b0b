use vetro_core::platform::RawHandle;

use windows::Win32::Foundation::COLORREF;
use windows::Win32::Graphics::Dwm::{DwmExtendFrameIntoClientArea, MARGINS};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetWindowLongPtrW, LWA_ALPHA, LWA_COLORKEY, SetLayeredWindowAttributes,
    SetWindowLongPtrW, WS_EX_LAYERED,
};

use crate::window::{SavedWindow, hwnd};

/// Extends (or resets) the DWM composition glass across the whole
/// client area. With the glass extended, pixels the application renders
/// with alpha stay translucent on screen.
pub fn set_glass(handle: RawHandle, enabled: bool) {
    let m = if enabled { -1 } else { 0 };
    let margins = MARGINS {
        cxLeftWidth: m,
        cxRightWidth: m,
        cyTopHeight: m,
        cyBottomHeight: m,
    };
    // SAFETY: DWM call on a valid HWND; margins live across the call.
    unsafe {
        let _ = DwmExtendFrameIntoClientArea(hwnd(handle), &margins);
    }
}

/// Marks the window layered and keys out the given `0x00BBGGRR` color.
/// Keyed pixels become fully invisible and let input through.
pub fn apply_color_key(handle: RawHandle, color: u32) {
    let hwnd = hwnd(handle);
    // SAFETY: read-modify-write of the extended style, then the layered
    // attributes call that style enables.
    unsafe {
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style | WS_EX_LAYERED.0 as isize);
        let _ = SetLayeredWindowAttributes(hwnd, COLORREF(color), 0xFF, LWA_COLORKEY);
    }
}

/// Undoes the color key: resets the layered attributes to fully opaque
/// and puts the baseline extended style back wholesale.
pub fn clear_color_key(handle: RawHandle, saved: &SavedWindow) {
    let hwnd = hwnd(handle);
    // SAFETY: as above; the saved extended style came from this window.
    unsafe {
        let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), 0xFF, LWA_ALPHA);
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, saved.ex_style);
    }
}
