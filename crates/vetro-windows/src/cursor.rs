use vetro_core::error::{ControlError, ControlResult};

use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

/// Cursor position in native screen coordinates.
pub fn position() -> ControlResult<(i32, i32)> {
    let mut point = POINT::default();
    // SAFETY: writes into a caller-owned POINT.
    unsafe { GetCursorPos(&mut point) }.map_err(|e| ControlError::platform("GetCursorPos", e))?;
    Ok((point.x, point.y))
}

pub fn set_position(x: i32, y: i32) -> ControlResult<()> {
    // SAFETY: moves the global cursor; no memory is shared.
    unsafe { SetCursorPos(x, y) }.map_err(|e| ControlError::platform("SetCursorPos", e))
}
