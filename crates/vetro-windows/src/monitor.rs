use std::mem;

use vetro_core::error::{ControlError, ControlResult};
use vetro_core::geometry::ScreenGeometry;
use vetro_core::monitor::ScreenSnapshot;
use vetro_core::rect::Rect;

use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
    SM_YVIRTUALSCREEN,
};
use windows::core::BOOL;

/// Enumerates the connected monitors and reads the virtual-screen
/// metrics in one pass.
///
/// Monitor rectangles come back in enumeration order; ordering them
/// deterministically is the registry's job, not this module's.
pub fn screen_snapshot() -> ControlResult<ScreenSnapshot> {
    let mut monitors: Vec<Rect> = Vec::new();

    // SAFETY: EnumDisplayMonitors calls our callback synchronously for
    // each display. The LPARAM carries a pointer to the Vec, which
    // outlives the call.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(monitor_callback),
            LPARAM(&mut monitors as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err(ControlError::platform(
            "EnumDisplayMonitors",
            "monitor enumeration failed",
        ));
    }

    // SAFETY: GetSystemMetrics reads global display metrics.
    let geometry = unsafe {
        ScreenGeometry {
            virtual_screen: Rect::new(
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
                GetSystemMetrics(SM_CXVIRTUALSCREEN),
                GetSystemMetrics(SM_CYVIRTUALSCREEN),
            ),
            primary_height: GetSystemMetrics(SM_CYSCREEN),
        }
    };

    Ok(ScreenSnapshot { monitors, geometry })
}

/// Callback invoked by `EnumDisplayMonitors` for each display.
unsafe extern "system" fn monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec pointer passed by screen_snapshot above.
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<Rect>) };

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    // SAFETY: GetMonitorInfoW writes into a MONITORINFO of the
    // advertised size.
    if unsafe { GetMonitorInfoW(hmonitor, &mut info) }.as_bool() {
        let rc = info.rcMonitor;
        monitors.push(Rect::new(
            rc.left,
            rc.top,
            rc.right - rc.left,
            rc.bottom - rc.top,
        ));
    }

    BOOL(1) // continue enumeration
}
