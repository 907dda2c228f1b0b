use std::collections::HashMap;

use super::*;
use crate::error::ControlError;
use crate::frame::FrameMetrics;
use crate::geometry::ScreenGeometry;
use crate::monitor::ScreenSnapshot;

/// Style words the fake hands out; values are arbitrary but distinct.
const CHROMED_STYLE: u32 = 0x00CF_0000;
const POPUP_STYLE: u32 = 0x9000_0000;
const BASE_EX_STYLE: u32 = 0x0000_0100;

#[derive(Debug, Clone, PartialEq, Eq)]
struct FakeSaved {
    style: u32,
    ex_style: u32,
    placement: Rect,
    layered: bool,
}

/// One simulated OS window.
#[derive(Debug, Clone)]
struct FakeWindow {
    style: u32,
    ex_style: u32,
    placement: Rect,
    bounds: Rect,
    client_width: i32,
    client_height: i32,
    state: ShowState,
    layered: bool,
    glass: bool,
    color_key: Option<u32>,
    click_through: bool,
    topmost: bool,
    accepts_drops: bool,
    shim_installed: bool,
    redraws: u32,
}

impl FakeWindow {
    /// 500x400 client inside 510x440 outer bounds (5px side borders,
    /// 30px title bar, 10px bottom border).
    fn framed() -> Self {
        Self {
            style: CHROMED_STYLE,
            ex_style: BASE_EX_STYLE,
            placement: Rect::new(100, 100, 510, 440),
            bounds: Rect::new(100, 100, 510, 440),
            client_width: 500,
            client_height: 400,
            state: ShowState::Normal,
            layered: false,
            glass: false,
            color_key: None,
            click_through: false,
            topmost: false,
            accepts_drops: false,
            shim_installed: false,
            redraws: 0,
        }
    }
}

struct FakeSystem {
    windows: HashMap<RawHandle, FakeWindow>,
    snapshot: ScreenSnapshot,
    fail_snapshot: bool,
    cursor: (i32, i32),
    cursor_set_to: Option<(i32, i32)>,
    process_window: Option<RawHandle>,
    active_window: Option<RawHandle>,
    moves: Vec<(i32, i32)>,
    bounds_requests: Vec<Rect>,
    show_commands: Vec<ShowCommand>,
}

impl FakeSystem {
    fn new() -> Self {
        Self {
            windows: HashMap::new(),
            snapshot: two_monitor_snapshot(),
            fail_snapshot: false,
            cursor: (0, 0),
            cursor_set_to: None,
            process_window: None,
            active_window: None,
            moves: Vec::new(),
            bounds_requests: Vec::new(),
            show_commands: Vec::new(),
        }
    }

    fn window(&self, handle: RawHandle) -> &FakeWindow {
        self.windows.get(&handle).expect("window exists")
    }

    fn window_mut(&mut self, handle: RawHandle) -> &mut FakeWindow {
        self.windows.get_mut(&handle).expect("window exists")
    }
}

impl WindowSystem for FakeSystem {
    type Saved = FakeSaved;

    fn is_valid(&self, handle: RawHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    fn find_process_window(&self) -> Option<RawHandle> {
        self.process_window
    }

    fn active_process_window(&self) -> Option<RawHandle> {
        self.active_window
    }

    fn process_id(&self) -> u32 {
        4242
    }

    fn capture(&mut self, handle: RawHandle) -> ControlResult<WindowBaseline<FakeSaved>> {
        let w = self
            .windows
            .get(&handle)
            .ok_or(ControlError::platform("GetWindowInfo", "invalid handle"))?;
        Ok(WindowBaseline {
            frame: FrameMetrics {
                bounds: w.bounds,
                client_width: w.client_width,
                client_height: w.client_height,
            },
            was_layered: w.layered,
            saved: FakeSaved {
                style: w.style,
                ex_style: w.ex_style,
                placement: w.placement,
                layered: w.layered,
            },
        })
    }

    fn restore(&mut self, handle: RawHandle, saved: &FakeSaved) {
        let w = self.window_mut(handle);
        w.style = saved.style;
        w.ex_style = saved.ex_style;
        w.placement = saved.placement;
    }

    fn screen_snapshot(&mut self) -> ControlResult<ScreenSnapshot> {
        if self.fail_snapshot {
            return Err(ControlError::platform("EnumDisplayMonitors", "forced"));
        }
        Ok(self.snapshot.clone())
    }

    fn frame(&self, handle: RawHandle) -> ControlResult<FrameMetrics> {
        let w = self
            .windows
            .get(&handle)
            .ok_or(ControlError::platform("GetWindowRect", "invalid handle"))?;
        Ok(FrameMetrics {
            bounds: w.bounds,
            client_width: w.client_width,
            client_height: w.client_height,
        })
    }

    fn move_window(&mut self, handle: RawHandle, x: i32, y: i32) -> ControlResult<()> {
        self.moves.push((x, y));
        let w = self.window_mut(handle);
        w.bounds.x = x;
        w.bounds.y = y;
        Ok(())
    }

    fn set_bounds(&mut self, handle: RawHandle, bounds: Rect) -> ControlResult<()> {
        self.bounds_requests.push(bounds);
        self.window_mut(handle).bounds = bounds;
        Ok(())
    }

    fn show_state(&self, handle: RawHandle) -> ShowState {
        self.windows.get(&handle).map_or(ShowState::Normal, |w| w.state)
    }

    fn set_show_state(&mut self, handle: RawHandle, command: ShowCommand) {
        self.show_commands.push(command);
        let w = self.window_mut(handle);
        match command {
            ShowCommand::Normal => w.state = ShowState::Normal,
            ShowCommand::Maximize => w.state = ShowState::Maximized,
            ShowCommand::Show => {}
        }
    }

    fn force_redraw(&mut self, handle: RawHandle) {
        self.window_mut(handle).redraws += 1;
    }

    fn apply_borderless_style(&mut self, handle: RawHandle) {
        self.window_mut(handle).style = POPUP_STYLE;
    }

    fn restore_style(&mut self, handle: RawHandle, saved: &FakeSaved) {
        self.window_mut(handle).style = saved.style;
    }

    fn set_topmost(&mut self, handle: RawHandle, topmost: bool) {
        self.window_mut(handle).topmost = topmost;
    }

    fn set_click_through(&mut self, handle: RawHandle, enabled: bool, keep_layered: bool) {
        let w = self.window_mut(handle);
        w.click_through = enabled;
        if enabled {
            w.layered = true;
        } else if !keep_layered {
            w.layered = false;
        }
    }

    fn set_glass(&mut self, handle: RawHandle, enabled: bool) {
        self.window_mut(handle).glass = enabled;
    }

    fn apply_color_key(&mut self, handle: RawHandle, color: u32) {
        let w = self.window_mut(handle);
        w.color_key = Some(color);
        w.layered = true;
    }

    fn clear_color_key(&mut self, handle: RawHandle, saved: &FakeSaved) {
        let w = self.window_mut(handle);
        w.color_key = None;
        w.ex_style = saved.ex_style;
        w.layered = saved.layered;
    }

    fn install_shim(&mut self, handle: RawHandle) {
        self.window_mut(handle).shim_installed = true;
    }

    fn remove_shim(&mut self, handle: RawHandle) {
        if let Some(w) = self.windows.get_mut(&handle) {
            w.shim_installed = false;
        }
    }

    fn set_drop_accept(&mut self, handle: RawHandle, accept: bool) {
        self.window_mut(handle).accepts_drops = accept;
    }

    fn cursor_position(&self) -> ControlResult<(i32, i32)> {
        Ok(self.cursor)
    }

    fn set_cursor_position(&mut self, x: i32, y: i32) -> ControlResult<()> {
        self.cursor_set_to = Some((x, y));
        Ok(())
    }
}

// ── fixtures ─────────────────────────────────────────────────────

const HWND_A: RawHandle = 0x1000;
const HWND_B: RawHandle = 0x2000;

/// Primary 1920x1080 at the origin, secondary 1520x1080 to the right.
fn two_monitor_snapshot() -> ScreenSnapshot {
    ScreenSnapshot {
        monitors: vec![
            Rect::new(0, 0, 1920, 1080),
            Rect::new(1920, 0, 1520, 1080),
        ],
        geometry: ScreenGeometry {
            virtual_screen: Rect::new(0, 0, 3440, 1080),
            primary_height: 1080,
        },
    }
}

fn controller_with_window() -> WindowController<FakeSystem> {
    let mut system = FakeSystem::new();
    system.windows.insert(HWND_A, FakeWindow::framed());
    WindowController::new(system)
}

fn attached_controller() -> WindowController<FakeSystem> {
    let mut c = controller_with_window();
    c.attach(HWND_A).expect("attach succeeds");
    c
}

// ── attach / detach ──────────────────────────────────────────────

#[test]
fn attach_installs_shim_and_reports_active() {
    let c = attached_controller();

    assert!(c.is_active());
    assert_eq!(c.attached_handle(), HWND_A);
    assert!(c.system.window(HWND_A).shim_installed);
}

#[test]
fn attach_refreshes_the_monitor_layout() {
    let mut c = controller_with_window();
    assert_eq!(c.monitor_count(), 0);

    c.attach(HWND_A).unwrap();
    assert_eq!(c.monitor_count(), 2);
}

#[test]
fn attach_zero_is_detach() {
    let mut c = attached_controller();
    c.attach(0).unwrap();

    assert!(!c.is_active());
    assert_eq!(c.attached_handle(), 0);
    assert!(!c.system.window(HWND_A).shim_installed);
}

#[test]
fn attach_to_invalid_handle_leaves_nothing_attached() {
    let mut c = controller_with_window();
    let result = c.attach(0xDEAD);

    assert!(matches!(result, Err(ControlError::Platform { .. })));
    assert!(!c.is_active());
}

#[test]
fn detach_restores_the_captured_baseline() {
    let mut c = attached_controller();

    // Scramble everything the baseline covers.
    c.set_borderless(true);
    {
        let w = c.system.window_mut(HWND_A);
        w.ex_style = 0xFFFF;
        w.placement = Rect::new(1, 2, 3, 4);
    }

    c.detach();

    let w = c.system.window(HWND_A);
    assert_eq!(w.style, CHROMED_STYLE);
    assert_eq!(w.ex_style, BASE_EX_STYLE);
    assert_eq!(w.placement, Rect::new(100, 100, 510, 440));
    assert!(!w.shim_installed);
    assert!(w.redraws > 0);
}

#[test]
fn detach_without_attachment_is_a_no_op() {
    let mut c = controller_with_window();
    c.detach();
    assert!(!c.is_active());
}

#[test]
fn attaching_a_second_window_restores_the_first() {
    let mut c = controller_with_window();
    c.system.windows.insert(HWND_B, FakeWindow::framed());

    c.attach(HWND_A).unwrap();
    c.set_borderless(true);
    c.attach(HWND_B).unwrap();

    let a = c.system.window(HWND_A);
    assert_eq!(a.style, CHROMED_STYLE);
    assert!(!a.shim_installed);

    // The new window inherits the configured borderless mode.
    assert_eq!(c.attached_handle(), HWND_B);
    assert_eq!(c.system.window(HWND_B).style, POPUP_STYLE);
}

#[test]
fn reattaching_the_same_window_recaptures_the_baseline() {
    let mut c = attached_controller();
    c.set_borderless(true);

    // Re-attach without detaching: the popup style becomes the new
    // baseline, so a later detach restores to it, not to the original.
    c.attach(HWND_A).unwrap();
    c.set_borderless(false);
    c.detach();

    assert_eq!(c.system.window(HWND_A).style, POPUP_STYLE);
}

#[test]
fn attach_applies_modes_configured_while_detached() {
    let mut c = controller_with_window();
    c.set_transparent(true);
    c.set_topmost(true);
    c.set_click_through(true);

    c.attach(HWND_A).unwrap();

    let w = c.system.window(HWND_A);
    assert!(w.glass);
    assert!(w.topmost);
    assert!(w.click_through);
}

#[test]
fn detach_preserves_mode_flags() {
    let mut c = controller_with_window();
    c.system.windows.insert(HWND_B, FakeWindow::framed());

    c.attach(HWND_A).unwrap();
    c.set_transparent(true);
    c.set_topmost(true);
    c.detach();

    assert!(c.modes().transparent);
    assert!(c.modes().topmost);

    // And they come back on the next attachment.
    c.attach(HWND_B).unwrap();
    let w = c.system.window(HWND_B);
    assert!(w.glass);
    assert!(w.topmost);
}

// ── discovery attachments ────────────────────────────────────────

#[test]
fn attach_process_window_uses_the_search_result() {
    let mut c = controller_with_window();
    c.system.process_window = Some(HWND_A);

    c.attach_process_window().unwrap();
    assert_eq!(c.attached_handle(), HWND_A);
}

#[test]
fn attach_process_window_fails_when_nothing_matches() {
    let mut c = controller_with_window();
    assert!(matches!(
        c.attach_process_window(),
        Err(ControlError::WindowNotFound)
    ));
    assert!(!c.is_active());
}

#[test]
fn attach_active_window_requires_own_process() {
    let mut c = controller_with_window();
    assert!(matches!(
        c.attach_active_window(),
        Err(ControlError::WindowNotFound)
    ));

    c.system.active_window = Some(HWND_A);
    c.attach_active_window().unwrap();
    assert_eq!(c.attached_handle(), HWND_A);
}

// ── transparency ─────────────────────────────────────────────────

#[test]
fn alpha_transparency_extends_the_glass() {
    let mut c = attached_controller();
    c.set_transparent(true);
    assert!(c.system.window(HWND_A).glass);
    assert!(c.modes().transparent);

    c.set_transparent(false);
    assert!(!c.system.window(HWND_A).glass);
    assert!(!c.modes().transparent);
}

#[test]
fn color_key_transparency_keys_out_the_configured_color() {
    let mut c = attached_controller();
    c.set_transparent_type(TransparentType::ColorKey);
    c.set_key_color(0x00FF_00FF);
    c.set_transparent(true);

    let w = c.system.window(HWND_A);
    assert_eq!(w.color_key, Some(0x00FF_00FF));
    assert!(w.layered);
    assert!(!w.glass);
}

#[test]
fn technique_change_while_transparent_swaps_the_effect() {
    let mut c = attached_controller();
    c.set_transparent(true);
    assert!(c.system.window(HWND_A).glass);

    c.set_transparent_type(TransparentType::ColorKey);

    let w = c.system.window(HWND_A);
    assert!(!w.glass, "glass reverted by the old technique");
    assert!(w.color_key.is_some(), "color key applied by the new one");
}

#[test]
fn technique_change_while_opaque_only_records_the_preference() {
    let mut c = attached_controller();
    c.set_transparent_type(TransparentType::ColorKey);

    let w = c.system.window(HWND_A);
    assert!(w.color_key.is_none());
    assert!(!w.glass);

    // The next enable must use the new technique, not the old one.
    c.set_transparent(true);
    let w = c.system.window(HWND_A);
    assert!(w.color_key.is_some());
    assert!(!w.glass);
}

#[test]
fn key_color_change_recycles_only_an_active_color_key() {
    let mut c = attached_controller();
    c.set_transparent_type(TransparentType::ColorKey);
    c.set_transparent(true);
    c.set_key_color(0x0000_FF00);
    assert_eq!(c.system.window(HWND_A).color_key, Some(0x0000_FF00));

    // Under alpha the color is stored but nothing is re-applied.
    c.set_transparent_type(TransparentType::Alpha);
    c.set_key_color(0x0000_00FF);
    assert_eq!(c.modes().key_color, 0x0000_00FF);
    assert!(c.system.window(HWND_A).color_key.is_none());
}

#[test]
fn disable_uses_the_technique_that_was_applied() {
    let mut c = attached_controller();
    c.set_transparent_type(TransparentType::ColorKey);
    c.set_transparent(true);

    // Change the preference while transparent is on: the cycle reverts
    // the color key and applies glass.
    c.set_transparent_type(TransparentType::Alpha);
    let w = c.system.window(HWND_A);
    assert!(w.color_key.is_none());
    assert!(w.glass);

    c.set_transparent(false);
    assert!(!c.system.window(HWND_A).glass);
}

// ── borderless ───────────────────────────────────────────────────

#[test]
fn borderless_shrinks_to_the_client_area() {
    let mut c = attached_controller();
    c.system.bounds_requests.clear();

    c.set_borderless(true);

    let w = c.system.window(HWND_A);
    assert_eq!(w.style, POPUP_STYLE);
    let requested = *c.system.bounds_requests.last().expect("bounds set");
    assert_eq!(requested.width, 500);
    assert_eq!(requested.height, 400);
    assert_eq!(requested.x, 105);
    assert_eq!(requested.y, 135);
}

#[test]
fn borderless_off_restores_chrome_from_the_baseline() {
    let mut c = attached_controller();
    c.set_borderless(true);
    {
        // While borderless the outer bounds equal the client area.
        let w = c.system.window_mut(HWND_A);
        w.client_width = w.bounds.width;
        w.client_height = w.bounds.height;
    }

    c.set_borderless(false);

    let w = c.system.window(HWND_A);
    assert_eq!(w.style, CHROMED_STYLE);
    assert_eq!(w.bounds, Rect::new(100, 100, 510, 440));
}

#[test]
fn borderless_on_a_maximized_window_cycles_through_normal() {
    let mut c = attached_controller();
    c.system.window_mut(HWND_A).state = ShowState::Maximized;
    c.system.show_commands.clear();
    c.system.bounds_requests.clear();

    c.set_borderless(true);

    assert_eq!(
        c.system.show_commands,
        vec![ShowCommand::Normal, ShowCommand::Maximize]
    );
    assert!(c.system.bounds_requests.is_empty(), "no manual resize");
    assert_eq!(c.system.window(HWND_A).style, POPUP_STYLE);
}

#[test]
fn borderless_on_a_minimized_window_is_deferred() {
    let mut c = attached_controller();
    c.system.window_mut(HWND_A).state = ShowState::Minimized;
    c.system.show_commands.clear();
    c.system.bounds_requests.clear();

    c.set_borderless(true);

    assert!(c.system.show_commands.is_empty());
    assert!(c.system.bounds_requests.is_empty());
    // The style is in place for the next restore.
    assert_eq!(c.system.window(HWND_A).style, POPUP_STYLE);
}

#[test]
fn borderless_with_unchanged_size_just_redraws() {
    let mut c = attached_controller();
    {
        // A window with no chrome: removing it changes nothing.
        let w = c.system.window_mut(HWND_A);
        w.client_width = w.bounds.width;
        w.client_height = w.bounds.height;
    }
    c.system.bounds_requests.clear();
    let redraws_before = c.system.window(HWND_A).redraws;

    c.set_borderless(true);

    assert!(c.system.bounds_requests.is_empty());
    assert!(c.system.window(HWND_A).redraws > redraws_before);
}

// ── click-through ────────────────────────────────────────────────

#[test]
fn click_through_disable_keeps_layered_while_color_key_is_on() {
    let mut c = attached_controller();
    c.set_transparent_type(TransparentType::ColorKey);
    c.set_transparent(true);
    c.set_click_through(true);

    c.set_click_through(false);

    let w = c.system.window(HWND_A);
    assert!(!w.click_through);
    assert!(w.layered, "color key still needs the layered bit");
}

#[test]
fn click_through_disable_keeps_a_preexisting_layered_bit() {
    let mut c = controller_with_window();
    c.system.window_mut(HWND_A).layered = true;
    c.attach(HWND_A).unwrap();

    c.set_click_through(true);
    c.set_click_through(false);

    assert!(c.system.window(HWND_A).layered);
}

#[test]
fn click_through_disable_clears_layered_otherwise() {
    let mut c = attached_controller();
    c.set_click_through(true);
    assert!(c.system.window(HWND_A).layered);

    c.set_click_through(false);
    assert!(!c.system.window(HWND_A).layered);
}

// ── drop acceptance ──────────────────────────────────────────────

#[test]
fn allow_drop_requires_an_attached_window() {
    let mut c = controller_with_window();
    assert!(matches!(
        c.set_allow_drop(true),
        Err(ControlError::NoTargetWindow)
    ));

    c.attach(HWND_A).unwrap();
    c.set_allow_drop(true).unwrap();
    assert!(c.system.window(HWND_A).accepts_drops);
    assert!(c.modes().accept_drops);
}

// ── position and size ────────────────────────────────────────────

#[test]
fn set_position_flips_y_and_anchors_the_bottom_edge() {
    let mut c = attached_controller();

    // Public (10, 100): native top = (1080 - 100) - 440 = 540.
    c.set_position(10.0, 100.0).unwrap();
    assert_eq!(c.system.moves.last(), Some(&(10, 540)));
}

#[test]
fn position_reports_the_public_bottom_left() {
    let c = attached_controller();
    // Native bottom edge is 540, so public y = 1080 - 540.
    assert_eq!(c.position().unwrap(), (100.0, 540.0));
}

#[test]
fn position_round_trips_through_the_flip() {
    let mut c = attached_controller();
    c.set_position(250.0, 333.0).unwrap();
    assert_eq!(c.position().unwrap(), (250.0, 333.0));
}

#[test]
fn set_size_keeps_the_bottom_edge_fixed() {
    let mut c = attached_controller();
    c.system.bounds_requests.clear();

    // Bottom edge sits at native 540; growing to 500 tall must lift the
    // top to 40.
    c.set_size(600.0, 500.0).unwrap();
    let requested = *c.system.bounds_requests.last().unwrap();
    assert_eq!(requested, Rect::new(100, 40, 600, 500));
}

#[test]
fn size_reports_outer_dimensions() {
    let c = attached_controller();
    assert_eq!(c.size().unwrap(), (510.0, 440.0));
}

#[test]
fn geometry_operations_fail_without_a_window() {
    let mut c = controller_with_window();
    assert!(matches!(
        c.set_position(0.0, 0.0),
        Err(ControlError::NoTargetWindow)
    ));
    assert!(matches!(c.position(), Err(ControlError::NoTargetWindow)));
    assert!(matches!(
        c.set_size(1.0, 1.0),
        Err(ControlError::NoTargetWindow)
    ));
    assert!(matches!(c.size(), Err(ControlError::NoTargetWindow)));
}

// ── cursor ───────────────────────────────────────────────────────

#[test]
fn cursor_position_uses_the_pixel_flip() {
    let mut c = attached_controller();
    c.system.cursor = (10, 79);

    // 1080 - 79 - 1 = 1000.
    assert_eq!(c.cursor_position().unwrap(), (10.0, 1000.0));
}

#[test]
fn set_cursor_position_inverts_the_pixel_flip() {
    let mut c = attached_controller();
    c.set_cursor_position(10.0, 1000.0).unwrap();
    assert_eq!(c.system.cursor_set_to, Some((10, 79)));
}

// ── monitors and display changes ─────────────────────────────────

#[test]
fn monitor_queries_use_the_sorted_registry() {
    let c = attached_controller();
    assert_eq!(c.monitor_count(), 2);
    assert_eq!(
        c.monitor_rect(0).unwrap(),
        Rect::new(0, 0, 1920, 1080)
    );
    assert!(matches!(
        c.monitor_rect(2),
        Err(ControlError::MonitorIndexOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn current_monitor_follows_the_window_center() {
    let mut c = attached_controller();
    assert_eq!(c.current_monitor(), 0);

    c.system.window_mut(HWND_A).bounds = Rect::new(2200, 100, 510, 440);
    assert_eq!(c.current_monitor(), 1);
}

#[test]
fn current_monitor_without_a_window_is_the_primary() {
    let mut c = controller_with_window();
    c.refresh_screen().unwrap();
    assert_eq!(c.current_monitor(), 0);
}

#[test]
fn display_change_refreshes_and_reports_the_count() {
    let mut c = attached_controller();
    c.system.snapshot.monitors.push(Rect::new(-1920, 0, 1920, 1080));

    let count = c.handle_display_change();
    assert_eq!(count, 3);
    assert_eq!(c.monitor_count(), 3);

    // The new monitor is leftmost, so it takes index 0.
    assert_eq!(
        c.monitor_rect(0).unwrap(),
        Rect::new(-1920, 0, 1920, 1080)
    );
}

#[test]
fn failed_refresh_keeps_the_previous_registry() {
    let mut c = attached_controller();
    assert_eq!(c.monitor_count(), 2);

    c.system.fail_snapshot = true;
    assert!(c.refresh_screen().is_err());
    assert_eq!(c.monitor_count(), 2);

    // A display change with a failing enumeration reports the stale
    // count rather than crashing.
    assert_eq!(c.handle_display_change(), 2);
}

#[test]
fn process_id_comes_from_the_platform() {
    let c = controller_with_window();
    assert_eq!(c.process_id(), 4242);
}
