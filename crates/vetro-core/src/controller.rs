//! The window state machine.
//!
//! One controller owns the process's attached-window state, the mode
//! flags, and the monitor layout, and drives a [`WindowSystem`] to
//! realize mode changes as OS style transitions. All process-wide
//! mutable state lives here; there are no hidden globals.

use crate::error::{ControlError, ControlResult};
use crate::modes::{TransparentType, VisualModeState};
use crate::monitor::MonitorLayout;
use crate::platform::{RawHandle, ShowCommand, ShowState, WindowBaseline, WindowSystem};
use crate::rect::Rect;
use crate::{frame, log_debug, log_info, log_warn};

struct Attachment<P> {
    handle: RawHandle,
    baseline: WindowBaseline<P>,
}

/// Drives window-mode transitions against a single attached window.
///
/// At most one window is attached at a time; attaching a different one
/// restores the previous window first. Mode flags outlive attachments:
/// whatever is configured while detached is applied to the next window.
///
/// Not internally synchronized. All operations are expected on the
/// thread that owns the attached window's message queue.
pub struct WindowController<S: WindowSystem> {
    system: S,
    attached: Option<Attachment<S::Saved>>,
    modes: VisualModeState,
    /// Technique in force when transparency last changed; disabling
    /// reverts with this even if the preference moved on meanwhile.
    applied_transparent_type: TransparentType,
    layout: MonitorLayout,
}

impl<S: WindowSystem> WindowController<S> {
    pub fn new(system: S) -> Self {
        Self {
            system,
            attached: None,
            modes: VisualModeState::default(),
            applied_transparent_type: TransparentType::default(),
            layout: MonitorLayout::default(),
        }
    }

    // ── queries ──────────────────────────────────────────────────

    /// Whether a window is attached and still exists.
    pub fn is_active(&self) -> bool {
        self.attached
            .as_ref()
            .is_some_and(|a| self.system.is_valid(a.handle))
    }

    /// The attached window's raw handle, or 0.
    pub fn attached_handle(&self) -> RawHandle {
        self.attached.as_ref().map_or(0, |a| a.handle)
    }

    /// The configured mode flags (not necessarily applied to any window).
    pub fn modes(&self) -> &VisualModeState {
        &self.modes
    }

    pub fn is_maximized(&self) -> bool {
        self.attached
            .as_ref()
            .is_some_and(|a| self.system.show_state(a.handle) == ShowState::Maximized)
    }

    pub fn is_minimized(&self) -> bool {
        self.attached
            .as_ref()
            .is_some_and(|a| self.system.show_state(a.handle) == ShowState::Minimized)
    }

    pub fn process_id(&self) -> u32 {
        self.system.process_id()
    }

    // ── attach / detach ──────────────────────────────────────────

    /// Attaches the window, detaching any previously attached one first.
    ///
    /// Refreshes screen geometry, captures the window's baseline,
    /// re-applies the configured modes, and installs the message shim.
    /// Handle 0 detaches. If the baseline cannot be captured, nothing
    /// stays attached.
    pub fn attach(&mut self, handle: RawHandle) -> ControlResult<()> {
        if self.attached.as_ref().is_some_and(|a| a.handle != handle) {
            self.detach();
        }

        // The coordinate model needs fresh geometry before any of the
        // mode transitions below convert coordinates.
        if let Err(e) = self.refresh_screen() {
            log_warn!("screen refresh during attach failed: {e}");
        }

        if handle == 0 {
            return Ok(());
        }

        let baseline = match self.system.capture(handle) {
            Ok(baseline) => baseline,
            Err(e) => {
                // Same-handle re-attach: a window we can no longer read
                // must not stay attached with its stale baseline.
                if let Some(stale) = self.attached.take() {
                    self.system.remove_shim(stale.handle);
                }
                return Err(e);
            }
        };
        self.attached = Some(Attachment { handle, baseline });
        log_info!("attached window 0x{handle:X}");

        self.apply_configured_modes();
        self.system.install_shim(handle);
        Ok(())
    }

    /// Finds a window of the current process (preferring an owner window
    /// over the owned one) and attaches it.
    pub fn attach_process_window(&mut self) -> ControlResult<()> {
        let handle = self
            .system
            .find_process_window()
            .ok_or(ControlError::WindowNotFound)?;
        self.attach(handle)
    }

    /// Attaches the active window if it belongs to the current process.
    pub fn attach_active_window(&mut self) -> ControlResult<()> {
        let handle = self
            .system
            .active_process_window()
            .ok_or(ControlError::WindowNotFound)?;
        self.attach(handle)
    }

    /// Restores the attached window and releases it. No-op if nothing is
    /// attached. Mode flags are kept; only the window's own state goes
    /// back to its baseline.
    pub fn detach(&mut self) {
        let Some(att) = self.attached.take() else {
            return;
        };

        self.system.remove_shim(att.handle);

        if self.system.is_valid(att.handle) {
            Self::disable_transparent_effect(
                &mut self.system,
                att.handle,
                &att.baseline.saved,
                self.applied_transparent_type,
            );
            self.applied_transparent_type = self.modes.transparent_type;

            self.system.restore(att.handle, &att.baseline.saved);
            self.system.force_redraw(att.handle);
        }
        log_info!("detached window 0x{:X}", att.handle);
    }

    // ── transparency ─────────────────────────────────────────────

    /// Enables or disables transparency on the attached window using the
    /// configured technique. The flag is recorded even with no window
    /// attached, to be applied on the next attach.
    pub fn set_transparent(&mut self, on: bool) {
        if let Some(att) = &self.attached {
            if on {
                Self::enable_transparent_effect(&mut self.system, att.handle, &self.modes);
            } else {
                Self::disable_transparent_effect(
                    &mut self.system,
                    att.handle,
                    &att.baseline.saved,
                    self.applied_transparent_type,
                );
            }
            // Remember which technique must undo the current state.
            self.applied_transparent_type = self.modes.transparent_type;
        }
        self.modes.transparent = on;
    }

    /// Selects the transparency technique. If transparency is currently
    /// on, it is cycled off and back on so the change shows immediately;
    /// otherwise only the preference is recorded.
    pub fn set_transparent_type(&mut self, kind: TransparentType) {
        if self.modes.transparent {
            self.set_transparent(false);
            self.modes.transparent_type = kind;
            self.set_transparent(true);
        } else {
            self.modes.transparent_type = kind;
        }
    }

    /// Sets the color keyed out under [`TransparentType::ColorKey`].
    /// Cycles transparency only when the key is currently visible on
    /// screen (transparent, color-key technique).
    pub fn set_key_color(&mut self, color: u32) {
        if self.modes.transparent && self.modes.transparent_type == TransparentType::ColorKey {
            self.set_transparent(false);
            self.modes.key_color = color;
            self.set_transparent(true);
        } else {
            self.modes.key_color = color;
        }
    }

    fn enable_transparent_effect(system: &mut S, handle: RawHandle, modes: &VisualModeState) {
        match modes.transparent_type {
            TransparentType::Alpha => system.set_glass(handle, true),
            TransparentType::ColorKey => system.apply_color_key(handle, modes.key_color),
            TransparentType::None => {}
        }
    }

    fn disable_transparent_effect(
        system: &mut S,
        handle: RawHandle,
        saved: &S::Saved,
        applied: TransparentType,
    ) {
        match applied {
            TransparentType::Alpha => system.set_glass(handle, false),
            TransparentType::ColorKey => system.clear_color_key(handle, saved),
            TransparentType::None => {}
        }
    }

    // ── window chrome and stacking ───────────────────────────────

    /// Removes or restores the window chrome while keeping the client
    /// area visually in place.
    ///
    /// Maximized windows are briefly restored so the style change takes,
    /// then re-maximized. Minimized windows keep the new style for their
    /// next restore. When the computed bounds equal the current ones only
    /// a redraw is forced.
    pub fn set_borderless(&mut self, on: bool) {
        if let Some(att) = &self.attached {
            match self.system.frame(att.handle) {
                Ok(current) => {
                    let state = self.system.show_state(att.handle);
                    if state == ShowState::Maximized {
                        self.system.set_show_state(att.handle, ShowCommand::Normal);
                    }

                    if on {
                        self.system.apply_borderless_style(att.handle);
                    } else {
                        self.system.restore_style(att.handle, &att.baseline.saved);
                    }

                    let target = if on {
                        frame::borderless_bounds(&current)
                    } else {
                        frame::restored_bounds(&current, &att.baseline.frame)
                    };

                    if state == ShowState::Maximized {
                        self.system.set_show_state(att.handle, ShowCommand::Maximize);
                    } else if state == ShowState::Minimized {
                        // Applied when the window is next shown.
                    } else if target.width == current.bounds.width
                        && target.height == current.bounds.height
                    {
                        self.system.force_redraw(att.handle);
                    } else {
                        if let Err(e) = self.system.set_bounds(att.handle, target) {
                            log_warn!("borderless resize failed: {e}");
                        }
                        self.system.set_show_state(att.handle, ShowCommand::Show);
                    }
                }
                Err(e) => log_warn!("borderless skipped, frame query failed: {e}"),
            }
        }
        self.modes.borderless = on;
    }

    /// Moves the window into or out of the topmost band. Never moves,
    /// resizes, or activates it.
    pub fn set_topmost(&mut self, on: bool) {
        if let Some(att) = &self.attached {
            self.system.set_topmost(att.handle, on);
        }
        self.modes.topmost = on;
    }

    /// Maximizes or restores the window. Show state is live OS state,
    /// not a persisted mode.
    pub fn set_maximized(&mut self, on: bool) {
        if let Some(att) = &self.attached {
            let command = if on {
                ShowCommand::Maximize
            } else {
                ShowCommand::Normal
            };
            self.system.set_show_state(att.handle, command);
        }
    }

    /// Makes mouse input pass through the window. Disabling keeps the
    /// layered style bit when transparency still needs it or the window
    /// was layered before attach.
    pub fn set_click_through(&mut self, on: bool) {
        if let Some(att) = &self.attached {
            let keep_layered = self.modes.transparent || att.baseline.was_layered;
            self.system.set_click_through(att.handle, on, keep_layered);
        }
        self.modes.click_through = on;
    }

    /// Tells the OS whether the attached window accepts dropped files
    /// and makes sure the shim is there to observe the drops. Unlike the
    /// other mode setters this requires an attached window.
    pub fn set_allow_drop(&mut self, on: bool) -> ControlResult<()> {
        let Some(att) = &self.attached else {
            return Err(ControlError::NoTargetWindow);
        };
        self.modes.accept_drops = on;
        self.system.set_drop_accept(att.handle, on);
        if on {
            self.system.install_shim(att.handle);
        }
        Ok(())
    }

    fn apply_configured_modes(&mut self) {
        self.set_transparent(self.modes.transparent);
        self.set_borderless(self.modes.borderless);
        self.set_topmost(self.modes.topmost);
        self.set_click_through(self.modes.click_through);
        // Cannot fail here: a window is attached by the time this runs.
        let _ = self.set_allow_drop(self.modes.accept_drops);
    }

    // ── position and size ────────────────────────────────────────

    /// Moves the window so its bottom-left corner lands at the given
    /// public coordinates.
    pub fn set_position(&mut self, x: f32, y: f32) -> ControlResult<()> {
        let Some(att) = &self.attached else {
            return Err(ControlError::NoTargetWindow);
        };
        let current = self.system.frame(att.handle)?;
        let top = self.layout.geometry().flip_y(y as i32) - current.bounds.height;
        self.system.move_window(att.handle, x as i32, top)
    }

    /// The window's bottom-left corner in public coordinates.
    pub fn position(&self) -> ControlResult<(f32, f32)> {
        let Some(att) = &self.attached else {
            return Err(ControlError::NoTargetWindow);
        };
        let current = self.system.frame(att.handle)?;
        let y = self.layout.geometry().flip_y(current.bounds.bottom());
        Ok((current.bounds.x as f32, y as f32))
    }

    /// Resizes the window, keeping its bottom edge anchored (the public
    /// origin is at the bottom, so growing must move the native top).
    pub fn set_size(&mut self, width: f32, height: f32) -> ControlResult<()> {
        let Some(att) = &self.attached else {
            return Err(ControlError::NoTargetWindow);
        };
        let current = self.system.frame(att.handle)?;
        let height = height as i32;
        let top = current.bounds.bottom() - height;
        self.system.set_bounds(
            att.handle,
            Rect::new(current.bounds.x, top, width as i32, height),
        )
    }

    /// The window's outer size in pixels.
    pub fn size(&self) -> ControlResult<(f32, f32)> {
        let Some(att) = &self.attached else {
            return Err(ControlError::NoTargetWindow);
        };
        let current = self.system.frame(att.handle)?;
        Ok((current.bounds.width as f32, current.bounds.height as f32))
    }

    // ── cursor ───────────────────────────────────────────────────

    /// Cursor position in public coordinates. Works without an attached
    /// window.
    pub fn cursor_position(&self) -> ControlResult<(f32, f32)> {
        let (x, y) = self.system.cursor_position()?;
        let y = self.layout.geometry().flip_pixel_y(y);
        Ok((x as f32, y as f32))
    }

    pub fn set_cursor_position(&mut self, x: f32, y: f32) -> ControlResult<()> {
        let y = self.layout.geometry().flip_pixel_y(y as i32);
        self.system.set_cursor_position(x as i32, y)
    }

    // ── monitors ─────────────────────────────────────────────────

    /// Re-reads the display configuration from the OS. On failure the
    /// previous registry stays in place.
    pub fn refresh_screen(&mut self) -> ControlResult<()> {
        let snapshot = self.system.screen_snapshot()?;
        self.layout.apply(snapshot);
        Ok(())
    }

    pub fn monitor_count(&self) -> usize {
        self.layout.count()
    }

    /// Public-coordinate rectangle of the monitor at a logical index.
    pub fn monitor_rect(&self, index: i32) -> ControlResult<Rect> {
        self.layout.public_rect(index)
    }

    /// Logical index of the monitor under the attached window's center,
    /// falling back to the primary monitor, then 0.
    pub fn current_monitor(&self) -> i32 {
        let index = match &self.attached {
            Some(att) => match self.system.frame(att.handle) {
                Ok(current) => self.layout.index_containing(current.bounds.center()),
                Err(_) => self.layout.primary_index(),
            },
            None => self.layout.primary_index(),
        };
        index as i32
    }

    // ── events ───────────────────────────────────────────────────

    /// Applies a display-configuration change and reports the new
    /// monitor count (forwarded to the host's callback).
    pub fn handle_display_change(&mut self) -> usize {
        if let Err(e) = self.refresh_screen() {
            log_warn!("screen refresh after display change failed: {e}");
        } else {
            log_debug!("display changed, {} monitor(s)", self.layout.count());
        }
        self.layout.count()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
