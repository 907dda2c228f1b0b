//! Process-global plugin state.
//!
//! The host calls the exports from its UI thread; a mutex guards the
//! controller anyway so a contract violation corrupts nothing. Host
//! callbacks are fired only after that lock is released, so a callback
//! may call back into the plugin without deadlocking.

use std::sync::{LazyLock, Mutex, MutexGuard, TryLockError};

use vetro_core::controller::WindowController;
use vetro_core::event::{PlatformEvent, encode_drop_paths};
use vetro_core::{config, log, log_info, log_warn};
use vetro_windows::{Win32WindowSystem, set_event_sink};

/// Host callback receiving dropped paths as a newline-delimited,
/// NUL-terminated UTF-16 buffer. The buffer is only valid during the
/// call.
pub type DropFilesCallback = extern "system" fn(*const u16);

/// Host callback receiving the monitor count after a display change.
pub type MonitorChangedCallback = extern "system" fn(i32);

pub struct Plugin {
    pub controller: WindowController<Win32WindowSystem>,
}

/// Single-slot host callback registrations. Kept in their own lock so
/// events can read them without the plugin lock.
struct Callbacks {
    drop_files: Option<DropFilesCallback>,
    monitor_changed: Option<MonitorChangedCallback>,
}

static PLUGIN: LazyLock<Mutex<Plugin>> = LazyLock::new(|| {
    let config = config::load();
    log::init(&config.log);
    log_info!("vetro initializing");

    set_event_sink(dispatch_event);

    let mut controller = WindowController::new(Win32WindowSystem::new());
    // Monitor and cursor queries work before the first attach.
    if let Err(e) = controller.refresh_screen() {
        log_warn!("initial screen refresh failed: {e}");
    }

    Mutex::new(Plugin { controller })
});

static CALLBACKS: Mutex<Callbacks> = Mutex::new(Callbacks {
    drop_files: None,
    monitor_changed: None,
});

/// Locks the plugin state. A poisoned lock is taken over rather than
/// propagated; a panic in an earlier call must not wedge the host.
pub fn plugin() -> MutexGuard<'static, Plugin> {
    PLUGIN.lock().unwrap_or_else(|e| e.into_inner())
}

fn callbacks() -> MutexGuard<'static, Callbacks> {
    CALLBACKS.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn set_drop_files_callback(callback: DropFilesCallback) {
    callbacks().drop_files = Some(callback);
}

pub fn clear_drop_files_callback() {
    callbacks().drop_files = None;
}

pub fn set_monitor_changed_callback(callback: MonitorChangedCallback) {
    callbacks().monitor_changed = Some(callback);
}

pub fn clear_monitor_changed_callback() {
    callbacks().monitor_changed = None;
}

/// Consumes decoded events coming out of the message shim.
///
/// Runs inside the OS's message dispatch on the host UI thread. The
/// plugin lock is only tried, never awaited: if a display change lands
/// while one of our own OS calls is pumping messages, skipping the
/// refresh beats deadlocking the thread.
fn dispatch_event(event: PlatformEvent) {
    match event {
        PlatformEvent::FilesDropped(paths) => {
            let callback = callbacks().drop_files;
            if let Some(callback) = callback {
                let buffer = encode_drop_paths(&paths);
                callback(buffer.as_ptr());
            }
        }
        PlatformEvent::DisplayChanged => {
            let count = match PLUGIN.try_lock() {
                Ok(mut plugin) => plugin.controller.handle_display_change(),
                Err(TryLockError::Poisoned(e)) => {
                    e.into_inner().controller.handle_display_change()
                }
                Err(TryLockError::WouldBlock) => {
                    log_warn!("display change skipped: plugin state busy");
                    return;
                }
            };
            let callback = callbacks().monitor_changed;
            if let Some(callback) = callback {
                callback(count as i32);
            }
        }
    }
}

