#![cfg(windows)]

/// Cursor queries in native screen coordinates.
pub mod cursor;

/// Dropped-file decoding via the shell API.
pub mod drop;

/// Monitor enumeration and virtual-screen metrics.
pub mod monitor;

/// Discovery of windows belonging to the current process.
pub mod process;

/// The message-interception shim (window subclassing).
pub mod subclass;

/// The `WindowSystem` implementation tying the modules together.
pub mod system;

/// Transparency techniques: DWM glass and layered color key.
pub mod transparency;

/// Style, placement, and geometry operations on a single window.
pub mod window;

pub use subclass::set_event_sink;
pub use system::Win32WindowSystem;
pub use window::SavedWindow;
