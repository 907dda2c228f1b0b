pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod log;
pub mod modes;
pub mod monitor;
pub mod platform;
pub mod rect;

pub use controller::WindowController;
pub use error::{ControlError, ControlResult};
pub use event::PlatformEvent;
pub use modes::TransparentType;
pub use platform::{RawHandle, WindowSystem};
pub use rect::Rect;
