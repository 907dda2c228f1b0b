/// Result alias used throughout the window-control API.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors surfaced by window-control operations.
///
/// None of these abort: the boundary maps every error to a failure
/// return with zeroed outputs.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The operation needs an attached window and none is attached.
    #[error("no window is attached")]
    NoTargetWindow,

    /// A window search (own process, active window) found nothing.
    #[error("no matching window was found")]
    WindowNotFound,

    /// A monitor index outside the registry was requested.
    #[error("monitor index {index} out of range (count {count})")]
    MonitorIndexOutOfRange { index: i32, count: usize },

    /// An underlying OS call failed.
    #[error("{call} failed: {detail}")]
    Platform { call: &'static str, detail: String },
}

impl ControlError {
    /// Convenience constructor for OS call failures.
    pub fn platform(call: &'static str, detail: impl ToString) -> Self {
        Self::Platform {
            call,
            detail: detail.to_string(),
        }
    }
}
