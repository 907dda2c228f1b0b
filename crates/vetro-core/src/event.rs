use std::path::PathBuf;

/// A decoded notification from the platform message shim.
///
/// The shim translates raw OS messages into these before anything else
/// sees them; the rest of the system never touches message dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The display configuration changed (monitor added, removed, or
    /// reconfigured). The monitor registry must be refreshed.
    DisplayChanged,
    /// Files were dropped onto the attached window.
    FilesDropped(Vec<PathBuf>),
}

/// Encodes dropped paths into the boundary's wire format: each path in
/// UTF-16 followed by a newline, the whole buffer NUL-terminated.
pub fn encode_drop_paths(paths: &[PathBuf]) -> Vec<u16> {
    let mut buffer = Vec::new();
    for path in paths {
        buffer.extend(path.to_string_lossy().encode_utf16());
        buffer.push(u16::from(b'\n'));
    }
    buffer.push(0);
    buffer
}
