/// Technique used to make the attached window transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransparentType {
    /// No effect is applied; toggling transparency changes nothing visually.
    None,
    /// Composition-based translucency across the whole client area.
    #[default]
    Alpha,
    /// One RGB value becomes fully transparent; the rest stays opaque.
    ColorKey,
}

impl TransparentType {
    /// Maps the boundary's integer encoding (0/1/2). Unknown values mean
    /// no effect.
    pub fn from_raw(value: i32) -> Self {
        match value {
            1 => Self::Alpha,
            2 => Self::ColorKey,
            _ => Self::None,
        }
    }
}

/// Mode flags owned by the process, not by any particular window.
///
/// These survive detach and are re-applied to whatever window is attached
/// next. Only the explicit setters mutate them.
#[derive(Debug, Clone, Copy)]
pub struct VisualModeState {
    pub transparent: bool,
    pub borderless: bool,
    pub topmost: bool,
    pub click_through: bool,
    pub accept_drops: bool,
    /// Preferred transparency technique for the next enable.
    pub transparent_type: TransparentType,
    /// Color made transparent under [`TransparentType::ColorKey`], as
    /// `0x00BBGGRR`.
    pub key_color: u32,
}

impl Default for VisualModeState {
    fn default() -> Self {
        Self {
            transparent: false,
            borderless: false,
            topmost: false,
            click_through: false,
            accept_drops: false,
            transparent_type: TransparentType::default(),
            key_color: 0x0000_0000,
        }
    }
}
