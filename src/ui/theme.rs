//! Theme configuration

use iced::Color;

/// Dark kitchen palette
pub struct DarkTheme;

impl DarkTheme {
    pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);
    pub const SURFACE: Color = Color::from_rgb(0.14, 0.14, 0.17);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);
    pub const PRIMARY: Color = Color::from_rgb(0.95, 0.6, 0.25);
    pub const TEXT: Color = Color::from_rgb(0.93, 0.93, 0.93);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.58, 0.58, 0.62);
    pub const SAVED: Color = Color::from_rgb(0.45, 0.8, 0.5);
    pub const ERROR: Color = Color::from_rgb(0.9, 0.35, 0.35);
}
