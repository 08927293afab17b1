use crate::devices::framebuffer::color::Color;

/// Desktop palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Gradient start at the top of the desktop.
    pub desktop: Color,
    pub taskbar: Color,
    pub taskbar_edge: Color,
    pub taskbar_text: Color,
    pub title_active: Color,
    pub title_inactive: Color,
    pub title_text: Color,
    pub window_bg: Color,
    pub window_border: Color,
    pub text: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_border: Color,
    pub close_hover: Color,
}

impl Theme {
    /// Blue desktop with light gray windows
    pub const CLASSIC: Theme = Theme {
        desktop: Color::DESKTOP,
        taskbar: Color::DARK_BLUE,
        taskbar_edge: Color::LIGHT_BLUE,
        taskbar_text: Color::WHITE,
        title_active: Color::TITLE_BAR,
        title_inactive: Color::GRAY,
        title_text: Color::WHITE,
        window_bg: Color::WINDOW_BG,
        window_border: Color::GRAY,
        text: Color::BLACK,
        button: Color::BUTTON,
        button_hover: Color::BUTTON_HOVER,
        button_border: Color::DARK_GRAY,
        close_hover: Color::CLOSE_RED,
    };

    /// Darker variant for dim panels
    pub const NIGHT: Theme = Theme {
        desktop: Color::from_hex(0x121212),
        taskbar: Color::from_hex(0x1E1E1E),
        taskbar_edge: Color::from_hex(0x2196F3),
        taskbar_text: Color::from_hex(0xB0B0B0),
        title_active: Color::from_hex(0x1976D2),
        title_inactive: Color::from_hex(0x424242),
        title_text: Color::WHITE,
        window_bg: Color::from_hex(0x2C2C2C),
        window_border: Color::from_hex(0x616161),
        text: Color::from_hex(0xE0E0E0),
        button: Color::from_hex(0x3A3A3A),
        button_hover: Color::from_hex(0x505050),
        button_border: Color::from_hex(0x757575),
        close_hover: Color::from_hex(0xF44336),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::CLASSIC
    }
}
