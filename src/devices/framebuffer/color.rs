//! Color representation
use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const GRAY: Color = Color::from_hex(0x808080);
    pub const DARK_GRAY: Color = Color::from_hex(0x404040);
    pub const LIGHT_GRAY: Color = Color::from_hex(0xC0C0C0);
    pub const LIGHT_BLUE: Color = Color::from_hex(0x5A9FD4);
    pub const DARK_BLUE: Color = Color::from_hex(0x1A4D6D);
    pub const TITLE_BAR: Color = Color::from_hex(0x2A5F7F);
    pub const DESKTOP: Color = Color::from_hex(0x0D3D52);
    pub const WINDOW_BG: Color = Color::from_hex(0xE0E0E0);
    pub const BUTTON: Color = Color::from_hex(0xD0D0D0);
    pub const BUTTON_HOVER: Color = Color::from_hex(0xE8E8E8);
    pub const CLOSE_RED: Color = Color::from_hex(0xC84040);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from `0x__RRGGBB`; the top byte (alpha in ARGB words) is ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Opaque `0xFFRRGGBB` word.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl From<Rgb888> for Color {
    fn from(c: Rgb888) -> Self {
        Color::new(c.r(), c.g(), c.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_argb() {
        let c = Color::from_hex(0xFF2A5F7F);
        assert_eq!(c, Color::TITLE_BAR);
        assert_eq!(c.to_argb(), 0xFF2A5F7F);
    }

    #[test]
    fn converts_to_and_from_rgb888() {
        let c = Color::new(1, 2, 3);
        assert_eq!(Color::from(c.to_rgb888()), c);
    }
}
