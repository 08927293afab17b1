//! # Framebuffer Graphics Module
//!
//! Drawing capability consumed by the compositor and the cursor overlay.
//!
//! ## Modules
//!
//! - `framebuffer`: `FramebufferWriter`, a pitch-aware view over a borrowed
//!   linear framebuffer that is also an embedded-graphics `DrawTarget`
//! - `color`: `Color` type with the desktop palette constants
//!
//! ## Canvas
//!
//! [`Canvas`] is the seam between the window manager and pixels. All
//! coordinates are signed screen pixels; anything outside the surface is
//! clipped silently, so callers never have to pre-clip.

pub mod color;
pub mod framebuffer;

pub use color::Color;
pub use framebuffer::{FramebufferInfo, FramebufferWriter, PixelFormat};

/// Width and height of one glyph cell of the built-in 5x7 font, including
/// the one pixel of spacing to the right.
pub const GLYPH_ADVANCE: i32 = 6;
pub const GLYPH_HEIGHT: i32 = 7;

pub trait Canvas {
    /// Surface size in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Read back a pixel. Only the cursor save/restore path uses this.
    fn get_pixel(&self, x: i32, y: i32) -> Option<Color>;

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    /// One-pixel outline drawn inside the given rectangle.
    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);

    /// Blit one glyph with its top-left corner at `(x, y)`. A `None`
    /// background leaves unset glyph pixels untouched.
    fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Option<Color>);

    fn draw_string(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Option<Color>) {
        let mut cx = x;
        for ch in text.chars() {
            self.draw_char(cx, y, ch, fg, bg);
            cx += GLYPH_ADVANCE;
        }
    }

    fn clear_screen(&mut self, color: Color) {
        let (w, h) = self.dimensions();
        self.fill_rect(0, 0, w, h, color);
    }
}

/// Pixel width of `text` when drawn with [`Canvas::draw_string`].
pub fn text_width(text: &str) -> u32 {
    (text.chars().count() as u32) * GLYPH_ADVANCE as u32
}
