//! # Mouse Cursor
//!
//! Pointer overlay drawn on top of the composed desktop.
//!
//! ## Features
//! - Fixed 16x16 arrow described by a bitmap and a mask
//! - Saves the pixels under the glyph before drawing, so a pointer-only
//!   move can restore them instead of recompositing the whole screen

use crate::devices::framebuffer::{Canvas, Color};

pub const CURSOR_SIZE: usize = 16;

// Bit 15 is the leftmost column. A pixel is drawn where MASK is set; it is
// outline-colored where BITMAP is also set and fill-colored otherwise.
#[rustfmt::skip]
const CURSOR_MASK: [u16; CURSOR_SIZE] = [
    0x8000, 0xC000, 0xE000, 0xF000, 0xF800, 0xFC00, 0xFE00, 0xFF00,
    0xFF80, 0xFFC0, 0xFFE0, 0xFE00, 0xEF00, 0xCF00, 0x8780, 0x0300,
];

#[rustfmt::skip]
const CURSOR_BITMAP: [u16; CURSOR_SIZE] = [
    0x8000, 0xC000, 0xA000, 0x9000, 0x8800, 0x8400, 0x8200, 0x8100,
    0x8080, 0x8040, 0x83E0, 0x9200, 0xA900, 0xC900, 0x8480, 0x0300,
];

const OUTLINE: Color = Color::BLACK;
const FILL: Color = Color::WHITE;

#[inline]
fn column_bit(col: usize) -> u16 {
    0x8000 >> col
}

pub struct MouseCursor {
    saved: [[Color; CURSOR_SIZE]; CURSOR_SIZE],
    /// Where the glyph currently sits, if it is on screen.
    shown_at: Option<(i32, i32)>,
}

impl MouseCursor {
    pub const fn new() -> Self {
        Self {
            saved: [[Color::BLACK; CURSOR_SIZE]; CURSOR_SIZE],
            shown_at: None,
        }
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.shown_at
    }

    /// Save what lies under `(x, y)` and draw the glyph there.
    ///
    /// Any glyph still on screen is left as is; call [`hide`](Self::hide)
    /// first unless the screen was just repainted.
    pub fn show<C: Canvas>(&mut self, canvas: &mut C, x: i32, y: i32) {
        for (row, saved_row) in self.saved.iter_mut().enumerate() {
            for (col, slot) in saved_row.iter_mut().enumerate() {
                *slot = canvas
                    .get_pixel(x + col as i32, y + row as i32)
                    .unwrap_or(Color::BLACK);
            }
        }

        for row in 0..CURSOR_SIZE {
            let mask = CURSOR_MASK[row];
            let bits = CURSOR_BITMAP[row];
            for col in 0..CURSOR_SIZE {
                let bit = column_bit(col);
                if mask & bit == 0 {
                    continue;
                }
                let color = if bits & bit != 0 { OUTLINE } else { FILL };
                canvas.set_pixel(x + col as i32, y + row as i32, color);
            }
        }

        self.shown_at = Some((x, y));
    }

    /// Put back the pixels saved by the last [`show`](Self::show).
    pub fn hide<C: Canvas>(&mut self, canvas: &mut C) {
        let Some((x, y)) = self.shown_at.take() else {
            return;
        };
        for (row, saved_row) in self.saved.iter().enumerate() {
            for (col, &color) in saved_row.iter().enumerate() {
                canvas.set_pixel(x + col as i32, y + row as i32, color);
            }
        }
    }

    pub fn move_to<C: Canvas>(&mut self, canvas: &mut C, x: i32, y: i32) {
        self.hide(canvas);
        self.show(canvas, x, y);
    }

    /// Drop the saved background without restoring it. Used after the whole
    /// screen was repainted underneath the glyph.
    pub fn forget(&mut self) {
        self.shown_at = None;
    }
}

impl Default for MouseCursor {
    fn default() -> Self {
        Self::new()
    }
}
