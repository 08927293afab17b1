//! # PS/2 Keyboard Decoding
//!
//! Turns polled scan-code set 1 bytes into key strokes.
//!
//! ## Scancode Processing
//!
//! - `0xE0` prefixes an extended key; the next byte is folded into a key
//!   code with bit 7 set (so arrow up, `E0 48`, becomes `0xC8`)
//! - Bit 7 of a plain byte marks a release
//! - Shift, Ctrl and Alt update [`Modifiers`] and produce no stroke
//!
//! Character translation is separate ([`scancode_to_char`]) so consumers
//! decide when to apply it.

/// Key codes the desktop reacts to.
pub const KEY_ESCAPE: u8 = 0x01;
pub const KEY_BACKSPACE: u8 = 0x0E;
pub const KEY_ENTER: u8 = 0x1C;

pub const KEY_UP: u8 = EXTENDED | 0x48;

const EXTENDED_PREFIX: u8 = 0xE0;
const RELEASE: u8 = 0x80;
const EXTENDED: u8 = 0x80;

const LEFT_SHIFT: u8 = 0x2A;
const RIGHT_SHIFT: u8 = 0x36;
const CTRL: u8 = 0x1D;
const ALT: u8 = 0x38;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub code: u8,
    pub pressed: bool,
}

pub struct ScancodeDecoder {
    is_extended: bool,
    modifiers: Modifiers,
}

impl ScancodeDecoder {
    pub const fn new() -> Self {
        Self {
            is_extended: false,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
            },
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn process_scancode(&mut self, scancode: u8) -> Option<KeyStroke> {
        if scancode == EXTENDED_PREFIX {
            self.is_extended = true;
            return None;
        }

        let pressed = scancode & RELEASE == 0;
        let key_code = scancode & !RELEASE;

        if core::mem::take(&mut self.is_extended) {
            // Right Ctrl/Alt share the plain codes behind the prefix.
            return match key_code {
                CTRL => {
                    self.modifiers.ctrl = pressed;
                    None
                }
                ALT => {
                    self.modifiers.alt = pressed;
                    None
                }
                // Fake shifts some keyboards wrap around extended keys.
                LEFT_SHIFT | RIGHT_SHIFT => None,
                _ => Some(KeyStroke {
                    code: EXTENDED | key_code,
                    pressed,
                }),
            };
        }

        match key_code {
            LEFT_SHIFT | RIGHT_SHIFT => {
                self.modifiers.shift = pressed;
                None
            }
            CTRL => {
                self.modifiers.ctrl = pressed;
                None
            }
            ALT => {
                self.modifiers.alt = pressed;
                None
            }
            _ => Some(KeyStroke {
                code: key_code,
                pressed,
            }),
        }
    }
}

impl Default for ScancodeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

// US layout, set 1 make codes 0x00..=0x39. Zero means no character.
const KEYMAP_LOWER: &[u8] =
    b"\0\x001234567890-=\x08\tqwertyuiop[]\n\0asdfghjkl;'`\0\\zxcvbnm,./\0*\0 ";
const KEYMAP_UPPER: &[u8] =
    b"\0\0!@#$%^&*()_+\x08\tQWERTYUIOP{}\n\0ASDFGHJKL:\"~\0|ZXCVBNM<>?\0*\0 ";

/// Character produced by a key code, if any.
pub fn scancode_to_char(code: u8, shift: bool) -> Option<char> {
    let table = if shift { KEYMAP_UPPER } else { KEYMAP_LOWER };
    match table.get(code as usize) {
        Some(&b) if b != 0 => Some(b as char),
        _ => None,
    }
}
