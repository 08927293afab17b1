//! Device Drivers
//!
//! Polled PS/2 input:
//! - `ps2`: 8042 controller bring-up and the [`RawInput`] byte source
//! - `ps2_mouse`: pointer packet assembly (3-byte and wheel packets)
//! - `ps2_keyboard`: scan-code set 1 decoding and the US keymap

pub mod ps2;
pub mod ps2_keyboard;
pub mod ps2_mouse;

pub use ps2::{Ps2Controller, RawInput};
pub use ps2_keyboard::{scancode_to_char, KeyStroke, Modifiers, ScancodeDecoder};
pub use ps2_mouse::{MousePacket, PacketAssembler, PacketFormat};
