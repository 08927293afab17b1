//! Device Subsystem
//!
//! Hardware device drivers and abstractions:
//! - `drivers`: PS/2 controller, pointer and keyboard decoding
//! - `framebuffer`: drawing onto a borrowed linear framebuffer
//! - `input`: UI events, the event queue and the input decoder
//! - `mouse_cursor`: pointer glyph with background save/restore

pub mod drivers;
pub mod framebuffer;
pub mod input;
pub mod mouse_cursor;
