//! # Input Event Types
//!
//! Discrete UI events produced by the input decoder and consumed by the
//! dispatcher.
//!
//! ## Event Types
//!
//! - `PointerMove`: absolute position after a pointer packet
//! - `PointerDown` / `PointerUp`: button edges
//! - `PointerClick`: queued right after every `PointerUp`
//! - `KeyDown` / `KeyUp`: key codes from the scan-code decoder; a key-down
//!   carries the modifiers held when its scan code was read
//! - `Redraw`: request a full recomposite

use crate::devices::drivers::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Index in the packet button field (0 = left).
    pub const fn index(self) -> u8 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }

    pub const fn mask(self) -> u8 {
        1 << self.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PointerMove { x: i32, y: i32 },
    PointerDown { x: i32, y: i32, button: MouseButton },
    PointerUp { x: i32, y: i32, button: MouseButton },
    PointerClick { x: i32, y: i32, button: MouseButton },
    KeyDown { code: u8, modifiers: Modifiers },
    KeyUp { code: u8 },
    Redraw,
}

impl Event {
    /// Screen position for pointer events.
    pub fn position(&self) -> Option<(i32, i32)> {
        match *self {
            Event::PointerMove { x, y }
            | Event::PointerDown { x, y, .. }
            | Event::PointerUp { x, y, .. }
            | Event::PointerClick { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_masks_follow_packet_bits() {
        assert_eq!(MouseButton::Left.mask(), 0x01);
        assert_eq!(MouseButton::Right.mask(), 0x02);
        assert_eq!(MouseButton::Middle.mask(), 0x04);
    }

    #[test]
    fn only_pointer_events_have_positions() {
        let down = Event::PointerDown { x: 3, y: 4, button: MouseButton::Left };
        assert_eq!(down.position(), Some((3, 4)));
        assert_eq!(Event::KeyDown { code: 1, modifiers: Modifiers::default() }.position(), None);
        assert_eq!(Event::Redraw.position(), None);
    }
}
