//! Raw bytes to UI events.
//!
//! The decoder owns the two device state machines (pointer packet assembly
//! and scan-code decoding) plus the absolute pointer position. Every
//! complete pointer packet queues one `PointerMove`, then one `PointerDown`
//! or `PointerUp` per button whose bit changed since the previous packet.
//! Each `PointerUp` is immediately followed by a `PointerClick`.

use super::events::{Event, MouseButton};
use super::queue::EventQueue;
use crate::devices::drivers::{
    KeyStroke, Modifiers, MousePacket, PacketAssembler, PacketFormat, ScancodeDecoder,
};

/// Session view of the pointing device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    /// Delta of the most recent packet.
    pub dx: i32,
    pub dy: i32,
    pub buttons: u8,
    pub wheel: i8,
}

impl PointerState {
    pub fn centered(width: u32, height: u32) -> Self {
        Self {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
            ..Self::default()
        }
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub last_scancode: u8,
    /// Key code of the last key-down or key-up.
    pub key: u8,
    pub pressed: bool,
    pub modifiers: Modifiers,
}

pub struct InputDecoder {
    packets: PacketAssembler,
    keys: ScancodeDecoder,
    x: i32,
    y: i32,
    max_x: i32,
    max_y: i32,
    last_buttons: u8,
}

impl InputDecoder {
    pub fn new(width: u32, height: u32, format: PacketFormat) -> Self {
        let start = PointerState::centered(width, height);
        Self {
            packets: PacketAssembler::new(format),
            keys: ScancodeDecoder::new(),
            x: start.x,
            y: start.y,
            max_x: width.saturating_sub(1) as i32,
            max_y: height.saturating_sub(1) as i32,
            last_buttons: 0,
        }
    }

    pub fn packet_format(&self) -> PacketFormat {
        self.packets.format()
    }

    pub fn set_packet_format(&mut self, format: PacketFormat) {
        self.packets.set_format(format);
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Feed one pointer byte. Returns the packet it completed, if any,
    /// after recording its delta in `pointer` and queueing its events.
    pub fn pointer_byte(
        &mut self,
        byte: u8,
        pointer: &mut PointerState,
        queue: &mut EventQueue,
    ) -> Option<MousePacket> {
        let packet = self.packets.push(byte)?;

        self.x = (self.x + packet.dx as i32).clamp(0, self.max_x);
        self.y = (self.y + packet.dy as i32).clamp(0, self.max_y);
        pointer.dx = packet.dx as i32;
        pointer.dy = packet.dy as i32;
        pointer.wheel = packet.wheel;

        let (x, y) = (self.x, self.y);
        queue.push(Event::PointerMove { x, y });

        for button in MouseButton::ALL {
            let was = self.last_buttons & button.mask() != 0;
            let is = packet.buttons & button.mask() != 0;
            match (was, is) {
                (false, true) => {
                    queue.push(Event::PointerDown { x, y, button });
                }
                (true, false) => {
                    queue.push(Event::PointerUp { x, y, button });
                    queue.push(Event::PointerClick { x, y, button });
                }
                _ => {}
            }
        }
        self.last_buttons = packet.buttons;

        Some(packet)
    }

    /// Feed one scan code. Modifier keys only update `keyboard`; other keys
    /// queue a `KeyDown` or `KeyUp` and are returned.
    pub fn scancode(
        &mut self,
        scancode: u8,
        keyboard: &mut KeyboardState,
        queue: &mut EventQueue,
    ) -> Option<KeyStroke> {
        keyboard.last_scancode = scancode;
        let stroke = self.keys.process_scancode(scancode);
        keyboard.modifiers = self.keys.modifiers();

        let stroke = stroke?;
        let event = if stroke.pressed {
            Event::KeyDown { code: stroke.code, modifiers: keyboard.modifiers }
        } else {
            Event::KeyUp { code: stroke.code }
        };
        queue.push(event);
        Some(stroke)
    }
}
