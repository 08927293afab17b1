//! PS/2 pointer packet assembly
//!
//! Standard PS/2 mice send 3-byte packets:
//! - Byte 0: status (buttons in bits 0-2, bit 3 always set, sign/overflow)
//! - Byte 1: X movement
//! - Byte 2: Y movement (positive = up)
//!
//! Wheel mice (device id 3) append a fourth byte whose low nibble is the
//! signed wheel delta.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketFormat {
    Standard,
    Wheel,
}

impl PacketFormat {
    pub const fn packet_len(self) -> usize {
        match self {
            PacketFormat::Standard => 3,
            PacketFormat::Wheel => 4,
        }
    }
}

const FRAMING_BIT: u8 = 0x08;

/// One decoded movement report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MousePacket {
    pub dx: i16,
    /// Screen-space delta, positive = down.
    pub dy: i16,
    /// Bit 0 = left, bit 1 = right, bit 2 = middle.
    pub buttons: u8,
    pub wheel: i8,
}

impl MousePacket {
    #[inline]
    pub fn left_button(&self) -> bool {
        (self.buttons & 0x01) != 0
    }

    #[inline]
    pub fn right_button(&self) -> bool {
        (self.buttons & 0x02) != 0
    }

    #[inline]
    pub fn middle_button(&self) -> bool {
        (self.buttons & 0x04) != 0
    }
}

pub struct PacketAssembler {
    buffer: [u8; 4],
    index: usize,
    format: PacketFormat,
}

impl PacketAssembler {
    pub const fn new(format: PacketFormat) -> Self {
        Self {
            buffer: [0; 4],
            index: 0,
            format,
        }
    }

    pub fn format(&self) -> PacketFormat {
        self.format
    }

    /// Switch packet length; any partial packet is dropped.
    pub fn set_format(&mut self, format: PacketFormat) {
        self.format = format;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Feed one byte; returns a packet once the last byte arrives.
    pub fn push(&mut self, byte: u8) -> Option<MousePacket> {
        // Byte 0 always carries the framing bit. Anything else at index 0
        // is the tail of a packet we joined mid-stream.
        if self.index == 0 && (byte & FRAMING_BIT) == 0 {
            return None;
        }

        self.buffer[self.index] = byte;
        self.index += 1;

        if self.index >= self.format.packet_len() {
            self.index = 0;
            Some(self.decode())
        } else {
            None
        }
    }

    fn decode(&self) -> MousePacket {
        let wheel = match self.format {
            PacketFormat::Standard => 0,
            // Sign-extend the low nibble.
            PacketFormat::Wheel => ((self.buffer[3] << 4) as i8) >> 4,
        };
        MousePacket {
            dx: self.buffer[1] as i8 as i16,
            dy: -(self.buffer[2] as i8 as i16),
            buttons: self.buffer[0] & 0x07,
            wheel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(asm: &mut PacketAssembler, bytes: &[u8]) -> Option<MousePacket> {
        let mut out = None;
        for &b in bytes {
            out = asm.push(b);
        }
        out
    }

    #[test]
    fn decodes_signed_deltas_with_inverted_y() {
        let mut asm = PacketAssembler::new(PacketFormat::Standard);
        let p = feed(&mut asm, &[0x08 | 0x01, 0x05, 0xFB]).unwrap();
        assert_eq!(p.dx, 5);
        assert_eq!(p.dy, 5);
        assert_eq!(p.buttons, 1);
        assert!(p.left_button());

        let p = feed(&mut asm, &[0x0E, 0x80, 0x7F]).unwrap();
        assert_eq!(p.dx, -128);
        assert_eq!(p.dy, -127);
        assert_eq!(p.buttons, 0x06);
        assert!(p.right_button() && p.middle_button());
    }

    #[test]
    fn byte_without_framing_bit_at_start_is_discarded() {
        let mut asm = PacketAssembler::new(PacketFormat::Standard);
        assert_eq!(asm.push(0x03), None);
        assert_eq!(asm.push(0x00), None);
        // Resynchronized: the next framed byte starts a packet.
        assert_eq!(feed(&mut asm, &[0x08, 0x01, 0x01]).map(|p| p.dx), Some(1));
    }

    #[test]
    fn framing_is_only_checked_on_the_first_byte() {
        let mut asm = PacketAssembler::new(PacketFormat::Standard);
        let p = feed(&mut asm, &[0x08, 0x00, 0x02]).unwrap();
        assert_eq!((p.dx, p.dy), (0, -2));
    }

    #[test]
    fn wheel_packets_carry_a_fourth_byte() {
        let mut asm = PacketAssembler::new(PacketFormat::Wheel);
        assert_eq!(feed(&mut asm, &[0x08, 0x00, 0x00]), None);
        let p = asm.push(0x0F).unwrap();
        assert_eq!(p.wheel, -1);
        let p = feed(&mut asm, &[0x08, 0x00, 0x00, 0x01]).unwrap();
        assert_eq!(p.wheel, 1);
    }

    #[test]
    fn switching_format_drops_partial_packet() {
        let mut asm = PacketAssembler::new(PacketFormat::Standard);
        asm.push(0x08);
        asm.set_format(PacketFormat::Wheel);
        assert_eq!(asm.format(), PacketFormat::Wheel);
        assert_eq!(feed(&mut asm, &[0x09, 0x02, 0x00]), None);
        assert_eq!(asm.push(0x00).map(|p| p.dx), Some(2));
    }
}
