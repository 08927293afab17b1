//! # PS/2 Controller
//!
//! Polled access to the 8042 controller at ports 0x60 (data) and 0x64
//! (status/command). Both devices share one output buffer; status bit 5
//! tells whether the waiting byte came from the auxiliary (pointer) port.
//!
//! The desktop never takes IRQ1/IRQ12: [`Ps2Controller::init`] clears the
//! interrupt-enable bits in the configuration byte and the session loop
//! pulls bytes through [`RawInput`].

use super::ps2_mouse::PacketFormat;
use x86_64::instructions::port::{Port, PortReadOnly, PortWriteOnly};

const DATA_PORT: u16 = 0x60;
const STATUS_PORT: u16 = 0x64;
const COMMAND_PORT: u16 = 0x64;

const STATUS_OUTPUT_FULL: u8 = 0x01;
const STATUS_INPUT_FULL: u8 = 0x02;
const STATUS_AUX_DATA: u8 = 0x20;

const CMD_READ_CONFIG: u8 = 0x20;
const CMD_WRITE_CONFIG: u8 = 0x60;
const CMD_ENABLE_AUX: u8 = 0xA8;
const CMD_WRITE_AUX: u8 = 0xD4;

const CONFIG_KEYBOARD_IRQ: u8 = 0x01;
const CONFIG_AUX_IRQ: u8 = 0x02;
const CONFIG_AUX_CLOCK_DISABLED: u8 = 0x20;

const MOUSE_SET_DEFAULTS: u8 = 0xF6;
const MOUSE_ENABLE_REPORTING: u8 = 0xF4;
const MOUSE_SET_SAMPLE_RATE: u8 = 0xF3;
const MOUSE_GET_ID: u8 = 0xF2;
const MOUSE_ACK: u8 = 0xFA;
const WHEEL_DEVICE_ID: u8 = 3;

/// Sample-rate sequence that switches a wheel mouse into 4-byte mode.
const WHEEL_KNOCK: [u8; 3] = [200, 100, 80];

const TIMEOUT_SPINS: u32 = 100_000;
const MAX_FLUSH: usize = 32;

/// Non-blocking byte sources for the two input devices.
pub trait RawInput {
    /// Next byte from the pointing device, if one is waiting.
    fn read_pointer_byte(&mut self) -> Option<u8>;

    /// Next key scan code, if one is waiting.
    fn read_scancode(&mut self) -> Option<u8>;
}

pub struct Ps2Controller {
    data: Port<u8>,
    status: PortReadOnly<u8>,
    command: PortWriteOnly<u8>,
}

impl Ps2Controller {
    pub const fn new() -> Self {
        Self {
            data: Port::new(DATA_PORT),
            status: PortReadOnly::new(STATUS_PORT),
            command: PortWriteOnly::new(COMMAND_PORT),
        }
    }

    fn read_status(&mut self) -> u8 {
        unsafe { self.status.read() }
    }

    fn wait_for_write(&mut self) -> Result<(), &'static str> {
        for _ in 0..TIMEOUT_SPINS {
            if self.read_status() & STATUS_INPUT_FULL == 0 {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err("PS/2 controller write timeout")
    }

    fn wait_for_read(&mut self) -> Result<(), &'static str> {
        for _ in 0..TIMEOUT_SPINS {
            if self.read_status() & STATUS_OUTPUT_FULL != 0 {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err("PS/2 controller read timeout")
    }

    fn send_command(&mut self, cmd: u8) -> Result<(), &'static str> {
        self.wait_for_write()?;
        unsafe { self.command.write(cmd) };
        Ok(())
    }

    fn send_data(&mut self, byte: u8) -> Result<(), &'static str> {
        self.wait_for_write()?;
        unsafe { self.data.write(byte) };
        Ok(())
    }

    fn read_data(&mut self) -> Result<u8, &'static str> {
        self.wait_for_read()?;
        Ok(unsafe { self.data.read() })
    }

    fn flush_output(&mut self) {
        for _ in 0..MAX_FLUSH {
            if self.read_status() & STATUS_OUTPUT_FULL == 0 {
                break;
            }
            let _ = unsafe { self.data.read() };
        }
    }

    /// Send one byte to the pointing device and wait for its ACK.
    fn send_mouse(&mut self, byte: u8) -> Result<(), &'static str> {
        self.send_command(CMD_WRITE_AUX)?;
        self.send_data(byte)?;
        if self.read_data()? != MOUSE_ACK {
            return Err("mouse did not ACK command");
        }
        Ok(())
    }

    fn enable_wheel(&mut self) -> Result<bool, &'static str> {
        for rate in WHEEL_KNOCK {
            self.send_mouse(MOUSE_SET_SAMPLE_RATE)?;
            self.send_mouse(rate)?;
        }
        self.send_mouse(MOUSE_GET_ID)?;
        Ok(self.read_data()? == WHEEL_DEVICE_ID)
    }

    /// Enable the auxiliary port for polling and start pointer reporting.
    ///
    /// Returns the packet format the pointer settled on.
    ///
    /// # Safety
    ///
    /// Performs port I/O on the 8042; must run in ring 0 with nothing else
    /// driving the controller.
    pub unsafe fn init(&mut self) -> Result<PacketFormat, &'static str> {
        self.send_command(CMD_ENABLE_AUX)?;
        self.flush_output();

        self.send_command(CMD_READ_CONFIG)?;
        let config = self.read_data()?;
        let config = config & !(CONFIG_KEYBOARD_IRQ | CONFIG_AUX_IRQ | CONFIG_AUX_CLOCK_DISABLED);
        self.send_command(CMD_WRITE_CONFIG)?;
        self.send_data(config)?;

        self.send_mouse(MOUSE_SET_DEFAULTS)?;
        let format = match self.enable_wheel() {
            Ok(true) => PacketFormat::Wheel,
            Ok(false) => PacketFormat::Standard,
            Err(e) => {
                klog_warn!("PS/2: wheel probe failed ({}), using 3-byte packets", e);
                self.flush_output();
                PacketFormat::Standard
            }
        };
        self.send_mouse(MOUSE_ENABLE_REPORTING)?;
        self.flush_output();

        klog_info!("PS/2: pointer ready, {:?} packets", format);
        Ok(format)
    }
}

impl Default for Ps2Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInput for Ps2Controller {
    fn read_pointer_byte(&mut self) -> Option<u8> {
        let status = self.read_status();
        if status & STATUS_OUTPUT_FULL != 0 && status & STATUS_AUX_DATA != 0 {
            Some(unsafe { self.data.read() })
        } else {
            None
        }
    }

    fn read_scancode(&mut self) -> Option<u8> {
        let status = self.read_status();
        if status & STATUS_OUTPUT_FULL != 0 && status & STATUS_AUX_DATA == 0 {
            Some(unsafe { self.data.read() })
        } else {
            None
        }
    }
}
