//! Serial console logging.
//!
//! Output goes to COM1 through `uart_16550`. The port is only touched after
//! [`init_serial`] installs it; until then (and always in host tests) log
//! lines are dropped.

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicU8, Ordering};
use spin::Mutex;
use uart_16550::SerialPort;

pub const COM1: u16 = 0x3F8;

static SERIAL: Mutex<Option<SerialPort>> = Mutex::new(None);
static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Program COM1 and start forwarding log output to it.
///
/// # Safety
///
/// Performs port I/O; the caller must run in ring 0 on a machine with a
/// 16550-compatible UART at [`COM1`].
pub unsafe fn init_serial() {
    let mut port = SerialPort::new(COM1);
    port.init();
    *SERIAL.lock() = Some(port);
}

pub fn set_max_level(level: LogLevel) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: LogLevel) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    if let Some(serial) = SERIAL.lock().as_mut() {
        let _ = serial.write_fmt(args);
    }
}

#[doc(hidden)]
pub fn _log(level: LogLevel, args: fmt::Arguments) {
    if !enabled(level) {
        return;
    }
    if let Some(serial) = SERIAL.lock().as_mut() {
        let _ = writeln!(serial, "[{}] {}", level.tag(), args);
    }
}

#[macro_export]
macro_rules! kprintln {
    () => {
        $crate::logging::_print(format_args!("\n"))
    };
    ($($arg:tt)*) => {
        $crate::logging::_print(format_args!("{}\n", format_args!($($arg)*)))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::logging::_log($crate::logging::LogLevel::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::logging::_log($crate::logging::LogLevel::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::logging::_log($crate::logging::LogLevel::Debug, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_above_the_maximum_are_filtered() {
        set_max_level(LogLevel::Warn);
        assert!(enabled(LogLevel::Warn));
        assert!(!enabled(LogLevel::Info));
        set_max_level(LogLevel::Debug);
        assert!(enabled(LogLevel::Debug));
        set_max_level(LogLevel::Info);
        assert!(!enabled(LogLevel::Debug));
        // Nothing is installed on the host; logging is a no-op.
        klog_warn!("dropped {}", 1);
    }
}
