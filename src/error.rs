use core::fmt;

/// Failures surfaced by the display session.
///
/// Queue overflow and malformed input framing are deliberately absent: the
/// former drops the event, the latter resynchronizes the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiError {
    /// The window heap could not hold another window record.
    OutOfMemory,
    /// No framebuffer was supplied, or it was already released.
    NoFramebuffer,
    /// Framebuffer or window dimensions do not describe a usable surface.
    InvalidGeometry,
    /// The window id is stale or was never issued.
    NoSuchWindow,
}

pub type Result<T> = core::result::Result<T, GuiError>;

impl GuiError {
    /// Static description, for boot code that reports `&'static str` errors.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GuiError::OutOfMemory => "out of memory for window records",
            GuiError::NoFramebuffer => "no framebuffer available",
            GuiError::InvalidGeometry => "surface geometry is invalid",
            GuiError::NoSuchWindow => "no such window",
        }
    }
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(GuiError::OutOfMemory.to_string(), "out of memory for window records");
        assert_eq!(GuiError::NoFramebuffer.to_string(), "no framebuffer available");
    }
}
