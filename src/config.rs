//! Session tunables.
//!
//! Nothing here is persisted: the kernel rebuilds all display state on every
//! boot, so configuration is a plain value handed to `Session::init_with`.

use crate::ui::theme::Theme;

/// Slots in the event ring. One slot is always left empty, so at most
/// `EVENT_QUEUE_CAPACITY - 1` events are pending.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Height of every window's title bar, counted inside the window rectangle.
pub const TITLE_BAR_HEIGHT: u32 = 20;

/// Side of the square title-bar control buttons.
pub const CONTROL_SIZE: u32 = 14;

/// Side of the square resize grip in a window's bottom-right corner.
pub const RESIZE_GRIP: u32 = 10;

pub const MIN_WINDOW_WIDTH: u32 = 120;
pub const MIN_WINDOW_HEIGHT: u32 = 60;

/// How many pixels of a dragged window must remain on screen horizontally.
pub const DRAG_MARGIN: i32 = 40;

/// Busy-wait iterations between polls.
pub const DEFAULT_POLL_DELAY_SPINS: u32 = 50_000;
/// Scan codes read per iteration at most.
pub const DEFAULT_MAX_KEY_READS: usize = 4;
/// Pointer bytes read per iteration at most (one legacy packet).
pub const DEFAULT_MAX_POINTER_READS: usize = 3;
/// Window budget standing in for the window heap.
pub const DEFAULT_MAX_WINDOWS: usize = 16;
pub const DEFAULT_TASKBAR_HEIGHT: u32 = 30;

#[derive(Debug, Clone, Copy)]
pub struct GuiConfig {
    pub poll_delay_spins: u32,
    pub max_key_reads: usize,
    pub max_pointer_reads: usize,
    pub max_windows: usize,
    pub taskbar_height: u32,
    pub theme: Theme,
}

impl GuiConfig {
    pub const DEFAULT: GuiConfig = GuiConfig {
        poll_delay_spins: DEFAULT_POLL_DELAY_SPINS,
        max_key_reads: DEFAULT_MAX_KEY_READS,
        max_pointer_reads: DEFAULT_MAX_POINTER_READS,
        max_windows: DEFAULT_MAX_WINDOWS,
        taskbar_height: DEFAULT_TASKBAR_HEIGHT,
        theme: Theme::CLASSIC,
    };

    /// Same as [`GuiConfig::DEFAULT`] but without the busy-wait, for callers
    /// that pace the loop themselves.
    pub const fn unthrottled() -> Self {
        let mut config = Self::DEFAULT;
        config.poll_delay_spins = 0;
        config
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
