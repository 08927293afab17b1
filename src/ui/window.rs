//! # Window
//!
//! A top-level rectangle with a 20-pixel title bar, optional title-bar
//! controls and a little per-kind state. Geometry helpers here are the only
//! place that knows where the controls and the resize grip sit, so hit
//! testing and drawing cannot disagree.

use alloc::string::String;

use crate::config::{
    CONTROL_SIZE, DRAG_MARGIN, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, RESIZE_GRIP, TITLE_BAR_HEIGHT,
};
use crate::devices::framebuffer::Color;
use crate::error::{GuiError, Result};
use crate::ui::theme::Theme;
use crate::ui::widgets::Rect;

/// Characters a `Welcome` window's text line keeps.
pub const TEXT_LINE_CAPACITY: usize = 40;

/// Gap between title-bar controls and from the right edge.
const CONTROL_GAP: i32 = 3;

/// Stable handle to a window. The generation makes ids of destroyed
/// windows stay invalid after their slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub close: bool,
    pub minimize: bool,
    pub maximize: bool,
}

impl WindowFlags {
    pub const ALL: WindowFlags = WindowFlags { close: true, minimize: true, maximize: true };
    pub const NONE: WindowFlags = WindowFlags { close: false, minimize: false, maximize: false };

    fn has(&self, control: Control) -> bool {
        match control {
            Control::Close => self.close,
            Control::Maximize => self.maximize,
            Control::Minimize => self.minimize,
        }
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// Title-bar buttons, listed right to left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Close,
    Maximize,
    Minimize,
}

impl Control {
    pub const RIGHT_TO_LEFT: [Control; 3] = [Control::Close, Control::Maximize, Control::Minimize];

    pub fn glyph(self) -> &'static str {
        match self {
            Control::Close => "x",
            Control::Maximize => "+",
            Control::Minimize => "_",
        }
    }
}

/// What a window does with clicks and keys in its content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowKind {
    /// No handler.
    #[default]
    Plain,
    /// Greeting window with an editable text line.
    Welcome,
    /// Counts clicks on its content.
    About,
}

pub struct Window {
    pub rect: Rect,
    title: String,
    pub flags: WindowFlags,
    pub bg: Color,
    pub border: Color,
    pub kind: WindowKind,
    /// Control under the pointer, drawn highlighted.
    pub hovered: Option<Control>,
    /// Geometry to return to when un-maximizing.
    restore: Option<Rect>,
    text: String,
    clicks: u32,
}

impl Window {
    pub(crate) fn new(rect: Rect, title: String, theme: &Theme) -> Self {
        Self {
            rect,
            title,
            flags: WindowFlags::default(),
            bg: theme.window_bg,
            border: theme.window_border,
            kind: WindowKind::Plain,
            hovered: None,
            restore: None,
            text: String::new(),
            clicks: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_bar(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.rect.w, TITLE_BAR_HEIGHT.min(self.rect.h))
    }

    /// Area below the title bar, inside the border.
    pub fn content(&self) -> Rect {
        let r = self.rect;
        Rect::new(
            r.x + 1,
            r.y + TITLE_BAR_HEIGHT as i32,
            r.w.saturating_sub(2),
            r.h.saturating_sub(TITLE_BAR_HEIGHT + 1),
        )
    }

    pub fn resize_grip(&self) -> Rect {
        let r = self.rect;
        Rect::new(r.right() - RESIZE_GRIP as i32, r.bottom() - RESIZE_GRIP as i32, RESIZE_GRIP, RESIZE_GRIP)
    }

    /// Where `control` is drawn, if the window has it.
    pub fn control_rect(&self, control: Control) -> Option<Rect> {
        let size = CONTROL_SIZE as i32;
        let y = self.rect.y + (TITLE_BAR_HEIGHT as i32 - size) / 2;
        let mut x = self.rect.right() - CONTROL_GAP - size;
        for c in Control::RIGHT_TO_LEFT {
            if !self.flags.has(c) {
                continue;
            }
            if c == control {
                return Some(Rect::new(x, y, CONTROL_SIZE, CONTROL_SIZE));
            }
            x -= size + CONTROL_GAP;
        }
        None
    }

    pub fn control_at(&self, x: i32, y: i32) -> Option<Control> {
        Control::RIGHT_TO_LEFT
            .into_iter()
            .find(|&c| self.control_rect(c).is_some_and(|r| r.contains(x, y)))
    }

    /// Title bar, excluding the controls.
    pub fn in_drag_area(&self, x: i32, y: i32) -> bool {
        self.title_bar().contains(x, y) && self.control_at(x, y).is_none()
    }

    pub fn in_resize_grip(&self, x: i32, y: i32) -> bool {
        !self.is_maximized() && self.resize_grip().contains(x, y)
    }

    /// Move the top-left corner, keeping the title bar reachable inside
    /// `area`.
    pub fn move_to(&mut self, x: i32, y: i32, area: Rect) {
        let min_x = area.x - self.rect.w as i32 + DRAG_MARGIN;
        let max_x = area.right() - DRAG_MARGIN;
        let max_y = area.bottom() - TITLE_BAR_HEIGHT as i32;
        self.rect.x = x.clamp(min_x.min(max_x), max_x);
        self.rect.y = y.clamp(area.y, max_y.max(area.y));
    }

    /// Resize from the bottom-right corner, no smaller than the minimum
    /// window size and no further than the edge of `area`.
    pub fn resize_to(&mut self, w: u32, h: u32, area: Rect) {
        let max_w = (area.right() - self.rect.x).max(MIN_WINDOW_WIDTH as i32) as u32;
        let max_h = (area.bottom() - self.rect.y).max(MIN_WINDOW_HEIGHT as i32) as u32;
        self.rect.w = w.clamp(MIN_WINDOW_WIDTH, max_w);
        self.rect.h = h.clamp(MIN_WINDOW_HEIGHT, max_h);
    }

    pub fn is_maximized(&self) -> bool {
        self.restore.is_some()
    }

    /// Fill `area`, or go back to the geometry from before maximizing.
    pub fn toggle_maximize(&mut self, area: Rect) {
        match self.restore.take() {
            Some(previous) => self.rect = previous,
            None => {
                self.restore = Some(self.rect);
                self.rect = area;
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append to the text line. Fails when the line is full or the heap
    /// cannot grow it.
    pub fn push_char(&mut self, ch: char) -> Result<()> {
        if self.text.chars().count() >= TEXT_LINE_CAPACITY {
            return Err(GuiError::OutOfMemory);
        }
        self.text
            .try_reserve(ch.len_utf8())
            .map_err(|_| GuiError::OutOfMemory)?;
        self.text.push(ch);
        Ok(())
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn record_click(&mut self) -> u32 {
        self.clicks = self.clicks.saturating_add(1);
        self.clicks
    }
}
