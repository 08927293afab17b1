//! # Compositor
//!
//! Paints the whole desktop from session state, bottom to top:
//!
//! 1. Desktop gradient over the work area
//! 2. Windows, back to front
//! 3. Taskbar with the start button and a status line
//! 4. Pointer glyph, after saving what it covers
//!
//! Painting depends only on the [`Scene`], so composing twice without a
//! state change leaves identical pixels. When only the pointer moved,
//! [`Compositor::update_pointer`] swaps the saved background back in
//! instead.

use alloc::format;

use crate::devices::framebuffer::{text_width, Canvas, Color, GLYPH_HEIGHT};
use crate::devices::mouse_cursor::MouseCursor;
use crate::ui::theme::Theme;
use crate::ui::widgets::{Button, Label, Panel, Rect, Widget};
use crate::ui::window::{Control, Window, WindowId, WindowKind};
use crate::ui::window_manager::WindowCollection;

const TITLE_PAD: i32 = 6;
const CONTENT_PAD: i32 = 10;
const LINE_HEIGHT: i32 = 12;
const START_BUTTON: Rect = Rect::new(5, 4, 70, 24);
const STATUS_PAD: i32 = 10;

/// Everything the compositor reads.
pub struct Scene<'a> {
    pub windows: &'a WindowCollection,
    pub active: Option<WindowId>,
    pub pointer: (i32, i32),
}

pub struct Compositor {
    theme: Theme,
    taskbar_height: u32,
    cursor: MouseCursor,
}

impl Compositor {
    pub fn new(theme: Theme, taskbar_height: u32) -> Self {
        Self {
            theme,
            taskbar_height,
            cursor: MouseCursor::new(),
        }
    }

    /// Where the pointer glyph was last drawn.
    pub fn cursor_position(&self) -> Option<(i32, i32)> {
        self.cursor.position()
    }

    pub fn compose<C: Canvas>(&mut self, canvas: &mut C, scene: &Scene<'_>) {
        let (width, height) = canvas.dimensions();
        let work_height = height.saturating_sub(self.taskbar_height);

        // Every pixel under the old glyph is about to be overwritten.
        self.cursor.forget();

        self.draw_desktop(canvas, width, work_height);
        for (id, window) in scene.windows.back_to_front() {
            self.draw_window(canvas, window, scene.active == Some(id));
        }
        let status = scene
            .active
            .and_then(|id| scene.windows.get(id))
            .map_or("", |w| w.title());
        self.draw_taskbar(canvas, width, height, status);

        let (px, py) = scene.pointer;
        self.cursor.show(canvas, px, py);
    }

    /// Move the pointer glyph without repainting anything else.
    pub fn update_pointer<C: Canvas>(&mut self, canvas: &mut C, x: i32, y: i32) {
        self.cursor.move_to(canvas, x, y);
    }

    fn draw_desktop<C: Canvas>(&self, canvas: &mut C, width: u32, work_height: u32) {
        let base = self.theme.desktop;
        for y in 0..work_height {
            let step = |k: u32| (y * k / 100).min(u8::MAX as u32) as u8;
            let color = Color::new(
                base.r.saturating_add(step(3)),
                base.g.saturating_add(step(3)),
                base.b.saturating_add(step(2)),
            );
            canvas.fill_rect(0, y as i32, width, 1, color);
        }
    }

    fn draw_window<C: Canvas>(&self, canvas: &mut C, window: &Window, active: bool) {
        let theme = &self.theme;
        let r = window.rect;

        let mut body = Panel::new(window.bg);
        body.layout(r);
        body.render(canvas, theme);

        let bar = window.title_bar();
        let bar_color = if active { theme.title_active } else { theme.title_inactive };
        canvas.fill_rect(bar.x, bar.y, bar.w, bar.h, bar_color);

        let mut controls_left = bar.right();
        for control in Control::RIGHT_TO_LEFT {
            let Some(rect) = window.control_rect(control) else {
                continue;
            };
            controls_left = controls_left.min(rect.x);
            let mut button = Button::new(control.glyph());
            button.layout(rect);
            button.hovered = window.hovered == Some(control);
            if control == Control::Close {
                button.hover_fill = Some(theme.close_hover);
            }
            button.render(canvas, theme);
        }

        let title_x = r.x + TITLE_PAD;
        let title_room = (controls_left - TITLE_PAD - title_x).max(0) as u32;
        let mut title = Label::new(window.title(), theme.title_text);
        title.layout(Rect::new(title_x, r.y + TITLE_PAD, title_room, GLYPH_HEIGHT as u32));
        title.render(canvas, theme);

        canvas.draw_rect(r.x, r.y, r.w, r.h, window.border);

        self.draw_content(canvas, window);

        if !window.is_maximized() {
            let g = window.resize_grip();
            canvas.draw_line(g.x + 2, g.bottom() - 2, g.right() - 2, g.y + 2, window.border);
            canvas.draw_line(g.x + 6, g.bottom() - 2, g.right() - 2, g.y + 6, window.border);
        }
    }

    fn draw_content<C: Canvas>(&self, canvas: &mut C, window: &Window) {
        let theme = &self.theme;
        let content = window.content();
        let x = content.x + CONTENT_PAD;
        let room = content.w.saturating_sub(2 * CONTENT_PAD as u32);
        let first = content.y + CONTENT_PAD;
        let max_lines = (content.h as i32 - 2 * CONTENT_PAD) / LINE_HEIGHT;

        let mut line = |row: i32, text: &str| {
            if row >= max_lines {
                return;
            }
            let mut label = Label::new(text, theme.text);
            label.layout(Rect::new(x, first + row * LINE_HEIGHT, room, GLYPH_HEIGHT as u32));
            label.render(canvas, theme);
        };

        match window.kind {
            WindowKind::Plain => {}
            WindowKind::Welcome => {
                line(0, "Drag a title bar to move a window.");
                line(1, "Drag the corner grip to resize it.");
                line(2, "Press Esc to leave the desktop.");
                line(4, &format!("> {}_", window.text()));
            }
            WindowKind::About => {
                line(0, "pollwm, a polled desktop");
                line(1, &format!("Clicks: {}", window.clicks()));
            }
        }
    }

    fn draw_taskbar<C: Canvas>(&self, canvas: &mut C, width: u32, height: u32, status: &str) {
        let theme = &self.theme;
        let top = height.saturating_sub(self.taskbar_height) as i32;

        canvas.fill_rect(0, top, width, self.taskbar_height, theme.taskbar);
        canvas.draw_line(0, top, width as i32 - 1, top, theme.taskbar_edge);

        let mut start = Button::new("Start");
        start.layout(Rect::new(START_BUTTON.x, top + START_BUTTON.y, START_BUTTON.w, START_BUTTON.h));
        start.render(canvas, theme);

        let sx = width as i32 - text_width(status) as i32 - STATUS_PAD;
        let sy = top + (self.taskbar_height as i32 - GLYPH_HEIGHT) / 2;
        canvas.draw_string(sx.max(START_BUTTON.right() + STATUS_PAD), sy, status, theme.taskbar_text, None);
    }
}

/// Taskbar rows excluded from the work area for a given screen height.
pub fn work_area(width: u32, height: u32, taskbar_height: u32) -> Rect {
    Rect::new(0, 0, width, height.saturating_sub(taskbar_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::framebuffer::{FramebufferInfo, FramebufferWriter};
    use alloc::vec;

    const W: usize = 320;
    const H: usize = 240;

    fn setup() -> (WindowCollection, Compositor) {
        let wc = WindowCollection::new(4, work_area(W as u32, H as u32, 30), Theme::CLASSIC);
        (wc, Compositor::new(Theme::CLASSIC, 30))
    }

    #[test]
    fn composing_twice_is_byte_identical() {
        let (mut wc, mut comp) = setup();
        let a = wc.create(20, 20, 150, 100, "First").unwrap();
        wc.create(100, 60, 150, 100, "Second").unwrap();
        wc.get_mut(a).unwrap().kind = WindowKind::About;

        let mut buf = vec![0u8; W * H * 4];
        let mut fb = FramebufferWriter::new(&mut buf, FramebufferInfo::argb32(W, H, W * 4)).unwrap();
        let scene = Scene { windows: &wc, active: Some(a), pointer: (110, 70) };
        comp.compose(&mut fb, &scene);
        let first = fb.as_bytes().to_vec();
        comp.compose(&mut fb, &scene);
        assert_eq!(fb.as_bytes(), &first[..]);
    }

    #[test]
    fn paints_gradient_windows_taskbar_and_cursor() {
        let (mut wc, mut comp) = setup();
        let a = wc.create(40, 40, 150, 100, "Win").unwrap();
        let mut buf = vec![0u8; W * H * 4];
        let mut fb = FramebufferWriter::new(&mut buf, FramebufferInfo::argb32(W, H, W * 4)).unwrap();
        let scene = Scene { windows: &wc, active: Some(a), pointer: (5, 5) };
        comp.compose(&mut fb, &scene);

        assert_eq!(fb.read_pixel(300, 0), Some(Color::DESKTOP));
        assert_eq!(fb.read_pixel(300, 100), Some(Color::new(0x0D + 3, 0x3D + 3, 0x52 + 2)));
        assert_eq!(fb.read_pixel(41, 41), Some(Theme::CLASSIC.title_active));
        assert_eq!(fb.read_pixel(40, 40), Some(Theme::CLASSIC.window_border));
        assert_eq!(fb.read_pixel(100, 100), Some(Theme::CLASSIC.window_bg));
        assert_eq!(fb.read_pixel(200, 239), Some(Theme::CLASSIC.taskbar));
        assert_eq!(fb.read_pixel(5, 5), Some(Color::BLACK));
        assert_eq!(comp.cursor_position(), Some((5, 5)));
    }

    #[test]
    fn inactive_windows_use_the_inactive_title_color() {
        let (mut wc, mut comp) = setup();
        wc.create(40, 40, 150, 100, "Win").unwrap();
        let mut buf = vec![0u8; W * H * 4];
        let mut fb = FramebufferWriter::new(&mut buf, FramebufferInfo::argb32(W, H, W * 4)).unwrap();
        comp.compose(&mut fb, &Scene { windows: &wc, active: None, pointer: (0, 200) });
        assert_eq!(fb.read_pixel(41, 41), Some(Theme::CLASSIC.title_inactive));
    }

    #[test]
    fn pointer_update_matches_a_full_recomposite() {
        let (mut wc, mut comp) = setup();
        let a = wc.create(40, 40, 150, 100, "Win").unwrap();
        let mut buf = vec![0u8; W * H * 4];
        let mut fb = FramebufferWriter::new(&mut buf, FramebufferInfo::argb32(W, H, W * 4)).unwrap();

        comp.compose(&mut fb, &Scene { windows: &wc, active: Some(a), pointer: (60, 60) });
        comp.update_pointer(&mut fb, 200, 150);
        let fast = fb.as_bytes().to_vec();

        comp.compose(&mut fb, &Scene { windows: &wc, active: Some(a), pointer: (200, 150) });
        assert_eq!(fb.as_bytes(), &fast[..]);
    }
}
