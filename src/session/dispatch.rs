//! Event dispatch.
//!
//! Drains the queue and applies each event to session state: pointer and
//! keyboard bookkeeping first, then routing to the window under the
//! pointer. Pointer-down raises and activates the hit window and may start
//! a grab; while a grab is held, moves go to the grabbed window no matter
//! what lies under the pointer.

use super::handlers;
use super::Session;
use crate::devices::drivers::ps2_keyboard::{scancode_to_char, KEY_ESCAPE};
use crate::devices::input::{Event, MouseButton};
use crate::ui::window::{Control, WindowId};

/// The interaction that currently owns the pointer. Only one window can
/// be dragged or resized at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    None,
    /// Title-bar drag; the offset is pointer minus window origin.
    Dragging { id: WindowId, dx: i32, dy: i32 },
    /// Corner resize, anchored at the pointer position and size when the
    /// button went down.
    Resizing { id: WindowId, x: i32, y: i32, w: u32, h: u32 },
}

impl Grab {
    pub fn window(&self) -> Option<WindowId> {
        match *self {
            Grab::None => None,
            Grab::Dragging { id, .. } | Grab::Resizing { id, .. } => Some(id),
        }
    }
}

impl Session<'_> {
    /// Apply every queued event, including the ones behind an escape. The
    /// stop takes effect at the next iteration boundary.
    pub fn dispatch_pending(&mut self) {
        while let Some(event) = self.queue.pop() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::PointerMove { x, y } => {
                self.pointer.x = x;
                self.pointer.y = y;
                if self.compositor.cursor_position() != Some((x, y)) {
                    self.pointer_dirty = true;
                }
                self.pointer_moved(x, y);
            }
            Event::PointerDown { x, y, button } => {
                self.pointer.buttons |= button.mask();
                if let Some(id) = self.windows.hit_test(x, y) {
                    if self.windows.raise(id).is_ok() {
                        self.active = Some(id);
                        self.damaged = true;
                    }
                    self.pointer_pressed(id, x, y, button);
                }
            }
            Event::PointerUp { button, .. } => {
                self.pointer.buttons &= !button.mask();
                if button == MouseButton::Left && self.grab != Grab::None {
                    self.grab = Grab::None;
                }
            }
            Event::PointerClick { x, y, button } => {
                if let Some(id) = self.windows.hit_test(x, y) {
                    self.window_clicked(id, x, y, button);
                }
            }
            Event::KeyDown { code, modifiers } => {
                self.keyboard.key = code;
                self.keyboard.pressed = true;
                if code == KEY_ESCAPE {
                    self.running = false;
                    return;
                }
                if let (Some(id), Some(ch)) = (self.active, scancode_to_char(code, modifiers.shift)) {
                    if let Some(window) = self.windows.get_mut(id) {
                        if handlers::key(window, ch) {
                            self.damaged = true;
                        }
                    }
                }
            }
            Event::KeyUp { code } => {
                self.keyboard.key = code;
                self.keyboard.pressed = false;
            }
            Event::Redraw => self.damaged = true,
        }
    }

    fn pointer_moved(&mut self, x: i32, y: i32) {
        let area = self.windows.work_area();
        match self.grab {
            Grab::Dragging { id, dx, dy } => {
                match self.windows.get_mut(id) {
                    Some(window) => {
                        window.move_to(x - dx, y - dy, area);
                        self.damaged = true;
                    }
                    None => self.grab = Grab::None,
                }
                return;
            }
            Grab::Resizing { id, x: ax, y: ay, w, h } => {
                match self.windows.get_mut(id) {
                    Some(window) => {
                        let nw = (w as i32 + x - ax).max(0) as u32;
                        let nh = (h as i32 + y - ay).max(0) as u32;
                        window.resize_to(nw, nh, area);
                        self.damaged = true;
                    }
                    None => self.grab = Grab::None,
                }
                return;
            }
            Grab::None => {}
        }

        let hit = self.windows.hit_test(x, y);
        if self.hovered != hit {
            if let Some(window) = self.hovered.and_then(|id| self.windows.get_mut(id)) {
                if window.hovered.take().is_some() {
                    self.damaged = true;
                }
            }
            self.hovered = hit;
        }
        if let Some(window) = hit.and_then(|id| self.windows.get_mut(id)) {
            let control = window.control_at(x, y);
            if window.hovered != control {
                window.hovered = control;
                self.damaged = true;
            }
        }
    }

    fn pointer_pressed(&mut self, id: WindowId, x: i32, y: i32, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.is_maximized() {
            return;
        }
        let r = window.rect;
        if window.in_resize_grip(x, y) {
            self.grab = Grab::Resizing { id, x, y, w: r.w, h: r.h };
        } else if window.in_drag_area(x, y) {
            self.grab = Grab::Dragging { id, dx: x - r.x, dy: y - r.y };
        }
    }

    fn window_clicked(&mut self, id: WindowId, x: i32, y: i32, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        let area = self.windows.work_area();
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };

        match window.control_at(x, y) {
            Some(Control::Close) => {
                if let Err(e) = self.destroy_window(id) {
                    klog_warn!("session: close control on a stale window: {}", e);
                }
            }
            Some(Control::Maximize) => {
                window.toggle_maximize(area);
                self.damaged = true;
            }
            Some(Control::Minimize) => {
                klog_debug!("session: minimize is not supported without a window list");
            }
            None => {
                if window.content().contains(x, y) && !window.in_resize_grip(x, y) && handlers::click(window, x, y) {
                    self.damaged = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuiConfig;
    use crate::devices::drivers::Modifiers;
    use crate::devices::framebuffer::FramebufferInfo;
    use crate::ui::window::WindowKind;
    use alloc::vec;

    fn with_session(f: impl FnOnce(&mut Session<'_>)) {
        let mut buf = vec![0u8; 640 * 480 * 4];
        let info = FramebufferInfo::argb32(640, 480, 640 * 4);
        let mut s = Session::init_with(info, Some(&mut buf), GuiConfig::unthrottled()).unwrap();
        f(&mut s);
    }

    fn key_down(code: u8) -> Event {
        Event::KeyDown { code, modifiers: Modifiers::default() }
    }

    fn left_click(s: &mut Session<'_>, x: i32, y: i32) {
        let button = MouseButton::Left;
        s.queue_event(Event::PointerDown { x, y, button });
        s.queue_event(Event::PointerUp { x, y, button });
        s.queue_event(Event::PointerClick { x, y, button });
        s.dispatch_pending();
    }

    #[test]
    fn pointer_down_raises_and_activates() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            let b = s.create_window(100, 100, 200, 150, "b").unwrap();
            assert_eq!(s.active_window(), None);

            s.queue_event(Event::PointerDown { x: 20, y: 50, button: MouseButton::Left });
            s.dispatch_pending();
            assert_eq!(s.windows().topmost(), Some(a));
            assert_eq!(s.active_window(), Some(a));
            assert_eq!(s.pointer().buttons, 1);
            assert!(s.windows().ids().contains(&b));
        });
    }

    #[test]
    fn clicking_the_desktop_routes_nowhere() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            left_click(s, 500, 400);
            assert_eq!(s.active_window(), None);
            assert_eq!(s.windows().topmost(), Some(a));
            assert_eq!(s.pointer().buttons, 0);
        });
    }

    #[test]
    fn title_bar_drag_moves_the_window() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            let button = MouseButton::Left;
            s.queue_event(Event::PointerDown { x: 50, y: 15, button });
            s.dispatch_pending();
            assert_eq!(s.grab(), Grab::Dragging { id: a, dx: 40, dy: 5 });

            s.queue_event(Event::PointerMove { x: 150, y: 65 });
            s.queue_event(Event::PointerUp { x: 150, y: 65, button });
            s.dispatch_pending();
            let r = s.window(a).unwrap().rect;
            assert_eq!((r.x, r.y), (110, 60));
            assert_eq!(s.grab(), Grab::None);

            // Released: moves no longer drag.
            s.queue_event(Event::PointerMove { x: 300, y: 300 });
            s.dispatch_pending();
            assert_eq!(s.window(a).unwrap().rect.x, 110);
        });
    }

    #[test]
    fn corner_grip_resizes() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            let button = MouseButton::Left;
            s.queue_event(Event::PointerDown { x: 205, y: 155, button });
            s.queue_event(Event::PointerMove { x: 255, y: 175 });
            s.queue_event(Event::PointerMove { x: 0, y: 0 });
            s.dispatch_pending();
            let r = s.window(a).unwrap().rect;
            assert_eq!((r.w, r.h), (120, 60));
            assert!(matches!(s.grab(), Grab::Resizing { .. }));
        });
    }

    #[test]
    fn close_control_destroys_and_clears_references() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            let close = s.window(a).unwrap().control_rect(Control::Close).unwrap();
            left_click(s, close.x + 2, close.y + 2);
            assert!(s.window(a).is_none());
            assert_eq!(s.active_window(), None);
            assert_eq!(s.grab(), Grab::None);
            assert!(s.windows().is_empty());
        });
    }

    #[test]
    fn destroying_a_dragged_window_drops_the_grab() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            s.queue_event(Event::PointerDown { x: 50, y: 15, button: MouseButton::Left });
            s.dispatch_pending();
            assert_eq!(s.grab().window(), Some(a));
            s.destroy_window(a).unwrap();
            assert_eq!(s.grab(), Grab::None);
            assert_eq!(s.active_window(), None);
            s.queue_event(Event::PointerMove { x: 60, y: 20 });
            s.dispatch_pending();
        });
    }

    #[test]
    fn maximize_toggles_and_minimize_is_inert() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            let max = s.window(a).unwrap().control_rect(Control::Maximize).unwrap();
            left_click(s, max.x + 1, max.y + 1);
            let w = s.window(a).unwrap();
            assert!(w.is_maximized());
            assert_eq!(w.rect, s.windows().work_area());

            let min = s.window(a).unwrap().control_rect(Control::Minimize).unwrap();
            left_click(s, min.x + 1, min.y + 1);
            assert!(s.window(a).is_some());

            let max = s.window(a).unwrap().control_rect(Control::Maximize).unwrap();
            left_click(s, max.x + 1, max.y + 1);
            assert_eq!(s.window(a).unwrap().rect.w, 200);
        });
    }

    #[test]
    fn hovering_a_control_highlights_it() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            s.redraw().unwrap();
            let close = s.window(a).unwrap().control_rect(Control::Close).unwrap();
            s.queue_event(Event::PointerMove { x: close.x + 3, y: close.y + 3 });
            s.dispatch_pending();
            assert_eq!(s.window(a).unwrap().hovered, Some(Control::Close));
            assert!(s.is_damaged());

            s.queue_event(Event::PointerMove { x: 400, y: 300 });
            s.dispatch_pending();
            assert_eq!(s.window(a).unwrap().hovered, None);
        });
    }

    #[test]
    fn keys_go_to_the_active_welcome_window() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            s.window_mut(a).unwrap().kind = WindowKind::Welcome;
            // Not active yet: typing goes nowhere.
            s.queue_event(key_down(0x23));
            s.dispatch_pending();
            assert_eq!(s.window(a).unwrap().text(), "");

            s.queue_event(Event::PointerDown { x: 50, y: 80, button: MouseButton::Left });
            for code in [0x23, 0x17, 0x17, 0x0E] {
                s.queue_event(key_down(code));
                s.queue_event(Event::KeyUp { code });
            }
            s.dispatch_pending();
            assert_eq!(s.window(a).unwrap().text(), "hi");
            assert!(!s.keyboard().pressed);
            assert_eq!(s.keyboard().key, 0x0E);
        });
    }

    #[test]
    fn escape_stops_the_session_after_the_batch_drains() {
        with_session(|s| {
            s.queue_event(key_down(KEY_ESCAPE));
            s.queue_event(Event::Redraw);
            s.redraw().unwrap();
            s.dispatch_pending();
            assert!(!s.is_running());
            assert!(s.is_damaged());
            assert_eq!(s.pending_events(), 0);
        });
    }

    #[test]
    fn shift_applies_to_keys_typed_while_it_was_held() {
        with_session(|s| {
            let a = s.create_window(10, 10, 200, 150, "a").unwrap();
            s.window_mut(a).unwrap().kind = WindowKind::Welcome;
            s.queue_event(Event::PointerDown { x: 50, y: 80, button: MouseButton::Left });
            s.queue_event(Event::KeyDown { code: 0x1E, modifiers: Modifiers { shift: true, ..Modifiers::default() } });
            s.queue_event(key_down(0x1E));
            s.dispatch_pending();
            assert_eq!(s.window(a).unwrap().text(), "Aa");
        });
    }
}
