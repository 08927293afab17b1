//! Per-kind window behavior.
//!
//! Each [`WindowKind`] maps to an optional click handler and an optional
//! key handler. A kind without a handler simply ignores the input. Handlers
//! return whether the window needs repainting.

use crate::ui::window::{Window, WindowKind};

type ClickHandler = fn(&mut Window, i32, i32) -> bool;
type KeyHandler = fn(&mut Window, char) -> bool;

struct Handlers {
    click: Option<ClickHandler>,
    key: Option<KeyHandler>,
}

fn handlers(kind: WindowKind) -> Handlers {
    match kind {
        WindowKind::Plain => Handlers { click: None, key: None },
        WindowKind::Welcome => Handlers { click: None, key: Some(welcome_key) },
        WindowKind::About => Handlers { click: Some(about_click), key: None },
    }
}

/// Content-area click. `(x, y)` are screen coordinates.
pub(super) fn click(window: &mut Window, x: i32, y: i32) -> bool {
    match handlers(window.kind).click {
        Some(handler) => handler(window, x, y),
        None => false,
    }
}

pub(super) fn key(window: &mut Window, ch: char) -> bool {
    match handlers(window.kind).key {
        Some(handler) => handler(window, ch),
        None => false,
    }
}

fn welcome_key(window: &mut Window, ch: char) -> bool {
    match ch {
        '\x08' => window.pop_char().is_some(),
        '\n' => {
            let had_text = !window.text().is_empty();
            while window.pop_char().is_some() {}
            had_text
        }
        '\t' => false,
        ch => match window.push_char(ch) {
            Ok(()) => true,
            Err(_) => {
                klog_debug!("welcome: text line full, dropped {:?}", ch);
                false
            }
        },
    }
}

fn about_click(window: &mut Window, _x: i32, _y: i32) -> bool {
    let clicks = window.record_click();
    klog_debug!("about: clicked {} times", clicks);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;
    use crate::ui::widgets::Rect;
    use alloc::string::String;

    fn window(kind: WindowKind) -> Window {
        let mut w = Window::new(Rect::new(0, 0, 200, 100), String::from("w"), &Theme::CLASSIC);
        w.kind = kind;
        w
    }

    #[test]
    fn plain_windows_ignore_input() {
        let mut w = window(WindowKind::Plain);
        assert!(!click(&mut w, 10, 30));
        assert!(!key(&mut w, 'a'));
        assert_eq!(w.text(), "");
        assert_eq!(w.clicks(), 0);
    }

    #[test]
    fn about_counts_clicks() {
        let mut w = window(WindowKind::About);
        assert!(click(&mut w, 10, 30));
        assert!(click(&mut w, 10, 30));
        assert_eq!(w.clicks(), 2);
        assert!(!key(&mut w, 'a'));
    }

    #[test]
    fn welcome_edits_its_text_line() {
        let mut w = window(WindowKind::Welcome);
        assert!(!click(&mut w, 10, 30));
        for ch in "hey".chars() {
            assert!(key(&mut w, ch));
        }
        assert!(key(&mut w, '\x08'));
        assert_eq!(w.text(), "he");
        assert!(!key(&mut w, '\t'));
        assert!(key(&mut w, '\n'));
        assert_eq!(w.text(), "");
        assert!(!key(&mut w, '\x08'));
    }
}
