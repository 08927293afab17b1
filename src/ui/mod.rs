//! # User Interface Module
//!
//! The stacking window manager and everything it draws.
//!
//! ## Modules
//!
//! - `window`: a single window, its geometry helpers and per-kind state
//! - `window_manager`: window arena plus z-order, hit testing, raise
//! - `compositor`: paints desktop, windows, taskbar and pointer
//! - `widgets`: panel, label and button primitives used by the compositor
//! - `theme`: desktop palettes
//!
//! ## Example
//!
//! ```ignore
//! let mut windows = WindowCollection::new(16, work_area(w, h, 30), Theme::CLASSIC);
//! let id = windows.create(40, 40, 300, 200, "Notes")?;
//! compositor.compose(&mut fb, &Scene { windows: &windows, active: Some(id), pointer });
//! ```

pub mod compositor;
pub mod theme;
pub mod widgets;
pub mod window;
pub mod window_manager;

pub use compositor::{Compositor, Scene};
pub use theme::Theme;
pub use widgets::Rect;
pub use window::{Control, Window, WindowFlags, WindowId, WindowKind};
pub use window_manager::WindowCollection;
