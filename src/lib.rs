//! # pollwm
//!
//! Display and input subsystem for a small bare-metal kernel: a polled
//! event pipeline feeding a stacking window manager that paints into a
//! linear framebuffer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐
//! │  PS/2 mouse  │    │ PS/2 keyboard│      devices::drivers
//! │  byte stream │    │  scan codes  │
//! └──────┬───────┘    └──────┬───────┘
//!        ▼                   ▼
//! ┌──────────────────────────────────┐
//! │          InputDecoder            │      devices::input
//! │  (packet assembly, edge detect)  │
//! └──────────────┬───────────────────┘
//!                ▼
//! ┌──────────────────────────────────┐
//! │      EventQueue (64 slots)       │
//! └──────────────┬───────────────────┘
//!                ▼
//! ┌──────────────────────────────────┐
//! │   Session::dispatch_pending      │      session
//! │ (hit-test, raise, drag, routing) │
//! └──────────────┬───────────────────┘
//!                ▼ damage
//! ┌──────────────────────────────────┐
//! │           Compositor             │      ui::compositor
//! └──────────────────────────────────┘
//! ```
//!
//! The library is `no_std` and only needs `alloc`; the bare-metal entry
//! point lives in the `kernel` binary.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
pub mod logging;

pub mod config;
pub mod devices;
pub mod error;
pub mod kernel;
pub mod session;
pub mod ui;

pub use config::GuiConfig;
pub use error::GuiError;
pub use session::Session;
