//! # Input Module
//!
//! From raw device bytes to dispatchable events.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐
//! │  scan codes  │    │ pointer bytes│
//! └──────┬───────┘    └──────┬───────┘
//!        │                   │
//!        ▼                   ▼
//! ┌──────────────────────────────────┐
//! │          InputDecoder            │
//! │  key state, packets, edges       │
//! └──────────────┬───────────────────┘
//!                │ Event
//!                ▼
//! ┌──────────────────────────────────┐
//! │      EventQueue (64 slots)       │
//! └──────────────────────────────────┘
//! ```

pub mod decoder;
pub mod events;
pub mod queue;

pub use decoder::{InputDecoder, KeyboardState, PointerState};
pub use events::{Event, MouseButton};
pub use queue::EventQueue;
