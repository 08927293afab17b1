//! # Display Session
//!
//! The single run-time context of the desktop: borrowed framebuffer,
//! pointer and keyboard state, the window collection, the event queue and
//! the damage flags.
//!
//! ## Lifecycle
//!
//! ```text
//! Session::init ──▶ create_desktop ──▶ run ─┬─▶ step ─┐
//!                                            │    ▲     │
//!                                            │    └─────┘ while running
//!                                            ▼
//!                                       shutdown ──▶ framebuffer returned
//! ```
//!
//! ## One iteration (`step`)
//!
//! 1. Busy-wait `poll_delay_spins`
//! 2. Read up to `max_key_reads` scan codes, then up to
//!    `max_pointer_reads` pointer bytes, through the [`InputDecoder`]
//! 3. Drain the event queue ([`Session::dispatch_pending`])
//! 4. Recomposite if damaged, or only move the pointer glyph if that is
//!    all that changed
//!
//! Escape clears the running flag while polling. The rest of that
//! iteration still runs, and the session stops at the next boundary.

mod dispatch;
mod handlers;

use crate::config::GuiConfig;
use crate::devices::drivers::ps2_keyboard::KEY_ESCAPE;
use crate::devices::drivers::{PacketFormat, RawInput};
use crate::devices::framebuffer::{FramebufferInfo, FramebufferWriter};
use crate::devices::input::{Event, EventQueue, InputDecoder, KeyboardState, PointerState};
use crate::error::{GuiError, Result};
use crate::ui::compositor::{self, Compositor, Scene};
use crate::ui::window::{Window, WindowFlags, WindowId, WindowKind};
use crate::ui::window_manager::WindowCollection;

pub use dispatch::Grab;

const WELCOME_TITLE: &str = "Welcome to pollwm";
const ABOUT_TITLE: &str = "About pollwm";

pub struct Session<'fb> {
    framebuffer: Option<FramebufferWriter<'fb>>,
    info: FramebufferInfo,
    config: GuiConfig,
    pointer: PointerState,
    keyboard: KeyboardState,
    windows: WindowCollection,
    active: Option<WindowId>,
    /// Window whose title-bar control may be highlighted.
    hovered: Option<WindowId>,
    grab: Grab,
    queue: EventQueue,
    decoder: InputDecoder,
    compositor: Compositor,
    running: bool,
    damaged: bool,
    /// Only the pointer glyph is stale.
    pointer_dirty: bool,
}

impl<'fb> Session<'fb> {
    /// Start a session on a 32-bit framebuffer with default settings.
    pub fn init(
        width: usize,
        height: usize,
        framebuffer: Option<&'fb mut [u8]>,
        pitch: usize,
    ) -> Result<Self> {
        Self::init_with(FramebufferInfo::argb32(width, height, pitch), framebuffer, GuiConfig::DEFAULT)
    }

    pub fn init_with(
        info: FramebufferInfo,
        framebuffer: Option<&'fb mut [u8]>,
        config: GuiConfig,
    ) -> Result<Self> {
        let Some(buffer) = framebuffer else {
            klog_warn!("session: no framebuffer supplied");
            return Err(GuiError::NoFramebuffer);
        };
        let writer = FramebufferWriter::new(buffer, info).map_err(|e| {
            klog_warn!(
                "session: rejected {}x{} framebuffer, pitch {}: {}",
                info.width,
                info.height,
                info.pitch,
                e
            );
            e
        })?;

        let width = info.width as u32;
        let height = info.height as u32;
        let work_area = compositor::work_area(width, height, config.taskbar_height);

        klog_info!(
            "session: {}x{} framebuffer, pitch {}, {:?} pixels",
            width,
            height,
            info.pitch,
            info.format
        );

        Ok(Self {
            framebuffer: Some(writer),
            info,
            config,
            pointer: PointerState::centered(width, height),
            keyboard: KeyboardState::default(),
            windows: WindowCollection::new(config.max_windows, work_area, config.theme),
            active: None,
            hovered: None,
            grab: Grab::None,
            queue: EventQueue::new(),
            decoder: InputDecoder::new(width, height, PacketFormat::Standard),
            compositor: Compositor::new(config.theme, config.taskbar_height),
            running: true,
            damaged: true,
            pointer_dirty: false,
        })
    }

    /// Packet length the pointing device settled on during bring-up.
    pub fn set_packet_format(&mut self, format: PacketFormat) {
        self.decoder.set_packet_format(format);
    }

    /// Open the two stock windows, side by side.
    pub fn create_desktop(&mut self) -> Result<(WindowId, WindowId)> {
        let cx = (self.info.width / 2) as i32;
        let cy = (self.info.height / 2) as i32;

        let welcome = self.create_window((cx - 420).max(0), (cy - 180).max(0), 400, 320, WELCOME_TITLE)?;
        if let Some(w) = self.windows.get_mut(welcome) {
            w.kind = WindowKind::Welcome;
            w.flags = WindowFlags::ALL;
        }

        let about = self.create_window((cx + 40).max(0), (cy - 100).max(0), 300, 150, ABOUT_TITLE)?;
        if let Some(w) = self.windows.get_mut(about) {
            w.kind = WindowKind::About;
            w.flags = WindowFlags { close: true, ..WindowFlags::NONE };
        }

        self.damaged = true;
        klog_info!("session: desktop ready with {} windows", self.windows.len());
        Ok((welcome, about))
    }

    /// Open a window on top of the stack. It does not become active until
    /// it is clicked.
    pub fn create_window(&mut self, x: i32, y: i32, w: u32, h: u32, title: &str) -> Result<WindowId> {
        let id = self.windows.create(x, y, w, h, title).map_err(|e| {
            klog_warn!("session: cannot create window \"{}\": {}", title, e);
            e
        })?;
        klog_debug!("session: window \"{}\" at {},{} {}x{}", title, x, y, w, h);
        self.damaged = true;
        Ok(id)
    }

    /// Close a window. Session references to it are dropped first.
    pub fn destroy_window(&mut self, id: WindowId) -> Result<()> {
        if !self.windows.contains(id) {
            return Err(GuiError::NoSuchWindow);
        }
        if self.active == Some(id) {
            self.active = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.grab.window() == Some(id) {
            self.grab = Grab::None;
        }
        let window = self.windows.remove(id)?;
        klog_debug!("session: closed \"{}\"", window.title());
        self.damaged = true;
        Ok(())
    }

    /// Poll until the session stops.
    pub fn run<I: RawInput + ?Sized>(&mut self, input: &mut I) {
        klog_info!("session: entering event loop");
        while self.step(input) {}
        klog_info!("session: event loop finished");
    }

    /// One poll-dispatch-redraw iteration. Returns whether the session is
    /// still running. An escape read during polling still lets this
    /// iteration apply and present everything queued; the next call returns
    /// `false` without touching the queue.
    pub fn step<I: RawInput + ?Sized>(&mut self, input: &mut I) -> bool {
        if !self.running {
            return false;
        }
        for _ in 0..self.config.poll_delay_spins {
            core::hint::spin_loop();
        }

        self.poll_input(input);
        self.dispatch_pending();
        if let Err(e) = self.present() {
            klog_warn!("session: redraw failed: {}", e);
        }
        self.running
    }

    fn poll_input<I: RawInput + ?Sized>(&mut self, input: &mut I) {
        let dropped = self.queue.dropped();

        for _ in 0..self.config.max_key_reads {
            let Some(scancode) = input.read_scancode() else {
                break;
            };
            let stroke = self.decoder.scancode(scancode, &mut self.keyboard, &mut self.queue);
            if let Some(stroke) = stroke {
                if stroke.pressed && stroke.code == KEY_ESCAPE {
                    klog_info!("session: escape pressed, stopping");
                    self.running = false;
                }
            }
        }

        for _ in 0..self.config.max_pointer_reads {
            let Some(byte) = input.read_pointer_byte() else {
                break;
            };
            self.decoder.pointer_byte(byte, &mut self.pointer, &mut self.queue);
        }

        if self.queue.dropped() != dropped {
            klog_debug!("session: event queue full, {} events dropped so far", self.queue.dropped());
        }
    }

    /// Append an event as if the decoder had produced it.
    pub fn queue_event(&mut self, event: Event) -> bool {
        self.queue.push(event)
    }

    /// Stop at the next iteration boundary.
    pub fn request_shutdown(&mut self) {
        self.running = false;
    }

    /// Recomposite the whole screen now.
    pub fn redraw(&mut self) -> Result<()> {
        let fb = self.framebuffer.as_mut().ok_or(GuiError::NoFramebuffer)?;
        let scene = Scene {
            windows: &self.windows,
            active: self.active,
            pointer: (self.pointer.x, self.pointer.y),
        };
        self.compositor.compose(fb, &scene);
        self.damaged = false;
        self.pointer_dirty = false;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if self.damaged {
            return self.redraw();
        }
        if self.pointer_dirty {
            let fb = self.framebuffer.as_mut().ok_or(GuiError::NoFramebuffer)?;
            self.compositor.update_pointer(fb, self.pointer.x, self.pointer.y);
            self.pointer_dirty = false;
        }
        Ok(())
    }

    /// End the session and give the framebuffer back.
    pub fn shutdown(mut self) -> Option<&'fb mut [u8]> {
        self.running = false;
        klog_info!(
            "session: shut down with {} windows, {} events dropped",
            self.windows.len(),
            self.queue.dropped()
        );
        self.framebuffer.take().map(FramebufferWriter::into_inner)
    }

    pub fn width(&self) -> u32 {
        self.info.width as u32
    }

    pub fn height(&self) -> u32 {
        self.info.height as u32
    }

    pub fn pitch(&self) -> usize {
        self.info.pitch
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    pub fn is_pointer_dirty(&self) -> bool {
        self.pointer_dirty
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn windows(&self) -> &WindowCollection {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.damaged = true;
        self.windows.get_mut(id)
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active
    }

    pub fn grab(&self) -> Grab {
        self.grab
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Current framebuffer contents, scanline by scanline.
    pub fn frame(&self) -> Option<&[u8]> {
        self.framebuffer.as_ref().map(FramebufferWriter::as_bytes)
    }
}
