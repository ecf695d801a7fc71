//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the page core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  Page            │
//  │   ├─ Logical pixels      │    │   ├─ inputs      │
//  │   └─ Tracks cursor       │    │   └─ frame(ts)   │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  EffectHandler   │
//  │   ├─ discrete: Vec<>     │    │                  │
//  │   └─ continuous: Set<>   │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush + tick)       │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → Buffered input sent as one batch
//    → Followed by Frame { timestamp_ms } (the paint cycle)
//    → Empty input buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = paint cycle**: the core advances animations only
//   on frame ticks, so they follow the display refresh
// - **Ticks may be dropped**: a full channel drops the tick with a
//   warning; animations are time-based and catch up on the next one
// - **Graceful channel disconnect**: If the core thread dies, platform
//   logs a warning but keeps running to allow window closure
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Storefront::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::elapsed_ms;
use crate::core::input::PageInput;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window manager and input aggregator.
///
/// Runs on the main thread and sends batched inputs plus frame ticks to
/// the core thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender, epoch, title)`
/// 2. **Execution**: `platform.run()` - runs the event loop until close
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window → sends `WindowClosed` → exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    title: String,

    /// Buffers input until the next frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,

    /// Origin of frame timestamps, shared with the core.
    epoch: Instant,
}

impl Platform {
    /// Initial window size in logical pixels.
    const WINDOW_SIZE: (f64, f64) = (1280.0, 800.0);

    //--- Construction -----------------------------------------------------

    /// Creates the platform. The window is created lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, epoch: Instant, title: impl Into<String>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            title: title.into(),
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            epoch,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered inputs to the core thread.
    ///
    /// If the channel is disconnected (core thread panicked or exited
    /// early), logs a warning and drops the inputs so the window can
    /// still be closed normally.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous inputs",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} inputs ({} discrete, {} continuous)",
                    discrete_count + continuous_count,
                    discrete_count,
                    continuous_count
                );
            }
        }
    }

    /// Sends a frame tick without blocking the event loop.
    fn send_frame(&mut self) {
        let timestamp_ms = elapsed_ms(self.epoch);
        match self.event_sender.try_send(PlatformEvent::Frame { timestamp_ms }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform", "Core is behind, dropping frame at {:.1}ms", timestamp_ms);
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!(target: "platform", "Channel disconnected, frame not sent");
            }
        }
    }

    fn push(&mut self, input: PageInput) {
        self.buffer.push(input);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(Self::WINDOW_SIZE.0, Self::WINDOW_SIZE.1));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.input_processor.update_scale_factor(window.scale_factor());
                let size = self.input_processor.process_resize(window.inner_size());
                self.push(size);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.input_processor.update_scale_factor(scale_factor);
            }

            WindowEvent::Resized(size) => {
                let input = self.input_processor.process_resize(size);
                self.push(input);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let input = self.input_processor.process_cursor_moved(position);
                self.push(input);
            }

            WindowEvent::CursorLeft { .. } => {
                let input = self.input_processor.process_cursor_left();
                self.push(input);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(input) = self.input_processor.process_mouse_button(button, state) {
                    self.push(input);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(input) = self.input_processor.process_wheel(delta) {
                    self.push(input);
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let text = key_event.text.as_deref();
                match self.input_processor.process_key(&key_event.logical_key, key_event.state, text) {
                    Some(input) => self.push(input),
                    None => trace!(target: "platform::input", "Key without page meaning ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: inputs first, then the paint cycle
                self.flush_input_buffer();
                self.send_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use crossbeam_channel::{bounded, unbounded};

    fn platform(tx: Sender<PlatformEvent>) -> Platform {
        Platform::new(tx, Instant::now(), "Storefront")
    }

    //=====================================================================
    // PlatformEvent Tests
    //=====================================================================

    #[test]
    fn platform_event_is_cloneable_and_debug() {
        let event = PlatformEvent::Frame { timestamp_ms: 16.0 };
        let cloned = event.clone();
        assert!(format!("{:?}", cloned).contains("Frame"));
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = platform(tx);
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert_eq!(platform.title, "Storefront");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_inputs() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.push(PageInput::Key(Key::Escape));
        platform.push(PageInput::PointerMoved { x: 1.0, y: 2.0 });
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, vec![PageInput::Key(Key::Escape)]);
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);
        platform.push(PageInput::Key(Key::Tab));

        drop(rx);

        platform.flush_input_buffer();
        platform.send_frame();
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);
        platform.push(PageInput::Key(Key::Enter));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn frame_timestamps_are_monotonic() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.send_frame();
        platform.send_frame();

        let stamps: Vec<f64> = rx
            .try_iter()
            .map(|e| match e {
                PlatformEvent::Frame { timestamp_ms } => timestamp_ms,
                other => panic!("Expected Frame, got {:?}", other),
            })
            .collect();
        assert_eq!(stamps.len(), 2);
        assert!(stamps[0] <= stamps[1]);
    }

    #[test]
    fn full_channel_drops_frame() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);

        platform.send_frame();
        platform.send_frame();

        assert_eq!(rx.len(), 1);
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error + 'static>() {}
        assert_error::<PlatformError>();
    }
}
