//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the event dispatcher.
//
// Architecture:
// ```text
//  Main Thread (only thread):
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ↓ WindowEvent                              │
//  │  event_mapper::surface_event                 │
//  │   ↓ SurfaceEvent                             │
//  │  Channel (FIFO) ──drain──> EventDispatcher   │
//  │                              ↓ redraw        │
//  │                            WindowSurface     │
//  │                              ↓ softbuffer    │
//  │                            OS window         │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Single thread**: the dispatcher, its state and the surface all live
//   on the event-loop thread; the channel only orders events
// - **Lazy window**: created in `resumed()`, which is also where the
//   dispatcher performs its initial resize and redraw
// - **Event driven**: frames are drawn only in response to events; the
//   loop sleeps in between (`ControlFlow::Wait`)
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Frontend::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod window_surface;

//=== External Crates =====================================================

use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::*;
use softbuffer::SoftBufferError;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::dispatch::{EventDispatcher, SurfaceEvent};
use crate::core::graphics::Sprite;
use window_surface::WindowSurface;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal - if the event loop, the window or its surface can't be
/// created, nothing can be displayed.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(EventLoopError),

    /// The OS refused to open the window.
    WindowCreation(OsError),

    /// No presentation surface could be attached to the window.
    Surface(SoftBufferError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Surface(e) => write!(f, "Surface creation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::WindowCreation(e) => Some(e),
            Self::Surface(e) => Some(e),
        }
    }
}

//=== WindowConfig ========================================================

/// Attributes of the window the platform opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and event pump.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, sprite)` - no window yet
/// 2. **Execution**: `platform.run()` - blocks in the Winit event loop
/// 3. **Resume**: window + surface + dispatcher created, first frame drawn
/// 4. **Events**: mapped, queued, drained through the dispatcher
/// 5. **Shutdown**: close requested → loop exits → `run()` returns
///
/// A window or surface that can't be created stops the loop; `run()` then
/// returns that error.
///
/// # Thread Safety
///
/// Not Send/Sync (holds `Rc<Window>`); it never leaves the main thread.
pub(crate) struct Platform {
    config: WindowConfig,

    /// Consumed when the dispatcher is created.
    sprite: Option<Sprite>,

    /// None until `resumed()` has created the window.
    dispatcher: Option<EventDispatcher<WindowSurface>>,

    event_sender: Sender<SurfaceEvent>,
    event_receiver: Receiver<SurfaceEvent>,

    /// Set by `resumed()` when the window can't be brought up.
    startup_error: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(config: WindowConfig, sprite: Sprite) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        let (event_sender, event_receiver) = unbounded();

        Self {
            config,
            sprite: Some(sprite),
            dispatcher: None,
            event_sender,
            event_receiver,
            startup_error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running, or if the window or its surface cannot be
    /// created.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let outcome = event_loop.run_app(&mut self);
        self.finish(outcome)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Result of `run()` once the loop has returned. A startup failure wins
    /// over whatever the loop itself reported.
    fn finish(&mut self, outcome: Result<(), EventLoopError>) -> Result<(), PlatformError> {
        if let Some(e) = self.startup_error.take() {
            return Err(e);
        }
        outcome.map_err(PlatformError::EventLoopExecution)
    }

    /// Records a fatal startup error and stops the loop.
    fn abort(&mut self, event_loop: &ActiveEventLoop, e: PlatformError) {
        error!(target: "platform", "{}", e);
        self.startup_error = Some(e);
        event_loop.exit();
    }

    /// Queues a mapped event and lets the dispatcher work off the queue.
    fn forward(&mut self, event: SurfaceEvent) {
        // Both ends are owned by `self`, so the channel cannot be
        // disconnected here.
        let _ = self.event_sender.send(event);

        match &mut self.dispatcher {
            Some(dispatcher) => {
                let handled = dispatcher.drain(&self.event_receiver);
                trace!(target: "platform", "Dispatched {} event(s)", handled);
            }
            None => trace!(target: "platform", "No window yet, {:?} queued", event),
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn is_window_created(&self) -> bool {
        self.dispatcher.is_some()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.dispatcher.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(true);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                self.abort(event_loop, PlatformError::WindowCreation(e));
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        let surface = match WindowSurface::new(window) {
            Ok(surface) => surface,
            Err(e) => {
                self.abort(event_loop, PlatformError::Surface(e));
                return;
            }
        };

        let sprite = self.sprite.take().unwrap_or_default();
        let mut dispatcher = EventDispatcher::new(surface, sprite);

        // Anything that arrived before the window existed.
        dispatcher.drain(&self.event_receiver);
        self.dispatcher = Some(dispatcher);
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            info!(target: "platform", "Window close requested");
            event_loop.exit();
            return;
        }

        if let Some(surface_event) = event_mapper::surface_event(&event) {
            self.forward(surface_event);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
