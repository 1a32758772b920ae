//=========================================================================
// Platform Subsystem
//
// Owns everything OS-facing: the Winit window, the software
// presentation surface, the input state and the running flag. The frame
// loop in `engine` drives it by pumping the event queue once per
// iteration and presenting after the game update.
//
// Architecture:
// ```text
//  FrameLoop (single thread)
//    │ begin_frame()
//    │ pump_app_events(0) ──► ApplicationHandler (this module)
//    │                          ├─ resumed:       create window + surface
//    │                          ├─ CloseRequested: running = false
//    │                          ├─ key / mouse:   EventMapper → InputState
//    │                          └─ RedrawRequested: present()   (OS repaint)
//    │ snapshot dt + input
//    │ Game::update(buffer, input)
//    │ end_frame()
//    └ present() ──► FrameBuffer::blit_scaled ──► softbuffer Surface
// ```
//
// Key Design Decisions:
// - **Polled, not callback-driven**: `pump_app_events` with a zero
//   timeout drains pending messages and returns, giving the frame loop
//   the drain-until-empty-then-proceed cadence of a classic game loop.
// - **One struct instead of globals**: the original platform kept the
//   buffer, input and running flag as process globals; here they live
//   in `Platform`, owned by the frame loop.
// - **Translation before state**: raw Winit events pass through
//   `EventMapper` and only the closed core event set reaches
//   `InputState`.
// - **Reentrant present**: the OS may request a repaint between loop
//   iterations; `present()` is safe to call redundantly and skips while
//   no window or a zero-sized client area exists.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== Standard Library Imports ============================================

use std::num::NonZeroU32;
use std::sync::Arc;

//=== External Crates =====================================================

use log::{error, info, trace, warn};
use softbuffer::{Context, Surface};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::{FrameBuffer, InputEvent, InputState};
use event_mapper::EventMapper;

//=== Constants ===========================================================

/// Offset of the window from the screen origin.
const WINDOW_MARGIN: i32 = 20;

//=== PlatformConfig ======================================================

/// Fixed parameters of the window and back buffer.
///
/// Built by the frame-loop builder from compiled-in defaults; nothing
/// here changes after startup.
#[derive(Debug, Clone)]
pub(crate) struct PlatformConfig {
    /// Window title.
    pub title: String,

    /// Logical back-buffer width in pixels.
    pub width: u32,

    /// Logical back-buffer height in pixels.
    pub height: u32,

    /// Integer multiplier from logical to screen pixels.
    pub scale: u32,
}

impl PlatformConfig {
    /// Client-area size in screen pixels.
    fn client_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width * self.scale, self.height * self.scale)
    }
}

//=== PlatformError =======================================================

/// Fatal setup errors.
///
/// Any of these aborts before the frame loop is entered; there is no
/// retry and no degraded mode.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Failed to create the game window.
    WindowCreation(winit::error::OsError),

    /// Failed to bind the software presentation surface to the window.
    SurfaceCreation(softbuffer::SoftBufferError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::WindowCreation(e) => write!(f, "Unable to create game window: {}", e),
            Self::SurfaceCreation(e) => write!(f, "Unable to create presentation surface: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window, surface, back buffer and input state, bundled for the frame
/// loop.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config)` allocates the back
///    buffer at the fixed logical resolution; no window exists yet.
/// 2. **First pump**: Winit calls `resumed`, which creates the window
///    and binds the softbuffer surface. A creation failure is stored in
///    `setup_error` for the frame loop to pick up.
/// 3. **Steady state**: every pump routes messages into `InputState`
///    or the running flag; the loop presents once per frame, the OS may
///    request extra presents via `RedrawRequested`.
/// 4. **Shutdown**: close/destroy or an Escape / Alt+F4 edge clears the
///    running flag; the loop finishes its iteration and drops everything.
///
/// # Thread Safety
///
/// Not Send/Sync; lives on the thread that runs the event loop, which
/// also owns the message queue, buffer and input state. There is no
/// other thread.
pub(crate) struct Platform {
    config: PlatformConfig,

    /// OS window handle (None until `resumed` runs).
    window: Option<Arc<Window>>,

    /// Software presentation surface bound to the window.
    surface: Option<Surface<Arc<Window>, Arc<Window>>>,

    /// Keeps the softbuffer display context alive alongside the surface.
    _context: Option<Context<Arc<Window>>>,

    /// The off-screen back buffer game logic draws into.
    pub(crate) framebuffer: FrameBuffer,

    /// Input snapshot state fed by the message pump.
    pub(crate) input: InputState,

    /// Winit → core event translator (tracks Alt and the raw cursor).
    event_mapper: EventMapper,

    /// Cooperative termination flag, checked once per loop iteration.
    running: bool,

    /// Fatal window/surface creation failure, if any.
    setup_error: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform state and allocates the back buffer.
    ///
    /// Window creation is deferred to the first pump (`resumed`).
    pub(crate) fn new(config: PlatformConfig) -> Self {
        let framebuffer = FrameBuffer::new(config.width, config.height);
        info!(
            target: "platform",
            "Back buffer allocated: {}x{} ({} bytes/row)",
            config.width,
            config.height,
            framebuffer.pitch()
        );

        Self {
            config,
            window: None,
            surface: None,
            _context: None,
            framebuffer,
            input: InputState::new(),
            event_mapper: EventMapper::new(),
            running: true,
            setup_error: None,
        }
    }

    //--- Frame Protocol ---------------------------------------------------

    /// Marks the start of a message batch (rolls the click shadow).
    pub(crate) fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    /// Whether the loop should keep running.
    pub(crate) fn running(&self) -> bool {
        self.running
    }

    /// Takes the fatal setup error recorded during window creation.
    pub(crate) fn take_setup_error(&mut self) -> Option<PlatformError> {
        self.setup_error.take()
    }

    //--- Presentation -----------------------------------------------------

    /// Stretch-blits the back buffer into the current client area.
    ///
    /// Called once per loop iteration and again on OS repaint requests;
    /// redundant calls are harmless. Skips silently while the window
    /// does not exist yet or has a zero-sized client area. Surface
    /// errors carry no recovery semantics; they are logged and the next
    /// frame presents again.
    pub(crate) fn present(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        if let Err(e) = surface.resize(w, h) {
            warn!(target: "platform", "Surface resize failed, frame dropped: {}", e);
            return;
        }

        match surface.buffer_mut() {
            Ok(mut dest) => {
                self.framebuffer.blit_scaled(&mut dest, size.width, size.height);
                if let Err(e) = dest.present() {
                    warn!(target: "platform", "Present failed, frame dropped: {}", e);
                }
            }
            Err(e) => {
                warn!(target: "platform", "Surface lock failed, frame dropped: {}", e);
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Routes one translated core event: shutdown requests clear the
    /// running flag, everything else feeds the input state.
    fn dispatch(&mut self, event: InputEvent) {
        trace!(target: "platform::input", "Core event: {:?}", event);
        match event {
            InputEvent::ShutdownRequested => {
                info!(target: "platform", "Shutdown requested by input");
                self.running = false;
            }
            other => self.input.handle(other, self.config.scale as i32),
        }
    }

    /// Binds a softbuffer context and surface to a freshly created
    /// window.
    fn create_surface(
        window: &Arc<Window>,
    ) -> Result<(Context<Arc<Window>>, Surface<Arc<Window>, Arc<Window>>), PlatformError> {
        let context = Context::new(window.clone()).map_err(PlatformError::SurfaceCreation)?;
        let surface =
            Surface::new(&context, window.clone()).map_err(PlatformError::SurfaceCreation)?;
        Ok((context, surface))
    }

    //--- Test Accessors ---------------------------------------------------

    /// Feeds one core event as if the message pump had produced it.
    #[cfg(test)]
    pub(crate) fn inject_event(&mut self, event: InputEvent) {
        self.dispatch(event);
    }

    /// Records a fatal setup failure as if window creation had failed.
    #[cfg(test)]
    pub(crate) fn inject_setup_error(&mut self) {
        self.setup_error = Some(PlatformError::EventLoopCreation(
            winit::error::EventLoopError::RecreationAttempt,
        ));
        self.running = false;
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on startup.
    ///
    /// The client area is the logical resolution times the integer
    /// scale; OS chrome is the toolkit's concern. The window is
    /// fixed-size, visible, and offset slightly from the screen origin.
    /// Any failure is fatal: it is reported, recorded for the frame
    /// loop, and the event loop is told to exit before the first frame.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.client_size())
            .with_resizable(false)
            .with_position(PhysicalPosition::new(WINDOW_MARGIN, WINDOW_MARGIN));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                let err = PlatformError::WindowCreation(e);
                error!(target: "platform", "{}", err);
                self.setup_error = Some(err);
                self.running = false;
                event_loop.exit();
                return;
            }
        };

        match Self::create_surface(&window) {
            Ok((context, surface)) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} client area @ {}x scale",
                    window.inner_size().width,
                    window.inner_size().height,
                    self.config.scale
                );
                self._context = Some(context);
                self.surface = Some(surface);
                self.window = Some(window);
            }
            Err(err) => {
                error!(target: "platform", "{}", err);
                self.setup_error = Some(err);
                self.running = false;
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    ///
    /// Keyboard and mouse messages pass through the event mapper; the
    /// close signal clears the running flag; repaint requests re-present
    /// the current back buffer out-of-band. Everything else stays with
    /// Winit's default handling.
    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!(target: "platform", "Window close requested");
                self.running = false;
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.event_mapper.update_modifiers(mods.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    if let Some(core_event) =
                        self.event_mapper.map_key(code, key_event.state, key_event.repeat)
                    {
                        self.dispatch(core_event);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let core_event = self.event_mapper.map_cursor_moved(position.x, position.y);
                self.dispatch(core_event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(core_event) = self.event_mapper.map_mouse_button(button, state) {
                    self.dispatch(core_event);
                }
            }

            WindowEvent::RedrawRequested => {
                // OS repaint between loop iterations; same path as the
                // loop's own present, reading the fully-formed buffer.
                self.present();
            }

            _ => {
                // Focus changes included: input state is deliberately
                // not cleared on focus loss (documented gap).
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PlatformConfig {
        PlatformConfig {
            title: "test".to_string(),
            width: 800,
            height: 600,
            scale: 2,
        }
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn platform_starts_running_without_a_window() {
        let platform = Platform::new(test_config());
        assert!(platform.running(), "Running flag set before the loop");
        assert!(platform.window.is_none(), "Window is created on first pump");
    }

    #[test]
    fn back_buffer_allocated_at_logical_resolution() {
        let platform = Platform::new(test_config());
        assert_eq!(platform.framebuffer.width(), 800);
        assert_eq!(platform.framebuffer.height(), 600);
        assert_eq!(platform.framebuffer.pixels().len(), 800 * 600);
    }

    #[test]
    fn client_size_is_logical_times_scale() {
        let config = test_config();
        assert_eq!(config.client_size(), PhysicalSize::new(1600, 1200));
    }

    //--- Event Routing ----------------------------------------------------

    #[test]
    fn shutdown_event_clears_running_flag() {
        let mut platform = Platform::new(test_config());
        platform.dispatch(InputEvent::ShutdownRequested);
        assert!(!platform.running());
    }

    #[test]
    fn input_events_reach_the_input_state() {
        let mut platform = Platform::new(test_config());
        platform.begin_frame();
        platform.dispatch(InputEvent::PointerMoved { x: 801, y: 599 });
        platform.dispatch(InputEvent::Digit(3));

        let snapshot = platform.input.snapshot(0.0);
        assert_eq!((snapshot.x, snapshot.y), (400, 299));
        assert_eq!(snapshot.number, 3);
        assert!(platform.running(), "Plain input does not stop the loop");
    }

    //--- Presentation -----------------------------------------------------

    #[test]
    fn present_without_window_is_a_noop() {
        let mut platform = Platform::new(test_config());
        platform.present();
        platform.present();
        assert!(platform.running());
    }

    //--- Errors -----------------------------------------------------------

    #[test]
    fn platform_error_implements_error_and_display() {
        fn assert_error<T: std::error::Error>() {}
        fn assert_display<T: std::fmt::Display>() {}
        assert_error::<PlatformError>();
        assert_display::<PlatformError>();
    }

    #[test]
    fn setup_error_is_taken_once() {
        let mut platform = Platform::new(test_config());
        assert!(platform.take_setup_error().is_none());
    }
}
