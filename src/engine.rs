//=========================================================================
// Frame Loop
//
// Entry point and per-frame orchestrator of the platform layer.
//
// Architecture:
// ```text
//     FrameLoopBuilder  ──build()──>  FrameLoop  ──run(game)──>
//         │                              │
//         ├─ with_title()                ├─ Game::startup()      once
//         ├─ with_resolution()           ├─ frame loop           until flag clears
//         └─ with_scale()                └─ Game::teardown()     once, always
// ```
//
// Loop states: Initializing → Running → ShuttingDown → Terminated.
//
// Each Running iteration:
//   begin_frame → pump OS messages → dt from timer → FrameInput snapshot
//   → Game::update(buffer, input) → end_frame → present → check flag
//
// Once the running flag clears (close signal or Escape / Alt+F4 edge),
// the iteration in progress still completes its present before the loop
// exits. Frame pacing is unbounded: no vsync, no sleep, no cap.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use log::info;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::EventLoopExtPumpEvents;

//=== Internal Dependencies ===============================================

use crate::core::{timer, Game};
use crate::platform::{Platform, PlatformConfig, PlatformError};

//=== Compiled-In Defaults ================================================

/// Default logical back-buffer width.
pub const DEFAULT_WIDTH: u32 = 800;

/// Default logical back-buffer height.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default logical-to-screen scale factor.
pub const DEFAULT_SCALE: u32 = 2;

/// Default window title.
pub const DEFAULT_TITLE: &str = "2D Game Engine";

//=== FrameLoopBuilder ====================================================

/// Builder for configuring and constructing a [`FrameLoop`].
///
/// There are no command-line flags; the defaults are the compiled-in
/// constants (800×600 logical pixels at 2× scale).
///
/// # Examples
///
/// ```no_run
/// use epyk_frame::prelude::*;
///
/// struct MyGame;
/// impl Game for MyGame {
///     fn update(&mut self, buffer: &mut FrameBuffer, _input: &FrameInput) {
///         buffer.pixels_mut().fill(0);
///     }
/// }
///
/// FrameLoopBuilder::new()
///     .with_title("My Game")
///     .with_resolution(320, 240)
///     .with_scale(3)
///     .build()
///     .run(MyGame)
///     .unwrap();
/// ```
pub struct FrameLoopBuilder {
    title: String,
    width: u32,
    height: u32,
    scale: u32,
}

impl FrameLoopBuilder {
    /// Creates a builder with the compiled-in defaults.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the fixed logical resolution of the back buffer.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Resolution must be non-zero, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the integer multiplier from logical to screen pixels.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is zero.
    pub fn with_scale(mut self, scale: u32) -> Self {
        assert!(scale > 0, "Scale factor must be non-zero");
        self.scale = scale;
        self
    }

    /// Builds the frame loop.
    pub fn build(self) -> FrameLoop {
        info!(
            "Building frame loop ({}x{} @ {}x, \"{}\")",
            self.width, self.height, self.scale, self.title
        );

        FrameLoop {
            config: PlatformConfig {
                title: self.title,
                width: self.width,
                height: self.height,
                scale: self.scale,
            },
        }
    }
}

impl Default for FrameLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== FrameLoop ===========================================================

/// Fixed-cadence update/render loop over the platform layer.
///
/// Owns the window, back buffer and input state for the duration of
/// [`run`](FrameLoop::run) and hands control to the [`Game`]
/// collaborator once per frame.
pub struct FrameLoop {
    config: PlatformConfig,
}

impl FrameLoop {
    //--- Execution --------------------------------------------------------

    /// Runs the loop to completion, blocking until shutdown.
    ///
    /// # Lifecycle
    ///
    /// 1. `Game::startup` — exactly once, before anything platform-side.
    /// 2. Event loop + window + back buffer come up; a failure here is
    ///    fatal and skips straight to teardown.
    /// 3. Frames run until the running flag clears.
    /// 4. `Game::teardown` — exactly once, on every path out.
    ///
    /// Returns `Ok(())` on normal shutdown. A [`PlatformError`] has
    /// already been reported via the log by the time it is returned.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (event-loop requirement on
    /// some platforms).
    pub fn run<G: Game>(self, mut game: G) -> Result<(), PlatformError> {
        info!(
            "Starting frame loop ({}x{} @ {}x)",
            self.config.width, self.config.height, self.config.scale
        );

        game.startup();
        let result = Self::drive(self.config, &mut game);
        game.teardown();

        match &result {
            Ok(()) => info!("Frame loop shut down cleanly"),
            Err(e) => info!("Frame loop aborted: {}", e),
        }
        result
    }

    //--- Internal Helpers -------------------------------------------------

    /// Creates the platform and spins frames until the flag clears.
    fn drive<G: Game>(config: PlatformConfig, game: &mut G) -> Result<(), PlatformError> {
        let mut event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        let mut platform = Platform::new(config);
        let mut last = timer::now();

        loop {
            let keep_running = Self::run_frame(&mut platform, game, &mut last, |p| {
                let _ = event_loop.pump_app_events(Some(Duration::ZERO), p);
            })?;

            if !keep_running {
                break;
            }
        }

        Ok(())
    }

    /// One Running-state iteration.
    ///
    /// `pump` drains the OS message queue into the platform; it is a
    /// parameter so the frame protocol can be exercised with scripted
    /// event batches. Returns whether the loop should continue; a fatal
    /// setup failure recorded during the pump aborts before game logic
    /// ever runs.
    fn run_frame<G: Game>(
        platform: &mut Platform,
        game: &mut G,
        last: &mut timer::TimePoint,
        pump: impl FnOnce(&mut Platform),
    ) -> Result<bool, PlatformError> {
        platform.begin_frame();
        pump(platform);

        if let Some(err) = platform.take_setup_error() {
            return Err(err);
        }

        let now = timer::now();
        let dt = timer::to_seconds(timer::elapsed(*last, now));
        *last = now;

        let input = platform.input.snapshot(dt);
        game.update(&mut platform.framebuffer, &input);
        platform.input.end_frame();

        // Present runs even on the final iteration: the flag is only
        // checked by the caller after this frame is on screen.
        platform.present();

        Ok(platform.running())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
