//=========================================================================
// Epyk Frame — Library Root
//
// Platform layer for a fixed-resolution 2D game: the native window, an
// off-screen pixel buffer, input capture, and the frame loop that hands
// control to a game-logic collaborator once per frame.
//
// Responsibilities:
// - Expose the frame-loop entry point (`FrameLoop` / `FrameLoopBuilder`)
// - Expose the per-frame contract (`Game`, `FrameBuffer`, `FrameInput`)
// - Keep OS integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use epyk_frame::prelude::*;
//
// struct MyGame;
//
// impl Game for MyGame {
//     fn update(&mut self, buffer: &mut FrameBuffer, input: &FrameInput) {
//         if input.clicked() {
//             // react to the click at (input.x, input.y)
//         }
//         buffer.pixels_mut().fill(0x0010_1020);
//     }
// }
//
// fn main() {
//     FrameLoopBuilder::new().build().run(MyGame).unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the platform-independent pieces: the frame buffer,
// input snapshot machinery, timer, and the `Game` collaborator trait.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// software presentation surface) and is kept private; `engine` holds the
// frame loop that drives it.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------
//
// Applications construct a loop via `FrameLoopBuilder`, hand it a `Game`
// and block in `run` until shutdown.
//
pub use engine::{FrameLoop, FrameLoopBuilder};
pub use engine::{DEFAULT_HEIGHT, DEFAULT_SCALE, DEFAULT_TITLE, DEFAULT_WIDTH};
pub use platform::PlatformError;
