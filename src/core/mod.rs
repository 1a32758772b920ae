//=========================================================================
// Core Types
//
// Platform-independent building blocks of the frame loop: the off-screen
// pixel buffer, the input snapshot machinery, the monotonic timer and
// the game-collaborator boundary. Nothing in here touches the OS; the
// `platform` module feeds these types, and `engine` orchestrates them.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod framebuffer;
pub mod game;
pub mod input;
pub mod timer;

//=== Public API ==========================================================

pub use framebuffer::FrameBuffer;
pub use game::Game;
pub use input::FrameInput;

//=== Crate-Internal API ==================================================

pub(crate) use input::{InputEvent, InputState};
