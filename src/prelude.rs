//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use epyk_frame::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Frame loop entry point
pub use crate::engine::{FrameLoop, FrameLoopBuilder};

// Per-frame contract
pub use crate::core::{FrameBuffer, FrameInput, Game};

// Timing helpers
pub use crate::core::timer;

// Fatal setup errors
pub use crate::platform::PlatformError;
