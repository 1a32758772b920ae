//=========================================================================
// Game Collaborator Boundary
//
// The trait the frame loop calls into each frame. The platform layer
// treats game logic as an opaque capability: it owns the window, buffer
// and input state, and lends the game a mutable buffer plus an immutable
// input snapshot once per frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::framebuffer::FrameBuffer;
use crate::core::input::FrameInput;

//=== Game Trait ==========================================================

/// Game-logic collaborator driven by [`FrameLoop`](crate::FrameLoop).
///
/// # Lifecycle guarantees
///
/// - `startup` is called exactly once, before any `update`.
/// - `update` is called once per frame with a fully valid buffer and a
///   frame-accurate input snapshot. The game writes pixels and reads
///   input; it owns neither.
/// - `teardown` is called exactly once after the last `update`, even
///   when the loop ends via a window close signal or a fatal setup
///   error aborts before the first frame.
///
/// # Minimal Implementation
///
/// Only `update()` is required; the lifecycle hooks default to no-ops:
///
/// ```rust
/// use epyk_frame::prelude::*;
///
/// struct Clear;
///
/// impl Game for Clear {
///     fn update(&mut self, buffer: &mut FrameBuffer, _input: &FrameInput) {
///         buffer.pixels_mut().fill(0x0020_2040);
///     }
/// }
/// ```
pub trait Game {
    /// Called once before the first frame.
    ///
    /// Default implementation does nothing. Override to initialize game
    /// state.
    fn startup(&mut self) {}

    /// Called once per frame: read `input`, write `buffer`.
    fn update(&mut self, buffer: &mut FrameBuffer, input: &FrameInput);

    /// Called once after the last frame.
    ///
    /// Default implementation does nothing. Override to release game
    /// state.
    fn teardown(&mut self) {}
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingGame {
        startups: u32,
        updates: u32,
        teardowns: u32,
    }

    impl Game for CountingGame {
        fn startup(&mut self) {
            self.startups += 1;
        }

        fn update(&mut self, buffer: &mut FrameBuffer, input: &FrameInput) {
            self.updates += 1;
            buffer.pixels_mut()[0] = input.number as u32;
        }

        fn teardown(&mut self) {
            self.teardowns += 1;
        }
    }

    struct MinimalGame;

    impl Game for MinimalGame {
        fn update(&mut self, _buffer: &mut FrameBuffer, _input: &FrameInput) {}
    }

    fn frame_input() -> FrameInput {
        FrameInput {
            number: 4,
            function_key: 0,
            x: 0,
            y: 0,
            click: false,
            last_click: false,
            dt: 0.016,
        }
    }

    #[test]
    fn lifecycle_hooks_default_to_noops() {
        let mut game = MinimalGame;
        game.startup();
        game.teardown();
    }

    #[test]
    fn update_receives_buffer_and_input() {
        let mut game = CountingGame { startups: 0, updates: 0, teardowns: 0 };
        let mut buffer = FrameBuffer::new(4, 4);

        game.startup();
        game.update(&mut buffer, &frame_input());
        game.teardown();

        assert_eq!((game.startups, game.updates, game.teardowns), (1, 1, 1));
        assert_eq!(buffer.pixels()[0], 4);
    }

    #[test]
    fn game_is_object_safe() {
        let mut game: Box<dyn Game> = Box::new(MinimalGame);
        let mut buffer = FrameBuffer::new(1, 1);
        game.update(&mut buffer, &frame_input());
    }
}
