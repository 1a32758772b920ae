//=========================================================================
// Input State
//
// Double-buffered snapshot of keyboard/mouse state with edge detection.
//
// The platform layer translates raw OS messages into the small closed
// set of core events below and feeds them in here while it drains the
// message queue. Game logic never sees this mutable state; it receives
// an immutable `FrameInput` copy once per frame.
//
// Responsibilities:
// - Latch digit and function-key presses for exactly one frame
// - Track the cursor in logical (unscaled) pixel coordinates
// - Track the left button with a one-frame-delayed shadow (`last_click`)
// - Produce the per-frame `FrameInput` snapshot
//
// Frame protocol (driven by the frame loop):
//   begin_frame() → handle(..) per drained event → snapshot(dt)
//   → game update → end_frame()
//
// Latch state machine for `number` / `function_key`:
//   Idle → Latched   on a key-down edge
//   Latched → Idle   unconditionally at end of the frame that read it
//
// A press landing between `end_frame` of frame N and the message drain
// of frame N+1 is visible exactly once, in frame N+1. Holding the key
// never re-latches: the platform only forwards down-edges.
//
// Known gap: state is not cleared on focus loss, so a key held across a
// focus round-trip can leave a stale edge.
//
//=========================================================================

//=== External Crates =====================================================

use log::trace;

//=== InputEvent ==========================================================

/// Closed set of core events the platform layer produces from raw OS
/// messages.
///
/// Everything OS-specific (virtual key codes, repeat flags, modifier
/// bookkeeping) is resolved before one of these is built; by this point
/// key events are down-edges only. Pointer coordinates are still raw
/// screen pixels; `InputState::handle` maps them to logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    /// Escape or Alt+F4 down-edge, or a window close/destroy message.
    /// Routed to the running flag by the platform, not stored here.
    ShutdownRequested,

    /// Function key down-edge, value 1..=12.
    FunctionKey(i32),

    /// Digit key down-edge, value 0..=9.
    Digit(i32),

    /// Cursor moved, raw screen coordinates.
    PointerMoved { x: i32, y: i32 },

    /// Left button pressed, raw screen coordinates.
    PointerPressed { x: i32, y: i32 },

    /// Left button released, raw screen coordinates.
    PointerReleased { x: i32, y: i32 },
}

//=== InputState ==========================================================

/// Process-wide input state, one instance per frame loop.
pub(crate) struct InputState {
    /// Digit pressed this frame; -1 = none, else 0..=9.
    number: i32,

    /// Function key pressed this frame; 0 = none, else 1..=12.
    function_key: i32,

    /// Cursor position in logical pixels.
    x: i32,
    y: i32,

    /// Current left-button-down state.
    click: bool,

    /// `click` as of the previous frame's message batch.
    last_click: bool,
}

impl InputState {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            number: -1,
            function_key: 0,
            x: 0,
            y: 0,
            click: false,
            last_click: false,
        }
    }

    //--- Frame Protocol ---------------------------------------------------

    /// Rolls the click shadow forward.
    ///
    /// Called once per drained-message batch, before any message of that
    /// batch is handled, so every message in the batch shares the same
    /// `last_click` transition.
    pub(crate) fn begin_frame(&mut self) {
        self.last_click = self.click;
    }

    /// Applies one translated core event.
    ///
    /// Raw pointer coordinates become logical coordinates by truncating
    /// integer division with the display scale factor.
    pub(crate) fn handle(&mut self, event: InputEvent, scale: i32) {
        match event {
            InputEvent::FunctionKey(index) => {
                trace!(target: "input", "Function key latched: F{}", index);
                self.function_key = index;
            }

            InputEvent::Digit(value) => {
                trace!(target: "input", "Digit latched: {}", value);
                self.number = value;
            }

            InputEvent::PointerMoved { x, y } => {
                self.x = x / scale;
                self.y = y / scale;
            }

            InputEvent::PointerPressed { x, y } => {
                self.click = true;
                self.x = x / scale;
                self.y = y / scale;
            }

            InputEvent::PointerReleased { x, y } => {
                self.click = false;
                self.x = x / scale;
                self.y = y / scale;
            }

            // The platform layer turns this into the running flag before
            // it ever reaches the input state.
            InputEvent::ShutdownRequested => {}
        }
    }

    /// Clears the one-frame key latches.
    ///
    /// Called after the game-logic update returns, guaranteeing
    /// single-frame visibility of a press however long the key is held.
    pub(crate) fn end_frame(&mut self) {
        self.number = -1;
        self.function_key = 0;
    }

    //--- Snapshot ---------------------------------------------------------

    /// Produces the immutable per-frame copy handed to game logic.
    pub(crate) fn snapshot(&self, dt: f64) -> FrameInput {
        FrameInput {
            number: self.number,
            function_key: self.function_key,
            x: self.x,
            y: self.y,
            click: self.click,
            last_click: self.last_click,
            dt,
        }
    }
}

//=== FrameInput ==========================================================

/// Immutable input snapshot for one frame.
///
/// Built by the frame loop after the message drain and passed by
/// reference into `Game::update` together with the frame buffer. Lives
/// only for the duration of that call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Digit pressed this frame; -1 = none, else 0..=9.
    pub number: i32,

    /// Function key pressed this frame; 0 = none, else 1..=12.
    pub function_key: i32,

    /// Cursor x in logical pixels.
    pub x: i32,

    /// Cursor y in logical pixels.
    pub y: i32,

    /// Left button currently down.
    pub click: bool,

    /// Left button state as of the previous frame.
    pub last_click: bool,

    /// Seconds elapsed since the previous frame.
    pub dt: f64,
}

impl FrameInput {
    /// Down-edge: the button went down during this frame's batch.
    pub fn clicked(&self) -> bool {
        self.click && !self.last_click
    }

    /// Up-edge: the button went up during this frame's batch.
    pub fn released(&self) -> bool {
        !self.click && self.last_click
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs one frame of the loop's input protocol and returns the
    /// snapshot game logic would have seen.
    fn run_frame(state: &mut InputState, events: &[InputEvent], scale: i32) -> FrameInput {
        state.begin_frame();
        for &event in events {
            state.handle(event, scale);
        }
        let snapshot = state.snapshot(0.016);
        state.end_frame();
        snapshot
    }

    //--- Initial State ----------------------------------------------------

    #[test]
    fn starts_with_nothing_latched() {
        let state = InputState::new();
        let snapshot = state.snapshot(0.0);
        assert_eq!(snapshot.number, -1);
        assert_eq!(snapshot.function_key, 0);
        assert!(!snapshot.click && !snapshot.last_click);
        assert_eq!((snapshot.x, snapshot.y), (0, 0));
    }

    //--- Edge-Triggered Latches -------------------------------------------

    #[test]
    fn digit_visible_exactly_one_frame() {
        let mut state = InputState::new();

        let frame1 = run_frame(&mut state, &[InputEvent::Digit(7)], 2);
        assert_eq!(frame1.number, 7);

        // Key physically held: the platform forwards no further edges.
        let frame2 = run_frame(&mut state, &[], 2);
        assert_eq!(frame2.number, -1);

        let frame3 = run_frame(&mut state, &[], 2);
        assert_eq!(frame3.number, -1);
    }

    #[test]
    fn function_key_visible_exactly_one_frame() {
        let mut state = InputState::new();

        let frame1 = run_frame(&mut state, &[InputEvent::FunctionKey(12)], 2);
        assert_eq!(frame1.function_key, 12);

        let frame2 = run_frame(&mut state, &[], 2);
        assert_eq!(frame2.function_key, 0);
    }

    #[test]
    fn press_between_frames_lands_in_next_frame_only() {
        let mut state = InputState::new();

        let frame1 = run_frame(&mut state, &[], 2);
        assert_eq!(frame1.number, -1);

        // Down-edge arrives with frame 2's batch.
        let frame2 = run_frame(&mut state, &[InputEvent::Digit(0)], 2);
        assert_eq!(frame2.number, 0);

        let frame3 = run_frame(&mut state, &[], 2);
        assert_eq!(frame3.number, -1);
    }

    #[test]
    fn latest_edge_in_batch_wins() {
        let mut state = InputState::new();
        let frame = run_frame(&mut state, &[InputEvent::Digit(1), InputEvent::Digit(9)], 2);
        assert_eq!(frame.number, 9);
    }

    //--- Pointer Scaling --------------------------------------------------

    #[test]
    fn pointer_coordinates_divide_by_scale() {
        let mut state = InputState::new();
        let frame = run_frame(
            &mut state,
            &[InputEvent::PointerMoved { x: 801, y: 599 }],
            2,
        );
        assert_eq!((frame.x, frame.y), (400, 299));
    }

    #[test]
    fn pointer_division_truncates_toward_zero() {
        let mut state = InputState::new();
        let frame = run_frame(
            &mut state,
            &[InputEvent::PointerMoved { x: -3, y: 7 }],
            2,
        );
        assert_eq!((frame.x, frame.y), (-1, 3));
    }

    #[test]
    fn scale_one_passes_coordinates_through() {
        let mut state = InputState::new();
        let frame = run_frame(
            &mut state,
            &[InputEvent::PointerMoved { x: 123, y: 456 }],
            1,
        );
        assert_eq!((frame.x, frame.y), (123, 456));
    }

    #[test]
    fn button_events_update_position_too() {
        let mut state = InputState::new();
        let frame = run_frame(
            &mut state,
            &[InputEvent::PointerPressed { x: 100, y: 50 }],
            2,
        );
        assert_eq!((frame.x, frame.y), (50, 25));
        assert!(frame.click);
    }

    //--- Click Double-Buffering -------------------------------------------

    #[test]
    fn last_click_lags_click_by_one_frame() {
        let mut state = InputState::new();

        let frame1 = run_frame(&mut state, &[InputEvent::PointerPressed { x: 0, y: 0 }], 1);
        assert!(frame1.click);
        assert!(!frame1.last_click, "last_click reflects the previous batch");

        let frame2 = run_frame(&mut state, &[], 1);
        assert!(frame2.click && frame2.last_click);

        let frame3 = run_frame(&mut state, &[InputEvent::PointerReleased { x: 0, y: 0 }], 1);
        assert!(!frame3.click && frame3.last_click);

        let frame4 = run_frame(&mut state, &[], 1);
        assert!(!frame4.click && !frame4.last_click);
    }

    #[test]
    fn last_click_shared_across_one_batch() {
        let mut state = InputState::new();

        // Press and release inside a single drained batch: last_click
        // keeps the pre-batch value for both messages.
        let frame = run_frame(
            &mut state,
            &[
                InputEvent::PointerPressed { x: 0, y: 0 },
                InputEvent::PointerReleased { x: 0, y: 0 },
            ],
            1,
        );
        assert!(!frame.click);
        assert!(!frame.last_click);
    }

    #[test]
    fn click_edge_helpers() {
        let mut state = InputState::new();

        let down = run_frame(&mut state, &[InputEvent::PointerPressed { x: 0, y: 0 }], 1);
        assert!(down.clicked() && !down.released());

        let held = run_frame(&mut state, &[], 1);
        assert!(!held.clicked() && !held.released());

        let up = run_frame(&mut state, &[InputEvent::PointerReleased { x: 0, y: 0 }], 1);
        assert!(!up.clicked() && up.released());
    }

    //--- Shutdown Routing -------------------------------------------------

    #[test]
    fn shutdown_request_does_not_disturb_state() {
        let mut state = InputState::new();
        let frame = run_frame(
            &mut state,
            &[
                InputEvent::Digit(3),
                InputEvent::ShutdownRequested,
            ],
            2,
        );
        assert_eq!(frame.number, 3);
    }

    //--- Snapshot ---------------------------------------------------------

    #[test]
    fn snapshot_carries_dt() {
        let state = InputState::new();
        let snapshot = state.snapshot(0.25);
        assert_eq!(snapshot.dt, 0.25);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut state = InputState::new();
        state.begin_frame();
        state.handle(InputEvent::Digit(5), 1);
        let snapshot = state.snapshot(0.0);
        state.end_frame();

        // Clearing the latch does not touch the snapshot.
        assert_eq!(snapshot.number, 5);
        assert_eq!(state.snapshot(0.0).number, -1);
    }
}
