//=========================================================================
// Platform Event Mapper
//
// Converts Winit input events into the engine's closed core event set
// (`InputEvent`). Provides a clean separation between OS-specific input
// and the internal representation consumed by the input state.
//
// Responsibilities:
// - Detect key down-transitions (pressed and not an OS repeat)
// - Map Escape / Alt+F4 to a shutdown request
// - Map F1..F12 and the digit row to their latch values
// - Track the Alt modifier statefully across events (sticky modifiers)
// - Track the last raw cursor position, because Winit button events
//   carry no coordinates of their own
// - Ignore everything else (key releases, repeats, unmapped keys,
//   non-left buttons)
//
// Coordinates leaving the mapper are raw window pixels; the input state
// performs the scale division into logical pixels.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState},
};

//=== Internal Dependencies ===============================================

use crate::core::InputEvent;

//=== EventMapper =========================================================

/// Stateful Winit → core event translator.
///
/// One instance lives inside the platform for the window's lifetime.
pub(crate) struct EventMapper {
    /// Alt currently held, from the most recent `ModifiersChanged`.
    alt_down: bool,

    /// Last raw cursor position seen, in window pixels.
    cursor: (i32, i32),
}

impl EventMapper {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            alt_down: false,
            cursor: (0, 0),
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates the cached Alt state (applied to subsequent key events).
    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.alt_down = state.alt_key();
    }

    //--- Keyboard ---------------------------------------------------------

    /// Translates one keyboard event.
    ///
    /// Only down-transitions produce events: `repeat` is the OS telling
    /// us the key was already down. Key releases and keys outside the
    /// mapped set produce `None` and fall through to default handling.
    pub(crate) fn map_key(
        &self,
        code: WinitKeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        if matches!(code, WinitKeyCode::Escape) {
            return Some(InputEvent::ShutdownRequested);
        }
        if matches!(code, WinitKeyCode::F4) && self.alt_down {
            return Some(InputEvent::ShutdownRequested);
        }

        if let Some(index) = function_key_index(code) {
            return Some(InputEvent::FunctionKey(index));
        }
        if let Some(value) = digit_value(code) {
            return Some(InputEvent::Digit(value));
        }

        None
    }

    //--- Pointer ----------------------------------------------------------

    /// Translates a cursor move, remembering the raw position for later
    /// button events.
    pub(crate) fn map_cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = (x as i32, y as i32);
        InputEvent::PointerMoved {
            x: self.cursor.0,
            y: self.cursor.1,
        }
    }

    /// Translates a mouse button event at the last known cursor
    /// position. Only the left button participates; others are ignored.
    pub(crate) fn map_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<InputEvent> {
        if button != WinitMouseButton::Left {
            return None;
        }

        let (x, y) = self.cursor;
        match state {
            ElementState::Pressed => Some(InputEvent::PointerPressed { x, y }),
            ElementState::Released => Some(InputEvent::PointerReleased { x, y }),
        }
    }
}

//=== Key Tables ==========================================================

/// F1..F12 → 1..=12; everything else → None.
fn function_key_index(code: WinitKeyCode) -> Option<i32> {
    use WinitKeyCode::*;
    match code {
        F1 => Some(1),
        F2 => Some(2),
        F3 => Some(3),
        F4 => Some(4),
        F5 => Some(5),
        F6 => Some(6),
        F7 => Some(7),
        F8 => Some(8),
        F9 => Some(9),
        F10 => Some(10),
        F11 => Some(11),
        F12 => Some(12),
        _ => None,
    }
}

/// Digit row 0..9 → 0..=9; everything else → None.
fn digit_value(code: WinitKeyCode) -> Option<i32> {
    use WinitKeyCode::*;
    match code {
        Digit0 => Some(0),
        Digit1 => Some(1),
        Digit2 => Some(2),
        Digit3 => Some(3),
        Digit4 => Some(4),
        Digit5 => Some(5),
        Digit6 => Some(6),
        Digit7 => Some(7),
        Digit8 => Some(8),
        Digit9 => Some(9),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
