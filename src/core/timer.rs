//=========================================================================
// Frame Timer
//
// Wall-clock interval measurement for the frame loop.
//
// Wraps the platform's monotonic high-resolution clock behind a tiny,
// testable surface: take a timestamp, subtract two timestamps, convert
// the span to seconds. Nothing here touches any other engine state.
//
// Responsibilities:
// - Provide opaque monotonic timestamps (`TimePoint`)
// - Measure the span between two timestamps (`elapsed`)
// - Convert spans to `f64` seconds (`to_seconds`)
//
// Notes:
// The clock's resolution is whatever the OS offers (QPC on Windows,
// CLOCK_MONOTONIC elsewhere); the conversion to seconds is exact up to
// that resolution and linear in the raw span.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== Timestamp Types =====================================================

/// Opaque monotonic timestamp.
///
/// Only meaningful relative to another `TimePoint` from the same process.
pub type TimePoint = Instant;

/// Span between two timestamps.
pub type TimeSpan = Duration;

//=== Timing Functions ====================================================

/// Returns the current monotonic timestamp.
pub fn now() -> TimePoint {
    Instant::now()
}

/// Returns the span `b - a`.
///
/// Timestamps are always taken in increasing wall-clock order during the
/// frame loop; if `b` nevertheless precedes `a`, the span saturates to
/// zero rather than going negative.
pub fn elapsed(a: TimePoint, b: TimePoint) -> TimeSpan {
    b.duration_since(a)
}

/// Converts a span to seconds.
pub fn to_seconds(span: TimeSpan) -> f64 {
    span.as_secs_f64()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_back_elapsed_is_non_negative() {
        let a = now();
        let b = now();
        let secs = to_seconds(elapsed(a, b));
        assert!(secs >= 0.0);
    }

    #[test]
    fn reversed_order_saturates_to_zero() {
        let a = now();
        std::thread::sleep(Duration::from_millis(1));
        let b = now();
        assert_eq!(elapsed(b, a), Duration::ZERO);
    }

    #[test]
    fn to_seconds_is_linear() {
        let span = Duration::from_micros(12_345);
        let doubled = span * 2;
        assert_eq!(to_seconds(doubled), to_seconds(span) * 2.0);
    }

    #[test]
    fn to_seconds_zero_span() {
        assert_eq!(to_seconds(Duration::ZERO), 0.0);
    }

    #[test]
    fn to_seconds_known_value() {
        assert_eq!(to_seconds(Duration::from_millis(250)), 0.25);
    }

    #[test]
    fn sleep_is_measured() {
        let a = now();
        std::thread::sleep(Duration::from_millis(5));
        let b = now();
        assert!(to_seconds(elapsed(a, b)) >= 0.005);
    }
}
