//! Speed dial normalization.
//!
//! Users describe how fast the bar fills with an intuitive dial where `1` is
//! the slowest and `100` the fastest. The progress timer, on the other hand,
//! needs an interval where smaller means faster. [`normalize`] maps one onto
//! the other:
//!
//! ```text
//! interval_ms = if speed is truthy { |speed - 100| } else { 25 }
//! ```
//!
//! A speed of exactly `100` yields a zero interval, so the bar ticks as fast
//! as the runtime schedules commands. Zero and NaN both count as unset and
//! fall back to the 25ms default.
//!
//! ```rust
//! use candy_progress::speed::{interval_millis, normalize};
//! use std::time::Duration;
//!
//! assert_eq!(interval_millis(75.0), 25.0);
//! assert_eq!(normalize(100.0), Duration::ZERO);
//! assert_eq!(normalize(0.0), Duration::from_millis(25));
//! ```

use std::time::Duration;

/// Speed used when none is configured.
pub const DEFAULT_SPEED: f64 = 75.0;

/// Interval used when the speed is zero or NaN.
pub const FALLBACK_INTERVAL_MS: f64 = 25.0;

// Host timers store delays as a signed 32-bit millisecond count.
const MAX_INTERVAL_MS: f64 = i32::MAX as f64;

/// Returns the tick interval, in milliseconds, for a speed dial value.
pub fn interval_millis(speed: f64) -> f64 {
    if speed == 0.0 || speed.is_nan() {
        return FALLBACK_INTERVAL_MS;
    }
    (speed - 100.0).abs()
}

/// Returns the tick interval for a speed dial value as a [`Duration`].
///
/// Intervals beyond `i32::MAX` milliseconds (including an infinite speed)
/// saturate at that bound.
pub fn normalize(speed: f64) -> Duration {
    let millis = interval_millis(speed).min(MAX_INTERVAL_MS);
    Duration::from_nanos((millis * 1_000_000.0).round() as u64)
}
