//! Calibrated timer-tick duration, queried once when the link is set up.

/// Source of the duration, in milliseconds, represented by one periodic
/// timer tick. Must be queried after clock calibration; the byte-timeout
/// conversion is meaningless otherwise.
pub trait ClockSource {
    /// Milliseconds per timer tick.
    fn millis_per_tick(&self) -> f32;
}
