//! Abstraction traits for the board collaborators the protocol core drives
//! (clock calibration, PWM register access, reboot requests, transport, and
//! firmware version).
pub mod clock_source;
pub mod pwm_io;
pub mod reboot;
pub mod transport;
pub mod version;
