//! Link layer of the host protocol: byte-at-a-time packet reception with
//! inactivity timeout, response framing into a reusable transmit buffer, and
//! the event-queue supervisor that serializes byte and tick events.
//!
//! ## Link Timing Constants
//!
//! These constants define the timeout that bounds how long a partial frame
//! may sit in the receiver before being dropped.

pub mod encoder;
pub mod receiver;
pub mod supervisor;

/// How many milliseconds the receiver waits between bytes of a frame before
/// dropping the partial reception and returning to the hunt for a start
/// marker.
///
/// The host is never notified of a drop; it must detect the missing reply
/// itself and resend.
///
/// # Recommended Values
///
/// - **500 ms**: Default. Generous enough that a human typing frames into a
///   terminal does not time out between keystrokes.
/// - **50 ms**: Tight bound for machine-driven hosts on a reliable link.
pub const BYTE_TIMEOUT_MS: u32 = 500;
