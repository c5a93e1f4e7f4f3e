//! Error definitions shared across library modules.
//! Only link-plumbing failures live here; a rejected command or payload is a
//! protocol [`ResponseCode`](crate::protocol::wire::ResponseCode) answered to
//! the host, never a Rust error.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur while configuring the packet receiver.
pub enum ReceiverInitError {
    /// The calibrated tick duration is zero, negative, or not finite; the
    /// inactivity timeout would be meaningless.
    #[error("Tick duration must be a positive, finite number of milliseconds")]
    InvalidTickDuration,
    /// A zero byte-timeout would drop every partial frame on the first tick.
    #[error("Byte timeout must be non-zero")]
    ZeroByteTimeout,
}

#[derive(Error, Debug)]
/// Errors surfaced by the link supervisor loop.
pub enum LinkRunError<E: core::fmt::Debug> {
    /// Transport refused or failed to send a framed response.
    #[error("Transport send error: {0:?}")]
    Send(E),
}
