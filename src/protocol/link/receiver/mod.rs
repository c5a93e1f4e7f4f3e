//! Packet reception state machine: consumes one received byte or one timer
//! tick at a time and yields a complete [`Packet`] when a well-formed frame
//! closes.
//!
//! Bytes before the start marker are link noise and are silently ignored.
//! Payload bytes past capacity are silently dropped, not rejected: a too-long
//! payload still frames and is passed on for content validation downstream.
//! A stalled frame is dropped after the inactivity timeout with no
//! notification.
use crate::error::ReceiverInitError;
use crate::protocol::wire::{Packet, Payload, END_MARKER, START_MARKER};

//==================================================================================Enums and Structs

/// What the receiver expects next. The machine is cyclic: closing or dropping
/// a frame always returns to [`ReceiveState::AwaitingStart`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ReceiveState {
    /// Hunting for the start marker; everything else is discarded.
    AwaitingStart,
    /// Start marker seen; the next byte is stored as the command.
    AwaitingCommand,
    /// Accumulating payload bytes until the end marker closes the frame.
    AwaitingPayloadOrEnd,
}

/// Per-channel reception context. One instance exists per communication
/// channel, exclusively owned by it and mutated only through
/// [`PacketReceiver::on_byte`] and [`PacketReceiver::on_tick`].
#[derive(Debug, Clone, Copy)]
pub struct PacketReceiver {
    state: ReceiveState,
    /// Command byte of the frame in progress, raw and unvalidated.
    command: u8,
    /// Payload of the frame in progress; push past capacity is a silent drop.
    payload: Payload,
    /// Ticks elapsed since the last byte of the frame in progress.
    idle_ticks: u16,
    /// Tick count at which a partial frame is abandoned.
    timeout_ticks: u16,
}

impl PacketReceiver {
    /// Build a receiver, converting the byte timeout into timer ticks:
    /// `timeout_ticks = ceil(byte_timeout_ms / ms_per_tick)`, at least 1.
    ///
    /// `ms_per_tick` comes from the calibrated clock
    /// ([`ClockSource`](crate::protocol::traits::clock_source::ClockSource));
    /// converting before calibration would make the timeout meaningless, so a
    /// zero, negative, or non-finite tick duration is rejected here.
    pub fn new(byte_timeout_ms: u32, ms_per_tick: f32) -> Result<Self, ReceiverInitError> {
        if byte_timeout_ms == 0 {
            return Err(ReceiverInitError::ZeroByteTimeout);
        }
        if !(ms_per_tick.is_finite() && ms_per_tick > 0.0) {
            return Err(ReceiverInitError::InvalidTickDuration);
        }

        // Ceiling division; `f32::ceil` is not available without libm.
        let exact = byte_timeout_ms as f32 / ms_per_tick;
        let mut timeout_ticks = (exact as u16).max(1);
        if (timeout_ticks as f32) < exact {
            timeout_ticks = timeout_ticks.saturating_add(1);
        }

        Ok(Self {
            state: ReceiveState::AwaitingStart,
            command: 0,
            payload: Payload::empty(),
            idle_ticks: 0,
            timeout_ticks,
        })
    }

    //==================================================================================Process Functions

    /// Process one byte from the transport.
    ///
    /// Returns the completed [`Packet`] when this byte is the end marker of a
    /// well-formed frame. The caller must dispatch it before feeding further
    /// bytes; at most one packet is ever in flight.
    pub fn on_byte(&mut self, byte: u8) -> Option<Packet> {
        match self.state {
            ReceiveState::AwaitingStart => {
                if byte == START_MARKER {
                    self.state = ReceiveState::AwaitingCommand;
                    self.idle_ticks = 0;
                }
                // Anything else is noise ahead of a frame; ignore it.
                None
            }
            ReceiveState::AwaitingCommand => {
                self.command = byte;
                self.payload.clear();
                self.state = ReceiveState::AwaitingPayloadOrEnd;
                self.idle_ticks = 0;
                None
            }
            ReceiveState::AwaitingPayloadOrEnd => {
                self.idle_ticks = 0;
                if byte == END_MARKER {
                    self.state = ReceiveState::AwaitingStart;
                    Some(Packet {
                        command: self.command,
                        payload: self.payload,
                    })
                } else {
                    self.payload.push(byte);
                    None
                }
            }
        }
    }

    /// Process one periodic timer tick.
    ///
    /// Only a frame in progress is timed: in `AwaitingStart` ticks are a
    /// no-op. Once `timeout_ticks` ticks pass with no byte, the partial frame
    /// is dropped and the hunt for a start marker resumes.
    pub fn on_tick(&mut self) {
        if self.state == ReceiveState::AwaitingStart {
            return;
        }
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        if self.idle_ticks >= self.timeout_ticks {
            self.state = ReceiveState::AwaitingStart;
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
