//! Command execution: validates a received packet against the active command
//! set and routes it to the matching processor.
//!
//! Every processor either fully applies its effect and answers
//! [`ResponseCode::Ack`](crate::protocol::wire::ResponseCode), or applies no
//! effect at all and answers an error code. No command is ever fatal to the
//! firmware: the worst outcome is an error response.
use core::fmt::Write;

use crate::protocol::traits::pwm_io::{PwmChannel, PwmIo};
use crate::protocol::traits::reboot::{RebootRequest, RebootSink};
use crate::protocol::traits::version::VersionProvider;
use crate::protocol::wire::{Command, Packet, Payload, Response, PAYLOAD_CAPACITY};

//==================================================================================Constants

/// Shortest acceptable set-outputs payload: four single-digit values joined
/// by three commas (`1,2,3,4`).
const SET_OUTPUTS_MIN_LEN: usize = 7;
/// Longest acceptable set-outputs payload: four three-digit values joined by
/// three commas (`100,100,100,100`).
const SET_OUTPUTS_MAX_LEN: usize = 15;
/// Confirmation byte a reboot payload must lead with.
const REBOOT_CONFIRM: u8 = b'N';

//==================================================================================Executor

/// Owns the board collaborators and turns validated packets into effects and
/// responses. One executor exists per communication channel.
pub struct CommandExecutor<IO, R, V> {
    io: IO,
    reboot: R,
    version: V,
}

impl<IO, R, V> CommandExecutor<IO, R, V>
where
    IO: PwmIo,
    R: RebootSink,
    V: VersionProvider,
{
    pub const fn new(io: IO, reboot: R, version: V) -> Self {
        Self { io, reboot, version }
    }

    /// Execute one received packet to completion and return the reply.
    ///
    /// A command byte outside the active set short-circuits to
    /// `InvalidCommand` without touching any collaborator.
    pub fn execute(&mut self, packet: &Packet) -> Response {
        match Command::from_wire(packet.command) {
            Some(Command::FirmwareVersion) => self.firmware_version(),
            Some(Command::Status) => self.status(),
            Some(Command::SetOutputs) => self.set_outputs(&packet.payload),
            Some(Command::Reboot) => self.request_reboot(&packet.payload),
            None => Response::invalid_command(),
        }
    }

    //==================================================================================Processors

    /// Ack with the build's version string. The payload ignores its input
    /// and the processor itself cannot fail; the text is truncated to leave
    /// room for the leading code byte and the terminator the wire contract
    /// reserves.
    fn firmware_version(&self) -> Response {
        let mut payload = Payload::empty();
        for &byte in self
            .version
            .current()
            .as_bytes()
            .iter()
            .take(PAYLOAD_CAPACITY - 2)
        {
            payload.push(byte);
        }
        Response::ack_with(payload)
    }

    /// Ack with the duty cycle of each channel as comma-separated decimal
    /// text. Every value is followed by a comma, the last one included; the
    /// trailing separator is part of the established wire format.
    fn status(&self) -> Response {
        let mut payload = Payload::empty();
        for channel in PwmChannel::ALL {
            let _ = write!(payload, "{},", self.io.pwm_percent(channel));
        }
        Response::ack_with(payload)
    }

    /// Parse four percentages from the payload and apply them in channel
    /// order. All four values are validated before any channel is touched,
    /// so a rejected payload leaves the hardware exactly as it was.
    fn set_outputs(&mut self, payload: &Payload) -> Response {
        match parse_pwm_values(payload) {
            Some(values) => {
                for (channel, value) in PwmChannel::ALL.into_iter().zip(values) {
                    self.io.set_pwm_percent(channel, value);
                }
                Response::ack()
            }
            None => Response::invalid_payload(),
        }
    }

    /// Signal a pending normal reboot if the payload leads with the
    /// confirmation byte. The actual watchdog reset is performed by the
    /// polling loop observing the sink, outside this core.
    fn request_reboot(&mut self, payload: &Payload) -> Response {
        if payload.as_bytes().first() == Some(&REBOOT_CONFIRM) {
            self.reboot.request(RebootRequest::Normal);
            Response::ack()
        } else {
            Response::invalid_payload()
        }
    }
}

//==================================================================================Payload parsing

/// Try to extract four PWM percentages from a `aaa,bbb,ccc,ddd` payload.
///
/// Each of the first four comma-separated tokens must be one to three ASCII
/// digits valued `0..=100`; a fifth and later tokens are ignored, not an
/// error. Any violation (length out of `7..=15`, empty token, non-digit
/// content, value above 100, fewer than four tokens) yields `None` and the
/// remaining tokens are not inspected.
fn parse_pwm_values(payload: &Payload) -> Option<[u8; 4]> {
    if !(SET_OUTPUTS_MIN_LEN..=SET_OUTPUTS_MAX_LEN).contains(&payload.len()) {
        return None;
    }
    let text = core::str::from_utf8(payload.as_bytes()).ok()?;

    let mut tokens = text.split(',');
    let mut values = [0u8; 4];
    for slot in &mut values {
        let token = tokens.next()?;
        if token.is_empty() || token.len() > 3 {
            return None;
        }
        if !token.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        // Up to three digits: fits a u16 before the range check.
        let value: u16 = token.parse().ok()?;
        if value > 100 {
            return None;
        }
        *slot = value as u8;
    }

    Some(values)
}
