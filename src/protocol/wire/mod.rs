//! Wire data model of the host link: frame markers, command and response
//! codes with their byte mappings, and the bounded payload container shared
//! by received packets and outgoing responses.
//!
//! A frame on the wire is:
//!
//! ```text
//! '{' <command-byte> <payload-bytes...> '}' ['\n' '\r']
//! ```
//!
//! The trailing CRLF is a human-readability aid, never required nor validated.

//==================================================================================Constants

/// Start-of-frame marker.
pub const START_MARKER: u8 = b'{';
/// End-of-frame marker.
pub const END_MARKER: u8 = b'}';
/// Storage allocated for a payload, receive and transmit alike. Bytes
/// received beyond this before the end marker are silently dropped.
pub const PAYLOAD_CAPACITY: usize = 30;

//==================================================================================Command

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Commands the board currently supports. The wire byte is a mapping, not the
/// in-memory representation; [`Command::from_wire`] returning `None` is what
/// rejects a command byte outside the active set.
pub enum Command {
    /// Read the firmware version currently executing.
    FirmwareVersion,
    /// Read the PWM percentage currently applied on each channel.
    Status,
    /// Set the four PWM outputs from a comma-separated percentage list.
    SetOutputs,
    /// Reboot the board (turns outputs off).
    Reboot,
}

impl Command {
    /// Decode a received command byte. `None` means the byte is not an
    /// active command and must be answered with
    /// [`ResponseCode::InvalidCommand`].
    pub const fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            b'F' => Some(Self::FirmwareVersion),
            b'S' => Some(Self::Status),
            b'O' => Some(Self::SetOutputs),
            b'R' => Some(Self::Reboot),
            _ => None,
        }
    }

    /// Byte transmitted on the wire for this command.
    pub const fn to_wire(self) -> u8 {
        match self {
            Self::FirmwareVersion => b'F',
            Self::Status => b'S',
            Self::SetOutputs => b'O',
            Self::Reboot => b'R',
        }
    }
}

//==================================================================================Response code

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Result code returned to the host after processing a command. Always the
/// first payload byte of an outgoing frame.
pub enum ResponseCode {
    /// Command processed successfully.
    Ack,
    /// Command recognized but its payload was rejected; no effect applied.
    InvalidPayload,
    /// Command byte is not in the active command set; no effect applied.
    InvalidCommand,
}

impl ResponseCode {
    /// Byte transmitted on the wire for this code.
    pub const fn to_wire(self) -> u8 {
        match self {
            Self::Ack => b'A',
            Self::InvalidPayload => b'P',
            Self::InvalidCommand => b'C',
        }
    }
}

//==================================================================================Payload

/// Bounded byte sequence carried by packets and responses. Writes past
/// [`PAYLOAD_CAPACITY`] are silently discarded, mirroring the link's
/// truncation policy on both directions.
#[derive(Clone, Copy)]
pub struct Payload {
    buf: [u8; PAYLOAD_CAPACITY],
    len: usize,
}

impl Payload {
    /// An empty payload.
    pub const fn empty() -> Self {
        Self {
            buf: [0; PAYLOAD_CAPACITY],
            len: 0,
        }
    }

    /// Copy `bytes` into a new payload, truncating at capacity.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut payload = Self::empty();
        let len = bytes.len().min(PAYLOAD_CAPACITY);
        payload.buf[..len].copy_from_slice(&bytes[..len]);
        payload.len = len;
        payload
    }

    /// Append one byte; a full payload drops it without error.
    pub fn push(&mut self, byte: u8) {
        if self.len < PAYLOAD_CAPACITY {
            self.buf[self.len] = byte;
            self.len += 1;
        }
    }

    /// Forget the stored bytes. The buffer is not wiped; upcoming pushes
    /// overwrite it.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Shorten the payload to at most `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// The valid bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

// Stale bytes past `len` must not leak into comparisons or debug output.
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl Eq for Payload {}

impl core::fmt::Debug for Payload {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Payload").field(&self.as_bytes()).finish()
    }
}

/// Formatting support for processors that build decimal text responses.
/// Overflow truncates instead of failing, so `write!` into a payload never
/// errors.
impl core::fmt::Write for Payload {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for &byte in s.as_bytes() {
            self.push(byte);
        }
        Ok(())
    }
}

//==================================================================================Packet and Response

/// A decoded, framed unit: one command byte and its payload. Produced by the
/// receiver when a frame closes; consumed immediately by command execution.
///
/// The command is kept as the raw received byte: framing accepts any command
/// byte, and rejecting inactive commands is the dispatcher's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub command: u8,
    pub payload: Payload,
}

/// Reply to one received packet: a result code followed by any data bytes.
/// On the wire the code byte leads the payload, so the transmitted payload
/// length is `1 + payload.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub code: ResponseCode,
    pub payload: Payload,
}

impl Response {
    /// Success with no data bytes.
    pub const fn ack() -> Self {
        Self {
            code: ResponseCode::Ack,
            payload: Payload::empty(),
        }
    }

    /// Success carrying data bytes.
    pub const fn ack_with(payload: Payload) -> Self {
        Self {
            code: ResponseCode::Ack,
            payload,
        }
    }

    /// Payload rejected; no effect was applied.
    pub const fn invalid_payload() -> Self {
        Self {
            code: ResponseCode::InvalidPayload,
            payload: Payload::empty(),
        }
    }

    /// Command byte not recognized; no effect was applied.
    pub const fn invalid_command() -> Self {
        Self {
            code: ResponseCode::InvalidCommand,
            payload: Payload::empty(),
        }
    }
}
