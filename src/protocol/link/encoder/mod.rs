//! Response framing: serializes a [`Response`] back into the wire framing
//! and hands the caller a single contiguous byte slice for transmission.
use crate::protocol::wire::{Response, END_MARKER, PAYLOAD_CAPACITY, START_MARKER};

/// Longest encoded frame: start marker, command byte, a full payload
/// (leading code byte included), end marker, and the CRLF tail.
pub const MAX_FRAME_LEN: usize = PAYLOAD_CAPACITY + 5;

/// Builds outgoing frames into a single reusable transmit buffer.
///
/// This buffer is the one resource reused across dispatches. It is safe
/// because the link processes one event to completion at a time: a frame is
/// fully encoded and handed to the transport before the next packet can
/// close (see [`supervisor`](crate::protocol::link::supervisor)).
#[derive(Debug)]
pub struct FrameEncoder {
    buf: [u8; MAX_FRAME_LEN],
}

impl FrameEncoder {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_FRAME_LEN],
        }
    }

    /// Frame `response` as a reply to `command` and return the bytes to
    /// transmit in one transport call.
    ///
    /// `command` is the raw received command byte, echoed verbatim so the
    /// host can pair replies with requests even for rejected commands. The
    /// wire payload is the response code followed by the data bytes; if the
    /// combination exceeds [`PAYLOAD_CAPACITY`] the data is silently
    /// truncated, mirroring the receive-side policy. The returned slice is
    /// always `wire payload length + 5` bytes long.
    ///
    /// The trailing CRLF helps humans reading a terminal; hosts must not
    /// rely on it.
    pub fn encode(&mut self, command: u8, response: &Response) -> &[u8] {
        // Code byte plus data must fit the payload budget.
        let data = response.payload.as_bytes();
        let data_len = data.len().min(PAYLOAD_CAPACITY - 1);

        self.buf[0] = START_MARKER;
        self.buf[1] = command;
        self.buf[2] = response.code.to_wire();
        self.buf[3..3 + data_len].copy_from_slice(&data[..data_len]);
        self.buf[3 + data_len] = END_MARKER;
        self.buf[4 + data_len] = b'\n';
        self.buf[5 + data_len] = b'\r';

        &self.buf[..6 + data_len]
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}
