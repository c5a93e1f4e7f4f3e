//! Transmit side of the host transport (USB CDC, UART, ...).

/// Contract to hand a complete framed response to the transport.
///
/// The call is fire-and-forget from the protocol core's perspective: it must
/// not block, and the whole frame is passed in one call. Chunking, if the
/// transport needs it, happens below this seam.
pub trait TransportSink {
    type Error: core::fmt::Debug;
    /// Queue `frame` for transmission to the host.
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}
