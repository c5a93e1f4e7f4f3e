//! Reboot request sink. The protocol core only records the request; an
//! external polling loop observes it and performs the actual
//! watchdog-triggered reset.

/// Kind of reboot being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RebootRequest {
    /// No reboot pending; signalling this has no effect on the system.
    None,
    /// Restart the application as though a power-on reset occurred.
    Normal,
    /// Reboot into the DFU bootloader. Accepted, but the downstream
    /// collaborator does not implement it yet; signalling it is legal and
    /// currently produces no observable effect.
    Dfu,
}

/// Contract to signal a pending reboot.
pub trait RebootSink {
    fn request(&mut self, request: RebootRequest);
}

impl<T: RebootSink + ?Sized> RebootSink for &mut T {
    fn request(&mut self, request: RebootRequest) {
        T::request(self, request);
    }
}
