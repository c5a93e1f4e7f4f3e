//! Firmware version reported to the host.

/// Version string baked into this build.
pub const FIRMWARE_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Source of the firmware version string.
pub trait VersionProvider {
    /// The currently executing version.
    fn current(&self) -> &str;
}

/// Default provider returning [`FIRMWARE_VERSION`] from the build metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildVersion;

impl VersionProvider for BuildVersion {
    fn current(&self) -> &str {
        FIRMWARE_VERSION
    }
}
