//! PWM output capability: the four host-addressable channels of the motor
//! driver stage and the duty-cycle accessors the commands rely on.

/// One physical PWM-driven output line. Both H-bridge halves expose an
/// enable line and a drive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    EnableLeft,
    EnableRight,
    DriveLeft,
    DriveRight,
}

impl PwmChannel {
    /// Every channel, in the fixed order used by the status report and the
    /// set-outputs payload.
    pub const ALL: [PwmChannel; 4] = [
        PwmChannel::EnableLeft,
        PwmChannel::EnableRight,
        PwmChannel::DriveLeft,
        PwmChannel::DriveRight,
    ];
}

/// Contract to read and write PWM duty cycles. Register manipulation is the
/// board's concern; values are whole percentages in `0..=100`.
pub trait PwmIo {
    /// Apply a duty cycle to one channel.
    fn set_pwm_percent(&mut self, channel: PwmChannel, percent: u8);
    /// Duty cycle currently applied on one channel.
    fn pwm_percent(&self, channel: PwmChannel) -> u8;
}

impl<T: PwmIo + ?Sized> PwmIo for &mut T {
    fn set_pwm_percent(&mut self, channel: PwmChannel, percent: u8) {
        T::set_pwm_percent(self, channel, percent);
    }
    fn pwm_percent(&self, channel: PwmChannel) -> u8 {
        T::pwm_percent(self, channel)
    }
}
