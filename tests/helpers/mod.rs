/// Test doubles standing in for the board collaborators during integration
/// tests.
use std::sync::{Arc, Mutex};

use mcb_link::protocol::traits::clock_source::ClockSource;
use mcb_link::protocol::traits::pwm_io::{PwmChannel, PwmIo};
use mcb_link::protocol::traits::reboot::{RebootRequest, RebootSink};
use mcb_link::protocol::traits::transport::TransportSink;
use tokio::sync::mpsc;

/// Clock calibrated to a fixed tick duration.
#[allow(dead_code)]
pub struct FixedClock(pub f32);

impl ClockSource for FixedClock {
    fn millis_per_tick(&self) -> f32 {
        self.0
    }
}

fn channel_index(channel: PwmChannel) -> usize {
    match channel {
        PwmChannel::EnableLeft => 0,
        PwmChannel::EnableRight => 1,
        PwmChannel::DriveLeft => 2,
        PwmChannel::DriveRight => 3,
    }
}

#[derive(Clone, Default)]
/// In-memory PWM stage; a clone shares the same channel state so the test
/// can observe what the runner applied.
pub struct MockPwm {
    levels: Arc<Mutex<[u8; 4]>>,
}

#[allow(dead_code)]
impl MockPwm {
    pub fn levels(&self) -> [u8; 4] {
        *self.levels.lock().unwrap()
    }
}

impl PwmIo for MockPwm {
    fn set_pwm_percent(&mut self, channel: PwmChannel, percent: u8) {
        self.levels.lock().unwrap()[channel_index(channel)] = percent;
    }
    fn pwm_percent(&self, channel: PwmChannel) -> u8 {
        self.levels.lock().unwrap()[channel_index(channel)]
    }
}

#[derive(Clone, Default)]
/// Records the last reboot request signalled by the runner.
pub struct MockReboot {
    last: Arc<Mutex<Option<RebootRequest>>>,
}

#[allow(dead_code)]
impl MockReboot {
    pub fn last(&self) -> Option<RebootRequest> {
        *self.last.lock().unwrap()
    }
}

impl RebootSink for MockReboot {
    fn request(&mut self, request: RebootRequest) {
        *self.last.lock().unwrap() = Some(request);
    }
}

/// Captures every transmitted frame on an mpsc queue the test can drain.
pub struct MockTransport {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn create() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TransportSink for MockTransport {
    type Error = ();

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.tx.send(frame.to_vec()).map_err(|_| ())
    }
}
