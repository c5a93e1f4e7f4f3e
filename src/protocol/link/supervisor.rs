//! Link supervisor built on top of [`PacketReceiver`] and
//! [`CommandExecutor`].
//!
//! Byte arrivals and timer ticks fire from interrupt contexts that run
//! concurrently with each other, while the reception state is a single
//! shared mutable resource. The supervisor serializes both event kinds
//! through one single-consumer [`embassy_sync::channel::Channel`]: the
//! runner owns the receiver, the executor, and the reusable transmit buffer,
//! and processes one event to completion before taking the next. That gives
//! the required mutual exclusion and the in-order, one-packet-in-flight
//! dispatch guarantee without relying on interrupt priorities.
//!
//! Firmware decides the queue depth by providing a pre-allocated
//! [`Channel`]. No allocation is performed by the library and there is no
//! dependency on a particular BSP.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};

use crate::error::{LinkRunError, ReceiverInitError};
use crate::protocol::command::CommandExecutor;
use crate::protocol::link::encoder::FrameEncoder;
use crate::protocol::link::receiver::PacketReceiver;
use crate::protocol::link::BYTE_TIMEOUT_MS;
use crate::protocol::traits::clock_source::ClockSource;
use crate::protocol::traits::pwm_io::PwmIo;
use crate::protocol::traits::reboot::RebootSink;
use crate::protocol::traits::transport::TransportSink;
use crate::protocol::traits::version::VersionProvider;

/// One occurrence on the link: a byte from the transport receive path or a
/// firing of the periodic timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    ByteReceived(u8),
    TimerTick,
}

/// Service assembling the supervisor components for one channel.
pub struct LinkService<'a, T, IO, R, V, const EVT_CAP: usize>
where
    T: TransportSink,
{
    receiver: PacketReceiver,
    executor: CommandExecutor<IO, R, V>,
    sink: T,
    events: &'a Channel<CriticalSectionRawMutex, LinkEvent, EVT_CAP>,
}

impl<'a, T, IO, R, V, const EVT_CAP: usize> LinkService<'a, T, IO, R, V, EVT_CAP>
where
    T: TransportSink,
    IO: PwmIo,
    R: RebootSink,
    V: VersionProvider,
{
    /// Build the service once the clock has been calibrated.
    ///
    /// The clock is queried exactly once, here: the byte-timeout-to-ticks
    /// conversion must not happen before calibration.
    pub fn new(
        clock: &impl ClockSource,
        sink: T,
        io: IO,
        reboot: R,
        version: V,
        events: &'a Channel<CriticalSectionRawMutex, LinkEvent, EVT_CAP>,
    ) -> Result<Self, ReceiverInitError> {
        let receiver = PacketReceiver::new(BYTE_TIMEOUT_MS, clock.millis_per_tick())?;
        Ok(Self {
            receiver,
            executor: CommandExecutor::new(io, reboot, version),
            sink,
            events,
        })
    }

    /// Split into the producer handle (for the receive and timer interrupt
    /// paths) and the runner that drives the protocol.
    pub fn into_parts(self) -> (LinkHandle<'a, EVT_CAP>, LinkRunner<'a, T, IO, R, V, EVT_CAP>) {
        let handle = LinkHandle {
            sender: self.events.sender(),
        };
        let runner = LinkRunner {
            receiver: self.receiver,
            executor: self.executor,
            encoder: FrameEncoder::new(),
            sink: self.sink,
            events: self.events.receiver(),
        };
        (handle, runner)
    }
}

/// Producer side: queues link events from the transport receive path and the
/// periodic timer.
#[derive(Clone)]
pub struct LinkHandle<'a, const EVT_CAP: usize> {
    sender: Sender<'a, CriticalSectionRawMutex, LinkEvent, EVT_CAP>,
}

impl<'a, const EVT_CAP: usize> LinkHandle<'a, EVT_CAP> {
    /// Queue one received byte, waiting for room in the queue.
    pub async fn byte_received(&self, byte: u8) {
        self.sender.send(LinkEvent::ByteReceived(byte)).await;
    }

    /// Queue one received byte without blocking, for interrupt context.
    ///
    /// Returns `false` when the queue is full and the byte was dropped; the
    /// receiver then recovers through its inactivity timeout, the same way
    /// it absorbs link noise.
    pub fn try_byte_received(&self, byte: u8) -> bool {
        self.sender.try_send(LinkEvent::ByteReceived(byte)).is_ok()
    }

    /// Queue one timer tick, waiting for room in the queue.
    pub async fn timer_tick(&self) {
        self.sender.send(LinkEvent::TimerTick).await;
    }

    /// Queue one timer tick without blocking, for interrupt context.
    ///
    /// A dropped tick only stretches the inactivity timeout by one period.
    pub fn try_timer_tick(&self) -> bool {
        self.sender.try_send(LinkEvent::TimerTick).is_ok()
    }
}

/// Runner that drives packet reception and command dispatch.
pub struct LinkRunner<'a, T, IO, R, V, const EVT_CAP: usize>
where
    T: TransportSink,
{
    receiver: PacketReceiver,
    executor: CommandExecutor<IO, R, V>,
    encoder: FrameEncoder,
    sink: T,
    events: Receiver<'a, CriticalSectionRawMutex, LinkEvent, EVT_CAP>,
}

impl<'a, T, IO, R, V, const EVT_CAP: usize> LinkRunner<'a, T, IO, R, V, EVT_CAP>
where
    T: TransportSink,
    IO: PwmIo,
    R: RebootSink,
    V: VersionProvider,
{
    /// Consume events forever, answering each completed packet before the
    /// next event is taken. Returns only if the transport refuses a frame.
    pub async fn drive(mut self) -> Result<(), LinkRunError<T::Error>> {
        loop {
            let event = self.events.receive().await;
            self.process(event)?;
        }
    }

    /// Apply one event to the reception state and, when a frame closes,
    /// execute the packet and transmit the framed reply.
    fn process(&mut self, event: LinkEvent) -> Result<(), LinkRunError<T::Error>> {
        match event {
            LinkEvent::ByteReceived(byte) => {
                if let Some(packet) = self.receiver.on_byte(byte) {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("packet closed, command {=u8:a}", packet.command);

                    let response = self.executor.execute(&packet);
                    let frame = self.encoder.encode(packet.command, &response);
                    self.sink.send(frame).map_err(LinkRunError::Send)?;
                }
            }
            LinkEvent::TimerTick => self.receiver.on_tick(),
        }
        Ok(())
    }
}
