//! Reception state machine tests covering framing, truncation, and timeout.
use super::*;
use crate::protocol::wire::PAYLOAD_CAPACITY;

fn receiver() -> PacketReceiver {
    // 1 ms ticks: timeout after 500 ticks.
    PacketReceiver::new(500, 1.0).unwrap()
}

/// Feed a byte slice, expecting at most one packet.
fn feed(rx: &mut PacketReceiver, bytes: &[u8]) -> Option<Packet> {
    let mut emitted = None;
    for &byte in bytes {
        if let Some(packet) = rx.on_byte(byte) {
            assert!(emitted.is_none(), "more than one packet emitted");
            emitted = Some(packet);
        }
    }
    emitted
}

#[test]
fn noise_without_start_marker_emits_nothing() {
    let mut rx = receiver();
    let packet = feed(&mut rx, b"hello }F} \r\n\x00\xFF garbage");
    assert!(packet.is_none());
    assert_eq!(rx.state, ReceiveState::AwaitingStart);
}

#[test]
fn empty_payload_frame_emits_packet() {
    let mut rx = receiver();
    let packet = feed(&mut rx, b"{F}").expect("frame must close");
    assert_eq!(packet.command, b'F');
    assert!(packet.payload.is_empty());
}

#[test]
fn payload_bytes_are_captured_in_order() {
    let mut rx = receiver();
    let packet = feed(&mut rx, b"{O50,60,70,80}").expect("frame must close");
    assert_eq!(packet.command, b'O');
    assert_eq!(packet.payload.as_bytes(), b"50,60,70,80");
}

#[test]
fn leading_noise_then_valid_frame() {
    let mut rx = receiver();
    let packet = feed(&mut rx, b"\r\nxx{S}").expect("frame must close");
    assert_eq!(packet.command, b'S');
}

#[test]
fn oversize_payload_is_truncated_not_rejected() {
    let mut rx = receiver();
    feed(&mut rx, b"{O");
    for _ in 0..40 {
        assert!(rx.on_byte(b'9').is_none());
    }
    let packet = rx.on_byte(b'}').expect("frame must still close");
    assert_eq!(packet.payload.len(), PAYLOAD_CAPACITY);
    assert!(packet.payload.as_bytes().iter().all(|&b| b == b'9'));
}

#[test]
fn back_to_back_frames_each_emit() {
    let mut rx = receiver();
    let first = feed(&mut rx, b"{F}").unwrap();
    let second = feed(&mut rx, b"{S}").unwrap();
    assert_eq!(first.command, b'F');
    assert_eq!(second.command, b'S');
}

#[test]
fn stale_payload_does_not_leak_into_next_frame() {
    let mut rx = receiver();
    feed(&mut rx, b"{O11,22,33,44}").unwrap();
    let packet = feed(&mut rx, b"{R N}").unwrap();
    assert_eq!(packet.payload.as_bytes(), b" N");
}

#[test]
fn ticks_while_idle_are_a_no_op() {
    let mut rx = receiver();
    for _ in 0..10_000 {
        rx.on_tick();
    }
    let packet = feed(&mut rx, b"{F}").expect("idle ticks must not hurt");
    assert_eq!(packet.command, b'F');
}

#[test]
fn gaps_below_timeout_do_not_drop_the_frame() {
    let mut rx = receiver();
    for &byte in b"{O50,50,50,50" {
        rx.on_byte(byte);
        for _ in 0..499 {
            rx.on_tick();
        }
    }
    let packet = rx.on_byte(b'}').expect("frame survives sub-timeout gaps");
    assert_eq!(packet.payload.as_bytes(), b"50,50,50,50");
}

#[test]
fn timeout_mid_frame_drops_the_partial_packet() {
    let mut rx = receiver();
    feed(&mut rx, b"{O50,");
    for _ in 0..500 {
        rx.on_tick();
    }
    assert_eq!(rx.state, ReceiveState::AwaitingStart);
    // The remainder of the stalled frame is now noise.
    assert!(feed(&mut rx, b"50,50,50}").is_none());
    // A fresh frame is received normally afterwards.
    let packet = feed(&mut rx, b"{S}").expect("receiver must recover");
    assert_eq!(packet.command, b'S');
}

#[test]
fn timeout_also_applies_between_start_and_command() {
    let mut rx = receiver();
    rx.on_byte(b'{');
    for _ in 0..500 {
        rx.on_tick();
    }
    assert_eq!(rx.state, ReceiveState::AwaitingStart);
}

#[test]
fn timeout_ticks_is_the_ceiling_of_the_division() {
    // 500 ms at 0.9 ms/tick: 555.55... rounds up to 556.
    let rx = PacketReceiver::new(500, 0.9).unwrap();
    assert_eq!(rx.timeout_ticks, 556);
    // Exact division stays exact.
    let rx = PacketReceiver::new(500, 1.0).unwrap();
    assert_eq!(rx.timeout_ticks, 500);
    // A tick longer than the timeout still waits one full tick.
    let rx = PacketReceiver::new(10, 40.0).unwrap();
    assert_eq!(rx.timeout_ticks, 1);
}

#[test]
fn short_timeout_drops_on_the_right_tick() {
    let mut rx = PacketReceiver::new(10, 3.0).unwrap(); // ceil(10/3) = 4 ticks
    feed(&mut rx, b"{O1,");
    for _ in 0..3 {
        rx.on_tick();
    }
    assert_eq!(rx.state, ReceiveState::AwaitingPayloadOrEnd);
    rx.on_tick();
    assert_eq!(rx.state, ReceiveState::AwaitingStart);
}

#[test]
fn invalid_clock_configuration_is_rejected() {
    assert_eq!(
        PacketReceiver::new(500, 0.0).unwrap_err(),
        ReceiverInitError::InvalidTickDuration
    );
    assert_eq!(
        PacketReceiver::new(500, -1.0).unwrap_err(),
        ReceiverInitError::InvalidTickDuration
    );
    assert_eq!(
        PacketReceiver::new(500, f32::NAN).unwrap_err(),
        ReceiverInitError::InvalidTickDuration
    );
    assert_eq!(
        PacketReceiver::new(0, 1.0).unwrap_err(),
        ReceiverInitError::ZeroByteTimeout
    );
}
