//! `mcb-link` library: the host-link command protocol core of a PWM
//! motor-control board, written for a `no_std` environment. The crate exposes
//! the wire data model, the packet reception state machine, command execution,
//! response framing, and an event-queue supervisor that ties them to the
//! board's transport and timer interrupts.
#![no_std]
//==================================================================================
/// Link-level errors (receiver configuration, transport transmission).
pub mod error;
/// Host-link protocol implementation: wire format, packet reception,
/// command execution, response framing, and collaborator traits.
pub mod protocol;
//==================================================================================
