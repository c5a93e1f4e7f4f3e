//! High-level components of the host-link protocol: wire data model,
//! command execution, link state machines, and collaborator traits.
pub mod command;
pub mod link;
pub mod traits;
pub mod wire;
