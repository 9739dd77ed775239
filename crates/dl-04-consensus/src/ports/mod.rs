//! Ports for the consensus subsystem.

pub mod inbound;
pub mod outbound;
