//! Ports (API and SPI) for the delta builder subsystem.

pub mod inbound;
pub mod outbound;
