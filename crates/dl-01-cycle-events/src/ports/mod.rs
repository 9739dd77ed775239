//! Ports (API and SPI) for the cycle scheduler.

pub mod inbound;
pub mod outbound;
