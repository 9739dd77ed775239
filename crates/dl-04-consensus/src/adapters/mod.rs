//! Adapters binding the consensus ports to sibling subsystems.

pub mod gossip;
