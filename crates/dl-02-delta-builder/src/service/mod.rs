//! Services implementing the delta builder ports.

mod builder;
mod producers;

pub use builder::DeltaBuilder;
pub use producers::ProducerPriorityProvider;
