//! Domain layer for the gossip subsystem.

pub mod cache;
pub mod entities;
pub mod services;
pub mod value_objects;

pub use cache::*;
pub use entities::*;
pub use services::*;
pub use value_objects::*;
