//! Domain layer: entities and their lifecycle rules.

pub mod entities;

pub use entities::*;
