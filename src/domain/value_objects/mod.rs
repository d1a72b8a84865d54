//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod inputs;
mod workers;

pub use inputs::Inputs;
pub use workers::Workers;
