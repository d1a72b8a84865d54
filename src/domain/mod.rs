//! Domain Layer
//!
//! The vocabulary of a deployment bootstrap, free of I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Inputs, Workers)
//! - `ports/` - Interface definitions for infrastructure (store, template, confirmer)

pub mod ports;
pub mod value_objects;
