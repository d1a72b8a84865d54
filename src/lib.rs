//! Keel - deployment bootstrap controller
//!
//! Keel decides whether a deploy against a persisted instance store should
//! proceed, resume, start over, or do nothing. It records the template
//! reference and input values in the store, then hands a fully resolved
//! deployment to a template loader and topology executor.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    DeployOutcome, DeployRequest, DeployUseCase, InitOutcome, InitRequest, InitUseCase,
    InputOverride, NoOpReason,
};
pub use config::Config;
pub use error::{KeelError, KeelResult};
