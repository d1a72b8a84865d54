//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (value objects, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Bootstraps and runs a deploy against an instance store
//! - `InitUseCase` - Records template and inputs without deploying

pub mod deploy;
pub mod init;
mod resolve;

pub use deploy::{
    DeployOutcome, DeployRequest, DeployUseCase, InputOverride, NoOpReason, ResolvedDeployment,
};
pub use init::{InitOutcome, InitRequest, InitUseCase};
