//! Deploy Module
//!
//! Bootstraps a deploy against a persisted instance store.
//!
//! ## Structure
//!
//! - `options` - Request types (`DeployRequest`, `InputOverride`)
//! - `result` - Outcome types (`DeployOutcome`, `NoOpReason`, `ResolvedDeployment`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use keel::application::deploy::{DeployRequest, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(store, loader);
//! let outcome = use_case.execute_with_confirmer(&DeployRequest::new(), confirmer)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{DeployRequest, InputOverride};
pub use result::{DeployOutcome, NoOpReason, ResolvedDeployment};
pub use use_case::{DeployUseCase, CONFIRM_PROMPT};
