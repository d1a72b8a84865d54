//! Deploy Outcome
//!
//! Rejections are the `Err` side of `KeelResult<DeployOutcome>`.

use std::path::PathBuf;

use crate::domain::ports::ExistingInstanceAction;
use crate::domain::value_objects::{Inputs, Workers};

/// Why a deploy did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The operator declined the resume/force confirmation
    Declined(ExistingInstanceAction),
    /// An instance model exists and neither resume nor force was given
    InstanceExists,
}

impl NoOpReason {
    /// Stable identifier used in JSON output
    pub fn code(&self) -> &'static str {
        match self {
            NoOpReason::Declined(_) => "declined",
            NoOpReason::InstanceExists => "instance_exists",
        }
    }
}

/// Fully materialized deployment handed to the template and executor
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDeployment {
    pub template_ref: PathBuf,
    pub inputs: Inputs,
    pub workers: Workers,
}

/// Result of a bootstrap or deploy
#[derive(Debug, Clone, PartialEq)]
pub enum DeployOutcome {
    Proceed(ResolvedDeployment),
    NoOp(NoOpReason),
}

impl DeployOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, DeployOutcome::NoOp(_))
    }

    pub fn resolved(&self) -> Option<&ResolvedDeployment> {
        match self {
            DeployOutcome::Proceed(resolved) => Some(resolved),
            DeployOutcome::NoOp(_) => None,
        }
    }

    /// Process exit code. Both kinds of no-op are benign.
    pub fn exit_code(&self) -> i32 {
        0
    }
}
