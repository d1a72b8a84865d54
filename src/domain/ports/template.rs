//! Template ports - parsing a service template and executing its topology
//!
//! The controller drives these in a fixed sequence:
//! `load` → `template(inputs)` → `instantiate(store)` → `deploy(workers)`.
//! Parse failures are reported as `KeelError::Parse`, semantic problems as
//! `KeelError::DataValidation`, executor failures as `KeelError::Deploy`.

use std::path::Path;

use crate::domain::ports::InstanceStore;
use crate::domain::value_objects::{Inputs, Workers};
use crate::error::KeelResult;

/// Loads a service template from disk.
pub trait TemplateLoader {
    /// Parse `template_ref`, resolved relative to `working_dir`.
    fn load(&self, working_dir: &Path, template_ref: &Path) -> KeelResult<Box<dyn ServiceAst>>;
}

/// A parsed but not yet bound service template.
pub trait ServiceAst {
    /// Bind input values, validating them against the template's declarations.
    fn template(&self, inputs: &Inputs) -> KeelResult<Box<dyn ServiceTemplate>>;
}

/// A template with inputs bound.
pub trait ServiceTemplate {
    /// Create a topology whose instance state lives in `store`.
    fn instantiate<'s>(&self, store: &'s dyn InstanceStore) -> KeelResult<Box<dyn Topology + 's>>;
}

/// An executable topology.
pub trait Topology {
    /// Deploy every node, running at most `workers` operations concurrently.
    fn deploy(&self, workers: Workers) -> KeelResult<()>;
}
