//! Deploy Request
//!
//! Caller-supplied parameters for a single deploy invocation.

use std::path::{Path, PathBuf};

use crate::domain::ports::ExistingInstanceAction;
use crate::error::{KeelError, KeelResult};

/// Where an input override comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOverride {
    /// YAML or JSON file on disk
    File(PathBuf),
    /// Document text supplied directly
    Text(String),
}

impl InputOverride {
    /// Read the override document. Unreadable files count as invalid inputs.
    pub fn read(&self) -> KeelResult<String> {
        match self {
            InputOverride::File(path) => std::fs::read_to_string(path).map_err(|e| {
                KeelError::InvalidInputs(format!("could not read {}: {}", path.display(), e))
            }),
            InputOverride::Text(text) => Ok(text.clone()),
        }
    }
}

/// Request for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Instance store directory given by the caller; must already exist
    pub instance_path: Option<PathBuf>,
    /// Template reference; falls back to the recorded `root_file`
    pub template: Option<PathBuf>,
    /// Input override; falls back to the recorded `inputs`
    pub inputs: Option<InputOverride>,
    /// Maximum concurrent deploy workers (validated to be positive)
    pub workers: i64,
    /// Continue an interrupted deployment
    pub resume: bool,
    /// Discard the existing instance model and start over
    pub force: bool,
}

impl DeployRequest {
    pub fn new() -> Self {
        Self {
            instance_path: None,
            template: None,
            inputs: None,
            workers: 1,
            resume: false,
            force: false,
        }
    }

    pub fn with_instance_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.instance_path = Some(path.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_inputs(mut self, inputs: InputOverride) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_workers(mut self, workers: i64) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Store root for this request: the supplied path, else `default_root`
    pub fn store_root(&self, default_root: &Path) -> PathBuf {
        self.instance_path
            .clone()
            .unwrap_or_else(|| default_root.to_path_buf())
    }

    /// Action requested against an existing instance model, if any.
    ///
    /// Only meaningful once `resume`/`force` exclusivity has been checked.
    pub fn existing_instance_action(&self) -> Option<ExistingInstanceAction> {
        if self.resume {
            Some(ExistingInstanceAction::Resume)
        } else if self.force {
            Some(ExistingInstanceAction::Force)
        } else {
            None
        }
    }
}

impl Default for DeployRequest {
    fn default() -> Self {
        Self::new()
    }
}
