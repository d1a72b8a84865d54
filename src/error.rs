//! Error types for Keel
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Keel operations
pub type KeelResult<T> = Result<T, KeelError>;

/// Main error type for Keel operations
#[derive(Error, Debug)]
pub enum KeelError {
    /// `--resume` and `--force` were both requested
    #[error("the -r/--resume and -f/--force options cannot be used together")]
    ConflictingFlags,

    /// Worker count below one
    #[error("{0} is not a positive number of workers")]
    InvalidWorkers(i64),

    /// Instance path given but not an existing directory
    #[error("directory {} is not a valid instance path", path.display())]
    InvalidInstancePath { path: PathBuf },

    /// Nothing recorded in `root_file` and no template on the command line
    #[error("no template reference available; was initialization skipped?")]
    MissingTemplate,

    /// Input override could not be parsed
    #[error("invalid inputs: {0}")]
    InvalidInputs(String),

    /// Template failed to parse
    #[error("{location}: {message}")]
    Parse { location: String, message: String },

    /// Template parsed but its data is inconsistent
    #[error("{message}")]
    DataValidation { message: String },

    /// Topology executor reported a failure
    #[error("deployment failed: {0}")]
    Deploy(String),

    /// The confirmation channel is closed or keeps failing
    #[error("no answer could be read for the confirmation prompt: {0}")]
    ConfirmationUnavailable(String),

    /// Configuration file could not be loaded
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Instance store I/O error
    #[error("storage error for key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KeelError {
    /// Usage conflicts are rejected before any side effect.
    pub fn is_usage_conflict(&self) -> bool {
        matches!(
            self,
            KeelError::ConflictingFlags
                | KeelError::InvalidWorkers(_)
                | KeelError::InvalidInstancePath { .. }
        )
    }

    /// Stable identifier used in JSON output
    pub fn code(&self) -> &'static str {
        match self {
            KeelError::ConflictingFlags => "conflicting_flags",
            KeelError::InvalidWorkers(_) => "invalid_workers",
            KeelError::InvalidInstancePath { .. } => "invalid_instance_path",
            KeelError::MissingTemplate => "missing_template",
            KeelError::InvalidInputs(_) => "invalid_inputs",
            KeelError::Parse { .. } => "parse",
            KeelError::DataValidation { .. } => "data_validation",
            KeelError::Deploy(_) => "deploy",
            KeelError::ConfirmationUnavailable(_) => "confirmation_unavailable",
            KeelError::Config { .. } => "config",
            KeelError::Storage { .. } => "storage",
            KeelError::Json(_) => "corrupt_record",
        }
    }

    pub(crate) fn storage(key: &str, source: std::io::Error) -> Self {
        KeelError::Storage {
            key: key.to_string(),
            source,
        }
    }
}
