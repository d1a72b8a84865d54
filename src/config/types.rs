//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::KeelResult;

use super::loader::{self, ConfigWarning};

/// Where the instance store lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_instance_path")]
    pub instance_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            instance_path: default_instance_path(),
        }
    }
}

fn default_instance_path() -> PathBuf {
    PathBuf::from(".keel")
}

/// Deploy defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_workers")]
    pub workers: i64,

    /// Answer yes to the existing-instance confirmation
    #[serde(default)]
    pub assume_yes: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            assume_yes: false,
        }
    }
}

fn default_workers() -> i64 {
    1
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Parse a case-insensitive level name; unknown names map to `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }

    /// Raise the level by the number of `-v` flags given.
    pub fn raised(self, count: u8) -> Self {
        let rank = match self {
            Verbosity::Quiet => 0u8,
            Verbosity::Normal => 1,
            Verbosity::Verbose => 2,
            Verbosity::Debug => 3,
        };
        match rank.saturating_add(count) {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            2 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    /// `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> KeelResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// `KEEL_*` overrides.
    pub fn load_layered(project_root: &Path) -> KeelResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(project_root, loader::user_config_path().as_deref())
    }

    /// Apply environment variable overrides (KEEL_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_overrides_from(self, |name| std::env::var(name).ok())
    }
}
