//! Configuration module for Keel
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KEEL_*)
//! 3. Project config (./keel.toml)
//! 4. User config (~/.config/keel/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, DeployConfig, OutputConfig, StorageConfig, Verbosity};
