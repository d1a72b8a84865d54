//! InstanceStore port - key/value persistence for deployment state
//!
//! Keys are relative paths under the store root; a key may name a single
//! record or a group of records (e.g. `instances`).

use std::path::Path;

use crate::error::KeelResult;

/// Well-known store keys.
pub mod keys {
    /// Present once the executor has recorded any node instance
    pub const INSTANCES: &str = "instances";
    /// Template reference recorded by the last init/deploy
    pub const ROOT_FILE: &str = "root_file";
    /// Last resolved input mapping (JSON)
    pub const INPUTS: &str = "inputs";
}

/// Abstract instance store
///
/// Implementations:
/// - `FileInstanceStore` - one file per key under a working directory
/// - `MemoryInstanceStore` - in-memory for testing
///
/// Shared by executor worker threads.
pub trait InstanceStore: Send + Sync {
    /// Directory the store is rooted at
    fn root(&self) -> &Path;

    /// Check if a key (or key group) exists
    fn exists(&self, key: &str) -> bool;

    /// Read a record as text
    fn read(&self, key: &str) -> KeelResult<String>;

    /// Write a record, replacing any previous content
    fn write(&self, key: &str, content: &str) -> KeelResult<()>;

    /// Remove a record or a whole key group. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> KeelResult<()>;

    /// Write a structured record as JSON
    fn write_json(&self, key: &str, value: &serde_json::Value) -> KeelResult<()> {
        let content = serde_json::to_string(value)?;
        self.write(key, &content)
    }
}
