//! In-memory instance store (for tests and dry runs)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::ports::InstanceStore;
use crate::error::{KeelError, KeelResult};

/// Instance store kept in a map.
///
/// A key counts as present if it was written directly or if any record
/// lives beneath it (`instances` exists once `instances/web.json` does).
#[derive(Debug)]
pub struct MemoryInstanceStore {
    root: PathBuf,
    records: Mutex<BTreeMap<String, String>>,
}

impl MemoryInstanceStore {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(".keel"),
            records: Mutex::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with records
    pub fn with_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut map) = store.records.lock() {
            map.extend(records.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        store
    }

    /// Copy of every record, for comparing before/after states
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.records
            .lock()
            .map(|map| map.clone())
            .unwrap_or_default()
    }

    fn is_under(record: &str, key: &str) -> bool {
        record == key
            || record
                .strip_prefix(key)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl Default for MemoryInstanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceStore for MemoryInstanceStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, key: &str) -> bool {
        self.records
            .lock()
            .map(|map| map.keys().any(|record| Self::is_under(record, key)))
            .unwrap_or(false)
    }

    fn read(&self, key: &str) -> KeelResult<String> {
        let map = self
            .records
            .lock()
            .map_err(|_| KeelError::storage(key, std::io::Error::other("store poisoned")))?;
        map.get(key).cloned().ok_or_else(|| {
            KeelError::storage(
                key,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such record"),
            )
        })
    }

    fn write(&self, key: &str, content: &str) -> KeelResult<()> {
        let mut map = self
            .records
            .lock()
            .map_err(|_| KeelError::storage(key, std::io::Error::other("store poisoned")))?;
        map.insert(key.to_string(), content.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KeelResult<()> {
        let mut map = self
            .records
            .lock()
            .map_err(|_| KeelError::storage(key, std::io::Error::other("store poisoned")))?;
        map.retain(|record, _| !Self::is_under(record, key));
        Ok(())
    }
}
