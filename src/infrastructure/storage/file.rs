//! File Instance Store
//!
//! Implements the InstanceStore port as one file per key under a root
//! directory. The root is created on first write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::InstanceStore;
use crate::error::{KeelError, KeelResult};

/// Directory-backed instance store
///
/// Writes go through a temp file in the target directory followed by a
/// rename, so a record is either the old or the new content.
#[derive(Debug, Clone)]
pub struct FileInstanceStore {
    root: PathBuf,
}

impl FileInstanceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl InstanceStore for FileInstanceStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }

    fn read(&self, key: &str) -> KeelResult<String> {
        fs::read_to_string(self.path(key)).map_err(|e| KeelError::storage(key, e))
    }

    fn write(&self, key: &str, content: &str) -> KeelResult<()> {
        let path = self.path(key);
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|e| KeelError::storage(key, e))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| KeelError::storage(key, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| KeelError::storage(key, e))?;
        tmp.persist(&path)
            .map_err(|e| KeelError::storage(key, e.error))?;

        tracing::trace!(key, path = %path.display(), "record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> KeelResult<()> {
        let path = self.path(key);
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KeelError::storage(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::keys;
    use tempfile::tempdir;

    #[test]
    fn file_store_write_and_read() {
        let dir = tempdir().unwrap();
        let store = FileInstanceStore::new(dir.path());

        store.write(keys::ROOT_FILE, "service.yaml").unwrap();

        assert!(store.exists(keys::ROOT_FILE));
        assert_eq!(store.read(keys::ROOT_FILE).unwrap(), "service.yaml");
    }

    #[test]
    fn file_store_creates_root_lazily() {
        let dir = tempdir().unwrap();
        let root = dir.path().join(".keel");
        let store = FileInstanceStore::new(&root);

        assert!(!root.exists());
        assert!(!store.exists(keys::INPUTS));

        store.write(keys::INPUTS, "{}").unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn file_store_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileInstanceStore::new(dir.path());

        store.write(keys::INPUTS, r#"{"a":1}"#).unwrap();
        store.write(keys::INPUTS, r#"{"a":2}"#).unwrap();

        assert_eq!(store.read(keys::INPUTS).unwrap(), r#"{"a":2}"#);
    }

    #[test]
    fn file_store_nested_keys_group_under_directory() {
        let dir = tempdir().unwrap();
        let store = FileInstanceStore::new(dir.path());

        store.write("instances/web.json", "{}").unwrap();
        store.write("instances/db.json", "{}").unwrap();

        assert!(store.exists(keys::INSTANCES));
        store.remove(keys::INSTANCES).unwrap();
        assert!(!store.exists(keys::INSTANCES));
        assert!(!dir.path().join("instances").exists());
    }

    #[test]
    fn file_store_remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileInstanceStore::new(dir.path());
        store.remove("never-written").unwrap();
    }

    #[test]
    fn file_store_read_missing_reports_key() {
        let dir = tempdir().unwrap();
        let store = FileInstanceStore::new(dir.path());
        let err = store.read(keys::ROOT_FILE).unwrap_err();
        assert!(err.to_string().contains("root_file"));
    }
}
