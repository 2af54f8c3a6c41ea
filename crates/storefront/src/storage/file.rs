//! JSON-file-backed key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// A persistent store kept as a single JSON object on disk.
///
/// Every write rewrites the whole document to a sibling temp file and renames
/// it over the target, so readers see either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`.
    ///
    /// The file is created on first write; parent directories are created
    /// then as well.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the last corrupt document is copied to before it is replaced.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    /// Read the whole document.
    ///
    /// A document that is not a JSON object of strings reads as empty, so the
    /// next write replaces it. A copy is kept at [`FileStore::backup_path`].
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&text) {
            Ok(data) => Ok(data),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is corrupt, reading as empty"
                );
                if let Err(e) = fs::write(self.backup_path(), &text) {
                    tracing::warn!(error = %e, "could not back up corrupt storage file");
                }
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, data: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_string_pretty(data).map_err(|source| StorageError::Encode {
            key: self.path.display().to_string(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(encoded.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.read_all()?;
        data.insert(key.to_owned(), value.to_owned());
        self.write_all(&data)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.read_all()?;
        if data.remove(key).is_some() {
            self.write_all(&data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (FileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("nested").join("storage.json"));
        (store, dir)
    }

    #[test]
    fn set_get() {
        let (store, _dir) = temp_store();
        store.set_item("currentUser", "brunela").unwrap();
        assert_eq!(
            store.get_item("currentUser").unwrap().as_deref(),
            Some("brunela")
        );
    }

    #[test]
    fn get_missing_file() {
        let (store, _dir) = temp_store();
        assert_eq!(store.get_item("anything").unwrap(), None);
    }

    #[test]
    fn persists_across_handles() {
        let (store, _dir) = temp_store();
        store.set_item("cart_guest", "[]").unwrap();

        let reopened = FileStore::open(store.path());
        assert_eq!(reopened.get_item("cart_guest").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove() {
        let (store, _dir) = temp_store();
        store.set_item("userSession", "{}").unwrap();
        store.remove_item("userSession").unwrap();
        assert_eq!(store.get_item("userSession").unwrap(), None);
        store.remove_item("userSession").unwrap();
    }

    #[test]
    fn no_temp_file_left_behind() {
        let (store, _dir) = temp_store();
        store.set_item("k", "v").unwrap();
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_document_reads_empty_and_is_replaced() {
        let (store, _dir) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.get_item("cart_guest").unwrap(), None);
        assert_eq!(
            fs::read_to_string(store.backup_path()).unwrap(),
            "{ not json"
        );

        store.set_item("cart_guest", "[]").unwrap();
        assert_eq!(store.get_item("cart_guest").unwrap().as_deref(), Some("[]"));
    }
}
