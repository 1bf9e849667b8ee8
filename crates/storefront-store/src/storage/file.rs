//! # File Storage
//!
//! Persists all keys in a single JSON object file.
//!
//! ## File Format
//! ```json
//! {
//!   "cart": "[{\"id\":\"…\",\"name\":\"Mug\",\"price\":8.99,\"quantity\":2}]",
//!   "isAdmin": "false",
//!   "orders": "[]",
//!   "products": "[…]"
//! }
//! ```
//! Values are the JSON strings exactly as a browser would keep them in
//! local storage, so a dump from the browser can be dropped in unchanged.
//!
//! ## Write Path
//! ```text
//! set("cart", …)
//!      │
//!      ▼
//! entries.insert() ──► serialize map ──► write storefront.json.tmp
//!                                              │
//!                                              ▼
//!                                   rename over storefront.json
//! ```
//! The rename means a crash mid-write leaves the previous file intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::KeyValueStorage;
use crate::error::{StoreError, StoreResult};

/// Key-value storage backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file, starting empty if it does not exist yet.
    ///
    /// ## Errors
    /// - `Io` if the file exists but cannot be read
    /// - `Corrupt` if the contents are not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)
                    .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?
            }
        } else {
            debug!(path = %path.display(), "Storage file not found, starting empty");
            BTreeMap::new()
        };

        info!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(FileStorage { path, entries })
    }

    /// Opens the storage file, recovering from a corrupt file.
    ///
    /// A corrupt file is moved aside to `<name>.corrupt` and storage starts
    /// empty. Unreadable files (permissions, I/O) are still reported.
    pub fn open_or_recover(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        match Self::open(&path) {
            Err(StoreError::Corrupt(reason)) => {
                let backup = corrupt_backup_path(&path);
                warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    %reason,
                    "Storage file is corrupt, moving it aside"
                );
                fs::rename(&path, &backup)?;
                Ok(FileStorage {
                    path,
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), keys = self.entries.len(), "Storage file written");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        self.persist()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storefront.json")).unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("isAdmin", "true".to_string()).unwrap();
        storage.set("cart", "[]".to_string()).unwrap();
        storage.remove("cart").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("isAdmin").unwrap().as_deref(), Some("true"));
        assert_eq!(reopened.get("cart").unwrap(), None);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStorage::open(&path), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_open_or_recover_moves_corrupt_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let storage = FileStorage::open_or_recover(&path).unwrap();
        assert_eq!(storage.get("products").unwrap(), None);
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(corrupt_backup_path(&path)).unwrap(),
            "[1, 2, 3]"
        );
    }

    #[test]
    fn test_empty_file_is_treated_as_empty_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        fs::write(&path, "").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("orders").unwrap(), None);
    }
}
