//! # Snapshot Persistence
//!
//! Typed, fail-soft reads and writes of JSON values over [`KeyValueStorage`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_or_default::<Vec<Order>>(storage, Orders)                         │
//! │       │                                                                 │
//! │       ├── key missing ──────────► T::default()                         │
//! │       ├── storage read fails ───► warn!, T::default()                  │
//! │       ├── JSON does not parse ──► warn!, T::default()                  │
//! │       └── ok ───────────────────► parsed value                         │
//! │                                                                         │
//! │  save(storage, Orders, &orders)                                         │
//! │       ├── ok ───────────────────► true                                 │
//! │       └── encode/write fails ───► error!, false (caller keeps state)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::{KeyValueStorage, StorageKey};

/// Reads and decodes a value. `Ok(None)` if the key is absent.
pub fn load<T, S>(storage: &S, key: StorageKey) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    match storage.get(key.as_str())? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::malformed(key.as_str(), e)),
        None => Ok(None),
    }
}

/// Reads a value, falling back to `T::default()` on absence or any failure.
pub fn load_or_default<T, S>(storage: &S, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStorage + ?Sized,
{
    match load(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to load persisted value, using default");
            T::default()
        }
    }
}

/// Encodes and writes a value. Returns an error instead of logging.
pub fn try_save<T, S>(storage: &mut S, key: StorageKey, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key.as_str(), raw)
}

/// Encodes and writes a value, logging failures. Returns whether it was written.
pub fn save<T, S>(storage: &mut S, key: StorageKey, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    match try_save(storage, key, value) {
        Ok(()) => true,
        Err(e) => {
            error!(key = %key, error = %e, "Failed to persist value, keeping in-memory state");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_key_loads_default() {
        let storage = MemoryStorage::new();
        let value: Vec<String> = load_or_default(&storage, StorageKey::Products);
        assert!(value.is_empty());
        assert!(load::<bool, _>(&storage, StorageKey::IsAdmin).unwrap().is_none());
    }

    #[test]
    fn test_malformed_value_loads_default() {
        let storage = MemoryStorage::with_entries([("isAdmin", "definitely")]);

        assert!(matches!(
            load::<bool, _>(&storage, StorageKey::IsAdmin),
            Err(StoreError::Malformed { .. })
        ));
        let flag: bool = load_or_default(&storage, StorageKey::IsAdmin);
        assert!(!flag);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        assert!(save(&mut storage, StorageKey::IsAdmin, &true));
        assert_eq!(storage.get("isAdmin").unwrap().as_deref(), Some("true"));

        let flag: bool = load_or_default(&storage, StorageKey::IsAdmin);
        assert!(flag);
    }
}
