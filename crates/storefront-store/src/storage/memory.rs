//! In-memory storage backend.

use std::collections::BTreeMap;

use super::KeyValueStorage;
use crate::error::StoreResult;

/// Storage held in a map; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Creates storage pre-populated with raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStorage {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set("cart", "[]".to_string()).unwrap();
        storage.set("cart", "[1]".to_string()).unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_with_entries() {
        let storage = MemoryStorage::with_entries([("isAdmin", "true")]);
        assert_eq!(storage.get("isAdmin").unwrap().as_deref(), Some("true"));
    }
}
