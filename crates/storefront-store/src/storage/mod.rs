//! # Storage Module
//!
//! Key-value storage backends for persisted storefront state.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Browser-style Local Storage                          │
//! │                                                                         │
//! │  The storefront persists exactly like window.localStorage:             │
//! │  string keys mapping to JSON-encoded string values.                    │
//! │                                                                         │
//! │  StoreState                                                            │
//! │       │                                                                 │
//! │       │  storage.set("cart", "[{\"id\":\"...\",\"quantity\":2}]")      │
//! │       ▼                                                                 │
//! │  KeyValueStorage (trait)                                               │
//! │  ├── MemoryStorage  - in-process map (tests, ephemeral sessions)       │
//! │  └── FileStorage    - one JSON object file on disk                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;

use crate::error::StoreResult;

/// A string-to-string store with local-storage semantics.
///
/// Implementations decide when data reaches durable media; `flush` forces
/// anything buffered out.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> StoreResult<()>;

    fn remove(&mut self, key: &str) -> StoreResult<()>;

    fn flush(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn flush(&mut self) -> StoreResult<()> {
        (**self).flush()
    }
}

/// The keys the storefront persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// `bool`: whether the admin session is active.
    IsAdmin,
    /// `Vec<Product>`: the catalogue.
    Products,
    /// `Vec<CartItem>`: the shopper's cart.
    Cart,
    /// `Vec<Order>`: every placed order.
    Orders,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::IsAdmin,
        StorageKey::Products,
        StorageKey::Cart,
        StorageKey::Orders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::IsAdmin => "isAdmin",
            StorageKey::Products => "products",
            StorageKey::Cart => "cart",
            StorageKey::Orders => "orders",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_names() {
        let names: Vec<&str> = StorageKey::ALL.iter().map(StorageKey::as_str).collect();
        assert_eq!(names, ["isAdmin", "products", "cart", "orders"]);
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let mut storage: Box<dyn KeyValueStorage> = Box::new(MemoryStorage::new());
        storage.set("k", "v".to_string()).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
