//! # storefront-store: Persistence Layer for the Storefront
//!
//! This crate owns the storefront's live state and every read and write of
//! it to key-value storage, plus the configuration that shapes it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  UI event (Add to Cart, Place Order, Mark Shipped)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  StoreState   │    │   snapshot    │    │    config    │  │   │
//! │  │   │  (state.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ load_or_      │    │ storefront   │  │   │
//! │  │   │ products      │───►│   default     │    │   .toml      │  │   │
//! │  │   │ cart, orders  │    │ save          │    │ + env vars   │  │   │
//! │  │   │ isAdmin       │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  └────────────────────────────────┼───────────────────────────────┘   │
//! │                                   ▼                                    │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   KeyValueStorage: MemoryStorage | FileStorage (storefront.json)│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`state`] - `StoreState`, the owner of products, cart, orders and session
//! - [`storage`] - Key-value backends and the persisted key names
//! - [`snapshot`] - Fail-soft JSON load/save of typed values
//! - [`config`] - `storefront.toml` plus environment overrides
//! - [`credentials`] - Admin login check
//! - [`error`] - Storage and configuration error types
//!
//! ## Usage
//!
//! ```rust
//! use storefront_core::{CustomerInfo, Money, ProductDraft};
//! use storefront_store::{CheckoutSettings, MemoryStorage, StaticCredentials, StoreState};
//!
//! let mut state = StoreState::open(
//!     MemoryStorage::new(),
//!     CheckoutSettings::default(),
//!     StaticCredentials::new("admin@shop.example", "secret"),
//! );
//!
//! let mug = state
//!     .add_product(ProductDraft::new("Mug", Money::from_cents(899), "Ceramic, 350ml"))
//!     .unwrap();
//! state.add_to_cart(&mug, 2).unwrap();
//!
//! let customer = CustomerInfo::new("Ada", "0300 1234567", "1 Engine Way");
//! let order_id = state.checkout(&customer).unwrap();
//!
//! assert!(state.cart().is_empty());
//! assert_eq!(state.order(&order_id).unwrap().total_amount.cents(), 2 * 899 + 500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod credentials;
pub mod error;
pub mod snapshot;
pub mod state;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AdminConfig, CheckoutSettings, StorageSettings, StorefrontConfig};
pub use credentials::{CredentialStore, StaticCredentials};
pub use error::{StoreError, StoreResult};
pub use state::{Dashboard, StoreState};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageKey};

use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: INFO, DEBUG for storefront crates
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
