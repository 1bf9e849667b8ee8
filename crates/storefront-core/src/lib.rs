//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the storefront's domain model and every rule that does
//! not need storage: money arithmetic, cart merging, checkout totals and
//! form validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Frontend                             │   │
//! │  │    Catalogue ──► Cart ──► Checkout ──► Admin Panel              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-store (StoreState)                      │   │
//! │  │    login, add_to_cart, place_order, update_order_status, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  checkout │  │   │
//! │  │   │   Order   │  │           │  │  Totals   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO STORAGE • NO CONFIG FILES • NO NETWORK                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product};
//!
//! let mug = Product {
//!     id: "mug".to_string(),
//!     name: "Mug".to_string(),
//!     price: Money::from_cents(899),
//!     image: String::new(),
//!     description: "Ceramic".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&mug, 1).unwrap();
//! cart.add_item(&mug, 2).unwrap();
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.subtotal().cents(), 2697);
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartTotals};
pub use checkout::build_order;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum distinct products in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in the cart.
///
/// Guards against typing 1000 instead of 10 in the quantity box.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a product may carry ($1,000,000.00).
///
/// Keeps price × quantity × lines far below `i64::MAX` cents.
pub const MAX_PRICE: Money = Money::from_cents(100_000_000);

/// Flat shipping fee applied to every order unless configured otherwise.
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_cents(500);
