//! # Store State
//!
//! The single owner of storefront state: catalogue, cart, orders and the
//! admin session flag.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    StoreState Lifecycle                                 │
//! │                                                                         │
//! │  StoreState::open(storage, checkout, credentials)                       │
//! │       │  load isAdmin / products / cart / orders (fail-soft)            │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  Operations (each: mutate in memory, then persist its key)    │     │
//! │  │                                                               │     │
//! │  │  login ─────────────────────► isAdmin                         │     │
//! │  │  add/edit/delete_product ───► products (+ cart on delete)     │     │
//! │  │  add_to_cart / update / rm ─► cart                            │     │
//! │  │  place_order ───────────────► orders + cart                   │     │
//! │  │  update_order_status ───────► orders                          │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close() ── flush all four keys                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//! A storage write that fails is logged and the in-memory state stays
//! authoritative; the next successful write or `flush` catches storage up.
//! Business rule failures come back as [`CoreError`] whose message is meant
//! for the shopper or admin.

use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use storefront_core::validation::{validate_product_draft, validate_search_query};
use storefront_core::{
    build_order, Cart, CartItem, CartTotals, CoreError, CoreResult, CustomerInfo, Money, Order,
    OrderStatus, Product, ProductDraft,
};

use crate::config::{CheckoutSettings, StorefrontConfig};
use crate::credentials::{CredentialStore, StaticCredentials};
use crate::error::StoreResult;
use crate::snapshot;
use crate::storage::{FileStorage, KeyValueStorage, StorageKey};

/// Admin dashboard summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub product_count: usize,
    pub order_count: usize,
    pub pending_orders: usize,
    pub shipped_orders: usize,
    pub delivered_orders: usize,
    pub total_sales: Money,
}

/// Storefront state backed by a key-value store.
pub struct StoreState<S: KeyValueStorage> {
    storage: S,
    credentials: Box<dyn CredentialStore>,
    checkout: CheckoutSettings,
    is_admin: bool,
    products: Vec<Product>,
    cart: Cart,
    orders: Vec<Order>,
}

impl StoreState<FileStorage> {
    /// Opens file-backed state as described by the configuration.
    pub fn from_config(config: &StorefrontConfig) -> StoreResult<Self> {
        let storage = FileStorage::open_or_recover(&config.storage.path)?;
        Ok(StoreState::open(
            storage,
            config.checkout.clone(),
            StaticCredentials::from(config.admin.clone()),
        ))
    }
}

impl<S: KeyValueStorage> StoreState<S> {
    /// Initialises state from whatever the storage holds.
    ///
    /// Missing or unreadable keys start empty. Persisted cart lines are
    /// normalised so the quantity invariants hold from the first read.
    pub fn open(
        storage: S,
        checkout: CheckoutSettings,
        credentials: impl CredentialStore + 'static,
    ) -> Self {
        let is_admin: bool = snapshot::load_or_default(&storage, StorageKey::IsAdmin);
        let products: Vec<Product> = snapshot::load_or_default(&storage, StorageKey::Products);
        let cart_items: Vec<CartItem> = snapshot::load_or_default(&storage, StorageKey::Cart);
        let orders: Vec<Order> = snapshot::load_or_default(&storage, StorageKey::Orders);

        let cart = Cart::from_items(cart_items);

        info!(
            products = products.len(),
            cart_lines = cart.line_count(),
            orders = orders.len(),
            is_admin,
            "Store state loaded"
        );

        StoreState {
            storage,
            credentials: Box::new(credentials),
            checkout,
            is_admin,
            products,
            cart,
            orders,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Writes every key to storage and flushes the backend.
    pub fn flush(&mut self) -> StoreResult<()> {
        snapshot::try_save(&mut self.storage, StorageKey::IsAdmin, &self.is_admin)?;
        snapshot::try_save(&mut self.storage, StorageKey::Products, &self.products)?;
        snapshot::try_save(&mut self.storage, StorageKey::Cart, &self.cart)?;
        snapshot::try_save(&mut self.storage, StorageKey::Orders, &self.orders)?;
        self.storage.flush()?;
        debug!("Store state flushed");
        Ok(())
    }

    /// Flushes and releases the storage backend.
    pub fn close(mut self) -> StoreResult<S> {
        self.flush()?;
        info!("Store state closed");
        Ok(self.storage)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn checkout_settings(&self) -> &CheckoutSettings {
        &self.checkout
    }

    fn persist(&mut self, key: StorageKey) {
        match key {
            StorageKey::IsAdmin => snapshot::save(&mut self.storage, key, &self.is_admin),
            StorageKey::Products => snapshot::save(&mut self.storage, key, &self.products),
            StorageKey::Cart => snapshot::save(&mut self.storage, key, &self.cart),
            StorageKey::Orders => snapshot::save(&mut self.storage, key, &self.orders),
        };
    }

    // =========================================================================
    // Admin Session
    // =========================================================================

    /// Starts an admin session iff the credentials match.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if !self.credentials.verify(email, password) {
            warn!(email = %email, "Admin login rejected");
            return false;
        }

        self.is_admin = true;
        self.persist(StorageKey::IsAdmin);
        info!(email = %email, "Admin logged in");
        true
    }

    pub fn logout(&mut self) {
        if self.is_admin {
            self.is_admin = false;
            self.persist(StorageKey::IsAdmin);
            info!("Admin logged out");
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive match on name or description. Empty lists everything.
    pub fn search_products(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let needle = validate_search_query(query)?.to_lowercase();

        Ok(self
            .products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Validates the draft and adds it under a fresh id.
    pub fn add_product(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        validate_product_draft(&draft)?;

        let product = Product::from_draft(draft);
        self.products.push(product.clone());
        self.persist(StorageKey::Products);

        info!(product_id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Replaces a product's editable fields. Cart lines keep their snapshot.
    pub fn edit_product(&mut self, id: &str, draft: ProductDraft) -> CoreResult<Product> {
        validate_product_draft(&draft)?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        product.apply_draft(draft);
        let updated = product.clone();

        self.persist(StorageKey::Products);
        info!(product_id = %id, "Product updated");
        Ok(updated)
    }

    /// Removes a product from the catalogue and from the cart.
    ///
    /// Orders already placed keep their copy.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        let removed = self.products.remove(index);
        self.persist(StorageKey::Products);

        if self.cart.remove_item(id) {
            self.persist(StorageKey::Cart);
        }

        info!(product_id = %id, "Product deleted");
        Ok(removed)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn cart(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Adds `quantity` units, merging with an existing line for the product.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.cart.add_item(product, quantity)?;
        self.persist(StorageKey::Cart);
        debug!(product_id = %product.id, quantity, "Added to cart");
        Ok(())
    }

    /// Overwrites a line's quantity; `quantity <= 0` removes the line.
    pub fn update_cart_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<()> {
        if self.cart.update_quantity(id, quantity)? {
            self.persist(StorageKey::Cart);
            debug!(product_id = %id, quantity, "Cart quantity updated");
        } else {
            debug!(product_id = %id, "Cart quantity update ignored, line not in cart");
        }
        Ok(())
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        if self.cart.remove_item(id) {
            self.persist(StorageKey::Cart);
            debug!(product_id = %id, "Removed from cart");
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist(StorageKey::Cart);
    }

    /// Σ(price × quantity) over the cart.
    pub fn cart_subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Σ(quantity) over the cart.
    pub fn cart_item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals(self.checkout.shipping_fee())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Records an order for `items` and empties the cart.
    ///
    /// ## Errors
    /// - `EmptyCart` when `items` is empty; nothing changes
    /// - `Validation` when the delivery details are incomplete
    pub fn place_order(
        &mut self,
        customer_info: &CustomerInfo,
        items: &[CartItem],
    ) -> CoreResult<String> {
        let order = build_order(customer_info, items, self.checkout.shipping_fee())?;
        let order_id = order.id.clone();

        info!(
            order_id = %order_id,
            lines = order.items.len(),
            total = %order.total_amount,
            "Order placed"
        );

        self.orders.push(order);
        self.cart.clear();
        self.persist(StorageKey::Orders);
        self.persist(StorageKey::Cart);

        Ok(order_id)
    }

    /// Places an order for the current cart.
    pub fn checkout(&mut self, customer_info: &CustomerInfo) -> CoreResult<String> {
        let items = self.cart.items().to_vec();
        self.place_order(customer_info, &items)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Orders sorted by timestamp, most recent first.
    pub fn orders_newest_first(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.iter().rev().collect();
        orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        orders
    }

    /// Sets an order's status. Returns false, changing nothing, if no order matches.
    pub fn update_order_status(&mut self, id: &str, status: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == id) else {
            debug!(order_id = %id, "Status update ignored, order not found");
            return false;
        };

        let previous = order.status;
        order.status = status;
        self.persist(StorageKey::Orders);

        info!(order_id = %id, from = %previous, to = %status, "Order status updated");
        true
    }

    /// Σ(totalAmount) over every order.
    pub fn total_sales(&self) -> Money {
        self.orders.iter().map(|o| o.total_amount).sum()
    }

    pub fn dashboard(&self) -> Dashboard {
        let count = |status: OrderStatus| self.orders.iter().filter(|o| o.status == status).count();

        Dashboard {
            product_count: self.products.len(),
            order_count: self.orders.len(),
            pending_orders: count(OrderStatus::Pending),
            shipped_orders: count(OrderStatus::Shipped),
            delivered_orders: count(OrderStatus::Delivered),
            total_sales: self.total_sales(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
