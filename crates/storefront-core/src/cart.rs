//! # Cart
//!
//! Pure cart math: merging lines, quantity updates and totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action            Cart Method              Change              │
//! │  ──────────────            ───────────              ──────              │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_item() ────────────► qty += n or push    │
//! │                                                                         │
//! │  Edit quantity ──────────► update_quantity() ─────► qty = n             │
//! │                            (n <= 0) ──────────────► remove_item()       │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ─────────► retain(id != x)     │
//! │                                                                         │
//! │  Place order ────────────► clear() ───────────────► items.clear()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id
//! - Every line has 1 ≤ quantity ≤ MAX_ITEM_QUANTITY
//! - At most MAX_CART_ITEMS lines

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product};
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart. Serializes as a plain list of cart items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from persisted lines, restoring the invariants.
    ///
    /// Lines with a quantity below 1 are dropped, duplicate ids are merged
    /// into the first occurrence, quantities are capped at the maximum and
    /// lines past `MAX_CART_ITEMS` are dropped.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::new();

        for item in items {
            if item.quantity < 1 {
                continue;
            }
            let quantity = item.quantity.min(MAX_ITEM_QUANTITY);

            if let Some(existing) = cart.items.iter_mut().find(|i| i.id() == item.id()) {
                existing.quantity = (existing.quantity + quantity).min(MAX_ITEM_QUANTITY);
            } else if cart.items.len() < MAX_CART_ITEMS {
                cart.items.push(CartItem::new(item.product, quantity));
            }
        }

        cart
    }

    /// Adds a product or increases the quantity of its existing line.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not in 1..=999
    /// - `QuantityTooLarge` if the merged quantity would exceed 999
    /// - `CartTooLarge` if a new line would exceed 100 lines
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.id() == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::new(product.clone(), quantity));
        Ok(())
    }

    /// Sets the quantity of a line. A quantity of zero or less removes it.
    ///
    /// Returns whether a line was changed; an unknown id is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<bool> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.id() == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a line by product id. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id() != product_id);
        self.items.len() != initial_len
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Units across all lines (the badge count on the cart icon).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, i| count.saturating_add(i.quantity))
    }

    /// Σ(price × quantity).
    pub fn subtotal(&self) -> Money {
        subtotal(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals for display, with shipping charged only on a non-empty cart.
    pub fn totals(&self, shipping_fee: Money) -> CartTotals {
        let shipping = if self.is_empty() {
            Money::zero()
        } else {
            shipping_fee
        };
        let subtotal = self.subtotal();

        CartTotals {
            line_count: self.line_count(),
            item_count: self.item_count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// Σ(price × quantity) over any list of cart lines.
pub fn subtotal(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Cart totals summary for the cart page and checkout sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            image: String::new(),
            description: format!("Description of {}", id),
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_product_sums_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 5);
    }

    #[test]
    fn test_cart_add_rejects_bad_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        assert!(matches!(
            cart.add_item(&product, 0),
            Err(CoreError::Validation(_))
        ));

        cart.add_item(&product, 990).unwrap();
        assert!(matches!(
            cart.add_item(&product, 10),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));
        assert_eq!(cart.item_count(), 990);
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&test_product(&i.to_string(), 100), 1).unwrap();
        }

        let result = cart.add_item(&test_product("overflow", 100), 1);
        assert!(matches!(result, Err(CoreError::CartTooLarge { .. })));
        // Existing lines can still grow.
        cart.add_item(&test_product("0", 100), 1).unwrap();
    }

    #[test]
    fn test_update_quantity_zero_matches_remove() {
        let product = test_product("1", 500);
        let mut a = Cart::new();
        a.add_item(&product, 3).unwrap();
        let mut b = a.clone();

        assert!(a.update_quantity("1", 0).unwrap());
        assert!(b.remove_item("1"));
        assert_eq!(a, b);
        assert!(a.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 500), 3).unwrap();
        cart.update_quantity("1", -4).unwrap();
        assert!(cart.get("1").is_none());
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 500), 3).unwrap();

        assert!(cart.update_quantity("1", 7).unwrap());
        assert_eq!(cart.item_count(), 7);
        assert!(!cart.update_quantity("missing", 2).unwrap());
        assert!(cart.update_quantity("1", 1000).is_err());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        let shipping = Money::from_cents(500);
        assert_eq!(cart.totals(shipping).total, Money::zero());

        cart.add_item(&test_product("1", 1000), 2).unwrap();
        cart.add_item(&test_product("2", 250), 1).unwrap();

        let totals = cart.totals(shipping);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.cents(), 2250);
        assert_eq!(totals.shipping.cents(), 500);
        assert_eq!(totals.total.cents(), 2750);
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let items = vec![
            CartItem::new(test_product("1", 100), 2),
            CartItem::new(test_product("2", 100), 0),
            CartItem::new(test_product("1", 100), 3),
            CartItem::new(test_product("3", 100), 5000),
        ];
        let cart = Cart::from_items(items);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.get("1").unwrap().quantity, 5);
        assert!(cart.get("2").is_none());
        assert_eq!(cart.get("3").unwrap().quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_from_items_caps_huge_duplicates() {
        let items = vec![
            CartItem::new(test_product("a", 100), 5),
            CartItem::new(test_product("a", 100), i64::MAX),
            CartItem::new(test_product("a", 100), i64::MAX),
        ];
        let cart = Cart::from_items(items);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("a").unwrap().quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.subtotal().cents(), 100 * MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_from_items_drops_lines_past_limit() {
        let items = (0..MAX_CART_ITEMS + 5)
            .map(|i| CartItem::new(test_product(&i.to_string(), 100), 1))
            .collect();
        let cart = Cart::from_items(items);

        assert_eq!(cart.line_count(), MAX_CART_ITEMS);
        assert!(cart.get("0").is_some());
        assert!(cart.get(&MAX_CART_ITEMS.to_string()).is_none());
    }

    #[test]
    fn test_cart_totals_saturate_on_huge_prices() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", i64::MAX / 2), 3).unwrap();

        assert_eq!(cart.subtotal().cents(), i64::MAX);
        let totals = cart.totals(Money::from_cents(500));
        assert_eq!(totals.total.cents(), i64::MAX);
    }

    #[test]
    fn test_cart_serializes_as_list() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 1).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "1");

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
