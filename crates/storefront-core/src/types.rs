//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  product (flat) │──►│  items snapshot │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  total_amount   │       │
//! │  │  price (Money)  │   └─────────────────┘   │  status         │       │
//! │  │  image          │                         │  customer_info  │       │
//! │  │  description    │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderStatus    │   │ PaymentMethod   │   │  CustomerInfo   │       │
//! │  │  Pending        │   │ CashOnDelivery  │   │  name, phone,   │       │
//! │  │  Shipped        │   └─────────────────┘   │  address        │       │
//! │  │  Delivered      │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! Field names are camelCase so the persisted values match what the browser
//! frontend reads (`customerInfo`, `totalAmount`, `paymentMethod`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the product card.
    pub name: String,

    /// Unit price in minor currency units. Always positive.
    pub price: Money,

    /// Image URL, or empty when the product has no picture.
    #[serde(default)]
    pub image: String,

    /// Long-form description shown on the product page.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Builds a product from an admin form draft with a freshly generated id.
    pub fn from_draft(draft: ProductDraft) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            price: draft.price,
            image: draft.image.trim().to_string(),
            description: draft.description.trim().to_string(),
        }
    }

    /// Overwrites every editable field from a draft, keeping the id.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        self.name = draft.name.trim().to_string();
        self.price = draft.price;
        self.image = draft.image.trim().to_string();
        self.description = draft.description.trim().to_string();
    }

    /// Returns true if the product has an image to display.
    #[inline]
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// The editable fields of a product, as submitted by the admin form.
///
/// Drafts carry no id: `add_product` assigns one, `edit_product` keeps the
/// existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl ProductDraft {
    /// Convenience constructor used by the seed binary and tests.
    pub fn new(name: impl Into<String>, price: Money, description: impl Into<String>) -> Self {
        ProductDraft {
            name: name.into(),
            price,
            image: String::new(),
            description: description.into(),
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart together with the quantity selected.
///
/// The product is stored by value: the price is frozen when the item enters
/// the cart, so later catalogue edits do not change what the customer sees
/// at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Units of this product. Never below 1 while the line exists.
    pub quantity: i64,
}

impl CartItem {
    /// Creates a cart line for a product.
    pub fn new(product: Product, quantity: i64) -> Self {
        CartItem { product, quantity }
    }

    /// The product id this line is keyed by.
    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Delivery details captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        CustomerInfo {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        CustomerInfo {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment state of an order, advanced by the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Order placed, not yet dispatched.
    #[default]
    Pending,
    /// Handed to the courier.
    Shipped,
    /// Received by the customer.
    Delivered,
}

impl OrderStatus {
    /// Every status, in fulfilment order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How an order is paid. The storefront only offers cash on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::CashOnDelivery => f.write_str("Cash on Delivery"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed checkout.
///
/// Uses the snapshot pattern: `items` is a copy of the cart at checkout time
/// and `total_amount` is computed once and never recalculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_info: CustomerInfo,
    pub items: Vec<CartItem>,
    /// Items subtotal plus shipping.
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Sum of line totals, excluding shipping.
    pub fn items_subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, i| count.saturating_add(i.quantity))
    }

    /// Shipping charged on this order, derived from the frozen total.
    pub fn shipping(&self) -> Money {
        self.total_amount - self.items_subtotal()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
