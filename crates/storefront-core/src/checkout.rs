//! # Checkout
//!
//! Turns a cart snapshot and delivery details into an [`Order`].
//!
//! ```text
//! CustomerInfo + [CartItem] + shipping fee
//!      │
//!      ▼
//! build_order() ── empty items? ──► CoreError::EmptyCart
//!      │          bad details? ──► CoreError::Validation
//!      ▼
//! Order { status: Pending, total_amount: Σ(price × qty) + shipping }
//! ```

use chrono::Utc;
use uuid::Uuid;

use crate::cart::subtotal;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, CustomerInfo, Order, OrderStatus, PaymentMethod};
use crate::validation::{validate_customer_info, validate_quantity};

/// Builds a new pending order. The total is computed here, once.
pub fn build_order(
    customer_info: &CustomerInfo,
    items: &[CartItem],
    shipping_fee: Money,
) -> CoreResult<Order> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let customer_info = customer_info.trimmed();
    validate_customer_info(&customer_info)?;

    for item in items {
        validate_quantity(item.quantity)?;
    }

    Ok(Order {
        id: Uuid::new_v4().to_string(),
        customer_info,
        items: items.to_vec(),
        total_amount: subtotal(items) + shipping_fee,
        payment_method: PaymentMethod::CashOnDelivery,
        timestamp: Utc::now(),
        status: OrderStatus::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn line(id: &str, price_cents: i64, quantity: i64) -> CartItem {
        CartItem::new(
            Product {
                id: id.to_string(),
                name: format!("Item {}", id),
                price: Money::from_cents(price_cents),
                image: String::new(),
                description: String::new(),
            },
            quantity,
        )
    }

    fn customer() -> CustomerInfo {
        CustomerInfo::new(" Ada Lovelace ", "0300 1234567", "12 Analytical Lane")
    }

    #[test]
    fn test_build_order_total_includes_shipping() {
        let items = vec![line("a", 1250, 2), line("b", 399, 3)];
        let order = build_order(&customer(), &items, Money::from_cents(500)).unwrap();

        assert_eq!(order.total_amount.cents(), 2500 + 1197 + 500);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(order.items, items);
        assert_eq!(order.customer_info.name, "Ada Lovelace");
    }

    #[test]
    fn test_build_order_empty_items() {
        let result = build_order(&customer(), &[], Money::from_cents(500));
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_build_order_validates_customer() {
        let bad = CustomerInfo::new("Ada", "", "12 Analytical Lane");
        let result = build_order(&bad, &[line("a", 100, 1)], Money::zero());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_build_order_rejects_zero_quantity_line() {
        let result = build_order(&customer(), &[line("a", 100, 0)], Money::zero());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_order_ids_are_unique() {
        let items = [line("a", 100, 1)];
        let first = build_order(&customer(), &items, Money::zero()).unwrap();
        let second = build_order(&customer(), &items, Money::zero()).unwrap();
        assert_ne!(first.id, second.id);
    }
}
