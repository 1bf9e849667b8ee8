//! # Validation Module
//!
//! Input validation for the admin product form and the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                 │
//! │  └── Required-field hints, immediate feedback                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: StoreState operation                                          │
//! │  └── THIS MODULE: rules checked before any state is touched            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persisted JSON                                                │
//! │  └── Only ever written from validated state                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_quantity, validate_phone};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_phone("+92 300 1234567").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CustomerInfo, ProductDraft};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_ADDRESS_LEN: usize = 500;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

fn require(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Product Form
// =============================================================================

/// Validates a product name: required, at most 200 characters.
///
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Linen Shirt").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require("name", name, MAX_NAME_LEN)
}

pub fn validate_description(description: &str) -> ValidationResult<()> {
    require("description", description, MAX_DESCRIPTION_LEN)
}

/// Validates a price: positive and at most `MAX_PRICE`.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE.cents(),
        });
    }

    Ok(())
}

/// Validates an image reference. Empty means "no image" and is allowed.
///
/// Accepted forms are absolute http(s) URLs, `data:` URIs produced by the
/// upload widget, and site-relative paths.
pub fn validate_image(image: &str) -> ValidationResult<()> {
    let image = image.trim();

    if image.is_empty() {
        return Ok(());
    }

    let accepted = image.starts_with("http://")
        || image.starts_with("https://")
        || image.starts_with("data:image/")
        || image.starts_with('/');

    if !accepted {
        return Err(ValidationError::invalid_format(
            "image",
            "must be an http(s) URL, a data:image URI or a path starting with /",
        ));
    }

    Ok(())
}

/// Validates every field of an admin product form.
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_price(draft.price)?;
    validate_description(&draft.description)?;
    validate_image(&draft.image)?;
    Ok(())
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Validates a phone number.
///
/// ## Rules
/// - Required
/// - Only digits, spaces, `+`, `-`, `(` and `)`
/// - Between 7 and 15 digits
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::required("phone"));
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::invalid_format(
            "phone",
            "may only contain digits, spaces, +, -, ( and )",
        ));
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::invalid_format(
            "phone",
            format!(
                "must contain {} to {} digits",
                MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
            ),
        ));
    }

    Ok(())
}

/// Validates the delivery details entered at checkout.
pub fn validate_customer_info(info: &CustomerInfo) -> ValidationResult<()> {
    require("name", &info.name, MAX_NAME_LEN)?;
    validate_phone(&info.phone)?;
    require("address", &info.address, MAX_ADDRESS_LEN)?;
    Ok(())
}

// =============================================================================
// Cart
// =============================================================================

/// Validates a quantity being added to the cart.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Trims a catalogue search query. At most 100 characters.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Linen Shirt").is_ok());
        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::required("name"))
        );
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(MAX_PRICE).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(i64::MAX / 2)),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 1,
                max: MAX_PRICE.cents(),
            })
        );
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image("").is_ok());
        assert!(validate_image("https://cdn.example/p.jpg").is_ok());
        assert!(validate_image("data:image/png;base64,AAAA").is_ok());
        assert!(validate_image("/images/p.jpg").is_ok());
        assert!(validate_image("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_validate_product_draft_reports_first_failure() {
        let draft = ProductDraft::new("Mug", Money::zero(), "");
        assert_eq!(
            validate_product_draft(&draft),
            Err(ValidationError::MustBePositive {
                field: "price".to_string()
            })
        );

        let draft = ProductDraft::new("Mug", Money::from_cents(899), "");
        assert_eq!(
            validate_product_draft(&draft),
            Err(ValidationError::required("description"))
        );
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0300-1234567").is_ok());
        assert!(validate_phone("+1 (555) 010-2030").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone(&"1".repeat(16)).is_err());
    }

    #[test]
    fn test_validate_customer_info() {
        let ok = CustomerInfo::new("Ada", "0300 1234567", "1 Loop Road");
        assert!(validate_customer_info(&ok).is_ok());

        let missing_address = CustomerInfo::new("Ada", "0300 1234567", "  ");
        assert_eq!(
            validate_customer_info(&missing_address),
            Err(ValidationError::required("address"))
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  mug ").unwrap(), "mug");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
