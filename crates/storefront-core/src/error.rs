//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StoreError       - Storage and configuration failures             │
//! │                                                                         │
//! │  Storage failures never reach the UI: they are logged and the          │
//! │  in-memory state is kept. CoreError messages are shown to the user.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Business rule violations raised by cart, catalogue and checkout operations.
///
/// The `Display` text is written for the end user and is shown as-is by the
/// frontend.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Cart cannot have more than {max} different products")]
    CartTooLarge { max: usize },

    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors from the product and checkout forms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
