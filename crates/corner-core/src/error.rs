//! # Error Types
//!
//! Domain-specific error types for corner-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  corner-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  corner-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistence failures (load/save/import)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller (UI layer)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity name, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. No error path mutates state - checks happen before any write

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are surfaced
/// synchronously to the caller and are guaranteed to leave every
/// collection untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity (product, sale, debtor, cart line) cannot be found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Insufficient stock to stage or complete a sale.
    ///
    /// ## When This Occurs
    /// - Adding a cart line with qty > current stock
    /// - Merging into an existing line would exceed current stock
    /// - Bumping a line quantity past current stock
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Cash tendered at checkout is less than the cart total.
    #[error("Insufficient payment: total {total}, tendered {tendered}")]
    InsufficientPayment { total: Money, tendered: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for a NotFound error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// A settlement amount exceeds the debtor's remaining balance.
    #[error("payment {amount} exceeds outstanding balance {outstanding}")]
    ExceedsOutstanding { amount: Money, outstanding: Money },

    /// Checkout was attempted against an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Duplicate value (e.g., duplicate admin username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Rice 5kg".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Rice 5kg: available 3, requested 5"
        );

        let err = CoreError::InsufficientPayment {
            total: Money::from_cents(1500),
            tendered: Money::from_cents(1000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: total $15.00, tendered $10.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBeNonNegative { field: "cost" };
        assert_eq!(err.to_string(), "cost cannot be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
