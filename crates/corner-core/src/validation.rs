//! # Validation Module
//!
//! Input validation utilities for Corner POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI layer (out of scope)                                       │
//! │  ├── Basic format checks, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                        │
//! │  ├── Runs before any collection is touched                              │
//! │  └── Failure means zero state mutation                                  │
//! │                                                                         │
//! │  There is no database layer underneath: these checks are the last line. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field (product name, category).
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed value.
pub fn validate_required_text(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary field that may be zero but never negative
/// (cost price, selling price).
pub fn validate_non_negative_money(field: &'static str, value: Money) -> ValidationResult<()> {
    if value.is_negative() {
        return Err(ValidationError::MustBeNonNegative { field });
    }
    Ok(())
}

/// Validates an integer count that may be zero but never negative
/// (stock level, reorder limit).
pub fn validate_non_negative_count(field: &'static str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative { field });
    }
    Ok(())
}

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be at least 1 (stock-availability checks happen separately,
///   against the catalog's current stock)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }
    Ok(())
}

/// Validates a settlement amount against the outstanding balance.
///
/// ## Rules
/// - Must be strictly positive
/// - Must not exceed the remaining debt
pub fn validate_settlement_amount(amount: Money, outstanding: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive { field: "amount" });
    }
    if amount > outstanding {
        return Err(ValidationError::ExceedsOutstanding {
            amount,
            outstanding,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
