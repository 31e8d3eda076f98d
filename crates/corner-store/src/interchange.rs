//! # Interchange Documents
//!
//! Export/import of the full collection set as a human-readable JSON
//! document (backup files, migration between installs).
//!
//! ## Validation Depth
//! Import performs a **shallow** shape check only: all five top-level keys
//! present and array-typed. Individual records are trusted structurally
//! but not semantically - the engine's invariants (stock >= 0, debtor
//! balance reconciliation) are NOT re-verified on import. This is a known
//! gap carried over from the system's contract, not an accident.

use serde_json::Value;
use tracing::info;

use corner_core::Shop;

use crate::error::{StoreError, StoreResult};

/// The five required top-level collection keys.
pub(crate) const COLLECTION_KEYS: [&str; 5] = ["products", "sales", "payments", "debtors", "admins"];

/// Serializes the shop to a pretty-printed interchange document.
pub fn export(shop: &Shop) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(shop)?)
}

/// Parses an interchange document into a shop.
///
/// ## Errors
/// `StoreError::Shape` with a descriptive reason when the document root is
/// not an object, a collection key is missing, or a key holds a non-array.
/// `StoreError::Json` when the records inside fail to deserialize.
pub fn import(document: &str) -> StoreResult<Shop> {
    let value: Value = serde_json::from_str(document)?;
    check_shape(&value)?;

    let mut shop: Shop = serde_json::from_value(value)?;
    shop.ensure_seed_admin();

    info!(
        products = shop.catalog.len(),
        sales = shop.ledger.sales.len(),
        payments = shop.ledger.payments.len(),
        debtors = shop.ledger.debtors.len(),
        "Imported collections document"
    );
    Ok(shop)
}

fn check_shape(value: &Value) -> StoreResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::shape("document root must be an object"))?;

    for key in COLLECTION_KEYS {
        match object.get(key) {
            None => return Err(StoreError::shape(format!("missing key '{key}'"))),
            Some(v) if !v.is_array() => {
                return Err(StoreError::shape(format!("'{key}' must be an array")))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
