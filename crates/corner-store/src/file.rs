//! # JSON File Store
//!
//! Durable storage of the Shop snapshot as a single JSON document.
//!
//! ## Failure Policy (deliberately asymmetric)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load():  missing file ──► bootstrapped defaults (first run)            │
//! │           corrupt JSON ──► bootstrapped defaults + warn! (recovery)     │
//! │           readable     ──► Shop, with the admin seed re-ensured         │
//! │           Startup NEVER aborts on persistence problems.                 │
//! │                                                                         │
//! │  save():  failure ──► StoreError to the caller.                         │
//! │           The in-memory mutation already succeeded; the caller warns    │
//! │           the user about the durability risk and carries on.            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use corner_core::Shop;

use crate::error::StoreResult;
use crate::interchange::COLLECTION_KEYS;

/// File-backed persistence gateway.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store backed by the given file path. The file need not
    /// exist yet; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the shop, falling back to bootstrapped defaults.
    ///
    /// A missing file is the normal first-run case. Unreadable or corrupt
    /// data is logged at warn level and replaced by defaults rather than
    /// aborting startup. Corruption is handled per collection where
    /// possible: a collection key holding a non-array is emptied
    /// individually, keeping the remaining collections intact.
    pub fn load(&self) -> Shop {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No saved data, bootstrapping defaults");
                return Shop::bootstrap();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Failed to read saved data, using defaults");
                return Shop::bootstrap();
            }
        };

        let mut value = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Saved data is corrupt, using defaults");
                return Shop::bootstrap();
            }
        };
        self.empty_malformed_collections(&mut value);

        match serde_json::from_value::<Shop>(value) {
            Ok(mut shop) => {
                // Missing collections already defaulted during deserialize;
                // an explicitly empty admin list still needs the seed.
                shop.ensure_seed_admin();
                debug!(
                    path = %self.path.display(),
                    products = shop.catalog.len(),
                    sales = shop.ledger.sales.len(),
                    "Loaded shop data"
                );
                shop
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Saved data is corrupt, using defaults");
                Shop::bootstrap()
            }
        }
    }

    /// Replaces collection keys holding a non-array with an empty array,
    /// so one malformed collection cannot take the rest of the document
    /// down with it. Missing keys are left alone: deserialization defaults
    /// cover those.
    fn empty_malformed_collections(&self, value: &mut Value) {
        let Some(object) = value.as_object_mut() else {
            return;
        };
        for key in COLLECTION_KEYS {
            if let Some(v) = object.get(key) {
                if !v.is_array() {
                    warn!(
                        path = %self.path.display(),
                        collection = key,
                        "Collection is not an array, emptying it"
                    );
                    object.insert(key.to_string(), Value::Array(Vec::new()));
                }
            }
        }
    }

    /// Saves the shop snapshot.
    ///
    /// Writes to a sibling temp file and renames over the target, so a
    /// crash mid-write cannot leave a half-written document behind.
    pub fn save(&self, shop: &Shop) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(shop)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Saved shop data");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use corner_core::catalog::ProductInput;
    use corner_core::Money;

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("shop.json"))
    }

    #[test]
    fn test_load_missing_file_bootstraps() {
        let dir = tempfile::tempdir().unwrap();
        let shop = store_in(&dir).load();

        assert!(shop.catalog.is_empty());
        assert_eq!(shop.admins.len(), 1);
        assert_eq!(shop.admins[0].username, "admin");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut shop = Shop::bootstrap();
        shop.catalog
            .add_product(ProductInput {
                name: "Rice 5kg".to_string(),
                category: "Grocery".to_string(),
                cost: Money::from_cents(200),
                sell: Money::from_cents(500),
                stock: 10,
                limit: 2,
            })
            .unwrap();

        store.save(&shop).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.catalog.len(), 1);
        assert_eq!(loaded.catalog.products[0].name, "Rice 5kg");
        assert_eq!(loaded.catalog.products[0].sell, Money::from_cents(500));
        assert_eq!(loaded.admins.len(), 1);
    }

    #[test]
    fn test_load_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json at all").unwrap();

        let shop = store.load();
        assert!(shop.catalog.is_empty());
        assert_eq!(shop.admins.len(), 1);
    }

    #[test]
    fn test_load_reseeds_emptied_admin_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{ "products": [], "sales": [], "payments": [], "debtors": [], "admins": [] }"#,
        )
        .unwrap();

        let shop = store.load();
        assert_eq!(shop.admins.len(), 1);
    }

    #[test]
    fn test_load_empties_malformed_collections_individually() {
        // One non-array collection must not discard the valid ones
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{
                "products": 42,
                "sales": [{
                    "receipt": 1755900000000,
                    "date": "2026-08-22T09:00:00+00:00",
                    "customer": "Ama",
                    "phone": "",
                    "items": [{
                        "product_id": "p1", "name": "Rice 5kg",
                        "cost": 200, "sell": 500, "qty": 3
                    }],
                    "total": 1500,
                    "method": "cash"
                }],
                "payments": { "oops": true },
                "debtors": [],
                "admins": []
            }"#,
        )
        .unwrap();

        let shop = store.load();
        assert_eq!(shop.ledger.sales.len(), 1);
        assert_eq!(shop.ledger.sales[0].customer, "Ama");
        assert!(shop.catalog.is_empty());
        assert!(shop.ledger.payments.is_empty());
        assert_eq!(shop.admins.len(), 1);
    }

    #[test]
    fn test_load_defaults_missing_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{ "sales": [] }"#).unwrap();

        let shop = store.load();
        assert!(shop.catalog.is_empty());
        assert!(shop.ledger.payments.is_empty());
        assert_eq!(shop.admins.len(), 1);
    }

    #[test]
    fn test_save_to_unwritable_path_reports_error() {
        let store = JsonStore::new("/no/such/directory/shop.json");
        assert!(store.save(&Shop::bootstrap()).is_err());
    }
}
