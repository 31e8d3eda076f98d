//! # Shop
//!
//! The complete collection set: catalog, ledger, and admin accounts, owned
//! by one struct and passed by reference - no ambient globals.
//!
//! ## Persisted Shape
//! `Shop` serializes to the flat five-key Collections document the
//! persistence gateway and the export/import surface exchange:
//!
//! ```text
//! {
//!   "products": [...],
//!   "sales":    [...],
//!   "payments": [...],
//!   "debtors":  [...],
//!   "admins":   [...]
//! }
//! ```
//!
//! Missing collections deserialize to empty; a missing admin list is
//! replaced by the seeded administrator so the system is usable on first
//! run and after corruption.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ledger::Ledger;
use crate::types::Admin;

/// Username of the administrator seeded on first run.
pub const SEED_ADMIN_USERNAME: &str = "admin";
/// Password of the seeded administrator. Authentication strength is an
/// explicit non-goal; this exists so a fresh install can log in at all.
pub const SEED_ADMIN_PASSWORD: &str = "admin123";

/// The whole shop state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    #[serde(flatten)]
    pub catalog: Catalog,

    #[serde(flatten)]
    pub ledger: Ledger,

    #[serde(default = "seed_admins")]
    pub admins: Vec<Admin>,
}

impl Shop {
    /// A fresh shop with empty collections and the seeded administrator.
    pub fn bootstrap() -> Self {
        Shop {
            catalog: Catalog::new(),
            ledger: Ledger::new(),
            admins: seed_admins(),
        }
    }

    /// Re-seeds the default administrator when the list is empty.
    ///
    /// Deserialization already seeds a *missing* list; this covers data
    /// that arrived with an empty array.
    pub fn ensure_seed_admin(&mut self) {
        if self.admins.is_empty() {
            self.admins = seed_admins();
        }
    }

    /// Adds an administrator account.
    pub fn add_admin(&mut self, username: &str, password: &str, role: &str) -> CoreResult<&Admin> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::Required { field: "username" }.into());
        }
        if password.is_empty() {
            return Err(ValidationError::Required { field: "password" }.into());
        }
        if self.admins.iter().any(|a| a.username == username) {
            return Err(ValidationError::Duplicate {
                field: "username",
                value: username.to_string(),
            }
            .into());
        }

        self.admins.push(Admin {
            username: username.to_string(),
            password: password.to_string(),
            role: if role.trim().is_empty() {
                "Staff".to_string()
            } else {
                role.trim().to_string()
            },
            date: Utc::now().to_rfc3339(),
        });
        Ok(self.admins.last().expect("just pushed"))
    }

    /// Removes an administrator account by username.
    pub fn remove_admin(&mut self, username: &str) -> CoreResult<()> {
        let before = self.admins.len();
        self.admins.retain(|a| a.username != username);
        if self.admins.len() == before {
            return Err(CoreError::not_found("Admin", username));
        }
        Ok(())
    }

    /// Checks a username/password pair against the admin list.
    pub fn verify_login(&self, username: &str, password: &str) -> Option<&Admin> {
        self.admins
            .iter()
            .find(|a| a.username == username && a.password == password)
    }

    /// Wipes products, sales, payments, and debtors. Admin accounts are
    /// preserved so the shop stays operable after a reset.
    pub fn clear_all_data(&mut self) {
        self.catalog.products.clear();
        self.ledger.clear_transactions();
    }
}

impl Default for Shop {
    fn default() -> Self {
        Shop::bootstrap()
    }
}

fn seed_admins() -> Vec<Admin> {
    vec![Admin {
        username: SEED_ADMIN_USERNAME.to_string(),
        password: SEED_ADMIN_PASSWORD.to_string(),
        role: "Super Admin".to_string(),
        date: Utc::now().to_rfc3339(),
    }]
}

// =============================================================================
// Unit Tests
// =============================================================================
