//! # Catalog
//!
//! Owns the set of products and their stock levels. Leaf component: no
//! dependencies on any other part of the engine.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Operations                                 │
//! │                                                                         │
//! │  UI Action               Operation               State Change           │
//! │  ─────────               ─────────               ────────────           │
//! │                                                                         │
//! │  Save Product ─────────► add_product() ────────► products.push(p)       │
//! │                                                                         │
//! │  Edit Product ─────────► edit_product() ───────► fields updated,        │
//! │                                                   sku kept as-is        │
//! │                                                                         │
//! │  Delete Product ───────► delete_product() ─────► products.retain(..)    │
//! │                                                                         │
//! │  Checkout (ledger) ────► deduct_stock() ───────► stock -= qty           │
//! │                                                                         │
//! │  All validation happens before the first write: a failed call leaves    │
//! │  the catalog byte-for-byte unchanged.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{
    validate_non_negative_count, validate_non_negative_money, validate_required_text,
};

// =============================================================================
// Product Input
// =============================================================================

/// Caller-supplied fields for adding or editing a product.
///
/// The same validation rules apply to both operations; `id` and `sku`
/// are never caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub cost: Money,
    pub sell: Money,
    pub stock: i64,
    pub limit: i64,
}

impl ProductInput {
    /// Validates all fields, returning trimmed name and category.
    fn validate(&self) -> CoreResult<(String, String)> {
        let name = validate_required_text("name", &self.name)?;
        let category = validate_required_text("category", &self.category)?;
        validate_non_negative_money("cost", self.cost)?;
        validate_non_negative_money("sell", self.sell)?;
        validate_non_negative_count("stock", self.stock)?;
        validate_non_negative_count("limit", self.limit)?;
        Ok((name, category))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The product catalog.
///
/// An explicitly owned store: all mutation funnels through the operations
/// below, never through ambient globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Adds a product to the catalog.
    ///
    /// ## Behavior
    /// - Assigns a fresh UUID v4 id
    /// - Derives the SKU from the category (see [`generate_sku`])
    ///
    /// ## Errors
    /// `ValidationError` if name or category is empty, or any numeric
    /// field is negative.
    pub fn add_product(&mut self, input: ProductInput) -> CoreResult<&Product> {
        let (name, category) = input.validate()?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: generate_sku(&category),
            name,
            category,
            cost: input.cost,
            sell: input.sell,
            stock: input.stock,
            limit: input.limit,
        };

        self.products.push(product);
        Ok(self.products.last().expect("just pushed"))
    }

    /// Edits an existing product.
    ///
    /// ## Behavior
    /// The SKU is NOT regenerated even if the category changes. This is a
    /// preserved limitation of the system, not an oversight to fix here.
    ///
    /// ## Errors
    /// - `NotFound` if the id is unknown
    /// - `ValidationError` on the same rules as [`Catalog::add_product`]
    pub fn edit_product(&mut self, id: &str, input: ProductInput) -> CoreResult<()> {
        // Validate before locating: a bad input must not mutate anything,
        // and locating first would make no difference either way.
        let (name, category) = input.validate()?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("Product", id))?;

        product.name = name;
        product.category = category;
        product.cost = input.cost;
        product.sell = input.sell;
        product.stock = input.stock;
        product.limit = input.limit;

        Ok(())
    }

    /// Removes a product.
    ///
    /// Historical sale items keep their own snapshots and are unaffected.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);

        if self.products.len() == before {
            return Err(CoreError::not_found("Product", id));
        }
        Ok(())
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Decreases a product's stock by `qty`.
    ///
    /// ## Precondition Contract
    /// The caller (the ledger engine) must have already validated
    /// `qty <= stock` through cart staging. This operation does not
    /// re-validate; it is only ever invoked after a successful cart
    /// validation. A missing product is skipped silently, matching the
    /// weak-reference semantics of cart lines.
    pub fn deduct_stock(&mut self, id: &str, qty: i64) {
        if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
            product.stock -= qty;
        }
    }

    /// Case-insensitive substring search over name, sku, and category.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.sku.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// SKU Generation
// =============================================================================

/// Derives a SKU from a category.
///
/// ## Format
/// First three characters of the category, uppercased, padded with `X` to
/// exactly three characters, followed by a random 4-digit number in
/// [1000, 9999]. Example: `GRO4821` for "Grocery".
///
/// ## Uniqueness
/// None enforced. Collisions are possible and accepted; the UUID `id` is
/// the real identity.
pub fn generate_sku(category: &str) -> String {
    let mut prefix: String = category
        .chars()
        .take(3)
        .flat_map(|c| c.to_uppercase())
        .collect();
    while prefix.chars().count() < 3 {
        prefix.push('X');
    }

    let suffix: u32 = rand::rng().random_range(1000..=9999);
    format!("{prefix}{suffix}")
}

// =============================================================================
// Unit Tests
// =============================================================================
