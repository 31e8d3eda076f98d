//! # Cart
//!
//! A transient, single-session staging area of selected product lines.
//!
//! ## Consistency Model
//! Stock checks always read the catalog's **current** stock, not a
//! point-in-time snapshot. Edits to the catalog between cart operations are
//! reflected immediately; there is no isolation between cart staging and
//! the catalog. Line snapshots (name, cost, sell) ARE frozen at add time -
//! only the availability check is live.
//!
//! ## Invariant
//! For any product, the sum of cart-line quantities referencing it never
//! exceeds that product's current stock at the time of the last cart
//! operation. Lines are merged per product, so the sum is a single line.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, SaleItem};
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// A staged line in the cart.
///
/// Holds a weak reference to the product (looked up by id, not owned) plus
/// a snapshot of name/cost/sell taken when the line was added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub cost: Money,
    pub sell: Money,
    pub qty: i64,
}

impl CartLine {
    fn from_product(product: &Product, qty: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            cost: product.cost,
            sell: product.sell,
            qty,
        }
    }

    /// Line total (qty × sell).
    pub fn line_total(&self) -> Money {
        self.sell.multiply_quantity(self.qty)
    }
}

impl From<&CartLine> for SaleItem {
    /// Deep copy into a sale item at checkout. The snapshot carries over
    /// unchanged; the sale owns its copy outright.
    fn from(line: &CartLine) -> Self {
        SaleItem {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            cost: line.cost,
            sell: line.sell,
            qty: line.qty,
        }
    }
}

// =============================================================================
// Quantity Change Outcome
// =============================================================================

/// Result of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyChange {
    /// The line now holds this quantity.
    Updated(i64),
    /// The adjustment would drop the quantity below 1. The line is left
    /// unchanged; the caller should confirm removal with the user and then
    /// call [`Cart::remove_line`] explicitly.
    RemovalRequested,
}

// =============================================================================
// Cart
// =============================================================================

/// The staging cart. Cleared on successful checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Stages a product, merging into an existing line for the same product.
    ///
    /// ## Errors
    /// - `NotFound` if the product id is unknown
    /// - `ValidationError` if qty < 1
    /// - `InsufficientStock` if qty - or the merged line quantity - exceeds
    ///   the product's current stock. The cart is left unchanged.
    pub fn add_line(&mut self, catalog: &Catalog, product_id: &str, qty: i64) -> CoreResult<()> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| CoreError::not_found("Product", product_id))?;
        validate_quantity(qty)?;

        let staged = self
            .lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.qty);
        let requested = staged + qty;

        if requested > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested,
            });
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.qty = requested,
            None => self.lines.push(CartLine::from_product(product, qty)),
        }
        Ok(())
    }

    /// Adjusts a line's quantity by `delta` (positive or negative).
    ///
    /// ## Behavior
    /// - Dropping below 1 signals [`QtyChange::RemovalRequested`] instead of
    ///   silently deleting the line
    /// - Exceeding current stock fails with `InsufficientStock` and leaves
    ///   the line unchanged
    pub fn change_qty(
        &mut self,
        catalog: &Catalog,
        index: usize,
        delta: i64,
    ) -> CoreResult<QtyChange> {
        let line = self
            .lines
            .get(index)
            .ok_or_else(|| CoreError::not_found("Cart line", index))?;

        let new_qty = line.qty + delta;
        if new_qty < 1 {
            return Ok(QtyChange::RemovalRequested);
        }

        let product = catalog
            .get(&line.product_id)
            .ok_or_else(|| CoreError::not_found("Product", &line.product_id))?;

        if new_qty > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: new_qty,
            });
        }

        self.lines[index].qty = new_qty;
        Ok(QtyChange::Updated(new_qty))
    }

    /// Removes a line unconditionally.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<CartLine> {
        if index >= self.lines.len() {
            return Err(CoreError::not_found("Cart line", index));
        }
        Ok(self.lines.remove(index))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of qty × sell over all lines. Recomputed on every read,
    /// never cached.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductInput;

    fn catalog_with(stock: i64) -> (Catalog, String) {
        let mut catalog = Catalog::new();
        let id = catalog
            .add_product(ProductInput {
                name: "Rice 5kg".to_string(),
                category: "Grocery".to_string(),
                cost: Money::from_cents(200),
                sell: Money::from_cents(500),
                stock,
                limit: 2,
            })
            .unwrap()
            .id
            .clone();
        (catalog, id)
    }

    #[test]
    fn test_add_line_snapshots_product() {
        let (catalog, id) = catalog_with(10);
        let mut cart = Cart::new();

        cart.add_line(&catalog, &id, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines[0].name, "Rice 5kg");
        assert_eq!(cart.lines[0].qty, 3);
        assert_eq!(cart.total().cents(), 1500);
    }

    #[test]
    fn test_add_line_merges_same_product() {
        let (catalog, id) = catalog_with(10);
        let mut cart = Cart::new();

        cart.add_line(&catalog, &id, 3).unwrap();
        cart.add_line(&catalog, &id, 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines[0].qty, 5);
    }

    #[test]
    fn test_add_line_exceeding_stock_leaves_cart_unchanged() {
        let (catalog, id) = catalog_with(4);
        let mut cart = Cart::new();

        let err = cart.add_line(&catalog, &id, 5).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 4,
                requested: 5,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_line_merge_cannot_exceed_stock() {
        let (catalog, id) = catalog_with(4);
        let mut cart = Cart::new();

        cart.add_line(&catalog, &id, 3).unwrap();
        let err = cart.add_line(&catalog, &id, 2).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { requested: 5, .. }
        ));
        assert_eq!(cart.lines[0].qty, 3);
    }

    #[test]
    fn test_add_line_unknown_product_and_bad_qty() {
        let (catalog, id) = catalog_with(4);
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add_line(&catalog, "ghost", 1).unwrap_err(),
            CoreError::NotFound { .. }
        ));
        assert!(matches!(
            cart.add_line(&catalog, &id, 0).unwrap_err(),
            CoreError::Validation(_)
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_qty_updates_within_stock() {
        let (catalog, id) = catalog_with(5);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 2).unwrap();

        assert_eq!(
            cart.change_qty(&catalog, 0, 1).unwrap(),
            QtyChange::Updated(3)
        );
        assert_eq!(cart.lines[0].qty, 3);
    }

    #[test]
    fn test_change_qty_below_one_requests_removal() {
        let (catalog, id) = catalog_with(5);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 1).unwrap();

        assert_eq!(
            cart.change_qty(&catalog, 0, -1).unwrap(),
            QtyChange::RemovalRequested
        );
        // Line untouched until the caller confirms
        assert_eq!(cart.lines[0].qty, 1);
    }

    #[test]
    fn test_change_qty_over_stock_leaves_line_unchanged() {
        let (catalog, id) = catalog_with(3);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 3).unwrap();

        assert!(cart.change_qty(&catalog, 0, 1).is_err());
        assert_eq!(cart.lines[0].qty, 3);
    }

    #[test]
    fn test_change_qty_reads_current_stock() {
        // Catalog edits between cart operations are reflected immediately
        let (mut catalog, id) = catalog_with(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 5).unwrap();

        catalog.deduct_stock(&id, 7); // stock now 3
        assert!(cart.change_qty(&catalog, 0, 1).is_err());
    }

    #[test]
    fn test_remove_line_and_clear() {
        let (catalog, id) = catalog_with(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 2).unwrap();

        let removed = cart.remove_line(0).unwrap();
        assert_eq!(removed.qty, 2);
        assert!(cart.is_empty());
        assert!(cart.remove_line(0).is_err());

        cart.add_line(&catalog, &id, 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }
}
