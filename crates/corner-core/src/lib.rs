//! # corner-core: Pure Business Logic for Corner POS
//!
//! This crate is the **heart** of Corner POS: the transactional ledger and
//! inventory-consistency engine for a small retail shop, with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Corner POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  UI layer (external collaborator)               │   │
//! │  │    stages a cart, calls operations, re-reads state to redraw    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ corner-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌──────┐  ┌────────┐  ┌────────────┐  ┌───────┐ │   │
//! │  │   │ catalog │◄─┤ cart │◄─┤ ledger │◄─┤ settlement │  │reports│ │   │
//! │  │   │ Product │  │Lines │  │Checkout│  │ Full/Part  │  │ Scans │ │   │
//! │  │   │  stock  │  │staged│  │Sale/Pay│  │  payments  │  │ sales │ │   │
//! │  │   └─────────┘  └──────┘  └────────┘  └────────────┘  └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • SINGLE-THREADED          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 corner-store (persistence gateway)              │   │
//! │  │          JSON file load/save, export/import interchange         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Payment, Debtor, Admin)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`catalog`] - Product CRUD and stock deduction
//! - [`cart`] - Transient staging area, validated against live stock
//! - [`ledger`] - Atomic checkout producing Sale/Payment/Debtor
//! - [`settlement`] - Full and partial debt settlement
//! - [`reports`] - Read-only revenue/profit aggregations
//! - [`shop`] - The owned collection set (flat Collections shape)
//!
//! ## Design Principles
//!
//! 1. **Validate, then write**: every operation checks all preconditions
//!    before its first mutation, so failures leave state untouched
//! 2. **No I/O**: persistence is a collaborator, never a dependency
//! 3. **Integer money**: all monetary values are cents (i64)
//! 4. **Derived, not stored**: sale status and stock status are pure
//!    functions of stored data, never cached fields
//!
//! ## Example Usage
//!
//! ```rust
//! use corner_core::catalog::{Catalog, ProductInput};
//! use corner_core::cart::Cart;
//! use corner_core::ledger::{Ledger, Tender};
//! use corner_core::money::Money;
//!
//! let mut catalog = Catalog::new();
//! let product_id = catalog
//!     .add_product(ProductInput {
//!         name: "Rice 5kg".into(),
//!         category: "Grocery".into(),
//!         cost: Money::from_cents(200),
//!         sell: Money::from_cents(500),
//!         stock: 10,
//!         limit: 2,
//!     })
//!     .unwrap()
//!     .id
//!     .clone();
//!
//! let mut cart = Cart::new();
//! cart.add_line(&catalog, &product_id, 3).unwrap();
//!
//! let mut ledger = Ledger::new();
//! let outcome = ledger
//!     .checkout(
//!         &mut catalog,
//!         &mut cart,
//!         "Ama",
//!         "",
//!         Tender::Cash { tendered: Money::from_cents(1500) },
//!     )
//!     .unwrap();
//!
//! assert_eq!(outcome.total.cents(), 1500);
//! assert_eq!(catalog.get(&product_id).unwrap().stock, 7);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod reports;
pub mod settlement;
pub mod shop;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use corner_core::Money` instead of
// `use corner_core::money::Money`

pub use cart::{Cart, CartLine, QtyChange};
pub use catalog::{Catalog, ProductInput};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{CheckoutReceipt, Ledger, Tender};
pub use money::Money;
pub use shop::Shop;
pub use types::*;
