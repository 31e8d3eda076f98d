//! # Domain Types
//!
//! Core domain types used throughout Corner POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  receipt (i64)  │   │  reference      │       │
//! │  │  sku (derived)  │   │  items snapshot │   │  sale_receipt   │       │
//! │  │  stock / limit  │   │  total (frozen) │   │  method/status  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Debtor      │   │  PaymentStatus  │   │  PaymentMethod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  receipt (1:1   │   │  Paid           │   │  Cash           │       │
//! │  │   with a sale)  │   │  Pending        │   │  Credit         │       │
//! │  │  amount owed    │   │  Partial        │   │  CreditSettle…  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! - Products carry a UUID v4 `id` plus a human-readable `sku`
//! - Sales and debtors share a timestamp-derived `receipt`; a debtor record
//!   is 1:1 with the credit sale that created it
//! - Payments carry a unique `reference` and a `sale_receipt` foreign key
//!   into the sales collection (single source of truth for payment history)

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Receipt
// =============================================================================

/// Receipt identifier tying together a Sale and, if applicable, its Debtor.
///
/// Timestamp-derived (epoch milliseconds), bumped on collision so values
/// stay monotonically distinguishable within one ledger.
pub type Receipt = i64;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit, derived from the category at creation time.
    /// Not regenerated on edit and not guaranteed unique.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Product category (also the SKU prefix source).
    pub category: String,

    /// Unit cost (what the shop paid).
    pub cost: Money,

    /// Unit selling price.
    pub sell: Money,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// Reorder threshold: stock at or below this displays as Low Stock.
    pub limit: i64,
}

impl Product {
    /// Derived display status. Computed from stored data, never cached.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.stock <= self.limit {
            StockStatus::LowStock
        } else {
            StockStatus::Available
        }
    }
}

/// Derived stock display category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    /// stock == 0
    OutOfStock,
    /// 0 < stock <= limit
    LowStock,
    /// stock > limit
    Available,
}

// =============================================================================
// Payment Method & Status
// =============================================================================

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Cash at the counter, tendered in full at checkout.
    Cash,
    /// Deferred payment; produces a Debtor record.
    Credit,
    /// A later payment clearing a credit balance in full.
    CreditSettlement,
    /// A later payment clearing part of a credit balance.
    CreditPart,
}

/// Status attached to payments and debtors.
///
/// A Sale's displayed status is never stored; it is derived on read
/// (see `Ledger::sale_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
}

// =============================================================================
// Sale
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern to freeze product data at the time of sale:
/// later edits or deletion of the product leave history untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product id at time of sale. A weak reference: the product may have
    /// been deleted since.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit cost at time of sale (frozen).
    pub cost: Money,

    /// Unit price at time of sale (frozen).
    pub sell: Money,

    /// Quantity sold.
    pub qty: i64,
}

impl SaleItem {
    /// Revenue for this line (qty × sell).
    #[inline]
    pub fn revenue(&self) -> Money {
        self.sell.multiply_quantity(self.qty)
    }

    /// Cost for this line (qty × cost).
    #[inline]
    pub fn cost_total(&self) -> Money {
        self.cost.multiply_quantity(self.qty)
    }

    /// Profit for this line (qty × (sell − cost)).
    #[inline]
    pub fn profit(&self) -> Money {
        self.revenue() - self.cost_total()
    }
}

/// A completed sale transaction.
///
/// ## Immutability
/// `items` and `total` are frozen at checkout and never recomputed.
/// Payment history lives in the ledger's global payment log, keyed by
/// `receipt` - a sale carries no embedded payment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Unique receipt identifier.
    pub receipt: Receipt,

    /// When the sale was made (RFC 3339). Stored as text: imported data is
    /// trusted structurally but not semantically, so reads must tolerate
    /// unparseable values.
    pub date: String,

    /// Customer name ("Walk-in" when not given).
    pub customer: String,

    /// Customer phone (may be empty).
    pub phone: String,

    /// Immutable snapshot of the cart lines at checkout.
    pub items: Vec<SaleItem>,

    /// Sum of qty × sell across items, frozen at checkout.
    pub total: Money,

    /// Original tender method (Cash or Credit).
    pub method: PaymentMethod,
}

// =============================================================================
// Payment
// =============================================================================

/// A single payment event.
///
/// The payment log is append-only and global: every payment event, whether
/// at checkout or during later settlement, produces exactly one record here.
/// Per-sale payment views are derived by filtering on `sale_receipt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique reference ("PAY-" + UUID v4).
    pub reference: String,

    /// Receipt of the originating sale. May dangle if the sale was later
    /// deleted - the log keeps the record regardless.
    pub sale_receipt: Receipt,

    pub customer: String,
    pub phone: String,

    /// Amount paid. For cash checkout this is the tendered amount.
    pub amount: Money,

    /// When the payment was recorded (RFC 3339).
    pub date: String,

    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

// =============================================================================
// Debtor
// =============================================================================

/// An outstanding credit balance.
///
/// ## Invariant
/// `amount` is always >= 0 and equals the original credit total minus the
/// sum of settlement/part payments applied to this receipt. When it reaches
/// zero the status becomes Paid and the amount is pinned at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debtor {
    /// Equal to the originating sale's receipt (1:1 with a credit sale).
    pub receipt: Receipt,

    pub customer: String,
    pub phone: String,

    /// Outstanding balance, decreasing as settlements arrive.
    pub amount: Money,

    /// When the debt was created (RFC 3339).
    pub date: String,

    pub status: PaymentStatus,
}

// =============================================================================
// Admin
// =============================================================================

/// An administrator account.
///
/// Authentication strength is explicitly out of scope; this exists so the
/// persisted collection set bootstraps with a usable seed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub username: String,
    pub password: String,
    pub role: String,
    pub date: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
