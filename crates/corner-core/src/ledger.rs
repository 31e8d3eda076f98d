//! # Ledger Engine
//!
//! Converts a finalized cart into a Sale, a Payment, and (for credit) a
//! Debtor record, deducting catalog stock - one logical atomic step.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         checkout()                                      │
//! │                                                                         │
//! │  1. Validate: cart non-empty, cash tender covers total                  │
//! │        │  (any failure returns here - nothing has been written)         │
//! │        ▼                                                                │
//! │  2. Generate receipt (timestamp-derived, bumped on collision)           │
//! │  3. Build Payment  (Paid for cash, Pending for credit)                  │
//! │  4. Build Sale     (deep-copied cart lines, frozen total)               │
//! │  5. Append Sale + Payment; append Debtor when credit                    │
//! │  6. Deduct stock for every cart line                                    │
//! │  7. Clear the cart                                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  CheckoutReceipt { receipt, total, change }                             │
//! │                                                                         │
//! │  Execution is single-threaded and synchronous: no step can suspend,     │
//! │  so steps 2-7 either all happen or (on early validation failure)        │
//! │  none do.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Payment Log Design
//! The payment log is the single source of truth for payment history.
//! Sales carry no embedded payment list; per-sale views are derived by
//! filtering on `sale_receipt`. Deleting a sale leaves its payments in the
//! log with a dangling receipt - an accepted divergence.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Debtor, Payment, PaymentMethod, PaymentStatus, Receipt, Sale, SaleItem};

/// Customer name recorded when the caller leaves it blank.
pub const WALK_IN_CUSTOMER: &str = "Walk-in";

// =============================================================================
// Tender
// =============================================================================

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Tender {
    /// Cash handed over at the counter. Must cover the cart total;
    /// the overage is returned as change.
    Cash { tendered: Money },
    /// Payment deferred in full. Creates a Debtor for the cart total.
    Credit,
}

/// Outcome of a successful checkout, returned to the caller for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub receipt: Receipt,
    pub total: Money,
    /// Zero for credit sales.
    pub change: Money,
}

// =============================================================================
// Ledger
// =============================================================================

/// The transactional ledger: sales, the global payment log, and debtors.
///
/// An explicitly owned store - all mutation funnels through the operation
/// set on this type (checkout here, settlements in [`crate::settlement`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub sales: Vec<Sale>,

    /// Append-only global payment log. Records are never mutated.
    #[serde(default)]
    pub payments: Vec<Payment>,

    #[serde(default)]
    pub debtors: Vec<Debtor>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Executes a checkout against the catalog.
    ///
    /// ## Errors
    /// - `ValidationError::EmptyCart` if the cart has no lines
    /// - `InsufficientPayment` if cash tendered is below the cart total
    ///
    /// On any error, catalog stock, sales, payments, and debtors are
    /// byte-for-byte unchanged and the cart keeps its lines.
    pub fn checkout(
        &mut self,
        catalog: &mut Catalog,
        cart: &mut Cart,
        customer: &str,
        phone: &str,
        tender: Tender,
    ) -> CoreResult<CheckoutReceipt> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let total = cart.total();
        let (amount, method, status, change) = match tender {
            Tender::Cash { tendered } => {
                if tendered < total {
                    return Err(CoreError::InsufficientPayment { total, tendered });
                }
                (tendered, PaymentMethod::Cash, PaymentStatus::Paid, tendered - total)
            }
            Tender::Credit => (total, PaymentMethod::Credit, PaymentStatus::Pending, Money::zero()),
        };

        // All validations passed: everything below must complete.
        let receipt = self.next_receipt();
        let date = Utc::now().to_rfc3339();
        let customer = normalize_customer(customer);
        let phone = phone.trim().to_string();

        self.payments.push(Payment {
            reference: payment_reference(),
            sale_receipt: receipt,
            customer: customer.clone(),
            phone: phone.clone(),
            amount,
            date: date.clone(),
            method,
            status,
        });

        self.sales.push(Sale {
            receipt,
            date: date.clone(),
            customer: customer.clone(),
            phone: phone.clone(),
            items: cart.lines.iter().map(SaleItem::from).collect(),
            total,
            method,
        });

        if method == PaymentMethod::Credit {
            self.debtors.push(Debtor {
                receipt,
                customer,
                phone,
                amount: total,
                date,
                status: PaymentStatus::Pending,
            });
        }

        for line in &cart.lines {
            catalog.deduct_stock(&line.product_id, line.qty);
        }
        cart.clear();

        Ok(CheckoutReceipt {
            receipt,
            total,
            change,
        })
    }

    /// Looks up a sale by receipt.
    pub fn get_sale(&self, receipt: Receipt) -> Option<&Sale> {
        self.sales.iter().find(|s| s.receipt == receipt)
    }

    /// Looks up a debtor by receipt.
    pub fn get_debtor(&self, receipt: Receipt) -> Option<&Debtor> {
        self.debtors.iter().find(|d| d.receipt == receipt)
    }

    /// Derived per-sale payment view: every payment logged against the
    /// receipt, in append order.
    pub fn payments_for(&self, receipt: Receipt) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(move |p| p.sale_receipt == receipt)
    }

    /// Derives a sale's displayed settlement status. Never stored.
    ///
    /// A cash sale is always Paid. A credit sale is Paid once the
    /// settlement payments (full or part) logged against its receipt cover
    /// the sale total, else Pending.
    pub fn sale_status(&self, sale: &Sale) -> PaymentStatus {
        if sale.method == PaymentMethod::Cash {
            return PaymentStatus::Paid;
        }

        let settled: Money = self
            .payments_for(sale.receipt)
            .filter(|p| {
                matches!(
                    p.method,
                    PaymentMethod::CreditSettlement | PaymentMethod::CreditPart
                )
            })
            .map(|p| p.amount)
            .sum();

        if settled >= sale.total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }

    /// Deletes a sale record.
    ///
    /// Deliberately does NOT restore stock and does NOT remove payments
    /// logged against the receipt - deletion without reversal is specified
    /// behavior, not a bug to fix.
    pub fn delete_sale(&mut self, receipt: Receipt) -> CoreResult<()> {
        let before = self.sales.len();
        self.sales.retain(|s| s.receipt != receipt);
        if self.sales.len() == before {
            return Err(CoreError::not_found("Sale", receipt));
        }
        Ok(())
    }

    /// Deletes a debtor record independently of its sale.
    ///
    /// Does NOT reverse or alter the sale (preserved decoupling).
    pub fn delete_debtor(&mut self, receipt: Receipt) -> CoreResult<()> {
        let before = self.debtors.len();
        self.debtors.retain(|d| d.receipt != receipt);
        if self.debtors.len() == before {
            return Err(CoreError::not_found("Debtor", receipt));
        }
        Ok(())
    }

    /// Sum of all outstanding debtor balances.
    pub fn outstanding_debt(&self) -> Money {
        self.debtors.iter().map(|d| d.amount).sum()
    }

    /// Number of debtors still owing.
    pub fn active_debtor_count(&self) -> usize {
        self.debtors.iter().filter(|d| d.amount.is_positive()).count()
    }

    /// Wipes sales, payments, and debtors. The catalog and admin records
    /// are untouched (they live outside the ledger).
    pub fn clear_transactions(&mut self) {
        self.sales.clear();
        self.payments.clear();
        self.debtors.clear();
    }

    /// Generates a fresh receipt: epoch milliseconds, bumped past the
    /// highest receipt already on record so two checkouts in the same
    /// millisecond stay distinguishable.
    ///
    /// The scan includes the payment log: deleted sales leave dangling
    /// `sale_receipt` references behind, and a reissued receipt would
    /// silently adopt their history.
    fn next_receipt(&self) -> Receipt {
        let now = Utc::now().timestamp_millis();
        let highest = self
            .sales
            .iter()
            .map(|s| s.receipt)
            .chain(self.debtors.iter().map(|d| d.receipt))
            .chain(self.payments.iter().map(|p| p.sale_receipt))
            .max();
        match highest {
            Some(h) if h >= now => h + 1,
            _ => now,
        }
    }
}

/// Generates a unique payment reference.
pub(crate) fn payment_reference() -> String {
    format!("PAY-{}", Uuid::new_v4())
}

fn normalize_customer(customer: &str) -> String {
    let customer = customer.trim();
    if customer.is_empty() {
        WALK_IN_CUSTOMER.to_string()
    } else {
        customer.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductInput;

    fn setup(stock: i64) -> (Catalog, String, Ledger) {
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
        (catalog, id, Ledger::new())
    }

    #[test]
    fn test_cash_checkout() {
        // Scenario A: stock 10, sell $5. Cart qty 3, cash $15.
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 3).unwrap();

        let outcome = ledger
            .checkout(
                &mut catalog,
                &mut cart,
                "Ama",
                "0241112222",
                Tender::Cash {
                    tendered: Money::from_cents(1500),
                },
            )
            .unwrap();

        assert_eq!(outcome.total.cents(), 1500);
        assert_eq!(outcome.change, Money::zero());
        assert_eq!(catalog.get(&id).unwrap().stock, 7);
        assert!(cart.is_empty());

        let sale = ledger.get_sale(outcome.receipt).unwrap();
        assert_eq!(sale.total.cents(), 1500);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(ledger.sale_status(sale), PaymentStatus::Paid);

        let payments: Vec<_> = ledger.payments_for(outcome.receipt).collect();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status, PaymentStatus::Paid);
        assert_eq!(payments[0].method, PaymentMethod::Cash);
        assert!(ledger.debtors.is_empty());
    }

    #[test]
    fn test_cash_checkout_returns_change() {
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 2).unwrap(); // $10.00

        let outcome = ledger
            .checkout(
                &mut catalog,
                &mut cart,
                "",
                "",
                Tender::Cash {
                    tendered: Money::from_cents(1250),
                },
            )
            .unwrap();

        assert_eq!(outcome.change.cents(), 250);
        // Blank customer defaults to walk-in
        assert_eq!(
            ledger.get_sale(outcome.receipt).unwrap().customer,
            WALK_IN_CUSTOMER
        );
        // The logged payment carries the tendered amount
        let payment = ledger.payments_for(outcome.receipt).next().unwrap();
        assert_eq!(payment.amount.cents(), 1250);
    }

    #[test]
    fn test_credit_checkout_creates_pending_debtor() {
        // Scenario B: qty 4 on credit -> debtor $20 Pending
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 4).unwrap();

        let outcome = ledger
            .checkout(&mut catalog, &mut cart, "Kofi", "0209993333", Tender::Credit)
            .unwrap();

        assert_eq!(catalog.get(&id).unwrap().stock, 6);

        let debtor = ledger.get_debtor(outcome.receipt).unwrap();
        assert_eq!(debtor.amount.cents(), 2000);
        assert_eq!(debtor.status, PaymentStatus::Pending);

        let sale = ledger.get_sale(outcome.receipt).unwrap();
        assert_eq!(ledger.sale_status(sale), PaymentStatus::Pending);

        let payment = ledger.payments_for(outcome.receipt).next().unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.method, PaymentMethod::Credit);
        assert_eq!(payment.amount.cents(), 2000);
    }

    #[test]
    fn test_checkout_empty_cart_is_all_or_nothing() {
        // Scenario E
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();

        let err = ledger
            .checkout(&mut catalog, &mut cart, "Ama", "", Tender::Credit)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyCart)
        ));

        assert!(ledger.sales.is_empty());
        assert!(ledger.payments.is_empty());
        assert!(ledger.debtors.is_empty());
        assert_eq!(catalog.get(&id).unwrap().stock, 10);
    }

    #[test]
    fn test_checkout_insufficient_cash_is_all_or_nothing() {
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 3).unwrap(); // $15.00

        let err = ledger
            .checkout(
                &mut catalog,
                &mut cart,
                "Ama",
                "",
                Tender::Cash {
                    tendered: Money::from_cents(1000),
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPayment { .. }));

        // Nothing written, cart keeps its lines
        assert!(ledger.sales.is_empty());
        assert!(ledger.payments.is_empty());
        assert_eq!(catalog.get(&id).unwrap().stock, 10);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_receipts_are_unique_across_rapid_checkouts() {
        let (mut catalog, id, mut ledger) = setup(100);

        let mut receipts = Vec::new();
        for _ in 0..5 {
            let mut cart = Cart::new();
            cart.add_line(&catalog, &id, 1).unwrap();
            let outcome = ledger
                .checkout(
                    &mut catalog,
                    &mut cart,
                    "Ama",
                    "",
                    Tender::Cash {
                        tendered: Money::from_cents(500),
                    },
                )
                .unwrap();
            receipts.push(outcome.receipt);
        }

        let mut deduped = receipts.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), receipts.len());
    }

    #[test]
    fn test_receipts_never_collide_with_dangling_payments() {
        let (mut catalog, id, mut ledger) = setup(10);

        // A payment whose sale and debtor are both gone: only the log
        // remembers this receipt. Dated far in the future so a plain
        // timestamp would collide.
        let dangling_receipt: Receipt = 4_102_444_800_000; // year 2100
        ledger.payments.push(Payment {
            reference: payment_reference(),
            sale_receipt: dangling_receipt,
            customer: "Kofi".to_string(),
            phone: String::new(),
            amount: Money::from_cents(500),
            date: Utc::now().to_rfc3339(),
            method: PaymentMethod::Cash,
            status: PaymentStatus::Paid,
        });

        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 1).unwrap();
        let outcome = ledger
            .checkout(
                &mut catalog,
                &mut cart,
                "Ama",
                "",
                Tender::Cash {
                    tendered: Money::from_cents(500),
                },
            )
            .unwrap();

        assert!(outcome.receipt > dangling_receipt);
        assert_eq!(ledger.payments_for(outcome.receipt).count(), 1);
    }

    #[test]
    fn test_sale_snapshot_survives_product_changes() {
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 2).unwrap();
        let outcome = ledger
            .checkout(
                &mut catalog,
                &mut cart,
                "Ama",
                "",
                Tender::Cash {
                    tendered: Money::from_cents(1000),
                },
            )
            .unwrap();

        catalog.delete_product(&id).unwrap();

        let sale = ledger.get_sale(outcome.receipt).unwrap();
        assert_eq!(sale.items[0].name, "Rice 5kg");
        assert_eq!(sale.items[0].sell.cents(), 500);
        assert_eq!(sale.total.cents(), 1000);
    }

    #[test]
    fn test_delete_sale_keeps_stock_and_payments() {
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 3).unwrap();
        let outcome = ledger
            .checkout(
                &mut catalog,
                &mut cart,
                "Ama",
                "",
                Tender::Cash {
                    tendered: Money::from_cents(1500),
                },
            )
            .unwrap();

        ledger.delete_sale(outcome.receipt).unwrap();

        assert!(ledger.get_sale(outcome.receipt).is_none());
        // Stock not restored, payment still logged
        assert_eq!(catalog.get(&id).unwrap().stock, 7);
        assert_eq!(ledger.payments_for(outcome.receipt).count(), 1);

        assert!(ledger.delete_sale(outcome.receipt).is_err());
    }

    #[test]
    fn test_delete_debtor_leaves_sale_intact() {
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 2).unwrap();
        let outcome = ledger
            .checkout(&mut catalog, &mut cart, "Kofi", "", Tender::Credit)
            .unwrap();

        ledger.delete_debtor(outcome.receipt).unwrap();

        assert!(ledger.get_debtor(outcome.receipt).is_none());
        assert!(ledger.get_sale(outcome.receipt).is_some());
        assert!(ledger.delete_debtor(outcome.receipt).is_err());
    }

    #[test]
    fn test_outstanding_debt_and_clear_transactions() {
        let (mut catalog, id, mut ledger) = setup(10);
        let mut cart = Cart::new();
        cart.add_line(&catalog, &id, 4).unwrap();
        ledger
            .checkout(&mut catalog, &mut cart, "Kofi", "", Tender::Credit)
            .unwrap();

        assert_eq!(ledger.outstanding_debt().cents(), 2000);
        assert_eq!(ledger.active_debtor_count(), 1);

        ledger.clear_transactions();
        assert!(ledger.sales.is_empty());
        assert!(ledger.payments.is_empty());
        assert!(ledger.debtors.is_empty());
    }
}
