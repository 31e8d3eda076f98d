//! # Settlement Engine
//!
//! Applies further payments against an existing Debtor/Sale pair, keeping
//! amounts and statuses consistent.
//!
//! ## Reconciliation Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  At every point in time, for every debtor:                              │
//! │                                                                         │
//! │    amount == original credit total − Σ settlement/part payments         │
//! │    amount >= 0 (pinned at 0 once fully settled)                         │
//! │                                                                         │
//! │  Settlements validate BEFORE writing, so a rejected payment leaves      │
//! │  the debtor, the payment log, and the sale untouched.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sale itself is never mutated here: its displayed status is derived
//! on read from the payment log (see [`Ledger::sale_status`]).

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::ledger::{payment_reference, Ledger};
use crate::money::Money;
use crate::types::{Payment, PaymentMethod, PaymentStatus, Receipt};
use crate::validation::validate_settlement_amount;

impl Ledger {
    /// Settles a debtor's full outstanding balance.
    ///
    /// Logs a `credit-settlement` payment for the whole remaining amount,
    /// pins the debtor at zero, and marks it Paid.
    ///
    /// ## Errors
    /// `NotFound` when no debtor exists for the receipt or its balance is
    /// already zero (nothing left to settle).
    pub fn settle_full(&mut self, receipt: Receipt) -> CoreResult<&Payment> {
        let debtor_at = self
            .debtors
            .iter()
            .position(|d| d.receipt == receipt && d.amount.is_positive())
            .ok_or_else(|| CoreError::not_found("Debtor", receipt))?;

        let outstanding = self.debtors[debtor_at].amount;
        self.record_settlement(
            debtor_at,
            outstanding,
            PaymentMethod::CreditSettlement,
            PaymentStatus::Paid,
        );

        Ok(self.payments.last().expect("just pushed"))
    }

    /// Applies a partial payment against a debtor.
    ///
    /// Logs a `credit-part` payment, decrements the balance, and derives
    /// the new debtor status: Paid at zero, Partial otherwise.
    ///
    /// ## Errors
    /// - `NotFound` when no debtor exists for the receipt or it is already
    ///   settled
    /// - `ValidationError` unless `0 < amount <= outstanding`
    pub fn settle_partial(&mut self, receipt: Receipt, amount: Money) -> CoreResult<&Payment> {
        let debtor_at = self
            .debtors
            .iter()
            .position(|d| d.receipt == receipt && d.amount.is_positive())
            .ok_or_else(|| CoreError::not_found("Debtor", receipt))?;

        validate_settlement_amount(amount, self.debtors[debtor_at].amount)?;

        self.record_settlement(
            debtor_at,
            amount,
            PaymentMethod::CreditPart,
            PaymentStatus::Partial,
        );

        Ok(self.payments.last().expect("just pushed"))
    }

    /// Appends the settlement payment and updates the debtor in one step.
    /// Validation is complete by the time this runs.
    fn record_settlement(
        &mut self,
        debtor_at: usize,
        amount: Money,
        method: PaymentMethod,
        status: PaymentStatus,
    ) {
        let (receipt, customer, phone) = {
            let debtor = &self.debtors[debtor_at];
            (debtor.receipt, debtor.customer.clone(), debtor.phone.clone())
        };

        self.payments.push(Payment {
            reference: payment_reference(),
            sale_receipt: receipt,
            customer,
            phone,
            amount,
            date: Utc::now().to_rfc3339(),
            method,
            status,
        });

        let debtor = &mut self.debtors[debtor_at];
        debtor.amount = debtor.amount.saturating_sub_to_zero(amount);
        debtor.status = if debtor.amount.is_zero() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
