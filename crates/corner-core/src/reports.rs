//! # Reporting Aggregator
//!
//! Read-only summaries derived by scanning sales. Produces no mutations, so
//! running any aggregation twice over unchanged sales yields identical
//! output.
//!
//! ## Date Handling
//! Sale dates are stored as text and imported data is trusted structurally,
//! not semantically. A sale whose `date` does not parse as RFC 3339 is
//! excluded from date-bucketed figures (today, this month, the daily
//! series) without raising an error; it still counts toward all-time
//! revenue and profit.
//!
//! Every aggregation takes `now` as a parameter instead of reading the
//! clock, which keeps results deterministic under test.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Sale;

// =============================================================================
// Aggregate Types
// =============================================================================

/// Headline revenue and profit figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Revenue from sales dated today.
    pub today_revenue: Money,
    /// Revenue from sales in the current calendar month.
    pub month_revenue: Money,
    /// All-time revenue, including sales with unparseable dates.
    pub total_revenue: Money,
    /// All-time profit: Σ qty × (sell − cost) across every sale item.
    pub total_profit: Money,
}

/// Per-product aggregate across all sales, keyed by item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductStats {
    pub units: i64,
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
}

/// One day in the trailing series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub sales: Money,
    pub profit: Money,
}

/// Length of the trailing daily series.
pub const DAILY_SERIES_DAYS: u64 = 7;

// =============================================================================
// Aggregations
// =============================================================================

/// Computes headline figures for the dashboard cards.
pub fn summary(sales: &[Sale], now: DateTime<Utc>) -> ReportSummary {
    let today = now.date_naive();
    let mut out = ReportSummary::default();

    for sale in sales {
        out.total_revenue += sale.total;
        for item in &sale.items {
            out.total_profit += item.profit();
        }

        if let Some(date) = sale_date(sale) {
            if date == today {
                out.today_revenue += sale.total;
            }
            if date.year() == today.year() && date.month() == today.month() {
                out.month_revenue += sale.total;
            }
        }
    }

    out
}

/// Aggregates units, revenue, cost, and profit per product name.
///
/// Keyed by the item-name snapshot: a renamed product accumulates under
/// both names, matching the frozen history.
pub fn product_stats(sales: &[Sale]) -> BTreeMap<String, ProductStats> {
    let mut stats: BTreeMap<String, ProductStats> = BTreeMap::new();

    for sale in sales {
        for item in &sale.items {
            let entry = stats.entry(item.name.clone()).or_default();
            entry.units += item.qty;
            entry.revenue += item.revenue();
            entry.cost += item.cost_total();
            entry.profit += item.profit();
        }
    }

    stats
}

/// Trailing 7-day series of sales and profit, oldest day first.
///
/// Always returns exactly [`DAILY_SERIES_DAYS`] points; days without sales
/// report zero rather than being absent.
pub fn daily_series(sales: &[Sale], now: DateTime<Utc>) -> Vec<DailyPoint> {
    let mut buckets: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();

    for sale in sales {
        let Some(date) = sale_date(sale) else {
            continue; // unparseable date: excluded, not an error
        };
        let bucket = buckets.entry(date).or_default();
        bucket.0 += sale.total;
        for item in &sale.items {
            bucket.1 += item.profit();
        }
    }

    let today = now.date_naive();
    (0..DAILY_SERIES_DAYS)
        .rev()
        .map(|back| {
            let date = today - Days::new(back);
            let (sales, profit) = buckets.get(&date).copied().unwrap_or_default();
            DailyPoint {
                date,
                sales,
                profit,
            }
        })
        .collect()
}

/// Parses a sale's stored date down to a UTC calendar day.
fn sale_date(sale: &Sale) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&sale.date)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

// =============================================================================
// Unit Tests
// =============================================================================
