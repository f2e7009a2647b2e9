//! Aggregation over a user's transaction history.
//!
//! Inputs arrive in no guaranteed order and nothing here assumes
//! chronology. Window bounds are inclusive: a transaction stamped exactly
//! at the boundary belongs to the window. An empty window produces empty
//! results, never an error; the caller decides how to say "nothing to
//! report".

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::model::{Transaction, TxnType};

/// Days covered by the summary window.
pub const SUMMARY_WINDOW_DAYS: i64 = 7;
/// Trailing window for budget comparisons.
pub const BUDGET_WINDOW_DAYS: i64 = 30;

/// Lifetime balance: total income minus total expense, unbounded window.
pub fn balance(txns: &[Transaction]) -> f64 {
    txns.iter().fold(0.0, |acc, t| match t.kind {
        TxnType::Income => acc + t.amount,
        TxnType::Expense => acc - t.amount,
    })
}

/// Income and expense totals within a window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowTotals {
    pub income: f64,
    pub expense: f64,
}

pub fn totals_by_type(txns: &[Transaction], since: DateTime<Utc>) -> WindowTotals {
    let mut totals = WindowTotals::default();
    for t in txns.iter().filter(|t| t.timestamp >= since) {
        match t.kind {
            TxnType::Income => totals.income += t.amount,
            TxnType::Expense => totals.expense += t.amount,
        }
    }
    totals
}

/// Expense totals per category within a window. Keys stay in normalized
/// lowercase form so equivalent categories never fragment; display casing
/// is the formatter's concern.
pub fn breakdown_by_category(
    txns: &[Transaction],
    since: DateTime<Utc>,
) -> BTreeMap<String, f64> {
    let mut breakdown = BTreeMap::new();
    for t in txns
        .iter()
        .filter(|t| t.is_expense() && t.timestamp >= since)
    {
        *breakdown.entry(t.category.clone()).or_insert(0.0) += t.amount;
    }
    breakdown
}

/// Expense total for one category within a window.
pub fn category_expense_total(
    txns: &[Transaction],
    category: &str,
    since: DateTime<Utc>,
) -> f64 {
    txns.iter()
        .filter(|t| t.is_expense() && t.category == category && t.timestamp >= since)
        .map(|t| t.amount)
        .sum()
}
