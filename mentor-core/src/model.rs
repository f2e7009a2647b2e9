//! Core records: transactions, budgets, goals, and the derived intent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable numeric user identifier supplied by the messaging collaborator.
pub type UserId = i64;

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TxnType {
    /// Lowercase label used in stored records and replies.
    pub fn label(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }
}

/// A logged transaction. Immutable once stored; owned by one user's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TxnType,
    /// Always non-negative; direction lives in `kind`.
    pub amount: f64,
    /// Normalized lowercase category label, never empty.
    pub category: String,
    /// The original message text, verbatim.
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }
}

/// Spending threshold for one category. At most one per category per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// A savings target. `current_amount` only ever grows: spending into the
/// matching category counts as progress, never as a withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registered chat user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// What a message is asking for. Derived per message, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Start,
    Help,
    Expense,
    Income,
    Summary,
    Balance,
    Unknown,
}

/// Parser output, consumed once to build a [`Transaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    pub kind: TxnType,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Canonical form for budget and goal keys. Applied identically on write
/// and read so `"  Food "` and `"food"` address the same entry.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Food "), "food");
        assert_eq!(normalize_key("VACATION"), "vacation");
        assert_eq!(normalize_key("rent"), "rent");
    }

    #[test]
    fn test_txn_type_label() {
        assert_eq!(TxnType::Income.label(), "income");
        assert_eq!(TxnType::Expense.label(), "expense");
    }

    #[test]
    fn test_transaction_direction_helpers() {
        let txn = Transaction {
            kind: TxnType::Expense,
            amount: 12.5,
            category: "snacks".to_string(),
            description: "spent 12.5 on snacks".to_string(),
            timestamp: Utc::now(),
        };
        assert!(txn.is_expense());
        assert!(!txn.is_income());
    }

    #[test]
    fn test_transaction_serde_type_tag() {
        let txn = Transaction {
            kind: TxnType::Income,
            amount: 500.0,
            category: "from freelancing".to_string(),
            description: "earned 500 from freelancing".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
    }
}
