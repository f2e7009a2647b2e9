//! Stored transaction records with lenient decoding.
//!
//! A fetched record with missing fields decodes with safe defaults
//! instead of failing: one corrupt record must not block aggregation for
//! all the others.

use chrono::{DateTime, Utc};
use mentor_core::{Transaction, TxnType};
use serde::{Deserialize, Serialize};

fn default_kind() -> TxnType {
    TxnType::Expense
}

fn default_category() -> String {
    "general".to_string()
}

/// Unix epoch: keeps a timestamp-less record in the lifetime balance but
/// outside every bounded window.
fn default_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: TxnType,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl From<Transaction> for StoredTransaction {
    fn from(txn: Transaction) -> Self {
        Self {
            kind: txn.kind,
            amount: txn.amount,
            category: txn.category,
            description: txn.description,
            timestamp: txn.timestamp,
        }
    }
}

impl From<StoredTransaction> for Transaction {
    fn from(record: StoredTransaction) -> Self {
        Self {
            kind: record.kind,
            amount: record.amount,
            category: record.category,
            description: record.description,
            timestamp: record.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_safe_defaults() {
        let record: StoredTransaction = serde_json::from_str("{}").unwrap();
        assert_eq!(record.kind, TxnType::Expense);
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.category, "general");
        assert_eq!(record.description, "");
        assert_eq!(record.timestamp, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_partial_record_keeps_present_fields() {
        let record: StoredTransaction =
            serde_json::from_str(r#"{"type":"income","amount":500.0}"#).unwrap();
        assert_eq!(record.kind, TxnType::Income);
        assert_eq!(record.amount, 500.0);
        assert_eq!(record.category, "general");
    }

    #[test]
    fn test_round_trip_through_transaction() {
        let txn = Transaction {
            kind: TxnType::Expense,
            amount: 42.5,
            category: "snacks".to_string(),
            description: "spent 42.5 on snacks".to_string(),
            timestamp: Utc::now(),
        };
        let back: Transaction = StoredTransaction::from(txn.clone()).into();
        assert_eq!(back, txn);
    }
}
