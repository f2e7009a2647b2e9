//! CSV export of a user's transaction history.

use std::path::Path;

use anyhow::{Context, Result};
use mentor_core::{Store, UserId};

/// Write the user's full history to `path`, oldest first. Returns the
/// number of exported rows.
pub fn export_csv(store: &dyn Store, user: UserId, path: &Path) -> Result<usize> {
    let mut txns = store.all_transactions(user)?;
    txns.sort_by_key(|t| t.timestamp);

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["timestamp", "type", "amount", "category", "description"])?;
    for t in &txns {
        writer.write_record([
            t.timestamp.to_rfc3339(),
            t.kind.label().to_string(),
            t.amount.to_string(),
            t.category.clone(),
            t.description.clone(),
        ])?;
    }
    writer.flush().context("flush csv")?;
    Ok(txns.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mentor_core::{Transaction, TxnType};
    use mentor_store::MemoryStore;

    #[test]
    fn test_export_orders_by_timestamp() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store
            .append(
                1,
                Transaction {
                    kind: TxnType::Expense,
                    amount: 10.0,
                    category: "snacks".to_string(),
                    description: "spent 10 on snacks".to_string(),
                    timestamp: now,
                },
            )
            .unwrap();
        store
            .append(
                1,
                Transaction {
                    kind: TxnType::Income,
                    amount: 500.0,
                    category: "salary".to_string(),
                    description: "got 500 salary".to_string(),
                    timestamp: now - Duration::days(1),
                },
            )
            .unwrap();

        let dir = std::env::temp_dir();
        let path = dir.join(format!("mentor-export-{}.csv", std::process::id()));
        let rows = export_csv(&store, 1, &path).unwrap();
        assert_eq!(rows, 2);

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines[0], "timestamp,type,amount,category,description");
        // Oldest (income) first.
        assert!(lines[1].contains("income"));
        assert!(lines[2].contains("snacks"));

        std::fs::remove_file(&path).ok();
    }
}
