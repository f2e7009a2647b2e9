//! Persistence port. The engine reaches storage only through this trait;
//! implementations live outside the core.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::model::{Budget, Goal, Transaction, UserId, UserProfile};

/// Per-user append-only transaction log plus keyed budget and goal maps.
///
/// Budget and goal keys are lowercased and trimmed identically on write
/// and read (see [`crate::model::normalize_key`]). Query results carry no
/// ordering guarantee.
///
/// Goal accumulation is read-modify-write without isolation: two
/// concurrent updates to the same goal may both read a stale total and
/// lose one increment (last-write-wins). Accepted limitation; resolving
/// it would need an atomic increment primitive from the backend.
pub trait Store {
    /// Append one transaction to the user's log.
    fn append(&self, user: UserId, txn: Transaction) -> Result<()>;

    /// Transactions with `timestamp >= since`, in no guaranteed order.
    fn transactions_since(&self, user: UserId, since: DateTime<Utc>) -> Result<Vec<Transaction>>;

    /// The user's full history, in no guaranteed order.
    fn all_transactions(&self, user: UserId) -> Result<Vec<Transaction>>;

    fn budget(&self, user: UserId, category: &str) -> Result<Option<Budget>>;

    /// Create or update the category's budget.
    fn set_budget(&self, user: UserId, category: &str, amount: f64) -> Result<Budget>;

    /// Delete the category's budget; `false` when none existed.
    fn remove_budget(&self, user: UserId, category: &str) -> Result<bool>;

    fn budgets(&self, user: UserId) -> Result<Vec<Budget>>;

    fn goal(&self, user: UserId, name: &str) -> Result<Option<Goal>>;

    /// Create a goal, or reset an existing one to a fresh target with no
    /// progress.
    fn set_goal(&self, user: UserId, name: &str, target_amount: f64) -> Result<Goal>;

    /// Accumulate progress on a goal. A missing goal is created with the
    /// delta as both target and progress.
    fn add_goal_progress(&self, user: UserId, name: &str, delta: f64) -> Result<Goal>;

    /// Delete a goal; `false` when none existed.
    fn remove_goal(&self, user: UserId, name: &str) -> Result<bool>;

    fn goals(&self, user: UserId) -> Result<Vec<Goal>>;

    /// Create the user on first contact; refresh `last_active` after.
    fn touch_user(&self, user: UserId, username: &str) -> Result<UserProfile>;

    /// Every known user, for the weekly broadcast.
    fn user_ids(&self) -> Result<Vec<UserId>>;
}
