//! In-memory store for tests and local sessions. Contents vanish with
//! the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use mentor_core::{Budget, Goal, Store, Transaction, UserId, UserProfile, normalize_key};

#[derive(Debug, Default)]
struct UserData {
    profile: Option<UserProfile>,
    transactions: Vec<Transaction>,
    budgets: HashMap<String, Budget>,
    goals: HashMap<String, Goal>,
}

/// `Store` backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<UserId, UserData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserData>>> {
        self.users.lock().map_err(|_| anyhow!("store mutex poisoned"))
    }
}

impl Store for MemoryStore {
    fn append(&self, user: UserId, txn: Transaction) -> Result<()> {
        self.lock()?.entry(user).or_default().transactions.push(txn);
        Ok(())
    }

    fn transactions_since(
        &self,
        user: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .lock()?
            .get(&user)
            .map(|data| {
                data.transactions
                    .iter()
                    .filter(|t| t.timestamp >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn all_transactions(&self, user: UserId) -> Result<Vec<Transaction>> {
        Ok(self
            .lock()?
            .get(&user)
            .map(|data| data.transactions.clone())
            .unwrap_or_default())
    }

    fn budget(&self, user: UserId, category: &str) -> Result<Option<Budget>> {
        let key = normalize_key(category);
        Ok(self
            .lock()?
            .get(&user)
            .and_then(|data| data.budgets.get(&key).cloned()))
    }

    fn set_budget(&self, user: UserId, category: &str, amount: f64) -> Result<Budget> {
        let key = normalize_key(category);
        let budget = Budget {
            category: key.clone(),
            amount,
            created_at: Utc::now(),
        };
        self.lock()?
            .entry(user)
            .or_default()
            .budgets
            .insert(key, budget.clone());
        Ok(budget)
    }

    fn remove_budget(&self, user: UserId, category: &str) -> Result<bool> {
        let key = normalize_key(category);
        Ok(self
            .lock()?
            .get_mut(&user)
            .map(|data| data.budgets.remove(&key).is_some())
            .unwrap_or(false))
    }

    fn budgets(&self, user: UserId) -> Result<Vec<Budget>> {
        Ok(self
            .lock()?
            .get(&user)
            .map(|data| data.budgets.values().cloned().collect())
            .unwrap_or_default())
    }

    fn goal(&self, user: UserId, name: &str) -> Result<Option<Goal>> {
        let key = normalize_key(name);
        Ok(self
            .lock()?
            .get(&user)
            .and_then(|data| data.goals.get(&key).cloned()))
    }

    fn set_goal(&self, user: UserId, name: &str, target_amount: f64) -> Result<Goal> {
        let key = normalize_key(name);
        let now = Utc::now();
        let goal = Goal {
            name: key.clone(),
            target_amount,
            current_amount: 0.0,
            created_at: now,
            updated_at: now,
        };
        self.lock()?
            .entry(user)
            .or_default()
            .goals
            .insert(key, goal.clone());
        Ok(goal)
    }

    fn add_goal_progress(&self, user: UserId, name: &str, delta: f64) -> Result<Goal> {
        let key = normalize_key(name);
        let now = Utc::now();
        let mut users = self.lock()?;
        let data = users.entry(user).or_default();
        let goal = data.goals.entry(key.clone()).or_insert_with(|| Goal {
            name: key,
            target_amount: delta,
            current_amount: 0.0,
            created_at: now,
            updated_at: now,
        });
        goal.current_amount += delta;
        goal.updated_at = now;
        Ok(goal.clone())
    }

    fn remove_goal(&self, user: UserId, name: &str) -> Result<bool> {
        let key = normalize_key(name);
        Ok(self
            .lock()?
            .get_mut(&user)
            .map(|data| data.goals.remove(&key).is_some())
            .unwrap_or(false))
    }

    fn goals(&self, user: UserId) -> Result<Vec<Goal>> {
        Ok(self
            .lock()?
            .get(&user)
            .map(|data| data.goals.values().cloned().collect())
            .unwrap_or_default())
    }

    fn touch_user(&self, user: UserId, username: &str) -> Result<UserProfile> {
        let now = Utc::now();
        let mut users = self.lock()?;
        let data = users.entry(user).or_default();
        let profile = match &mut data.profile {
            Some(profile) => {
                profile.last_active = now;
                profile.clone()
            }
            None => {
                let profile = UserProfile {
                    username: username.to_string(),
                    created_at: now,
                    last_active: now,
                };
                data.profile = Some(profile.clone());
                profile
            }
        };
        Ok(profile)
    }

    fn user_ids(&self) -> Result<Vec<UserId>> {
        let mut ids: Vec<UserId> = self.lock()?.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mentor_core::TxnType;

    fn txn(amount: f64, category: &str, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            kind: TxnType::Expense,
            amount,
            category: category.to_string(),
            description: String::new(),
            timestamp,
        }
    }

    #[test]
    fn test_window_query_is_inclusive() {
        let store = MemoryStore::new();
        let since = Utc::now() - Duration::days(7);
        store.append(1, txn(10.0, "snacks", since)).unwrap();
        store
            .append(1, txn(20.0, "snacks", since - Duration::seconds(1)))
            .unwrap();

        let in_window = store.transactions_since(1, since).unwrap();
        assert_eq!(in_window.len(), 1);
        assert_eq!(in_window[0].amount, 10.0);
        assert_eq!(store.all_transactions(1).unwrap().len(), 2);
    }

    #[test]
    fn test_budget_keys_normalize_on_write_and_read() {
        let store = MemoryStore::new();
        store.set_budget(1, "  Food ", 100.0).unwrap();

        let found = store.budget(1, "food").unwrap().unwrap();
        assert_eq!(found.category, "food");
        assert_eq!(found.amount, 100.0);
        assert!(store.budget(1, "FOOD").unwrap().is_some());
        assert!(store.remove_budget(1, " food").unwrap());
        assert!(store.budget(1, "food").unwrap().is_none());
    }

    #[test]
    fn test_goal_progress_accumulates() {
        let store = MemoryStore::new();
        store.set_goal(1, "Vacation", 500.0).unwrap();
        for _ in 0..3 {
            store.add_goal_progress(1, "vacation", 10.0).unwrap();
        }
        let goal = store.goal(1, "vacation").unwrap().unwrap();
        assert_eq!(goal.current_amount, 30.0);
        assert_eq!(goal.target_amount, 500.0);
    }

    #[test]
    fn test_progress_on_missing_goal_creates_it() {
        let store = MemoryStore::new();
        let goal = store.add_goal_progress(1, "books", 25.0).unwrap();
        assert_eq!(goal.target_amount, 25.0);
        assert_eq!(goal.current_amount, 25.0);
    }

    #[test]
    fn test_set_goal_resets_progress() {
        let store = MemoryStore::new();
        store.add_goal_progress(1, "books", 25.0).unwrap();
        store.set_goal(1, "books", 200.0).unwrap();
        let goal = store.goal(1, "books").unwrap().unwrap();
        assert_eq!(goal.current_amount, 0.0);
        assert_eq!(goal.target_amount, 200.0);
    }

    #[test]
    fn test_touch_user_creates_then_refreshes() {
        let store = MemoryStore::new();
        let first = store.touch_user(7, "asha").unwrap();
        let second = store.touch_user(7, "asha-renamed").unwrap();
        // The original name sticks; only last_active moves.
        assert_eq!(second.username, "asha");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.last_active >= first.last_active);
        assert_eq!(store.user_ids().unwrap(), vec![7]);
    }

    #[test]
    fn test_separate_users_do_not_mix() {
        let store = MemoryStore::new();
        store.append(1, txn(10.0, "snacks", Utc::now())).unwrap();
        store.set_budget(2, "snacks", 50.0).unwrap();

        assert!(store.all_transactions(2).unwrap().is_empty());
        assert!(store.budget(1, "snacks").unwrap().is_none());
        assert_eq!(store.user_ids().unwrap(), vec![1, 2]);
    }
}
