//! JSON-file store: the whole state lives in one pretty-printed file,
//! loaded at open and rewritten after every mutation.
//!
//! Writes are not isolated from concurrent readers of the same file; the
//! bot runs a single process, which is the supported arrangement.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use mentor_core::{Budget, Goal, Store, Transaction, UserId, UserProfile, normalize_key};
use serde::{Deserialize, Serialize};

use crate::record::StoredTransaction;

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserState {
    #[serde(default)]
    profile: Option<UserProfile>,
    #[serde(default)]
    transactions: Vec<StoredTransaction>,
    #[serde(default)]
    budgets: BTreeMap<String, Budget>,
    #[serde(default)]
    goals: BTreeMap<String, Goal>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    users: BTreeMap<UserId, UserState>,
}

pub struct JsonStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonStore {
    /// Open the store, reading existing state when the file is present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?
        } else {
            StoreState::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| anyhow!("store mutex poisoned"))
    }

    fn persist(&self, state: &StoreState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(state).context("serialize store")?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

impl Store for JsonStore {
    fn append(&self, user: UserId, txn: Transaction) -> Result<()> {
        let mut state = self.lock()?;
        state
            .users
            .entry(user)
            .or_default()
            .transactions
            .push(txn.into());
        self.persist(&state)
    }

    fn transactions_since(
        &self,
        user: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .lock()?
            .users
            .get(&user)
            .map(|data| {
                data.transactions
                    .iter()
                    .filter(|t| t.timestamp >= since)
                    .cloned()
                    .map(Transaction::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn all_transactions(&self, user: UserId) -> Result<Vec<Transaction>> {
        Ok(self
            .lock()?
            .users
            .get(&user)
            .map(|data| {
                data.transactions
                    .iter()
                    .cloned()
                    .map(Transaction::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn budget(&self, user: UserId, category: &str) -> Result<Option<Budget>> {
        let key = normalize_key(category);
        Ok(self
            .lock()?
            .users
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
        let mut state = self.lock()?;
        state
            .users
            .entry(user)
            .or_default()
            .budgets
            .insert(key, budget.clone());
        self.persist(&state)?;
        Ok(budget)
    }

    fn remove_budget(&self, user: UserId, category: &str) -> Result<bool> {
        let key = normalize_key(category);
        let mut state = self.lock()?;
        let removed = state
            .users
            .get_mut(&user)
            .map(|data| data.budgets.remove(&key).is_some())
            .unwrap_or(false);
        if removed {
            self.persist(&state)?;
        }
        Ok(removed)
    }

    fn budgets(&self, user: UserId) -> Result<Vec<Budget>> {
        Ok(self
            .lock()?
            .users
            .get(&user)
            .map(|data| data.budgets.values().cloned().collect())
            .unwrap_or_default())
    }

    fn goal(&self, user: UserId, name: &str) -> Result<Option<Goal>> {
        let key = normalize_key(name);
        Ok(self
            .lock()?
            .users
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
        let mut state = self.lock()?;
        state
            .users
            .entry(user)
            .or_default()
            .goals
            .insert(key, goal.clone());
        self.persist(&state)?;
        Ok(goal)
    }

    fn add_goal_progress(&self, user: UserId, name: &str, delta: f64) -> Result<Goal> {
        let key = normalize_key(name);
        let now = Utc::now();
        let mut state = self.lock()?;
        let data = state.users.entry(user).or_default();
        let goal = data.goals.entry(key.clone()).or_insert_with(|| Goal {
            name: key,
            target_amount: delta,
            current_amount: 0.0,
            created_at: now,
            updated_at: now,
        });
        goal.current_amount += delta;
        goal.updated_at = now;
        let goal = goal.clone();
        self.persist(&state)?;
        Ok(goal)
    }

    fn remove_goal(&self, user: UserId, name: &str) -> Result<bool> {
        let key = normalize_key(name);
        let mut state = self.lock()?;
        let removed = state
            .users
            .get_mut(&user)
            .map(|data| data.goals.remove(&key).is_some())
            .unwrap_or(false);
        if removed {
            self.persist(&state)?;
        }
        Ok(removed)
    }

    fn goals(&self, user: UserId) -> Result<Vec<Goal>> {
        Ok(self
            .lock()?
            .users
            .get(&user)
            .map(|data| data.goals.values().cloned().collect())
            .unwrap_or_default())
    }

    fn touch_user(&self, user: UserId, username: &str) -> Result<UserProfile> {
        let now = Utc::now();
        let mut state = self.lock()?;
        let data = state.users.entry(user).or_default();
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
        self.persist(&state)?;
        Ok(profile)
    }

    fn user_ids(&self) -> Result<Vec<UserId>> {
        Ok(self.lock()?.users.keys().copied().collect())
    }
}
