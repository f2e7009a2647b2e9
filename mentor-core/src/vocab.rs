//! Intent vocabulary and category stop words.
//!
//! The tables are immutable configuration injected into the classifier and
//! parser at construction, so matching stays testable in isolation and
//! swappable per locale. Table order is part of the contract: the
//! classifier scans intents in order and the first match wins.

use std::collections::HashSet;

use crate::model::Intent;

#[derive(Debug, Clone)]
pub struct Vocabulary {
    intents: Vec<(Intent, Vec<String>)>,
    stop_words: HashSet<String>,
    fallback_category: String,
    currency_symbol: String,
}

impl Vocabulary {
    pub fn new(
        intents: Vec<(Intent, Vec<String>)>,
        stop_words: impl IntoIterator<Item = String>,
        fallback_category: impl Into<String>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            intents,
            stop_words: stop_words.into_iter().collect(),
            fallback_category: fallback_category.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Ordered trigger table. Order is the tie-break between intents.
    pub fn intents(&self) -> &[(Intent, Vec<String>)] {
        &self.intents
    }

    /// Triggers for one intent; empty when the intent has no table entry.
    pub fn triggers_for(&self, intent: Intent) -> &[String] {
        self.intents
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, triggers)| triggers.as_slice())
            .unwrap_or(&[])
    }

    /// Every trigger across the table, in table order.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.intents
            .iter()
            .flat_map(|(_, triggers)| triggers.iter().map(String::as_str))
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Category used when derivation leaves nothing behind.
    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        fn row(intent: Intent, triggers: &[&str]) -> (Intent, Vec<String>) {
            (intent, triggers.iter().map(|t| t.to_string()).collect())
        }

        let intents = vec![
            row(
                Intent::Expense,
                &["spent", "paid", "bought", "expense", "cost", "purchase"],
            ),
            row(
                Intent::Income,
                &["received", "got", "earned", "income", "added", "credited"],
            ),
            row(
                Intent::Summary,
                &["summary", "report", "how much", "show expenses", "show income"],
            ),
            row(
                Intent::Balance,
                &["balance", "remaining", "how much money left"],
            ),
            row(Intent::Help, &["/help", "help"]),
            row(Intent::Start, &["/start"]),
        ];

        let stop_words = ["on", "for", "at", "a", "the", "my", "i", "in", "of", "was", "is"]
            .into_iter()
            .map(str::to_string);

        Self::new(intents, stop_words, "general", "₹")
    }
}
