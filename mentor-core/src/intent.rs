//! Intent classification over raw message text.
//!
//! Matching is case-insensitive substring containment without word
//! boundaries, which keeps it forgiving of phrasing but can fire on a
//! trigger inside an unrelated word ("cost" in "costume"). Known
//! limitation.

use anyhow::Result;

use crate::amount::AmountExtractor;
use crate::model::Intent;
use crate::vocab::Vocabulary;

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    vocab: Vocabulary,
    extractor: AmountExtractor,
}

impl IntentClassifier {
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        let extractor = AmountExtractor::new(vocab.currency_symbol())?;
        Ok(Self { vocab, extractor })
    }

    /// Scan the trigger table in order; the first intent with any matching
    /// trigger wins. When no trigger matches, a message that still carries
    /// a parseable amount is treated as an expense; anything else is
    /// unknown.
    pub fn classify(&self, text: &str) -> Intent {
        if text.trim().is_empty() {
            return Intent::Unknown;
        }

        let lower = text.to_lowercase();
        for (intent, triggers) in self.vocab.intents() {
            if triggers.iter().any(|t| lower.contains(t.as_str())) {
                return *intent;
            }
        }

        if self.extractor.extract(text).is_some() {
            return Intent::Expense;
        }

        Intent::Unknown
    }
}
