//! Free-text transaction parsing.

use anyhow::Result;

use crate::amount::AmountExtractor;
use crate::category;
use crate::model::{ParsedTransaction, TxnType};
use crate::vocab::Vocabulary;

/// Turns a raw message into a structured transaction, or nothing when no
/// amount can be found.
#[derive(Debug, Clone)]
pub struct TransactionParser {
    vocab: Vocabulary,
    extractor: AmountExtractor,
}

impl TransactionParser {
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        let extractor = AmountExtractor::new(vocab.currency_symbol())?;
        Ok(Self { vocab, extractor })
    }

    /// Parse one message. Pure and deterministic: identical input always
    /// yields an identical result.
    ///
    /// The type cue is independent of classification: any income trigger
    /// makes this an income, and a message with no type cue at all
    /// silently defaults to an expense. A missing amount fails the parse
    /// even when the message classified as transactional; the caller
    /// answers that case with its own "include an amount" response.
    pub fn parse(&self, text: &str) -> Option<ParsedTransaction> {
        let lower = text.to_lowercase();

        let kind = if self
            .vocab
            .triggers_for(crate::model::Intent::Income)
            .iter()
            .any(|t| lower.contains(t.as_str()))
        {
            TxnType::Income
        } else {
            TxnType::Expense
        };

        let matched = self.extractor.extract(text)?;

        // Amount span first, trigger substrings second; the order is part
        // of the algorithm.
        let residual = lower.replacen(matched.span.to_lowercase().as_str(), "", 1);
        let category = category::derive(&self.vocab, &residual);

        Some(ParsedTransaction {
            kind,
            amount: matched.value,
            category,
            description: text.to_string(),
        })
    }
}
