//! Category derivation from the residual message text.
//!
//! Two passes with a fixed order: the caller removes the matched amount
//! span first, then this module removes every trigger substring in table
//! order, tokenizes on whitespace, and drops stop-word tokens. Changing
//! the order changes the output. Trigger removal is plain substring
//! replacement, so a trigger inside a longer word gets clipped out of it
//! ("cost" inside "costume"). Known limitation of the keyword
//! approach.

use crate::vocab::Vocabulary;

/// Derive a normalized category label from lower-cased text whose amount
/// span has already been removed. An empty residue falls back to the
/// sentinel category, so the result is never empty.
pub fn derive(vocab: &Vocabulary, residual: &str) -> String {
    let mut cleaned = residual.to_string();
    for trigger in vocab.triggers() {
        cleaned = cleaned.replace(trigger, "");
    }

    let category = cleaned
        .split_whitespace()
        .filter(|token| !vocab.is_stop_word(token))
        .collect::<Vec<_>>()
        .join(" ");

    let category = category
        .trim_matches(|c: char| c == '.' || c == ' ' || vocab.currency_symbol().contains(c))
        .to_string();

    if category.is_empty() {
        vocab.fallback_category().to_string()
    } else {
        category
    }
}
