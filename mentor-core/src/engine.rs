//! The message-understanding engine: classification, parsing, recording,
//! and reply composition behind one facade for the transport layer.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};

use crate::evaluate::{self, EvaluationResult};
use crate::intent::IntentClassifier;
use crate::ledger::{self, BUDGET_WINDOW_DAYS, SUMMARY_WINDOW_DAYS};
use crate::model::{Intent, ParsedTransaction, Transaction, TxnType, UserId};
use crate::parser::TransactionParser;
use crate::reply::Replies;
use crate::store::Store;
use crate::vocab::Vocabulary;

pub struct Engine {
    classifier: IntentClassifier,
    parser: TransactionParser,
    replies: Replies,
}

impl Engine {
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        let replies = Replies::new(vocab.currency_symbol());
        let classifier = IntentClassifier::new(vocab.clone())?;
        let parser = TransactionParser::new(vocab)?;
        Ok(Self {
            classifier,
            parser,
            replies,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(Vocabulary::default())
    }

    pub fn replies(&self) -> &Replies {
        &self.replies
    }

    pub fn classify_intent(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    pub fn parse_transaction(&self, text: &str) -> Option<ParsedTransaction> {
        self.parser.parse(text)
    }

    /// Persist a parsed transaction, then run the budget and goal checks
    /// for expenses. The append happens first: when it fails, no goal or
    /// budget side effect has occurred.
    pub fn record_and_evaluate(
        &self,
        store: &dyn Store,
        user: UserId,
        parsed: ParsedTransaction,
    ) -> Result<(Transaction, EvaluationResult)> {
        let txn = Transaction {
            kind: parsed.kind,
            amount: parsed.amount,
            category: parsed.category,
            description: parsed.description,
            timestamp: Utc::now(),
        };
        store.append(user, txn.clone()).context("append transaction")?;

        let eval = match txn.kind {
            TxnType::Expense => self.evaluate_expense(store, user, &txn.category, txn.amount)?,
            TxnType::Income => EvaluationResult::default(),
        };
        Ok((txn, eval))
    }

    /// Budget and goal checks for an expense that has already been
    /// appended. A missing budget or goal is the common case and returns
    /// without further reads or writes. The two checks are independent.
    pub fn evaluate_expense(
        &self,
        store: &dyn Store,
        user: UserId,
        category: &str,
        amount: f64,
    ) -> Result<EvaluationResult> {
        let mut eval = EvaluationResult::default();

        if store.goal(user, category)?.is_some() {
            store.add_goal_progress(user, category, amount)?;
            eval.goal_updated = true;
        }

        if let Some(budget) = store.budget(user, category)? {
            let since = Utc::now() - Duration::days(BUDGET_WINDOW_DAYS);
            let txns = store
                .transactions_since(user, since)
                .context("query budget window")?;
            let spent = ledger::category_expense_total(&txns, category, since);
            eval.budget_amount = Some(budget.amount);
            eval.exceeded_budget = evaluate::budget_exceeded(budget.amount, spent);
        }

        Ok(eval)
    }

    pub fn weekly_summary_text(&self, store: &dyn Store, user: UserId) -> Result<String> {
        let since = Utc::now() - Duration::days(SUMMARY_WINDOW_DAYS);
        let txns = store
            .transactions_since(user, since)
            .context("query summary window")?;
        if txns.is_empty() {
            return Ok(self.replies.empty_summary());
        }
        let totals = ledger::totals_by_type(&txns, since);
        let breakdown = ledger::breakdown_by_category(&txns, since);
        Ok(self.replies.weekly_summary(&totals, &breakdown))
    }

    pub fn balance_text(&self, store: &dyn Store, user: UserId) -> Result<String> {
        let txns = store.all_transactions(user).context("query history")?;
        Ok(self.replies.balance(ledger::balance(&txns)))
    }

    /// Full dispatch for one inbound message: classify, act, render the
    /// fixed-template reply. A missing amount in a transactional message
    /// is a normal outcome with its own template, not an error;
    /// collaborator failures bubble up as `Err` for the transport to
    /// report generically.
    pub fn handle_message(&self, store: &dyn Store, user: UserId, text: &str) -> Result<String> {
        let reply = match self.classifier.classify(text) {
            Intent::Start => self.replies.start(),
            Intent::Help => self.replies.help(),
            Intent::Expense | Intent::Income => match self.parser.parse(text) {
                Some(parsed) => {
                    let (txn, eval) = self.record_and_evaluate(store, user, parsed)?;
                    self.replies.logged(&txn, &eval)
                }
                None => self.replies.amount_missing(),
            },
            Intent::Summary => self.weekly_summary_text(store, user)?,
            Intent::Balance => self.balance_text(store, user)?,
            Intent::Unknown => self.replies.fallback(),
        };
        Ok(reply)
    }
}
