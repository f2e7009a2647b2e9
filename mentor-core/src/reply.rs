//! Fixed response templates.
//!
//! Every monetary value renders with the currency symbol and exactly two
//! fraction digits. Nothing here exposes internal field names or raw
//! error details; failure text stays generic.

use std::collections::BTreeMap;

use crate::evaluate::EvaluationResult;
use crate::ledger::WindowTotals;
use crate::model::Transaction;

#[derive(Debug, Clone)]
pub struct Replies {
    currency_symbol: String,
}

impl Replies {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    /// `₹1234.50`-style rendering used by every template.
    pub fn money(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, value)
    }

    pub fn balance(&self, balance: f64) -> String {
        format!("Your current balance is: {}", self.money(balance))
    }

    /// Confirmation for a logged transaction, with the budget warning
    /// appended when the evaluation tripped it.
    pub fn logged(&self, txn: &Transaction, eval: &EvaluationResult) -> String {
        let mut text = format!(
            "Logged {} of {} in category '{}'.",
            txn.kind.label(),
            self.money(txn.amount),
            txn.category
        );
        if eval.exceeded_budget {
            if let Some(budget_amount) = eval.budget_amount {
                text.push_str(&format!(
                    " ⚠️ You've exceeded your {} budget of {}!",
                    txn.category,
                    self.money(budget_amount)
                ));
            }
        }
        text
    }

    /// Summary for a non-empty window: totals first, then the expense
    /// categories in key order with display-cased labels.
    pub fn weekly_summary(
        &self,
        totals: &WindowTotals,
        breakdown: &BTreeMap<String, f64>,
    ) -> String {
        let mut lines = vec![
            "📊 Weekly Summary:".to_string(),
            format!("Income: {}", self.money(totals.income)),
            format!("Expenses: {}", self.money(totals.expense)),
        ];
        if !breakdown.is_empty() {
            lines.push(String::new());
            lines.push("By category:".to_string());
            for (category, total) in breakdown {
                lines.push(format!("- {}: {}", title_case(category), self.money(*total)));
            }
        }
        lines.join("\n")
    }

    pub fn empty_summary(&self) -> String {
        "No transactions in the past week.".to_string()
    }

    pub fn amount_missing(&self) -> String {
        "Could not parse the transaction. Please ensure you include an amount.".to_string()
    }

    pub fn processing_failed(&self) -> String {
        "Failed to process your message. Please try again.".to_string()
    }

    pub fn start(&self) -> String {
        "Welcome to Finance Mentor Bot! 💰\n\n\
         You can log expenses like 'spent 100 on snacks', \
         check your weekly summary with 'summary', or set budgets and goals."
            .to_string()
    }

    pub fn help(&self) -> String {
        "Here’s what I can do:\n\
         - Log an expense: 'spent 50 on groceries'\n\
         - Show weekly summary: 'summary'\n\
         - Set a budget: 'set budget 200 for groceries'\n\
         - Set a goal: 'set goal vacation 500'\n\
         - Check your budgets or goals anytime!"
            .to_string()
    }

    pub fn fallback(&self) -> String {
        "Sorry, I didn't understand that.\n\n\
         Try logging an expense or income like:\n\
         `spent 100 on snacks`\n\
         `earned 500 from freelancing`\n\n\
         Or ask for:\n\
         `summary`, `balance`, `help`"
            .to_string()
    }
}

/// Display-case a lowercase label: first letter of each word upper.
fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TxnType;
    use chrono::Utc;

    fn replies() -> Replies {
        Replies::new("₹")
    }

    fn expense(amount: f64, category: &str) -> Transaction {
        Transaction {
            kind: TxnType::Expense,
            amount,
            category: category.to_string(),
            description: String::new(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_money_two_fraction_digits() {
        let r = replies();
        assert_eq!(r.money(1200.5), "₹1200.50");
        assert_eq!(r.money(500.0), "₹500.00");
        assert_eq!(r.money(0.0), "₹0.00");
    }

    #[test]
    fn test_balance_template() {
        assert_eq!(
            replies().balance(1234.5),
            "Your current balance is: ₹1234.50"
        );
    }

    #[test]
    fn test_logged_template() {
        let text = replies().logged(&expense(100.0, "snacks"), &EvaluationResult::default());
        assert_eq!(text, "Logged expense of ₹100.00 in category 'snacks'.");
    }

    #[test]
    fn test_logged_with_budget_warning() {
        let eval = EvaluationResult {
            exceeded_budget: true,
            budget_amount: Some(100.0),
            goal_updated: false,
        };
        let text = replies().logged(&expense(60.0, "food"), &eval);
        assert_eq!(
            text,
            "Logged expense of ₹60.00 in category 'food'. \
             ⚠️ You've exceeded your food budget of ₹100.00!"
        );
    }

    #[test]
    fn test_budget_within_limit_has_no_warning() {
        let eval = EvaluationResult {
            exceeded_budget: false,
            budget_amount: Some(100.0),
            goal_updated: true,
        };
        let text = replies().logged(&expense(60.0, "food"), &eval);
        assert_eq!(text, "Logged expense of ₹60.00 in category 'food'.");
    }

    #[test]
    fn test_weekly_summary_layout() {
        let totals = WindowTotals {
            income: 500.0,
            expense: 160.0,
        };
        let mut breakdown = BTreeMap::new();
        breakdown.insert("rent".to_string(), 60.0);
        breakdown.insert("snacks".to_string(), 100.0);

        let text = replies().weekly_summary(&totals, &breakdown);
        assert_eq!(
            text,
            "📊 Weekly Summary:\n\
             Income: ₹500.00\n\
             Expenses: ₹160.00\n\
             \n\
             By category:\n\
             - Rent: ₹60.00\n\
             - Snacks: ₹100.00"
        );
    }

    #[test]
    fn test_weekly_summary_without_expenses() {
        let totals = WindowTotals {
            income: 500.0,
            expense: 0.0,
        };
        let text = replies().weekly_summary(&totals, &BTreeMap::new());
        assert_eq!(
            text,
            "📊 Weekly Summary:\nIncome: ₹500.00\nExpenses: ₹0.00"
        );
    }

    #[test]
    fn test_empty_summary_template() {
        assert_eq!(replies().empty_summary(), "No transactions in the past week.");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("snacks"), "Snacks");
        assert_eq!(title_case("from freelancing"), "From Freelancing");
        assert_eq!(title_case(""), "");
    }
}
