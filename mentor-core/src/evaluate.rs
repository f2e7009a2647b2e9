//! Budget and goal outcomes for a just-recorded expense.

/// What the budget and goal checks found for one expense. The two flags
/// are independent; both can fire on the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvaluationResult {
    /// The category's 30-day expense total strictly exceeds its budget.
    pub exceeded_budget: bool,
    /// The configured threshold, present whenever the category has a
    /// budget at all.
    pub budget_amount: Option<f64>,
    /// An existing goal with the expense's category name absorbed the
    /// amount as progress.
    pub goal_updated: bool,
}

/// Strictly exceeding the threshold trips the alert; spending exactly up
/// to the budget does not.
pub fn budget_exceeded(threshold: f64, spent_in_window: f64) -> bool {
    spent_in_window > threshold
}
