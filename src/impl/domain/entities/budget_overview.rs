/// Four-tier classification of budget usage. Each tier includes its lower
/// bound.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BudgetStatus {
    /// Below 70%.
    Controlled,
    /// From 70% to below 90%.
    Attention,
    /// From 90% up to and including 100%.
    NearLimit,
    /// Above 100%.
    OverBudget,
}

/// How the spent total compares to the budget, once a budget is set.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BudgetOutcome {
    Exceeded { by: f64 },
    Saved { amount: f64 },
    Exact,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BudgetOverview {
    pub spent: f64,
    pub budget: Option<f64>,
    /// `budget - spent`, or `None` without a budget.
    pub remaining: Option<f64>,
    /// Unclamped usage percentage; 0 without a budget.
    pub percentage: f64,
    /// Usage percentage clamped to [0, 100] for progress bars.
    pub progress: f64,
    pub status: Option<BudgetStatus>,
    pub outcome: Option<BudgetOutcome>,
}
