//! Read-only aggregates over the current session state. Nothing here is
//! cached; every value is recomputed from the collections on each call.

use crate::{
    domain::logic::summary_processor::SummaryProcessor,
    entities::{
        Budget, BudgetOutcome, BudgetOverview, BudgetStatus, CategoryGroup, SessionState,
        ShoppingItem,
    },
};

const ATTENTION_THRESHOLD: f64 = 70.0;
const NEAR_LIMIT_THRESHOLD: f64 = 90.0;
const FULL: f64 = 100.0;

// Tolerance when comparing currency totals.
const EPSILON: f64 = 1e-9;

pub(crate) fn total_spent(items: &[ShoppingItem]) -> f64 {
    items.iter().map(ShoppingItem::subtotal).sum()
}

/// Unclamped usage percentage. 0 when no budget is set.
pub(crate) fn budget_percentage(spent: f64, budget: Budget) -> f64 {
    match budget.amount() {
        Some(b) if b > 0.0 => spent / b * FULL,
        _ => 0.0,
    }
}

/// Percentage clamped for progress-bar rendering.
pub(crate) fn progress_width(percentage: f64) -> f64 {
    percentage.clamp(0.0, FULL)
}

pub(crate) fn budget_status(percentage: f64) -> BudgetStatus {
    if percentage > FULL {
        BudgetStatus::OverBudget
    } else if percentage >= NEAR_LIMIT_THRESHOLD {
        BudgetStatus::NearLimit
    } else if percentage >= ATTENTION_THRESHOLD {
        BudgetStatus::Attention
    } else {
        BudgetStatus::Controlled
    }
}

pub(crate) fn budget_overview(items: &[ShoppingItem], budget: Budget) -> BudgetOverview {
    let spent = total_spent(items);
    let percentage = budget_percentage(spent, budget);
    let remaining = budget.amount().map(|b| b - spent);
    BudgetOverview {
        spent,
        budget: budget.amount(),
        remaining,
        percentage,
        progress: progress_width(percentage),
        status: budget.amount().map(|_| budget_status(percentage)),
        outcome: remaining.map(|r| {
            if r < -EPSILON {
                BudgetOutcome::Exceeded { by: r.abs() }
            } else if r > EPSILON {
                BudgetOutcome::Saved { amount: r }
            } else {
                BudgetOutcome::Exact
            }
        }),
    }
}

/// Reminders, cart entries and every saved list entry, combined.
pub(crate) fn total_item_count(state: &SessionState) -> usize {
    state.reminders.len()
        + state.shopping_items.len()
        + state
            .saved_lists
            .iter()
            .map(|l| l.items.len())
            .sum::<usize>()
}

pub(crate) fn show_scroll_shortcut(state: &SessionState, threshold: usize) -> bool {
    total_item_count(state) > threshold
}

pub(crate) fn category_breakdown(items: &[ShoppingItem]) -> Vec<CategoryGroup> {
    SummaryProcessor::new(items).process()
}
