//! Budget progress calculations.
//!
//! The budget is a local number that is never written to storage. These
//! functions turn it and the running total into what the progress bar shows.

use serde::Serialize;

/// Label shown instead of a percentage when no budget is set
pub const NO_BUDGET_LABEL: &str = "Set a budget";

/// What the progress indicator displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    /// Bar fill in percent, always within `0..=100`
    pub bar_width_percent: f64,
    /// Text under the bar, carrying the unclamped percentage
    pub label: String,
}

/// Parses the budget input, anything unparsable counts as zero.
#[must_use]
pub fn parse_budget(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|b| b.is_finite())
        .unwrap_or(0.0)
}

/// Percentage of the budget used, or `None` when the budget is zero or negative.
#[must_use]
pub fn percent_used(total: f64, budget: f64) -> Option<f64> {
    (budget > 0.0).then(|| (total / budget) * 100.0)
}

/// Computes the bar width and label for a total against a budget.
///
/// For `total = 150` and `budget = 1000` the label is `15.0% of budget used`.
/// The label is not clamped, so overspending reads e.g. `120.0%` while the bar
/// stays full.
#[must_use]
pub fn budget_progress(total: f64, budget: f64) -> BudgetProgress {
    match percent_used(total, budget) {
        Some(percent) => BudgetProgress {
            bar_width_percent: percent.clamp(0.0, 100.0),
            label: format!("{percent:.1}% of budget used"),
        },
        None => BudgetProgress {
            bar_width_percent: 0.0,
            label: NO_BUDGET_LABEL.to_string(),
        },
    }
}
