//! Analytics for a selected month
//!
//! Any past or current month can be inspected. Requests for a future month
//! are clamped to the current one rather than rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    category_breakdown, daily_average_for_period, daily_series, total_budget,
    transactions_in_period, CategoryBreakdown, CategorySpending, DailySpending,
};
use crate::period::Period;
use crate::store::LedgerState;

/// Analytics screen data for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// The month actually reported on
    pub period: Period,
    /// True when the requested month was in the future
    pub clamped: bool,
    /// Whether the next month may be selected
    pub can_advance: bool,
    pub total_spent: f64,
    pub total_budget: f64,
    pub transaction_count: usize,
    pub daily_average: f64,
    pub breakdown: CategoryBreakdown,
    /// Trailing days of the month, oldest first
    pub daily: Vec<DailySpending>,
    pub highlights: Vec<String>,
}

impl AnalyticsReport {
    pub fn build(state: &LedgerState, period: Period, today: NaiveDate, window_days: u32) -> Self {
        let requested = period;
        let period = requested.clamp_to(today);
        let clamped = period != requested;
        if clamped {
            tracing::warn!(
                requested = %requested,
                using = %period,
                "Requested analytics period is in the future"
            );
        }

        let breakdown = category_breakdown(&state.transactions, &state.categories, period);
        let total_spent = breakdown.total;
        let transaction_count = transactions_in_period(&state.transactions, period).count();

        let highlights = highlights(&breakdown, transaction_count);

        Self {
            period,
            clamped,
            can_advance: period.can_advance(today),
            total_spent,
            total_budget: total_budget(&state.allocations, period),
            transaction_count,
            daily_average: daily_average_for_period(total_spent, period, today),
            daily: daily_series(&state.transactions, period, today, window_days),
            breakdown,
            highlights,
        }
    }

    /// The `n` largest categories
    pub fn top_categories(&self, n: usize) -> &[CategorySpending] {
        let n = n.min(self.breakdown.items.len());
        &self.breakdown.items[..n]
    }
}

fn highlights(breakdown: &CategoryBreakdown, transaction_count: usize) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(top) = breakdown.items.first() {
        out.push(format!(
            "{} is your biggest expense at ${:.0}.",
            top.name, top.amount
        ));
    }

    if transaction_count > 0 {
        let average = breakdown.total / transaction_count as f64;
        out.push(format!("Average transaction: ${:.0}", average));
    }

    out
}
