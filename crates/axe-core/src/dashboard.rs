//! Home dashboard for the current month

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    allocation_summary, category_breakdown, compute_period_summary, daily_average_for_period,
    days_left_in_month, projected_monthly_spend, safe_to_spend_today, AllocationSummary,
    PeriodSummary, Projection,
};
use crate::coach::{pace_message, CoachContext, CoachReport};
use crate::models::{find_category, Transaction, UNCATEGORIZED_COLOR, UNCATEGORIZED_ICON};
use crate::period::Period;
use crate::store::LedgerState;

/// How many transactions the dashboard lists
pub const RECENT_TRANSACTIONS: usize = 5;

/// A transaction as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: i64,
    pub title: String,
    /// `None` when uncategorized
    pub category: Option<String>,
    pub icon: String,
    pub color: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl RecentTransaction {
    fn from_transaction(tx: &Transaction, state: &LedgerState) -> Self {
        let category = find_category(&state.categories, tx.category_id);
        Self {
            id: tx.id,
            title: tx.display_title(&state.categories),
            category: category.map(|c| c.name.clone()),
            icon: category
                .map(|c| c.icon.clone())
                .unwrap_or_else(|| UNCATEGORIZED_ICON.to_string()),
            color: category
                .map(|c| c.color.clone())
                .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string()),
            amount: tx.amount,
            date: tx.date,
        }
    }
}

/// Everything the home screen shows, derived from one ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub period: Period,
    pub summary: PeriodSummary,
    /// Month-end projection at the current pace
    pub projection: Option<Projection>,
    pub days_left: u32,
    pub safe_to_spend_today: f64,
    pub daily_average: f64,
    pub allocation: AllocationSummary,
    pub pace_message: String,
    pub coach: CoachReport,
    /// Newest first
    pub recent: Vec<RecentTransaction>,
}

impl Dashboard {
    pub fn build(state: &LedgerState, today: NaiveDate) -> Self {
        let period = Period::current(today);
        let summary = compute_period_summary(
            &state.transactions,
            &state.categories,
            &state.allocations,
            period,
        );
        let projection =
            projected_monthly_spend(&state.transactions, period, today, summary.total_budget);
        let days_left = days_left_in_month(today);
        let breakdown = category_breakdown(&state.transactions, &state.categories, period);

        let ctx = CoachContext::new(&summary, &state.transactions, &breakdown, days_left);
        let coach = CoachReport::build(&ctx);

        let mut newest: Vec<&Transaction> = state.transactions.iter().collect();
        newest.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        let recent = newest
            .into_iter()
            .take(RECENT_TRANSACTIONS)
            .map(|tx| RecentTransaction::from_transaction(tx, state))
            .collect();

        tracing::debug!(
            period = %period,
            days_left,
            insights = coach.insights.len(),
            "Built dashboard"
        );

        Self {
            today,
            period,
            safe_to_spend_today: safe_to_spend_today(summary.remaining, days_left),
            daily_average: daily_average_for_period(summary.total_spent, period, today),
            allocation: allocation_summary(&state.categories, &state.allocations, period),
            pace_message: pace_message(&summary, projection.as_ref()),
            summary,
            projection,
            days_left,
            coach,
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::InsightKind;
    use crate::test_utils::{
        allocation, category_budget, date, ledger, tx, FOOD, OTHER, SHOPPING, TRANSPORT,
    };

    #[test]
    fn test_empty_ledger() {
        let today = date(2026, 10, 19);
        let dashboard = Dashboard::build(&ledger(vec![], vec![]), today);

        assert_eq!(dashboard.period, Period::new(2026, 10).unwrap());
        assert_eq!(dashboard.summary.total_spent, 0.0);
        assert_eq!(dashboard.summary.progress, 0.0);
        assert_eq!(dashboard.days_left, 12);
        assert_eq!(dashboard.safe_to_spend_today, 0.0);
        assert!(dashboard.recent.is_empty());
        assert!(dashboard.coach.insights.is_empty());
        assert_eq!(
            dashboard.pace_message,
            "Set up your budget to get personalized insights."
        );
    }

    #[test]
    fn test_current_month_totals() {
        let today = date(2026, 10, 19);
        let october = Period::current(today);
        let state = ledger(
            vec![
                allocation(october, 1000.0),
                category_budget(FOOD, october, 400.0),
                category_budget(SHOPPING, october, 300.0),
            ],
            vec![
                tx(1, Some(FOOD), 300.0, date(2026, 10, 2)),
                tx(2, Some(SHOPPING), 400.0, date(2026, 10, 5)),
                // Last month does not count toward October
                tx(3, Some(TRANSPORT), 90.0, date(2026, 9, 28)),
            ],
        );

        let dashboard = Dashboard::build(&state, today);
        assert_eq!(dashboard.summary.total_spent, 700.0);
        assert_eq!(dashboard.summary.remaining, 300.0);
        assert!((dashboard.summary.progress - 0.7).abs() < 1e-9);
        assert_eq!(dashboard.safe_to_spend_today, 25.0);
        assert_eq!(dashboard.allocation.allocated, 700.0);
        assert_eq!(dashboard.allocation.unallocated, 300.0);
        assert!(!dashboard.allocation.is_over_allocated);

        let projection = dashboard.projection.as_ref().unwrap();
        assert!(!projection.is_on_track);
        assert!(dashboard.pace_message.starts_with("Heads up"));
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let today = date(2026, 10, 19);
        let transactions: Vec<Transaction> = (1..=7)
            .map(|i| tx(i, Some(OTHER), 1.0, date(2026, 10, i as u32)))
            .collect();
        let dashboard = Dashboard::build(&ledger(vec![], transactions), today);

        let ids: Vec<i64> = dashboard.recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
        assert_eq!(dashboard.recent[0].title, "Other");
    }

    #[test]
    fn test_recent_uncategorized_uses_fallbacks() {
        let today = date(2026, 10, 19);
        let dashboard = Dashboard::build(
            &ledger(vec![], vec![tx(1, Some(999), 12.0, date(2026, 10, 3))]),
            today,
        );

        let recent = &dashboard.recent[0];
        assert_eq!(recent.title, "Transaction");
        assert_eq!(recent.category, None);
        assert_eq!(recent.icon, UNCATEGORIZED_ICON);
        assert_eq!(recent.color, UNCATEGORIZED_COLOR);
        assert_eq!(dashboard.summary.uncategorized_spent, 12.0);
    }

    #[test]
    fn test_over_budget_surfaces_critical_insight() {
        let today = date(2026, 10, 19);
        let october = Period::current(today);
        let state = ledger(
            vec![allocation(october, 100.0)],
            vec![tx(1, Some(TRANSPORT), 150.0, date(2026, 10, 14))],
        );

        let dashboard = Dashboard::build(&state, today);
        let kinds: Vec<InsightKind> = dashboard.coach.insights.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![InsightKind::OverBudget]);
        assert_eq!(dashboard.summary.remaining, 0.0);
        assert_eq!(dashboard.safe_to_spend_today, 0.0);
    }
}
