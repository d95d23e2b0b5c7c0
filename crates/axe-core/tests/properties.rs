//! Property tests for the aggregation engine

use axe_core::aggregate::{
    allocation_summary, category_breakdown, compute_period_summary, daily_series,
    safe_to_spend_today,
};
use axe_core::{BudgetAllocation, Category, Period, Transaction};
use chrono::NaiveDate;
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

fn period() -> Period {
    Period::new(2026, 10).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Category ids 1..=12 exist; 13..=15 dangle
fn arb_transaction() -> impl Strategy<Value = (Option<i64>, f64, u32, u32)> {
    (
        prop::option::of(1i64..=15),
        0.0f64..2_000.0,
        9u32..=11,
        1u32..=28,
    )
}

fn arb_transactions() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(arb_transaction(), 0..60).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (category_id, amount, month, day))| Transaction {
                id: i as i64 + 1,
                user_id: 1,
                category_id,
                amount,
                description: None,
                date: NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
                created_at: None,
            })
            .collect()
    })
}

fn arb_allocations() -> impl Strategy<Value = Vec<BudgetAllocation>> {
    (
        prop::option::of(0.0f64..5_000.0),
        prop::collection::vec((1i64..=15, 0.0f64..1_000.0), 0..8),
    )
        .prop_map(|(overall, per_category)| {
            let row = |category_id: Option<i64>, amount: f64| BudgetAllocation {
                id: 0,
                user_id: 1,
                category_id,
                period: period(),
                amount,
                rollover_enabled: false,
                rollover_amount: 0.0,
                created_at: None,
                updated_at: None,
            };
            let mut rows: Vec<BudgetAllocation> = overall.map(|a| row(None, a)).into_iter().collect();
            rows.extend(per_category.into_iter().map(|(id, a)| row(Some(id), a)));
            rows
        })
}

proptest! {
    #[test]
    fn prop_summary_invariants(
        transactions in arb_transactions(),
        allocations in arb_allocations(),
    ) {
        let categories = Category::defaults();
        let summary = compute_period_summary(&transactions, &categories, &allocations, period());

        // Progress stays within [0, 1]
        prop_assert!((0.0..=1.0).contains(&summary.progress));
        for c in &summary.per_category {
            prop_assert!((0.0..=1.0).contains(&c.progress));
            prop_assert!(c.remaining >= 0.0);
        }

        // Remaining is never negative
        prop_assert!(summary.remaining >= 0.0);
        let expected = (summary.total_budget - summary.total_spent).max(0.0);
        prop_assert!((summary.remaining - expected).abs() < EPSILON);

        // Known categories plus uncategorized account for every dollar
        let categorized: f64 = summary.per_category.iter().map(|c| c.spent).sum();
        prop_assert!(categorized <= summary.total_spent + EPSILON);
        prop_assert!(
            (categorized + summary.uncategorized_spent - summary.total_spent).abs() < EPSILON
        );

        // Recomputing gives the same answer
        let again = compute_period_summary(&transactions, &categories, &allocations, period());
        prop_assert_eq!(summary, again);
    }

    #[test]
    fn prop_breakdown_is_ranked_and_complete(transactions in arb_transactions()) {
        let categories = Category::defaults();
        let breakdown = category_breakdown(&transactions, &categories, period());

        for pair in breakdown.items.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }

        let count: usize = breakdown.items.iter().map(|i| i.transaction_count).sum::<usize>()
            + breakdown.uncategorized.transaction_count;
        let in_period = transactions.iter().filter(|t| period().contains(t.date)).count();
        prop_assert_eq!(count, in_period);

        if breakdown.total > 0.0 {
            let pct: f64 = breakdown.items.iter().map(|i| i.percentage).sum::<f64>()
                + breakdown.uncategorized.percentage;
            prop_assert!((pct - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_daily_series_shape(transactions in arb_transactions(), window in 1u32..=31) {
        let series = daily_series(&transactions, period(), today(), window);
        prop_assert_eq!(series.len() as u32, window.min(19));
        prop_assert!(series.iter().all(|d| period().contains(d.date)));
        prop_assert_eq!(series.last().map(|d| d.is_today), Some(true));
    }

    #[test]
    fn prop_allocation_summary_is_consistent(allocations in arb_allocations()) {
        let summary = allocation_summary(&Category::defaults(), &allocations, period());
        prop_assert!(summary.unallocated >= 0.0);
        prop_assert!((0.0..=1.0).contains(&summary.allocation_progress));
        prop_assert_eq!(summary.is_over_allocated, summary.allocated > summary.total_budget);
    }

    #[test]
    fn prop_safe_to_spend_never_exceeds_remaining(remaining in 0.0f64..10_000.0, days in 0u32..=31) {
        let safe = safe_to_spend_today(remaining, days);
        prop_assert!(safe >= 0.0);
        prop_assert!(safe <= remaining + EPSILON);
    }
}
