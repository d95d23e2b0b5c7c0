//! Integration tests for axe-core
//!
//! These tests exercise the full store → database → dashboard workflow and
//! the headline aggregation scenarios through the public API.

use std::sync::Arc;

use axe_core::aggregate::{category_breakdown, compute_period_summary, safe_to_spend_today};
use axe_core::{
    Action, Change, Database, FixedClock, InsightKind, LedgerStore, Period, Transaction,
};
use chrono::NaiveDate;

const USER: i64 = 1;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open_store(today: NaiveDate) -> LedgerStore {
    let db = Database::in_memory().expect("Failed to create test database");
    LedgerStore::load(db, Arc::new(FixedClock::on(today)), USER).expect("Failed to load ledger")
}

fn category_id(store: &LedgerStore, name: &str) -> i64 {
    store
        .state()
        .categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("missing category {}", name))
}

fn spend(store: &mut LedgerStore, category: &str, amount: f64, day: NaiveDate) -> Transaction {
    let id = category_id(store, category);
    match store
        .dispatch(Action::AddTransaction {
            category_id: Some(id),
            amount,
            description: None,
            date: Some(day),
        })
        .expect("Failed to add transaction")
    {
        Change::TransactionAdded(tx) => tx,
        other => panic!("unexpected change {:?}", other),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_budget_with_two_categories() {
    let today = date(2026, 10, 19);
    let mut store = open_store(today);

    store.dispatch(Action::SetBudget { amount: 1000.0 }).unwrap();
    spend(&mut store, "Food & Dining", 300.0, date(2026, 10, 3));
    spend(&mut store, "Shopping", 400.0, date(2026, 10, 11));

    let dashboard = store.snapshot();
    assert_eq!(dashboard.summary.total_spent, 700.0);
    assert_eq!(dashboard.summary.remaining, 300.0);
    assert!((dashboard.summary.progress - 0.7).abs() < 1e-9);
}

#[test]
fn test_no_budget_means_no_progress() {
    let today = date(2026, 10, 19);
    let mut store = open_store(today);

    spend(&mut store, "Other", 50.0, date(2026, 10, 5));

    let dashboard = store.snapshot();
    assert_eq!(dashboard.summary.total_spent, 50.0);
    assert_eq!(dashboard.summary.progress, 0.0);
    assert_eq!(dashboard.summary.remaining, 0.0);
    assert!(dashboard
        .coach
        .recommendations
        .iter()
        .all(|r| !r.contains("no-spend day")));
}

#[test]
fn test_breakdown_ranks_food_first() {
    let today = date(2026, 10, 19);
    let mut store = open_store(today);

    spend(&mut store, "Food & Dining", 100.0, date(2026, 10, 1));
    spend(&mut store, "Food & Dining", 50.0, date(2026, 10, 2));
    spend(&mut store, "Shopping", 50.0, date(2026, 10, 3));

    let report = store.analytics(Period::current(today), 7);
    let items = &report.breakdown.items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Food & Dining");
    assert_eq!(items[0].percentage, 75.0);
    assert_eq!(items[0].transaction_count, 2);
    assert_eq!(items[1].name, "Shopping");
    assert_eq!(items[1].percentage, 25.0);
}

#[test]
fn test_last_day_of_month_spends_whole_remainder() {
    assert_eq!(safe_to_spend_today(120.0, 0), 120.0);

    let today = date(2026, 10, 31);
    let mut store = open_store(today);
    store.dispatch(Action::SetBudget { amount: 500.0 }).unwrap();
    spend(&mut store, "Travel", 380.0, date(2026, 10, 30));

    let dashboard = store.snapshot();
    assert_eq!(dashboard.days_left, 0);
    assert_eq!(dashboard.safe_to_spend_today, 120.0);
}

#[test]
fn test_deleted_category_moves_to_uncategorized() {
    let today = date(2026, 10, 19);
    let mut store = open_store(today);

    let hobby = match store
        .dispatch(Action::AddCategory {
            name: "Hobbies".to_string(),
            icon: "paintpalette.fill".to_string(),
            color: None,
        })
        .unwrap()
    {
        Change::CategoryAdded(c) => c,
        other => panic!("unexpected change {:?}", other),
    };
    spend(&mut store, "Hobbies", 60.0, date(2026, 10, 4));
    spend(&mut store, "Food & Dining", 40.0, date(2026, 10, 5));

    store.dispatch(Action::DeleteCategory(hobby.id)).unwrap();

    let state = store.state();
    let period = Period::current(today);
    let summary = compute_period_summary(
        &state.transactions,
        &state.categories,
        &state.allocations,
        period,
    );
    assert_eq!(summary.total_spent, 100.0);
    assert_eq!(summary.uncategorized_spent, 60.0);
    let categorized: f64 = summary.per_category.iter().map(|c| c.spent).sum();
    assert_eq!(categorized, 40.0);

    let breakdown = category_breakdown(&state.transactions, &state.categories, period);
    assert_eq!(breakdown.uncategorized.amount, 60.0);
    assert_eq!(breakdown.uncategorized.percentage, 60.0);
    assert!(breakdown.items.iter().all(|i| i.name != "Hobbies"));

    // The dashboard lists it as a generic transaction
    let dashboard = store.snapshot();
    let listed = dashboard
        .recent
        .iter()
        .find(|r| r.amount == 60.0)
        .unwrap();
    assert_eq!(listed.title, "Transaction");
    assert_eq!(listed.category, None);
}

// =============================================================================
// Persistence round trips
// =============================================================================

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let path = path.to_str().unwrap();
    let today = date(2026, 10, 19);

    {
        let db = Database::new_unencrypted(path).unwrap();
        let mut store = LedgerStore::load(db, Arc::new(FixedClock::on(today)), USER).unwrap();
        store.dispatch(Action::SetBudget { amount: 800.0 }).unwrap();
        spend(&mut store, "Transportation", 45.0, date(2026, 10, 18));
    }

    let db = Database::new_unencrypted(path).unwrap();
    let store = LedgerStore::load(db, Arc::new(FixedClock::on(today)), USER).unwrap();
    let dashboard = store.snapshot();
    assert_eq!(dashboard.summary.total_budget, 800.0);
    assert_eq!(dashboard.summary.total_spent, 45.0);
    assert_eq!(store.state().categories.len(), 12);
}

#[test]
fn test_users_do_not_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");
    let path = path.to_str().unwrap();
    let clock = Arc::new(FixedClock::on(date(2026, 10, 19)));

    let db = Database::new_unencrypted(path).unwrap();
    let mut alice = LedgerStore::load(db.clone(), clock.clone(), 1).unwrap();
    let mut bob = LedgerStore::load(db, clock, 2).unwrap();

    let tx = spend(&mut alice, "Shopping", 99.0, date(2026, 10, 10));
    bob.refresh().unwrap();
    assert!(bob.state().transactions.is_empty());

    // Bob can't delete Alice's purchase
    assert!(bob.dispatch(Action::DeleteTransaction(tx.id)).is_err());
    alice.refresh().unwrap();
    assert_eq!(alice.state().transactions.len(), 1);
}

// =============================================================================
// Coaching
// =============================================================================

#[test]
fn test_overspending_month_coaching() {
    let today = date(2026, 10, 19);
    let mut store = open_store(today);
    store.dispatch(Action::SetBudget { amount: 300.0 }).unwrap();

    // Saturdays and Sundays in October 2026
    for day in [3, 4, 10, 11, 17] {
        spend(&mut store, "Shopping", 80.0, date(2026, 10, day));
    }

    let coach = &store.snapshot().coach;
    let kinds: Vec<InsightKind> = coach.insights.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InsightKind::ImpulsePattern,
            InsightKind::WeekendHeavy,
            InsightKind::OverBudget,
        ]
    );
    assert_eq!(coach.headline().unwrap().kind, InsightKind::OverBudget);
    assert!(coach
        .recommendations
        .iter()
        .any(|r| r.contains("try a 'no-spend day'")));
}

#[test]
fn test_past_month_analytics_ignore_current_spend() {
    let today = date(2026, 10, 19);
    let mut store = open_store(today);
    spend(&mut store, "Food & Dining", 30.0, date(2026, 9, 14));
    spend(&mut store, "Food & Dining", 70.0, date(2026, 10, 14));

    let september = store.analytics(Period::new(2026, 9).unwrap(), 7);
    assert_eq!(september.total_spent, 30.0);
    assert_eq!(september.transaction_count, 1);
    assert!(september.can_advance);

    let future = store.analytics(Period::new(2026, 12).unwrap(), 7);
    assert!(future.clamped);
    assert_eq!(future.total_spent, 70.0);
}
