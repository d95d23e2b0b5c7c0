//! Test utilities for axe-core
//!
//! Ledger fixtures shared by the unit tests and, through the `test-utils`
//! feature, by the CLI tests.

use chrono::NaiveDate;

use crate::models::{BudgetAllocation, Category, Transaction};
use crate::period::Period;
use crate::store::LedgerState;

/// Placeholder ids of `Category::defaults()`
pub const FOOD: i64 = 1;
pub const TRANSPORT: i64 = 2;
pub const SHOPPING: i64 = 3;
pub const ENTERTAINMENT: i64 = 4;
pub const OTHER: i64 = 12;

pub const TEST_USER: i64 = 1;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The twelve default categories with ids 1..=12
pub fn ledger_categories() -> Vec<Category> {
    Category::defaults()
}

pub fn tx(id: i64, category_id: Option<i64>, amount: f64, date: NaiveDate) -> Transaction {
    Transaction {
        id,
        user_id: TEST_USER,
        category_id,
        amount,
        description: None,
        date,
        created_at: None,
    }
}

/// Overall budget for a period
pub fn allocation(period: Period, amount: f64) -> BudgetAllocation {
    BudgetAllocation {
        id: 0,
        user_id: TEST_USER,
        category_id: None,
        period,
        amount,
        rollover_enabled: false,
        rollover_amount: 0.0,
        created_at: None,
        updated_at: None,
    }
}

/// Category budget for a period
pub fn category_budget(category_id: i64, period: Period, amount: f64) -> BudgetAllocation {
    BudgetAllocation {
        category_id: Some(category_id),
        ..allocation(period, amount)
    }
}

/// A ledger with default categories and the given data
pub fn ledger(allocations: Vec<BudgetAllocation>, transactions: Vec<Transaction>) -> LedgerState {
    LedgerState {
        user_id: TEST_USER,
        categories: ledger_categories(),
        allocations,
        transactions,
    }
}
