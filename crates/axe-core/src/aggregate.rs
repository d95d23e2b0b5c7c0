//! Aggregation engine
//!
//! Pure functions that turn raw transactions, categories and budget
//! allocations into the totals shown on the dashboard and analytics
//! screens. Nothing here performs I/O or reads the clock; "today" is always
//! passed in. Unknown category references are treated as uncategorized and
//! missing allocations as a budget of zero, so none of these functions can
//! fail.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{find_category, BudgetAllocation, Category, Transaction};
use crate::period::{days_in_month, Period};

/// Default number of days shown in the daily spending chart
pub const DEFAULT_DAILY_WINDOW: u32 = 7;

/// Budget vs. actual for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub is_default: bool,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    /// spent / budget clamped to [0, 1]; 0 without a budget
    pub progress: f64,
}

/// Totals for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub progress: f64,
    pub per_category: Vec<CategoryProgress>,
    /// Spend in the period with no resolvable category
    pub uncategorized_spent: f64,
    pub transaction_count: usize,
}

impl PeriodSummary {
    pub fn has_budget(&self) -> bool {
        self.total_budget > 0.0
    }

    pub fn is_over_budget(&self) -> bool {
        self.total_spent > self.total_budget
    }

    /// Look up a category's progress by name
    pub fn category(&self, name: &str) -> Option<&CategoryProgress> {
        self.per_category.iter().find(|c| c.name == name)
    }

    /// The category with the largest positive spend (first one wins ties)
    pub fn top_category(&self) -> Option<&CategoryProgress> {
        self.per_category
            .iter()
            .filter(|c| c.spent > 0.0)
            .fold(None, |best: Option<&CategoryProgress>, c| match best {
                Some(b) if b.spent >= c.spent => Some(b),
                _ => Some(c),
            })
    }
}

/// `part / whole` clamped to [0, 1], or 0 when `whole` is not positive
pub fn clamped_ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Transactions dated inside `period`
pub fn transactions_in_period(
    transactions: &[Transaction],
    period: Period,
) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(move |t| period.contains(t.date))
}

/// Sum of spend in `period`
pub fn total_spent(transactions: &[Transaction], period: Period) -> f64 {
    transactions_in_period(transactions, period)
        .map(|t| t.amount)
        .sum()
}

/// The overall (no-category) allocation for a period
pub fn overall_allocation(
    allocations: &[BudgetAllocation],
    period: Period,
) -> Option<&BudgetAllocation> {
    allocations
        .iter()
        .find(|a| a.is_overall() && a.period == period)
}

/// A category's allocation for a period
pub fn category_allocation(
    allocations: &[BudgetAllocation],
    category_id: i64,
    period: Period,
) -> Option<&BudgetAllocation> {
    allocations
        .iter()
        .find(|a| a.category_id == Some(category_id) && a.period == period)
}

/// Overall budget for a period: amount plus rollover, 0 when unset
pub fn total_budget(allocations: &[BudgetAllocation], period: Period) -> f64 {
    overall_allocation(allocations, period)
        .map(|a| a.total())
        .unwrap_or(0.0)
}

/// Compute totals, remaining, progress and per-category budget vs. actual
/// for a period
pub fn compute_period_summary(
    transactions: &[Transaction],
    categories: &[Category],
    allocations: &[BudgetAllocation],
    period: Period,
) -> PeriodSummary {
    let mut total_spent = 0.0;
    let mut transaction_count = 0;
    let mut by_category: HashMap<i64, f64> = HashMap::new();

    for tx in transactions_in_period(transactions, period) {
        total_spent += tx.amount;
        transaction_count += 1;
        if let Some(id) = tx.category_id {
            *by_category.entry(id).or_insert(0.0) += tx.amount;
        }
    }

    let total_budget = total_budget(allocations, period);

    let per_category: Vec<CategoryProgress> = categories
        .iter()
        .map(|cat| {
            let spent = by_category.get(&cat.id).copied().unwrap_or(0.0);
            // Per-category rollover is reserved; only the amount counts
            let budget = category_allocation(allocations, cat.id, period)
                .map(|a| a.amount)
                .unwrap_or(0.0);
            CategoryProgress {
                category_id: cat.id,
                name: cat.name.clone(),
                icon: cat.icon.clone(),
                color: cat.color.clone(),
                is_default: cat.is_default,
                budget,
                spent,
                remaining: (budget - spent).max(0.0),
                progress: clamped_ratio(spent, budget),
            }
        })
        .collect();

    let uncategorized_spent = transactions_in_period(transactions, period)
        .filter(|t| find_category(categories, t.category_id).is_none())
        .map(|t| t.amount)
        .sum();

    tracing::debug!(
        period = %period,
        transactions = transaction_count,
        total_spent,
        total_budget,
        "Computed period summary"
    );

    PeriodSummary {
        period,
        total_budget,
        total_spent,
        remaining: (total_budget - total_spent).max(0.0),
        progress: clamped_ratio(total_spent, total_budget),
        per_category,
        uncategorized_spent,
        transaction_count,
    }
}

/// Month-end projection at the current pace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub spent_so_far: f64,
    pub daily_average: f64,
    pub projected: f64,
    pub days_in_month: u32,
    pub is_on_track: bool,
    /// How far the projection exceeds the budget (0 when on track or unbudgeted)
    pub projected_overage: f64,
}

/// Project month-end spend from the pace so far
///
/// Only the current month can be projected; past months return `None` and
/// callers should show their elapsed totals instead.
pub fn projected_monthly_spend(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
    total_budget: f64,
) -> Option<Projection> {
    if !period.is_current(today) {
        return None;
    }

    let spent_so_far = total_spent(transactions, period);
    let day = today.day();
    let daily_average = if day == 0 {
        0.0
    } else {
        spent_so_far / f64::from(day)
    };
    let days_in_month = period.days_in_month();
    let projected = daily_average * f64::from(days_in_month);
    let is_on_track = projected <= total_budget || total_budget == 0.0;
    let projected_overage = if total_budget > 0.0 {
        (projected - total_budget).max(0.0)
    } else {
        0.0
    };

    Some(Projection {
        spent_so_far,
        daily_average,
        projected,
        days_in_month,
        is_on_track,
        projected_overage,
    })
}

/// Days remaining after today in today's month
pub fn days_left_in_month(today: NaiveDate) -> u32 {
    days_in_month(today).saturating_sub(today.day())
}

/// How much can be spent today while staying within what remains
///
/// On the last day of the month the whole remainder is available.
pub fn safe_to_spend_today(remaining: f64, days_left_in_month: u32) -> f64 {
    if days_left_in_month == 0 {
        remaining
    } else {
        remaining / f64::from(days_left_in_month.max(1))
    }
}

/// Average daily spend for a period
///
/// The current month divides by the days elapsed so far, a past month by
/// its full length. Future months have no spend to average.
pub fn daily_average_for_period(total_spent: f64, period: Period, today: NaiveDate) -> f64 {
    let current = Period::current(today);
    let days = if period == current {
        today.day()
    } else if period.is_after(current) {
        0
    } else {
        period.days_in_month()
    };

    if days == 0 {
        0.0
    } else {
        total_spent / f64::from(days)
    }
}

/// A ranked category in the breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category_id: i64,
    pub name: String,
    pub icon: String,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Spend whose category is missing or no longer exists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UncategorizedSpending {
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Category shares of a period's spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub period: Period,
    /// Total spend in the period, uncategorized included
    pub total: f64,
    /// Ranked by amount descending, then name, then id
    pub items: Vec<CategorySpending>,
    pub uncategorized: UncategorizedSpending,
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

/// Group a period's spend by category and rank it
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
    period: Period,
) -> CategoryBreakdown {
    let mut total = 0.0;
    let mut grouped: HashMap<i64, (f64, usize)> = HashMap::new();
    let mut uncategorized = UncategorizedSpending::default();

    for tx in transactions_in_period(transactions, period) {
        total += tx.amount;
        match find_category(categories, tx.category_id) {
            Some(cat) => {
                let entry = grouped.entry(cat.id).or_insert((0.0, 0));
                entry.0 += tx.amount;
                entry.1 += 1;
            }
            None => {
                uncategorized.amount += tx.amount;
                uncategorized.transaction_count += 1;
            }
        }
    }
    uncategorized.percentage = percentage_of(uncategorized.amount, total);

    let mut items: Vec<CategorySpending> = categories
        .iter()
        .filter_map(|cat| {
            let (amount, count) = grouped.remove(&cat.id)?;
            Some(CategorySpending {
                category_id: cat.id,
                name: cat.name.clone(),
                icon: cat.icon.clone(),
                amount,
                percentage: percentage_of(amount, total),
                transaction_count: count,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    CategoryBreakdown {
        period,
        total,
        items,
        uncategorized,
    }
}

/// One bar of the daily chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySpending {
    pub date: NaiveDate,
    pub amount: f64,
    pub is_today: bool,
}

/// Per-day spend for the trailing `window_days` days of a period
///
/// The window ends today for the current month and on the last day of the
/// month otherwise. Days without spend are present with an amount of 0.
pub fn daily_series(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailySpending> {
    if window_days == 0 {
        return Vec::new();
    }

    let end_day = if period.is_current(today) {
        today.day()
    } else {
        period.days_in_month()
    };
    let start_day = end_day.saturating_sub(window_days - 1).max(1);

    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for tx in transactions_in_period(transactions, period) {
        *by_day.entry(tx.date).or_insert(0.0) += tx.amount;
    }

    (start_day..=end_day)
        .filter_map(|day| NaiveDate::from_ymd_opt(period.year(), period.month(), day))
        .map(|date| DailySpending {
            date,
            amount: by_day.get(&date).copied().unwrap_or(0.0),
            is_today: date == today,
        })
        .collect()
}

/// How the overall budget is split across categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total_budget: f64,
    pub allocated: f64,
    pub unallocated: f64,
    pub allocation_progress: f64,
    pub is_over_allocated: bool,
}

/// Compare category allocations against the overall budget
///
/// Allocations of deleted categories are ignored. Over-allocation is only
/// reported, never enforced.
pub fn allocation_summary(
    categories: &[Category],
    allocations: &[BudgetAllocation],
    period: Period,
) -> AllocationSummary {
    let total_budget = total_budget(allocations, period);
    let allocated: f64 = categories
        .iter()
        .filter_map(|cat| category_allocation(allocations, cat.id, period))
        .map(|a| a.amount)
        .sum();

    AllocationSummary {
        total_budget,
        allocated,
        unallocated: (total_budget - allocated).max(0.0),
        allocation_progress: clamped_ratio(allocated, total_budget),
        is_over_allocated: allocated > total_budget,
    }
}
