//! Built-in coach rules

use chrono::{Datelike, Weekday};

use crate::models::category_names::{ENTERTAINMENT, FOOD_AND_DINING, SHOPPING};

use super::engine::{CoachContext, CoachRule};
use super::types::{CoachInsight, InsightKind, Severity};

/// Categories where purchases tend to be unplanned
pub const IMPULSE_CATEGORIES: [&str; 3] = [SHOPPING, ENTERTAINMENT, FOOD_AND_DINING];

/// Share of total spend in impulse categories that raises a warning
const IMPULSE_SHARE: f64 = 0.5;

/// Minimum transactions before the weekend pattern is meaningful
const WEEKEND_MIN_TRANSACTIONS: usize = 3;

/// Good progress needs progress below this...
const GOOD_PROGRESS_MAX: f64 = 0.5;
/// ...with fewer than this many days left
const GOOD_PROGRESS_DAYS_LEFT: u32 = 15;

/// Over half of spend in Shopping, Entertainment and Food & Dining
pub struct ImpulsePatternRule;

impl CoachRule for ImpulsePatternRule {
    fn kind(&self) -> InsightKind {
        InsightKind::ImpulsePattern
    }

    fn name(&self) -> &'static str {
        "Impulse Pattern"
    }

    fn evaluate(&self, ctx: &CoachContext<'_>) -> Option<CoachInsight> {
        let total = ctx.summary.total_spent;
        let impulse: f64 = ctx
            .breakdown
            .items
            .iter()
            .filter(|item| IMPULSE_CATEGORIES.contains(&item.name.as_str()))
            .map(|item| item.amount)
            .sum();

        if total > 0.0 && impulse > total * IMPULSE_SHARE {
            Some(CoachInsight::new(
                self.kind(),
                Severity::Warning,
                "Impulse Pattern Detected",
                "Over 50% of your spending is in impulse categories (Shopping, Food, \
                 Entertainment). Consider implementing a 24-hour waiting rule for \
                 non-essential purchases.",
            ))
        } else {
            None
        }
    }
}

/// More than half of all purchases on Saturday or Sunday
pub struct WeekendHeavyRule;

impl CoachRule for WeekendHeavyRule {
    fn kind(&self) -> InsightKind {
        InsightKind::WeekendHeavy
    }

    fn name(&self) -> &'static str {
        "Weekend Spender"
    }

    fn evaluate(&self, ctx: &CoachContext<'_>) -> Option<CoachInsight> {
        let count = ctx.transactions.len();
        let weekend = ctx
            .transactions
            .iter()
            .filter(|t| matches!(t.date.weekday(), Weekday::Sat | Weekday::Sun))
            .count();

        if count > WEEKEND_MIN_TRANSACTIONS && weekend * 2 > count {
            Some(CoachInsight::new(
                self.kind(),
                Severity::Info,
                "Weekend Spender",
                "Most of your transactions happen on weekends. This often correlates with \
                 social activities and leisure spending. Plan weekend activities in advance \
                 to stay on budget.",
            ))
        } else {
            None
        }
    }
}

/// Spend above the monthly budget
pub struct OverBudgetRule;

impl CoachRule for OverBudgetRule {
    fn kind(&self) -> InsightKind {
        InsightKind::OverBudget
    }

    fn name(&self) -> &'static str {
        "Budget Exceeded"
    }

    fn evaluate(&self, ctx: &CoachContext<'_>) -> Option<CoachInsight> {
        if ctx.summary.is_over_budget() {
            Some(CoachInsight::new(
                self.kind(),
                Severity::Critical,
                "Budget Exceeded",
                "You've exceeded your monthly budget. Let's identify which areas can be \
                 adjusted to get back on track.",
            ))
        } else {
            None
        }
    }
}

/// Less than half the budget used in the second half of the month
pub struct GoodProgressRule;

impl CoachRule for GoodProgressRule {
    fn kind(&self) -> InsightKind {
        InsightKind::GoodProgress
    }

    fn name(&self) -> &'static str {
        "Great Progress"
    }

    fn evaluate(&self, ctx: &CoachContext<'_>) -> Option<CoachInsight> {
        let summary = ctx.summary;
        if summary.has_budget()
            && summary.progress < GOOD_PROGRESS_MAX
            && ctx.days_left < GOOD_PROGRESS_DAYS_LEFT
        {
            let used = (summary.progress * 100.0) as i64;
            Some(CoachInsight::new(
                self.kind(),
                Severity::Success,
                "Great Progress!",
                format!(
                    "You've only used {}% of your budget with {} days left. You're building \
                     strong financial habits!",
                    used, ctx.days_left
                ),
            ))
        } else {
            None
        }
    }
}
