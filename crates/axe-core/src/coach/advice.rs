//! Triggers, recommendations and spending patterns

use std::collections::HashMap;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::aggregate::{PeriodSummary, Projection};
use crate::models::category_names::{ENTERTAINMENT, FOOD_AND_DINING, SHOPPING};
use crate::models::Transaction;

use super::types::{SpendingTrigger, TriggerKind};

/// Share of spend above which each trigger fires
const CONVENIENCE_EATING_SHARE: f64 = 0.25;
const RETAIL_THERAPY_SHARE: f64 = 0.3;
const BOREDOM_SPENDING_SHARE: f64 = 0.2;

/// Progress above which a no-spend day is suggested
const NO_SPEND_DAY_PROGRESS: f64 = 0.8;

/// Below this many transactions the coach asks for more data
const MIN_TRANSACTIONS_FOR_INSIGHTS: usize = 5;

/// Weekdays in tie-break order
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn share_of_spend(summary: &PeriodSummary, category: &str) -> f64 {
    if summary.total_spent <= 0.0 {
        return 0.0;
    }
    summary
        .category(category)
        .map(|c| c.spent / summary.total_spent)
        .unwrap_or(0.0)
}

/// Likely drivers of the period's spend
///
/// Always returns at least one trigger: "Balanced Spending" when no
/// category share stands out.
pub fn spending_triggers(summary: &PeriodSummary) -> Vec<SpendingTrigger> {
    let mut triggers = Vec::new();

    if summary.total_spent > 0.0 {
        if share_of_spend(summary, FOOD_AND_DINING) > CONVENIENCE_EATING_SHARE {
            triggers.push(SpendingTrigger::new(
                TriggerKind::ConvenienceEating,
                "takeoutbag.and.cup.and.straw.fill",
                "Convenience Eating",
                "Food delivery and dining out may be driven by time pressure or stress.",
            ));
        }
        if share_of_spend(summary, SHOPPING) > RETAIL_THERAPY_SHARE {
            triggers.push(SpendingTrigger::new(
                TriggerKind::RetailTherapy,
                "bag.fill",
                "Retail Therapy",
                "High shopping activity can indicate emotional spending patterns.",
            ));
        }
        if share_of_spend(summary, ENTERTAINMENT) > BOREDOM_SPENDING_SHARE {
            triggers.push(SpendingTrigger::new(
                TriggerKind::BoredomSpending,
                "tv.fill",
                "Boredom Spending",
                "Entertainment spending often spikes when we're seeking stimulation.",
            ));
        }
    }

    if triggers.is_empty() {
        triggers.push(SpendingTrigger::new(
            TriggerKind::Balanced,
            "checkmark.shield.fill",
            "Balanced Spending",
            "Your spending appears well-distributed across categories.",
        ));
    }

    triggers
}

/// Personalized suggestions, most specific first
pub fn recommendations(
    summary: &PeriodSummary,
    transaction_count: usize,
    days_left: u32,
) -> Vec<String> {
    let mut recs = Vec::new();

    if summary.has_budget() {
        if summary.progress > NO_SPEND_DAY_PROGRESS {
            let remaining_pct = (100.0 - summary.progress * 100.0) as i64;
            recs.push(format!(
                "With {} days left and {}% budget remaining, try a 'no-spend day' tomorrow \
                 to reset.",
                days_left, remaining_pct
            ));
        }

        if let Some(top) = summary.top_category() {
            recs.push(format!(
                "Your highest spending is {}. Set a specific limit for this category next month.",
                top.name
            ));
        }
    }

    recs.push(
        "Before making a purchase over $50, wait 24 hours. Many impulse urges fade after a \
         brief pause."
            .to_string(),
    );

    if transaction_count < MIN_TRANSACTIONS_FOR_INSIGHTS {
        recs.push(
            "Log more transactions to get personalized behavioral insights tailored to your \
             spending patterns."
                .to_string(),
        );
    }

    recs
}

/// When and how much the user tends to spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatterns {
    /// Weekday with the largest total spend
    pub highest_weekday: Option<Weekday>,
    /// Mean transaction amount
    pub average_transaction: Option<f64>,
}

pub fn spending_patterns(transactions: &[Transaction]) -> SpendingPatterns {
    if transactions.is_empty() {
        return SpendingPatterns {
            highest_weekday: None,
            average_transaction: None,
        };
    }

    let mut by_weekday: HashMap<Weekday, f64> = HashMap::new();
    let mut total = 0.0;
    for tx in transactions {
        *by_weekday.entry(tx.date.weekday()).or_insert(0.0) += tx.amount;
        total += tx.amount;
    }

    // Strictly greater keeps the earliest weekday on ties
    let mut highest: Option<(Weekday, f64)> = None;
    for day in WEEK {
        if let Some(&amount) = by_weekday.get(&day) {
            match highest {
                Some((_, best)) if best >= amount => {}
                _ => highest = Some((day, amount)),
            }
        }
    }

    SpendingPatterns {
        highest_weekday: highest.map(|(day, _)| day),
        average_transaction: Some(total / transactions.len() as f64),
    }
}

/// Full English name of a weekday
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One-line verdict on the month's pace
pub fn pace_message(summary: &PeriodSummary, projection: Option<&Projection>) -> String {
    if !summary.has_budget() {
        return "Set up your budget to get personalized insights.".to_string();
    }

    match projection {
        Some(p) if !p.is_on_track => format!(
            "Heads up: you're projected to exceed your budget by ${:.0}. Consider reducing \
             spending.",
            p.projected_overage
        ),
        _ => "You're doing great! At this pace, you'll stay within budget. Keep up the good \
              spending habits."
            .to_string(),
    }
}
