//! Behavioral spending coach
//!
//! Turns computed period totals into short, human-readable guidance:
//! - Rule-based insights (impulse categories, weekend habits, budget state)
//! - Spending triggers derived from category shares
//! - Recommendations and spending patterns
//!
//! Everything here is a pure function of already aggregated data and is
//! re-evaluated whenever the ledger changes.

mod advice;
mod engine;
mod rules;
mod types;

pub use advice::{
    pace_message, recommendations, spending_patterns, spending_triggers, weekday_name,
    SpendingPatterns,
};
pub use engine::{rule_based_insights, CoachContext, CoachEngine, CoachRule};
pub use rules::{
    GoodProgressRule, ImpulsePatternRule, OverBudgetRule, WeekendHeavyRule, IMPULSE_CATEGORIES,
};
pub use types::{CoachInsight, InsightKind, Severity, SpendingTrigger, TriggerKind};

use serde::{Deserialize, Serialize};

/// Everything the coach has to say about a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachReport {
    pub insights: Vec<CoachInsight>,
    pub triggers: Vec<SpendingTrigger>,
    pub recommendations: Vec<String>,
    pub patterns: SpendingPatterns,
}

impl CoachReport {
    /// Run the built-in rules and advice over a context
    pub fn build(ctx: &CoachContext<'_>) -> Self {
        Self::build_with(&CoachEngine::new(), ctx)
    }

    /// Same as [`CoachReport::build`] with a caller-supplied rule set
    pub fn build_with(engine: &CoachEngine, ctx: &CoachContext<'_>) -> Self {
        Self {
            insights: engine.evaluate(ctx),
            triggers: spending_triggers(ctx.summary),
            recommendations: recommendations(
                ctx.summary,
                ctx.transactions.len(),
                ctx.days_left,
            ),
            patterns: spending_patterns(ctx.transactions),
        }
    }

    /// The most urgent insight, if any
    pub fn headline(&self) -> Option<&CoachInsight> {
        self.insights
            .iter()
            .fold(None, |best: Option<&CoachInsight>, i| match best {
                Some(b) if b.severity.priority() >= i.severity.priority() => Some(b),
                _ => Some(i),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{category_breakdown, compute_period_summary};
    use crate::period::Period;
    use crate::test_utils::{allocation, date, ledger_categories, tx, SHOPPING};

    #[test]
    fn test_report_bundles_everything() {
        let period = Period::new(2026, 10).unwrap();
        let categories = ledger_categories();
        let allocations = vec![allocation(period, 100.0)];
        let transactions = vec![tx(1, Some(SHOPPING), 150.0, date(2026, 10, 14))];
        let summary = compute_period_summary(&transactions, &categories, &allocations, period);
        let breakdown = category_breakdown(&transactions, &categories, period);
        let ctx = CoachContext::new(&summary, &transactions, &breakdown, 12);

        let report = CoachReport::build(&ctx);
        assert_eq!(report.insights.len(), 2);
        assert_eq!(report.triggers[0].kind, TriggerKind::RetailTherapy);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Your highest spending is Shopping")));
        assert_eq!(report.patterns.average_transaction, Some(150.0));

        let headline = report.headline().unwrap();
        assert_eq!(headline.kind, InsightKind::OverBudget);
    }

    #[test]
    fn test_headline_empty() {
        let period = Period::new(2026, 10).unwrap();
        let summary = compute_period_summary(&[], &[], &[], period);
        let breakdown = category_breakdown(&[], &[], period);
        let ctx = CoachContext::new(&summary, &[], &breakdown, 20);

        assert!(CoachReport::build(&ctx).headline().is_none());
    }
}
