//! Coach engine - runs the registered rules over a period's data

use crate::aggregate::{CategoryBreakdown, PeriodSummary};
use crate::models::Transaction;

use super::rules::{GoodProgressRule, ImpulsePatternRule, OverBudgetRule, WeekendHeavyRule};
use super::types::{CoachInsight, InsightKind};

/// Data handed to every coach rule
pub struct CoachContext<'a> {
    /// Totals for the period being coached
    pub summary: &'a PeriodSummary,
    /// Transactions the pattern rules look at
    pub transactions: &'a [Transaction],
    /// Category ranking for the period
    pub breakdown: &'a CategoryBreakdown,
    /// Days left in the current month
    pub days_left: u32,
}

impl<'a> CoachContext<'a> {
    pub fn new(
        summary: &'a PeriodSummary,
        transactions: &'a [Transaction],
        breakdown: &'a CategoryBreakdown,
        days_left: u32,
    ) -> Self {
        Self {
            summary,
            transactions,
            breakdown,
            days_left,
        }
    }
}

/// A heuristic check producing at most one insight
pub trait CoachRule: Send + Sync {
    fn kind(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &CoachContext<'_>) -> Option<CoachInsight>;
}

/// Evaluates rules in registration order
pub struct CoachEngine {
    rules: Vec<Box<dyn CoachRule>>,
}

impl Default for CoachEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CoachEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(ImpulsePatternRule));
        engine.register(Box::new(WeekendHeavyRule));
        engine.register(Box::new(OverBudgetRule));
        engine.register(Box::new(GoodProgressRule));

        engine
    }

    pub fn register(&mut self, rule: Box<dyn CoachRule>) {
        self.rules.push(rule);
    }

    /// Run every rule; each is independent of the others
    pub fn evaluate(&self, ctx: &CoachContext<'_>) -> Vec<CoachInsight> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let insight = rule.evaluate(ctx);
                tracing::debug!(
                    rule = rule.name(),
                    kind = rule.kind().as_str(),
                    fired = insight.is_some(),
                    "Coach rule evaluated"
                );
                insight
            })
            .collect()
    }

    pub fn rule_kinds(&self) -> Vec<InsightKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }
}

/// Evaluate the built-in rules
pub fn rule_based_insights(ctx: &CoachContext<'_>) -> Vec<CoachInsight> {
    CoachEngine::new().evaluate(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{category_breakdown, compute_period_summary};
    use crate::coach::types::Severity;
    use crate::period::Period;
    use crate::test_utils::{allocation, date, ledger_categories, tx, OTHER, SHOPPING};

    struct AlwaysRule;

    impl CoachRule for AlwaysRule {
        fn kind(&self) -> InsightKind {
            InsightKind::GoodProgress
        }

        fn name(&self) -> &'static str {
            "Always"
        }

        fn evaluate(&self, _ctx: &CoachContext<'_>) -> Option<CoachInsight> {
            Some(CoachInsight::new(
                InsightKind::GoodProgress,
                Severity::Success,
                "Always",
                "Fires every time",
            ))
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = CoachEngine::new();
        assert_eq!(
            engine.rule_kinds(),
            vec![
                InsightKind::ImpulsePattern,
                InsightKind::WeekendHeavy,
                InsightKind::OverBudget,
                InsightKind::GoodProgress,
            ]
        );
    }

    #[test]
    fn test_empty_ledger_produces_no_insights() {
        let period = Period::new(2026, 10).unwrap();
        let categories = ledger_categories();
        let summary = compute_period_summary(&[], &categories, &[], period);
        let breakdown = category_breakdown(&[], &categories, period);
        let ctx = CoachContext::new(&summary, &[], &breakdown, 12);

        assert!(rule_based_insights(&ctx).is_empty());
    }

    #[test]
    fn test_rules_are_not_exclusive() {
        let period = Period::new(2026, 10).unwrap();
        let categories = ledger_categories();
        let allocations = vec![allocation(period, 100.0)];
        let transactions = vec![
            tx(1, Some(SHOPPING), 150.0, date(2026, 10, 14)),
            tx(2, Some(OTHER), 10.0, date(2026, 10, 15)),
        ];
        let summary = compute_period_summary(&transactions, &categories, &allocations, period);
        let breakdown = category_breakdown(&transactions, &categories, period);
        let ctx = CoachContext::new(&summary, &transactions, &breakdown, 12);

        let kinds: Vec<InsightKind> = rule_based_insights(&ctx).iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![InsightKind::ImpulsePattern, InsightKind::OverBudget]
        );
    }

    #[test]
    fn test_register_custom_rule() {
        let period = Period::new(2026, 10).unwrap();
        let summary = compute_period_summary(&[], &[], &[], period);
        let breakdown = category_breakdown(&[], &[], period);
        let ctx = CoachContext::new(&summary, &[], &breakdown, 3);

        let mut engine = CoachEngine::new();
        engine.register(Box::new(AlwaysRule));

        let insights = engine.evaluate(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Always");
    }
}
