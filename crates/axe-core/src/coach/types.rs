//! Core types for the spending coach

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of behavioral insight the coach can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Most spend lands in impulse-prone categories
    ImpulsePattern,
    /// Most purchases happen on weekends
    WeekendHeavy,
    /// Spend has passed the monthly budget
    OverBudget,
    /// Late in the month with most of the budget left
    GoodProgress,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::ImpulsePattern => "impulse_pattern",
            InsightKind::WeekendHeavy => "weekend_heavy",
            InsightKind::OverBudget => "over_budget",
            InsightKind::GoodProgress => "good_progress",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "impulse_pattern" => Ok(InsightKind::ImpulsePattern),
            "weekend_heavy" => Ok(InsightKind::WeekendHeavy),
            "over_budget" => Ok(InsightKind::OverBudget),
            "good_progress" => Ok(InsightKind::GoodProgress),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Positive reinforcement
    Success,
    /// Informational - no action needed
    Info,
    /// Worth changing habits over
    Warning,
    /// Budget already broken
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Success => 1,
            Severity::Info => 2,
            Severity::Warning => 3,
            Severity::Critical => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Severity::Success),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A behavioral insight produced by a coach rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachInsight {
    pub kind: InsightKind,
    pub severity: Severity,
    /// Short title (e.g., "Budget Exceeded")
    pub title: String,
    /// One or two sentences of explanation
    pub description: String,
}

impl CoachInsight {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Named spending triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    ConvenienceEating,
    RetailTherapy,
    BoredomSpending,
    /// Emitted alone when nothing else fires
    Balanced,
}

/// A likely emotional or situational driver of spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrigger {
    pub kind: TriggerKind,
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl SpendingTrigger {
    pub(crate) fn new(kind: TriggerKind, icon: &str, title: &str, description: &str) -> Self {
        Self {
            kind,
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}
