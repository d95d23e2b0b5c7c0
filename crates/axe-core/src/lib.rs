//! Axe Core Library
//!
//! Shared functionality for the Axe budgeting tool:
//! - Aggregation engine: period totals, projections, category breakdowns
//! - Behavioral coach: rule-based insights, triggers and recommendations
//! - Dashboard and analytics views built from a ledger snapshot
//! - Ledger store that persists actions and publishes fresh dashboards
//! - SQLite storage with optional SQLCipher encryption
//! - TOML configuration and an injectable clock

pub mod aggregate;
pub mod analytics;
pub mod clock;
pub mod coach;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod period;
pub mod store;

/// Ledger fixtures for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{
    AllocationSummary, CategoryBreakdown, CategoryProgress, CategorySpending, DailySpending,
    PeriodSummary, Projection, UncategorizedSpending,
};
pub use analytics::AnalyticsReport;
pub use clock::{Clock, FixedClock, SystemClock};
pub use coach::{CoachEngine, CoachInsight, CoachReport, InsightKind, Severity, SpendingTrigger};
pub use config::Config;
pub use dashboard::{Dashboard, RecentTransaction};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{BudgetAllocation, Category, NewCategory, NewTransaction, Transaction};
pub use period::Period;
pub use store::{Action, Change, LedgerState, LedgerStore};
