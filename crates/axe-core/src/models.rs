//! Domain models for Axe

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Accent color used for seeded and custom categories
pub const ACCENT_COLOR: &str = "#B9FF64";

/// Icon shown for transactions without a resolvable category
pub const UNCATEGORIZED_ICON: &str = "square.grid.2x2.fill";

/// Fallback color for transactions without a resolvable category
pub const UNCATEGORIZED_COLOR: &str = "#808080";

/// Icon for custom categories created without one
pub const CUSTOM_CATEGORY_ICON: &str = "tag.fill";

/// Well-known default category names referenced by the coaching rules
pub mod category_names {
    pub const FOOD_AND_DINING: &str = "Food & Dining";
    pub const SHOPPING: &str = "Shopping";
    pub const ENTERTAINMENT: &str = "Entertainment";
}

/// A spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Symbol name for the icon
    pub icon: String,
    /// Hex color, e.g. "#B9FF64"
    pub color: String,
    /// Default categories can't be deleted
    pub is_default: bool,
}

/// Seeded categories as (name, icon), in display order
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Food & Dining", "fork.knife"),
    ("Transportation", "car.fill"),
    ("Shopping", "bag.fill"),
    ("Entertainment", "tv.fill"),
    ("Bills & Utilities", "bolt.fill"),
    ("Health & Fitness", "heart.fill"),
    ("Travel", "airplane"),
    ("Subscriptions", "repeat.circle.fill"),
    ("Personal Care", "sparkles"),
    ("Education", "book.fill"),
    ("Savings", "banknote.fill"),
    ("Other", "ellipsis.circle.fill"),
];

impl Category {
    /// The default category set with placeholder ids (1-based, display order)
    ///
    /// Used for display when no categories have been stored yet.
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, (name, icon))| Category {
                id: i as i64 + 1,
                name: name.to_string(),
                icon: icon.to_string(),
                color: ACCENT_COLOR.to_string(),
                is_default: true,
            })
            .collect()
    }
}

/// A category to be created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: Option<String>,
}

/// A stored budget amount for a period, overall (no category) or per-category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub id: i64,
    pub user_id: i64,
    /// `None` marks the overall monthly budget
    pub category_id: Option<i64>,
    pub period: Period,
    pub amount: f64,
    pub rollover_enabled: bool,
    /// Carried over from the previous period; only counted on the overall row
    pub rollover_amount: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BudgetAllocation {
    pub fn is_overall(&self) -> bool {
        self.category_id.is_none()
    }

    /// Amount plus rollover
    pub fn total(&self) -> f64 {
        self.amount + self.rollover_amount
    }
}

/// A logged purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    /// Unlinked transactions show as generic
    pub category_id: Option<i64>,
    /// Money spent, never signed
    pub amount: f64,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Title shown in lists: the description if present, else the category
    /// name, else "Transaction"
    pub fn display_title(&self, categories: &[Category]) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => desc.to_string(),
            _ => find_category(categories, self.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Transaction".to_string()),
        }
    }
}

/// A transaction to be logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Resolve a category reference, treating dangling ids as uncategorized
pub fn find_category(categories: &[Category], id: Option<i64>) -> Option<&Category> {
    let id = id?;
    categories.iter().find(|c| c.id == id)
}

/// Check that an amount is a finite, non-negative magnitude
pub fn validate_amount(amount: f64) -> crate::Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(crate::Error::InvalidData(format!(
            "Amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(())
}
