//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - init and shared utilities (open_db, open_store, config)
//! - `budget` - Overall and category budgets for the current month
//! - `categories` - Category listing and custom categories
//! - `transactions` - Logging and editing purchases
//! - `reports` - Dashboard, analytics and coach output

pub mod budget;
pub mod categories;
pub mod core;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use budget::*;
pub use categories::*;
pub use core::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// A text progress bar, e.g. `[######----]`
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
