//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use axe_core::models::CUSTOM_CATEGORY_ICON;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Axe - Budget, log spending, get coached
#[derive(Parser)]
#[command(name = "axe")]
#[command(about = "Personal budgeting with behavioral spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the configured storage path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.config/axe/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ledger owner (defaults to the configured user id)
    #[arg(long, global = true)]
    pub user: Option<i64>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set AXE_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Set or show this month's budget
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Manage spending categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Log and manage transactions
    Tx {
        #[command(subcommand)]
        action: Option<TxAction>,
    },

    /// This month at a glance
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending analytics for a month
    Analytics {
        /// Month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Behavioral insights and recommendations
    Coach {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the overall budget for this month
    Set {
        amount: f64,
    },

    /// Set a category's budget for this month
    Category {
        /// Category name or ID
        category: String,

        amount: f64,
    },

    /// Show this month's budget and allocations
    Show,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a custom category
    Add {
        name: String,

        /// Icon symbol name
        #[arg(long, default_value = CUSTOM_CATEGORY_ICON)]
        icon: String,

        /// Hex color (defaults to the accent color)
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a custom category (its transactions become uncategorized)
    Delete {
        /// Category name or ID
        category: String,
    },
}

#[derive(Subcommand)]
pub enum TxAction {
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Log a purchase
    Add {
        amount: f64,

        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,

        /// What it was for
        #[arg(short, long)]
        description: Option<String>,

        /// Purchase date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Change a transaction's amount or description
    Edit {
        id: i64,

        #[arg(long)]
        amount: Option<f64>,

        /// New description (empty to clear)
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        id: i64,
    },
}
