//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve the config file
//! - `open_db` - Open the database
//! - `open_store` - Load the ledger for the selected user and date
//! - `resolve_category` - Look up a category by name or ID
//! - `cmd_init` - Initialize the database

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axe_core::{Category, Clock, Config, Database, FixedClock, LedgerState, LedgerStore, SystemClock};

use crate::cli::Cli;

pub fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(cli.config.as_deref()).context("Failed to load config")
}

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    tracing::debug!(path = path_str, encrypted = !no_encrypt, "Opening database");

    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the ledger, honoring --user and --today
pub fn open_store(db: Database, cli: &Cli, config: &Config) -> Result<LedgerStore> {
    let clock: Arc<dyn Clock> = match cli.today {
        Some(today) => Arc::new(FixedClock::on(today)),
        None => Arc::new(SystemClock),
    };
    let user_id = cli.user.unwrap_or(config.user_id);
    if let Some(today) = cli.today {
        tracing::debug!(%today, "Using fixed date");
    }

    LedgerStore::load(db, clock, user_id).context("Failed to load ledger")
}

/// Find a category by ID or case-insensitive name
pub fn resolve_category<'a>(state: &'a LedgerState, name_or_id: &str) -> Result<&'a Category> {
    let needle = name_or_id.trim();

    if let Ok(id) = needle.parse::<i64>() {
        if let Some(category) = state.category(id) {
            return Ok(category);
        }
    }

    state
        .categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(needle))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Category '{}' not found. Run 'axe categories' to see them.",
                needle
            )
        })
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    let seeded = db
        .seed_default_categories()
        .context("Failed to seed default categories")?;
    if seeded > 0 {
        println!("   Seeded {} default categories", seeded);
    } else {
        println!("   Categories already present");
    }

    if db.is_encrypted().context("Failed to check encryption")? {
        println!("   🔒 Encryption: ENABLED");
    } else if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   ⚠️  Encryption: UNAVAILABLE (SQLCipher not linked)");
    }
    println!("   Database: {}", db.path());

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set a budget: axe budget set 1500");
    println!("  2. Log a purchase: axe tx add 12.50 -c \"Food & Dining\"");
    println!("  3. Check in: axe dashboard");

    Ok(())
}
