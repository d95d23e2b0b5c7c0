//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `categories` - Default and custom spending categories
//! - `budgets` - Overall and per-category monthly allocations
//! - `transactions` - Logged purchases and the full ledger load

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OptionalExtension;
use tempfile::TempDir;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Category, DEFAULT_CATEGORIES};
use crate::store::LedgerState;

mod budgets;
mod categories;
mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "AXE_DB_KEY";

/// Derive an encryption key from a passphrase using Argon2
///
/// The application salt is fixed so the same passphrase always opens the
/// same database, wherever the file lives.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Changing this invalidates every existing encrypted database
    const APP_SALT: &[u8; 16] = b"axe-salt-v1-fixd";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    let hash_str = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(hash_str.as_bytes()))
}

/// Parse a SQLite `CURRENT_TIMESTAMP` value
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .ok()
}

/// Parse a stored `YYYY-MM-DD` date
pub(crate) fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    /// Opened with a passphrase
    encrypted: bool,
    /// Keeps a throwaway database's directory alive; declared after `pool`
    /// so connections close before the directory is removed
    _temp_dir: Option<Arc<TempDir>>,
}

impl Database {
    /// Open an encrypted database
    ///
    /// Requires the `AXE_DB_KEY` environment variable. The SQLCipher key is
    /// derived from that passphrase with Argon2.
    pub fn new(path: &str) -> Result<Self> {
        match std::env::var(DB_KEY_ENV).ok() {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} environment variable with your passphrase, \
                or use --no-encrypt for an unencrypted database.",
                DB_KEY_ENV
            ))),
        }
    }

    /// Open an unencrypted database
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Open a database with an explicit passphrase
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            // Every pooled connection needs the key before first use
            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(10).build(manager)?
        } else {
            Pool::builder().max_size(10).build(manager)?
        };

        let db = Self {
            pool,
            db_path: path.to_string(),
            encrypted: passphrase.is_some(),
            _temp_dir: None,
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a file in a fresh temporary directory rather than `:memory:`
    /// because each pooled connection would otherwise see its own empty
    /// database. The directory, WAL sidecars included, is removed when the
    /// last clone is dropped.
    pub fn in_memory() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("axe_test_").tempdir()?;
        let path = dir.path().join("axe.db");
        let path = path
            .to_str()
            .ok_or_else(|| Error::InvalidData("Temp path is not valid UTF-8".to_string()))?
            .to_string();

        let mut db = Self::new_unencrypted(&path)?;
        db._temp_dir = Some(Arc::new(dir));
        Ok(db)
    }

    /// Whether the file is encrypted with SQLCipher
    ///
    /// True only when the database was opened with a passphrase and the
    /// linked SQLite reports a cipher version.
    pub fn is_encrypted(&self) -> Result<bool> {
        if !self.encrypted {
            return Ok(false);
        }

        let conn = self.conn()?;
        let version: Option<String> = conn
            .query_row("PRAGMA cipher_version;", [], |row| row.get(0))
            .optional()?;
        Ok(version.is_some())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Insert the twelve default categories if none exist yet
    ///
    /// Returns the number of categories inserted.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let mut conn = self.conn()?;
        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| {
            row.get(0)
        })?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = conn.transaction()?;
        for (position, (name, icon)) in DEFAULT_CATEGORIES.iter().enumerate() {
            tx.execute(
                "INSERT INTO categories (name, icon, color, is_default, position)
                 VALUES (?, ?, ?, 1, ?)",
                rusqlite::params![name, icon, crate::models::ACCENT_COLOR, position as i64],
            )?;
        }
        tx.commit()?;

        info!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
        Ok(DEFAULT_CATEGORIES.len())
    }

    /// Load everything a user's dashboard needs
    ///
    /// Falls back to the default category set for display when the
    /// categories table is empty.
    pub fn load_state(&self, user_id: i64) -> Result<LedgerState> {
        let mut categories = self.list_categories()?;
        if categories.is_empty() {
            categories = Category::defaults();
        }

        Ok(LedgerState {
            user_id,
            categories,
            allocations: self.list_all_budgets(user_id)?,
            transactions: self.list_transactions(user_id)?,
        })
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- WAL: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA cache_size = 2000;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;

            -- Categories (shared by all users)
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL DEFAULT '#B9FF64',
                is_default BOOLEAN NOT NULL DEFAULT 0,
                position INTEGER NOT NULL DEFAULT 1000,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Names are unique regardless of case
            DROP INDEX IF EXISTS idx_categories_name;
            CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_name_nocase
                ON categories(name COLLATE NOCASE);

            -- Budgets: category_id NULL is the overall monthly budget.
            -- SQLite treats NULLs as distinct in UNIQUE, so the overall row is
            -- kept unique by delete-then-insert in save_budget.
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                category_id INTEGER REFERENCES categories(id) ON DELETE CASCADE,
                month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
                year INTEGER NOT NULL,
                amount REAL NOT NULL,
                rollover_enabled BOOLEAN NOT NULL DEFAULT 0,
                rollover_amount REAL NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (user_id, category_id, month, year)
            );

            CREATE INDEX IF NOT EXISTS idx_budgets_period ON budgets(user_id, year, month);

            -- Transactions keep their category_id after the category is
            -- deleted and read back as uncategorized
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                category_id INTEGER,
                amount REAL NOT NULL CHECK (amount >= 0),
                description TEXT,
                date DATE NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
            "#,
        )?;

        Ok(())
    }
}
