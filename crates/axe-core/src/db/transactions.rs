//! Transaction operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{validate_amount, NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str = "id, user_id, category_id, amount, description, date, created_at";

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(5)?;
    let created_at: Option<String> = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        amount: row.get(3)?,
        description: row.get(4)?,
        date: parse_date(&date_str)?,
        created_at: created_at.as_deref().and_then(parse_datetime),
    })
}

/// Blank descriptions are stored as NULL
fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

impl Database {
    /// Log a purchase
    pub fn insert_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        validate_amount(new.amount)?;
        let description = normalize_description(new.description.as_deref());

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO transactions (user_id, category_id, amount, description, date)
             VALUES (?, ?, ?, ?, ?)",
            params![
                new.user_id,
                new.category_id,
                new.amount,
                description,
                new.date.to_string(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        info!(id, amount = new.amount, date = %new.date, "Inserted transaction");

        self.get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                row_to_transaction,
            )
            .optional()?;

        Ok(tx)
    }

    /// All of a user's transactions, newest first
    pub fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ? ORDER BY date DESC, id DESC",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![user_id], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Change a transaction's amount and/or description
    ///
    /// `None` leaves a field as it is; an empty description clears it.
    pub fn update_transaction(
        &self,
        id: i64,
        amount: Option<f64>,
        description: Option<&str>,
    ) -> Result<Transaction> {
        if let Some(amount) = amount {
            validate_amount(amount)?;
        }

        let existing = self
            .get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;

        let amount = amount.unwrap_or(existing.amount);
        let description = match description {
            Some(d) => normalize_description(Some(d)),
            None => existing.description,
        };

        let conn = self.conn()?;
        conn.execute(
            "UPDATE transactions SET amount = ?, description = ? WHERE id = ?",
            params![amount, description, id],
        )?;

        info!(id, amount, "Updated transaction");

        self.get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }

        info!(id, "Deleted transaction");
        Ok(())
    }
}
