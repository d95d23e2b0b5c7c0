//! Budget allocation operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{validate_amount, BudgetAllocation};
use crate::period::Period;

const BUDGET_COLUMNS: &str = "id, user_id, category_id, month, year, amount, rollover_enabled, \
                              rollover_amount, created_at, updated_at";

fn row_to_budget(row: &rusqlite::Row<'_>) -> rusqlite::Result<BudgetAllocation> {
    let month: u32 = row.get(3)?;
    let year: i32 = row.get(4)?;
    let period = Period::new(year, month).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Integer,
            format!("invalid budget period {}-{}", year, month).into(),
        )
    })?;
    let created_at: Option<String> = row.get(8)?;
    let updated_at: Option<String> = row.get(9)?;

    Ok(BudgetAllocation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        period,
        amount: row.get(5)?,
        rollover_enabled: row.get(6)?,
        rollover_amount: row.get(7)?,
        created_at: created_at.as_deref().and_then(parse_datetime),
        updated_at: updated_at.as_deref().and_then(parse_datetime),
    })
}

impl Database {
    /// Save the overall (`category_id = None`) or a category budget for a period
    ///
    /// The overall budget is replaced by deleting and re-inserting inside one
    /// transaction; category budgets are upserted. Either way the result is a
    /// single row per (user, category, period).
    pub fn save_budget(
        &self,
        user_id: i64,
        category_id: Option<i64>,
        period: Period,
        amount: f64,
    ) -> Result<BudgetAllocation> {
        validate_amount(amount)?;

        if let Some(id) = category_id {
            if self.get_category(id)?.is_none() {
                return Err(Error::NotFound(format!("Category {}", id)));
            }
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        match category_id {
            None => {
                tx.execute(
                    "DELETE FROM budgets
                     WHERE user_id = ? AND category_id IS NULL AND month = ? AND year = ?",
                    params![user_id, period.month(), period.year()],
                )?;
                tx.execute(
                    "INSERT INTO budgets (user_id, category_id, month, year, amount, rollover_amount)
                     VALUES (?, NULL, ?, ?, ?, 0)",
                    params![user_id, period.month(), period.year(), amount],
                )?;
            }
            Some(id) => {
                tx.execute(
                    "INSERT INTO budgets (user_id, category_id, month, year, amount, rollover_amount)
                     VALUES (?, ?, ?, ?, ?, 0)
                     ON CONFLICT (user_id, category_id, month, year)
                     DO UPDATE SET amount = excluded.amount, updated_at = CURRENT_TIMESTAMP",
                    params![user_id, id, period.month(), period.year(), amount],
                )?;
            }
        }

        let saved = tx.query_row(
            &format!(
                "SELECT {} FROM budgets
                 WHERE user_id = ? AND category_id IS ? AND month = ? AND year = ?",
                BUDGET_COLUMNS
            ),
            params![user_id, category_id, period.month(), period.year()],
            row_to_budget,
        )?;
        tx.commit()?;

        info!(
            user_id,
            category_id,
            period = %period,
            amount,
            "Saved budget"
        );
        Ok(saved)
    }

    /// Budgets for one period, overall first
    pub fn list_budgets(&self, user_id: i64, period: Period) -> Result<Vec<BudgetAllocation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets
             WHERE user_id = ? AND month = ? AND year = ?
             ORDER BY category_id IS NOT NULL, category_id",
            BUDGET_COLUMNS
        ))?;

        let budgets = stmt
            .query_map(params![user_id, period.month(), period.year()], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Every budget a user has saved, newest period first
    pub fn list_all_budgets(&self, user_id: i64) -> Result<Vec<BudgetAllocation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets
             WHERE user_id = ?
             ORDER BY year DESC, month DESC, category_id IS NOT NULL, category_id",
            BUDGET_COLUMNS
        ))?;

        let budgets = stmt
            .query_map(params![user_id], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Get a budget row by ID
    pub fn get_budget(&self, id: i64) -> Result<Option<BudgetAllocation>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!("SELECT {} FROM budgets WHERE id = ?", BUDGET_COLUMNS),
                params![id],
                row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    pub fn delete_budget(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Budget {}", id)));
        }

        info!(id, "Deleted budget");
        Ok(())
    }
}
