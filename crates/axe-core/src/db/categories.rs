//! Category operations

use rusqlite::{params, ErrorCode, OptionalExtension};
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Category, NewCategory, ACCENT_COLOR};

const CATEGORY_COLUMNS: &str = "id, name, icon, color, is_default";

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        is_default: row.get(4)?,
    })
}

impl Database {
    /// List categories, defaults first in seeded order, then custom ones
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM categories ORDER BY position, id",
            CATEGORY_COLUMNS
        ))?;

        let categories = stmt
            .query_map([], row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Get a category by ID
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                &format!("SELECT {} FROM categories WHERE id = ?", CATEGORY_COLUMNS),
                params![id],
                row_to_category,
            )
            .optional()?;

        Ok(category)
    }

    /// Find a category by name, ignoring case
    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                &format!(
                    "SELECT {} FROM categories WHERE name = ? COLLATE NOCASE",
                    CATEGORY_COLUMNS
                ),
                params![name.trim()],
                row_to_category,
            )
            .optional()?;

        Ok(category)
    }

    /// Create a custom category
    ///
    /// The color falls back to the accent color when not given.
    pub fn add_category(&self, new: &NewCategory) -> Result<Category> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name is required".to_string()));
        }
        if self.find_category_by_name(name)?.is_some() {
            return Err(Error::InvalidData(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let color = new
            .color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(ACCENT_COLOR);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (name, icon, color, is_default) VALUES (?, ?, ?, 0)",
            params![name, new.icon, color],
        )
        .map_err(|e| match e.sqlite_error_code() {
            // Lost a race with another writer
            Some(ErrorCode::ConstraintViolation) => {
                Error::InvalidData(format!("Category '{}' already exists", name))
            }
            _ => Error::Database(e),
        })?;
        let id = conn.last_insert_rowid();

        info!(id, name, "Added category");

        Ok(Category {
            id,
            name: name.to_string(),
            icon: new.icon.clone(),
            color: color.to_string(),
            is_default: false,
        })
    }

    /// Delete a custom category and its budget rows
    ///
    /// Transactions keep pointing at the old id and read back as
    /// uncategorized. Default categories can't be deleted.
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let category = self
            .get_category(id)?
            .ok_or_else(|| Error::NotFound(format!("Category {}", id)))?;

        if category.is_default {
            return Err(Error::InvalidData(format!(
                "Default category '{}' can't be deleted",
                category.name
            )));
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM budgets WHERE category_id = ?", params![id])?;
        tx.execute("DELETE FROM categories WHERE id = ?", params![id])?;
        tx.commit()?;

        info!(id, name = %category.name, "Deleted category");
        Ok(())
    }
}
