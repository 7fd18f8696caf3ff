use crate::db::Database;
use crate::error::{LedgerError, Result};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A spending category. Created and deleted, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Owns category identity and name uniqueness.
pub struct CategoryStore<'a> {
    db: &'a Database,
}

impl<'a> CategoryStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        CategoryStore { db }
    }

    /// Insert a category, absorbing duplicates silently.
    ///
    /// The name is trimmed first; an empty trimmed name is rejected with
    /// [`LedgerError::Validation`]. If the name already exists the insert
    /// is a no-op and the existing row is returned, so calling this twice
    /// with the same name yields exactly one category.
    pub fn add_category(&self, name: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("category name is empty".into()));
        }

        let inserted = self.db.conn.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
            params![name],
        )?;
        debug!(name, inserted, "add_category");

        // The row exists now whether we inserted it or it was already there.
        self.find_by_name(name)?.ok_or_else(|| {
            LedgerError::Constraint(format!("category '{name}' missing after insert"))
        })
    }

    /// All categories, sorted ascending by name.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .db
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY name ASC")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = self
            .db
            .conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(category)
    }

    /// Delete a category by id.
    ///
    /// No check-before-delete: the statement is let to fail, and a foreign
    /// key rejection (expenses still reference the category) surfaces as
    /// [`LedgerError::Constraint`]. There is no cascading delete.
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let result = self
            .db
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id]);

        match result {
            Ok(deleted) => {
                debug!(id, deleted, "delete_category");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(LedgerError::Constraint(format!(
                    "category {id} is still referenced by expenses"
                )))
            }
            Err(e) => Err(e.into()),
        }
    }
}
