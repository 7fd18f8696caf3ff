use crate::category::CategoryStore;
use crate::db::Database;
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An expense as persisted: the category is held by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category_id: i64,
    pub date: NaiveDate,
    pub note: String,
}

/// A joined expense row with the category resolved to its name.
///
/// Base loads and filter results share this one shape, so either can be
/// fed to the analytics functions or a display layer interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub note: String,
}

/// Owns expense records; relies on [`CategoryStore`] to resolve the
/// category reference on insert.
pub struct ExpenseStore<'a> {
    db: &'a Database,
}

impl<'a> ExpenseStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        ExpenseStore { db }
    }

    /// Parse, validate and persist a new expense.
    ///
    /// `amount_text` must parse as a number; no sign or range check is
    /// applied beyond that. `category_name` must match an existing
    /// category exactly. Returns the created expense with its assigned id.
    pub fn add_expense(
        &self,
        amount_text: &str,
        category_name: &str,
        date: NaiveDate,
        note: &str,
    ) -> Result<Expense> {
        let amount: f64 = amount_text
            .trim()
            .parse()
            .map_err(|_| LedgerError::Validation("invalid amount".into()))?;

        let category = CategoryStore::new(self.db)
            .find_by_name(category_name)?
            .ok_or_else(|| LedgerError::Validation("invalid category".into()))?;

        self.db.conn.execute(
            "INSERT INTO expenses (amount, category_id, date, note) VALUES (?1, ?2, ?3, ?4)",
            params![amount, category.id, date, note],
        )?;
        let id = self.db.conn.last_insert_rowid();
        debug!(id, amount, category = %category.name, "add_expense");

        Ok(Expense {
            id,
            amount,
            category_id: category.id,
            date,
            note: note.to_string(),
        })
    }

    /// The full joined view, newest first; same-day rows keep insertion
    /// order. An expense whose category disappeared would be excluded by
    /// the inner join, though the delete guard makes that unreachable.
    pub fn list_expenses(&self) -> Result<Vec<ExpenseRow>> {
        let mut stmt = self.db.conn.prepare(
            "SELECT e.id, e.amount, c.name, e.date, e.note
             FROM expenses e JOIN categories c ON e.category_id = c.id
             ORDER BY e.date DESC, e.id ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ExpenseRow {
                    id: row.get(0)?,
                    amount: row.get(1)?,
                    category: row.get(2)?,
                    date: row.get(3)?,
                    note: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Idempotent delete: removing an id that does not exist is success.
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let deleted = self
            .db
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        debug!(id, deleted, "delete_expense");
        Ok(())
    }

    /// Delete a batch of expenses inside one transaction, so the batch
    /// commits all-or-nothing instead of row by row.
    pub fn delete_expenses(&self, ids: &[i64]) -> Result<()> {
        let tx = self.db.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("DELETE FROM expenses WHERE id = ?1")?;
            for id in ids {
                stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        debug!(count = ids.len(), "delete_expenses");
        Ok(())
    }

    /// Group-and-sum by category name, computed in the store.
    pub fn totals_by_category(&self) -> Result<Vec<(String, f64)>> {
        let mut stmt = self.db.conn.prepare(
            "SELECT c.name, SUM(e.amount)
             FROM expenses e JOIN categories c ON e.category_id = c.id
             GROUP BY c.name",
        )?;

        let totals = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }

    /// Group-and-sum by date for rows on or after `cutoff`, ascending.
    pub fn totals_since(&self, cutoff: NaiveDate) -> Result<Vec<(NaiveDate, f64)>> {
        let mut stmt = self.db.conn.prepare(
            "SELECT date, SUM(amount) FROM expenses
             WHERE date >= ?1
             GROUP BY date ORDER BY date ASC",
        )?;

        let totals = stmt
            .query_map(params![cutoff], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }
}
