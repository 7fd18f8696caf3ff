use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

/// Owns the SQLite connection every store operates through.
///
/// Constructed once at startup and borrowed by [`CategoryStore`] and
/// [`ExpenseStore`]; the connection is released when this value drops.
///
/// [`CategoryStore`]: crate::category::CategoryStore
/// [`ExpenseStore`]: crate::expense::ExpenseStore
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Open (or create) the ledger database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory database, used by the test suites.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        // WAL mode for crash recovery. Foreign key enforcement is off by
        // default in SQLite; the category delete guard depends on it.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        setup_schema(&conn)?;
        Ok(Database { conn })
    }
}

pub fn setup_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            category_id INTEGER NOT NULL REFERENCES categories(id),
            date TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_schema_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        setup_schema(&db.conn).unwrap();
        setup_schema(&db.conn).unwrap();
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();
        let enabled: i64 = db
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        {
            let _db = Database::open(&path).unwrap();
        }
        assert!(path.exists());

        // Reopening an existing database must not fail.
        let _db = Database::open(&path).unwrap();
    }
}
