// Expense ledger core library.
// Record stores for categories and expenses over SQLite, plus the pure
// filter and aggregation functions used for display and charting.

pub mod analytics;
pub mod category;
pub mod db;
pub mod error;
pub mod expense;
pub mod filter;

// Re-export the public surface for consumers of the crate.
pub use analytics::{by_category, by_recent_window, DEFAULT_WINDOW_DAYS};
pub use category::{Category, CategoryStore};
pub use db::Database;
pub use error::{LedgerError, Result};
pub use expense::{Expense, ExpenseRow, ExpenseStore};
pub use filter::{filter_expenses, ExpenseFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
