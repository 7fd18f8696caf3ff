use crate::expense::ExpenseRow;
use chrono::NaiveDate;

/// The conjunction of conditions applied to an in-memory snapshot.
#[derive(Debug, Clone)]
pub struct ExpenseFilter {
    /// Exact, case-sensitive category match; `None` accepts every row.
    pub category: Option<String>,
    /// Inclusive lower bound on the row date.
    pub date_from: NaiveDate,
    /// Inclusive upper bound on the row date.
    pub date_to: NaiveDate,
    /// Case-insensitive substring match on the note; empty accepts all.
    pub note: String,
}

impl ExpenseFilter {
    /// A filter that accepts any row inside the date range.
    pub fn all(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        ExpenseFilter {
            category: None,
            date_from,
            date_to,
            note: String::new(),
        }
    }

    pub fn matches(&self, row: &ExpenseRow) -> bool {
        if let Some(category) = &self.category {
            if row.category != *category {
                return false;
            }
        }
        if row.date < self.date_from || row.date > self.date_to {
            return false;
        }
        if !self.note.is_empty() {
            let needle = self.note.to_lowercase();
            if !row.note.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Narrow a loaded snapshot, preserving input order (stable, no re-sort).
///
/// This never touches the store: it only sees the snapshot it is given,
/// so its result can go stale relative to writes made after the load.
/// Resetting filters means re-fetching through
/// [`ExpenseStore::list_expenses`], not filtering with an empty
/// predicate, so a reset also picks up persisted changes.
///
/// [`ExpenseStore::list_expenses`]: crate::expense::ExpenseStore::list_expenses
pub fn filter_expenses(rows: &[ExpenseRow], filter: &ExpenseFilter) -> Vec<ExpenseRow> {
    rows.iter().filter(|row| filter.matches(row)).cloned().collect()
}
