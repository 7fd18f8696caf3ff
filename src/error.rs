use thiserror::Error;

/// Failures surfaced by the ledger core.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed user input (unparseable amount, empty category name,
    /// unresolvable category reference). Nothing was written.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The store rejected a write, e.g. deleting a category that
    /// expenses still reference.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other failure from the persistence layer.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
