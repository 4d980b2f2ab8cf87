//! Repository Module
//!
//! Row-level storage for the three core relations. Every method takes a
//! `&mut SqliteConnection` so the orchestrator can compose calls into a
//! single transaction; none of these functions begin or commit one
//! themselves.

pub mod inventory;
pub mod ledger;
pub mod receipt;

// Re-exports
pub use inventory::{ReserveOutcome, TicketInventory};
pub use ledger::ReservationLedger;
pub use receipt::ReceiptIssuer;

use thiserror::Error;

/// Repository error types — infrastructure faults, distinct from the
/// domain failures the service layer reports.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("row not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Convert a unique-index violation into [`RepoError::Duplicate`], leaving
/// every other database fault untouched.
pub(crate) fn map_unique(err: sqlx::Error, what: &str) -> RepoError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return RepoError::Duplicate(what.to_string());
        }
    }
    RepoError::Database(err)
}
