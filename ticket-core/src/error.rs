//! Error Handling
//!
//! Domain failures are values of [`TicketError`], one variant per rule a
//! caller can break; the presentation layer maps [`TicketError::kind`] to
//! its own status codes. Storage faults travel separately through
//! [`TicketError::Infrastructure`] so "no stock" is never confused with
//! "database unreachable". Every failure aborts the enclosing transaction.

use thiserror::Error;

use shared::models::ReservationStatus;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum TicketError {
    /// Malformed input: quantity < 1, missing ids, over the purchase
    /// limit, inactive ticket type. Rejected before any storage mutation
    /// commits.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Requested quantity exceeds availability; carries what is left so
    /// the caller can render a specific message.
    #[error("out of stock: only {available} left")]
    OutOfStock { available: i64 },

    /// Requester is neither the owner nor a sufficiently privileged role.
    #[error("not authorized")]
    Unauthorized,

    /// The operation is not legal for the reservation's current status.
    #[error("operation not allowed while reservation is {status}")]
    InvalidState { status: ReservationStatus },

    /// A receipt already exists for this reservation.
    #[error("receipt already issued for reservation {reservation_id}")]
    AlreadyIssued { reservation_id: String },

    /// Storage or transport failure — not a domain-rule violation.
    #[error("storage error: {0}")]
    Infrastructure(#[from] RepoError),
}

impl TicketError {
    /// Stable machine-readable discriminator for the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            TicketError::Validation(_) => "validation_error",
            TicketError::NotFound { .. } => "not_found",
            TicketError::OutOfStock { .. } => "out_of_stock",
            TicketError::Unauthorized => "unauthorized",
            TicketError::InvalidState { .. } => "invalid_state",
            TicketError::AlreadyIssued { .. } => "already_issued",
            TicketError::Infrastructure(_) => "internal_error",
        }
    }

    /// True for failures the caller caused, false for infrastructure ones.
    pub fn is_domain(&self) -> bool {
        !matches!(self, TicketError::Infrastructure(_))
    }
}

/// Result type for core operations
pub type TicketResult<T> = Result<T, TicketError>;
