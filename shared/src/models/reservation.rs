//! Reservation Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::EventSummary;
use super::ticket_type::TicketType;

/// Reservation lifecycle status.
///
/// ```text
///         create              pay/confirm
/// (new) ──────────► pending ─────────────► confirmed
///                      │                       │
///                      │ cancel                │ cancel
///                      ▼                       ▼
///                   canceled ◄─────────────canceled
/// ```
///
/// `canceled` is terminal; `confirmed` is terminal except for cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Canceled => "canceled",
        }
    }

    /// Pending and confirmed reservations hold inventory units; a canceled
    /// one has already returned them.
    pub fn holds_inventory(self) -> bool {
        !matches!(self, ReservationStatus::Canceled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's claim on `quantity` units of one ticket type.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub ticket_type_id: String,
    pub quantity: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Ledger insert shape. The orchestrator supplies the status; the ledger
/// itself performs no inventory checks.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: String,
    pub ticket_type_id: String,
    pub quantity: i64,
    pub status: ReservationStatus,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    #[validate(length(min = 1))]
    pub ticket_type_id: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Listing filter; the service narrows `user_id` for non-admin callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub user_id: Option<String>,
    pub ticket_type_id: Option<String>,
    pub status: Option<ReservationStatus>,
}

/// Read-only enriched view: the reservation plus its ticket type and the
/// owning event's summary, when the catalog knows it.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub ticket_details: Option<TicketType>,
    pub event_details: Option<EventSummary>,
}
