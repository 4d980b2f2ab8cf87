//! Receipt Model
//!
//! Immutable proof of payment, bound one-to-one with a confirmed
//! reservation. Receipts are never updated or deleted; cancellation of the
//! reservation later on does not touch them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::EventSummary;
use super::reservation::Reservation;
use super::ticket_type::TicketType;

/// Payment method recorded when no explicit one is supplied.
pub const DEFAULT_PAYMENT_METHOD: &str = "credit_card";

/// Recorded payment state on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Proof of payment for exactly one reservation.
///
/// `amount_cents` is derived (unit price × quantity at confirmation time),
/// never caller-supplied. `verification_token` is the opaque value embedded
/// in the scannable entry code; rendering it as an image is the QR
/// collaborator's job.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Receipt {
    pub id: String,
    pub reservation_id: String,
    pub user_id: String,
    pub ticket_type_id: String,
    pub verification_token: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub issued_at: i64,
}

impl Receipt {
    /// Paid amount as a two-decimal value.
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_cents, 2)
    }
}

/// Issuer insert shape; id and issue time are generated by the store.
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub reservation_id: String,
    pub user_id: String,
    pub ticket_type_id: String,
    pub verification_token: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
}

/// Caller-supplied payment details. The gateway protocol itself is out of
/// scope; the method is recorded verbatim on the receipt.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentInput {
    #[validate(length(min = 1, max = 50))]
    pub method: String,
}

impl Default for PaymentInput {
    fn default() -> Self {
        Self {
            method: DEFAULT_PAYMENT_METHOD.to_string(),
        }
    }
}

/// Result of a successful confirm-and-pay operation.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOutcome {
    pub reservation: Reservation,
    pub receipt: Receipt,
    pub ticket: TicketType,
    pub event: Option<EventSummary>,
}
