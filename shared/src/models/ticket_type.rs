//! Ticket Type Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fallback per-purchase limit when a create payload leaves it out.
pub const DEFAULT_PURCHASE_LIMIT: i64 = 10;

/// A purchasable admission category within one event ("VIP", "Standard").
///
/// `available_quantity` is the contended inventory counter. It never goes
/// negative (enforced by a CHECK constraint and the conditional reserve
/// update) and is only ever adjusted through the inventory store's atomic
/// operations, never through [`TicketTypeUpdate`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketType {
    pub id: String,
    /// Owning event (catalog reference, resolved via the event collaborator)
    pub event_id: String,
    pub name: String,
    /// Unit price in cents
    pub price_cents: i64,
    pub available_quantity: i64,
    /// Maximum units a single reservation may claim
    pub purchase_limit: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TicketType {
    /// Unit price as a two-decimal amount.
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

/// Create ticket type payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketTypeCreate {
    #[validate(length(min = 1))]
    pub event_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 0))]
    pub available_quantity: i64,
    #[validate(range(min = 1))]
    pub purchase_limit: Option<i64>,
    pub is_active: Option<bool>,
}

/// Update ticket type payload
///
/// `available_quantity` is intentionally absent: inventory moves only
/// through the atomic reserve/release operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TicketTypeUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    #[validate(range(min = 1))]
    pub purchase_limit: Option<i64>,
    pub is_active: Option<bool>,
}

/// Catalog listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketTypeFilter {
    pub event_id: Option<String>,
    /// Substring match on the label
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
