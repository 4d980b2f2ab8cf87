//! Money arithmetic
//!
//! Amounts are stored as integer cents and only converted to `Decimal`
//! for display. A receipt's amount is always derived here from the unit
//! price captured at confirmation time — callers never supply it.

use rust_decimal::Decimal;

use crate::error::{TicketError, TicketResult};

/// Maximum allowed unit price (1,000,000.00 in cents)
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Maximum allowed quantity per reservation line
pub const MAX_QUANTITY: i64 = 9_999;

/// Compute `price × quantity` in cents with overflow and bound checks.
pub fn line_total(price_cents: i64, quantity: i64) -> TicketResult<i64> {
    if !(0..=MAX_PRICE_CENTS).contains(&price_cents) {
        return Err(TicketError::Validation(format!(
            "unit price out of range: {price_cents} cents"
        )));
    }
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(TicketError::Validation(format!(
            "quantity out of range: {quantity}"
        )));
    }
    price_cents
        .checked_mul(quantity)
        .ok_or_else(|| TicketError::Validation("amount overflow".to_string()))
}

/// Cents to a two-decimal amount.
pub fn to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
