//! Input validation helpers
//!
//! Centralized text length constants and checks applied at the service
//! boundary, before any storage mutation. SQLite TEXT has no built-in
//! length enforcement.

use crate::error::{TicketError, TicketResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names and labels
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: entity ids, payment methods
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> TicketResult<()> {
    if value.trim().is_empty() {
        return Err(TicketError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > max_len {
        return Err(TicketError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_blank() {
        assert!(validate_required_text("", "id", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_required_text("   ", "id", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn rejects_over_limit() {
        let long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(validate_required_text(&long, "id", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn accepts_normal_ids() {
        assert!(validate_required_text("rs-42", "id", MAX_SHORT_TEXT_LEN).is_ok());
    }
}
