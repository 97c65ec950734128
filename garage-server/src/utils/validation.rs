//! Input validation helpers
//!
//! Centralized text length constants, validation functions and the typed
//! delete-confirmation phrases. SQLite TEXT has no built-in length
//! enforcement, so limits are applied here at the handler boundary.

use crate::utils::AppError;

// ========== Text length limits ==========

/// Names, garage numbers, parking-type tags
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Document numbers, barcodes, usernames
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ========== Delete confirmation phrases ==========
//
// Destructive deletes require the operator to type the exact phrase; the
// request carries it and the server re-checks before touching anything.

/// Phrase required to delete a receipt
pub const RECEIPT_DELETE_PHRASE: &str = "Eliminar recibo";

/// Phrase required to delete a ticket
pub const TICKET_DELETE_PHRASE: &str = "Eliminar ticket";

/// Phrase required to hard-delete a customer
pub const CUSTOMER_DELETE_PHRASE: &str = "Eliminar cliente";

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that an amount is a finite, non-negative number.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Check a typed delete-confirmation phrase.
///
/// The comparison is exact (no trimming, no case folding): the whole point
/// is that the operator typed the phrase deliberately.
pub fn require_confirmation(typed: &str, expected: &str) -> Result<(), AppError> {
    if typed != expected {
        return Err(AppError::validation(format!(
            "Confirmation phrase does not match, expected \"{expected}\""
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_phrase_passes() {
        assert!(require_confirmation("Eliminar ticket", TICKET_DELETE_PHRASE).is_ok());
    }

    #[test]
    fn near_misses_are_rejected() {
        for typed in ["eliminar ticket", "Eliminar ticket ", "Eliminar", ""] {
            assert!(require_confirmation(typed, TICKET_DELETE_PHRASE).is_err());
        }
    }

    #[test]
    fn amounts_must_be_finite_and_non_negative() {
        assert!(validate_amount(0.0, "price").is_ok());
        assert!(validate_amount(-1.0, "price").is_err());
        assert!(validate_amount(f64::NAN, "price").is_err());
    }
}
