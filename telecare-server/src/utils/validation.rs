//! Input validation helpers
//!
//! Centralized text length limits and the reference-id check used by every
//! handler that takes foreign keys. SQLite TEXT has no built-in length
//! enforcement, so the limits live here.

use uuid::Uuid;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: patient, pharmacy, doctor, medicine
pub const MAX_NAME_LEN: usize = 200;

/// Notes and free-text remarks
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 32;

// ── Validation helpers ──────────────────────────────────────────────

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

/// Validate that a reference id is a well-formed UUID.
///
/// 引用 ID 格式错误 → 400；存在性检查由各 handler 负责 (404)。
pub fn validate_reference(value: &str, field: &str) -> Result<(), AppError> {
    if Uuid::parse_str(value).is_err() {
        return Err(AppError::validation(format!(
            "{field} is not a well-formed id"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversize() {
        assert!(validate_required_text("Aspirin", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn optional_text_allows_absent() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("y".repeat(501)), "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn reference_must_be_uuid() {
        assert!(validate_reference("8b1a9953-4b1a-4f6e-8f2a-000000000000", "patientId").is_ok());
        assert!(validate_reference("not-an-id", "patientId").is_err());
        assert!(validate_reference("", "patientId").is_err());
    }
}
