//! Internal helpers for input validation and time handling.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every operation enforces the same field limits.

use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use email_address::EmailAddress;

use crate::{EngineError, ResultEngine};

/// Drop the fractional seconds of an instant.
pub(crate) fn truncate_to_seconds(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(0)
}

/// Trim `value` and require it to be non-blank and at most `max_len` chars.
pub(crate) fn normalize_required_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> ResultEngine<String> {
    let trimmed = normalize_text(value, field, max_len)?;
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{field} must not be blank"
        )));
    }
    Ok(trimmed)
}

/// Trim `value` and require it to be at most `max_len` chars. Blank is fine.
pub(crate) fn normalize_text(value: &str, field: &str, max_len: usize) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max_len {
        return Err(EngineError::InvalidInput(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_non_negative(value: i32, field: &str) -> ResultEngine<i32> {
    if value < 0 {
        return Err(EngineError::InvalidInput(format!("{field} must be >= 0")));
    }
    Ok(value)
}

/// Trim and validate an email address.
///
/// On top of the RFC 5322 syntax check, the domain must be a dotted host name
/// whose labels do not start or end with a hyphen.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = normalize_required_text(value, "email", 255)?;
    let invalid = || EngineError::InvalidInput("enter a valid email address".to_string());

    let parsed = EmailAddress::from_str(&email).map_err(|_| invalid())?;
    let domain = parsed.domain();
    let host_labels_ok = domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    if !domain.contains('.') || !host_labels_ok {
        return Err(invalid());
    }
    Ok(email)
}
