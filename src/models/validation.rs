//! Field validation shared by every entity.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A caller-correctable problem with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: String,
    /// Human readable explanation
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Require a non-blank string no longer than `max_len` characters.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "This field may not be blank."));
    }
    check_length(field, value, max_len)
}

/// Allow blank strings but still cap the length.
pub fn check_length(field: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        ));
    }
    Ok(())
}

/// Require a strictly positive integer.
pub fn require_positive(field: &str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(
            field,
            "Ensure this value is greater than 0.",
        ));
    }
    Ok(())
}

/// Require a non-negative count or total.
pub fn require_non_negative(field: &str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(
            field,
            "Ensure this value is greater than or equal to 0.",
        ));
    }
    Ok(())
}

/// Loose structural email check: one `@`, a local part, and a dotted domain.
pub fn require_email(field: &str, value: &str) -> Result<(), ValidationError> {
    require_text(field, value, MAX_EMAIL_LEN)?;

    let invalid = || ValidationError::new(field, "Enter a valid email address.");

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Maximum stored length of an email address.
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of a reference to another record.
pub const MAX_REFERENCE_LEN: usize = 64;

/// Deserialize a field that may be absent, `null`, or a value.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]` so that an
/// absent key stays `None` while an explicit `null` becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse an RFC 3339 timestamp. Input without an offset is read as UTC.
pub fn parse_utc_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("Datetime has wrong format: `{raw}`"))
}

/// `deserialize_with` adapter for [`parse_utc_timestamp`].
pub fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_timestamp(&raw).map_err(de::Error::custom)
}

/// Optional form of [`utc_timestamp`]; pair with `#[serde(default)]`.
pub fn optional_utc_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_utc_timestamp(&raw).map_err(de::Error::custom))
        .transpose()
}

/// Treat an empty or whitespace-only reference string as no reference.
pub fn blank_as_none<T: AsRef<str>>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.as_ref().trim().is_empty())
}
