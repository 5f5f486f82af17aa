//! Raw string to typed value coercion

use chrono::{DateTime, TimeZone, Utc};

use super::error::PlayerError;
use super::filter::FieldKind;
use crate::data::types::{Profession, Race};

/// A value converted to the semantic type of its target field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Boolean(bool),
    Race(Race),
    Profession(Profession),
    Text(String),
    Instant(DateTime<Utc>),
}

/// Converts `raw` according to `kind`.
///
/// Booleans are permissive: only `"true"` is true and nothing fails.
/// `field` names the offending key in errors.
pub fn coerce(kind: FieldKind, field: &'static str, raw: &str) -> Result<FieldValue, PlayerError> {
    let value = match kind {
        FieldKind::Integer => FieldValue::Integer(parse_integer(field, raw)?),
        FieldKind::Boolean => FieldValue::Boolean(raw == "true"),
        FieldKind::Race => FieldValue::Race(
            raw.parse::<Race>()
                .map_err(|_| PlayerError::invalid_value(field, raw))?,
        ),
        FieldKind::Profession => FieldValue::Profession(
            raw.parse::<Profession>()
                .map_err(|_| PlayerError::invalid_value(field, raw))?,
        ),
        FieldKind::Text => FieldValue::Text(raw.to_string()),
        FieldKind::Instant => FieldValue::Instant(parse_instant(field, raw)?),
    };
    Ok(value)
}

pub(crate) fn parse_integer(field: &'static str, raw: &str) -> Result<i64, PlayerError> {
    raw.parse::<i64>()
        .map_err(|_| PlayerError::invalid_value(field, raw))
}

/// Parses integer milliseconds since the Unix epoch.
///
/// Only instants chrono can represent (roughly +/-262,000 years) are
/// accepted; any other `i64` is an `InvalidValueFormat` rather than a
/// wrapped date.
pub(crate) fn parse_instant(field: &'static str, raw: &str) -> Result<DateTime<Utc>, PlayerError> {
    let millis = parse_integer(field, raw)?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| PlayerError::invalid_value(field, raw))
}
