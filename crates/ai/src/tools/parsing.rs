//! Argument coercion shared by the record tools.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use wallet_core::ExpenseCategory;

use crate::error::AiError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Parse a date the model produced. Accepts RFC 3339 instants, naive
/// date-times and plain dates; anything else falls back to `fallback`.
pub fn parse_date_or(value: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return fallback;
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return naive.and_utc();
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_time(NaiveTime::MIN).and_utc();
        }
    }

    debug!("Unparsable date '{}' from model, using fallback", raw);
    fallback
}

pub fn ensure_positive(amount: Decimal, field: &str) -> Result<(), AiError> {
    if amount <= Decimal::ZERO {
        return Err(AiError::invalid_input(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

/// Resolve a free-form category name, or explain which names are valid.
pub fn parse_category(value: &str) -> Result<ExpenseCategory, String> {
    value.parse::<ExpenseCategory>().map_err(|_| {
        let valid: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
        format!(
            "Unknown category '{}'. Ask the user to pick one of: {}.",
            value.trim(),
            valid.join(", ")
        )
    })
}
