//! Column encoding helpers.
//!
//! Decimals are stored as TEXT so no precision is lost, and instants as
//! RFC 3339 TEXT with a fixed millisecond format so that string comparison in
//! SQL matches chronological order.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use wallet_core::ExpenseCategory;

pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Parses a stored decimal, falling back to zero on corrupt data.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse {} '{}' as Decimal: {}. Falling back to ZERO.",
            field_name,
            value,
            e
        );
        Decimal::ZERO
    })
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(value: &str, field_name: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            Utc::now()
        })
}

pub fn parse_category(value: &str) -> ExpenseCategory {
    ExpenseCategory::from_str(value).unwrap_or_else(|_| {
        log::error!("Unknown stored category '{}', using OTHER", value);
        ExpenseCategory::Other
    })
}

/// Day-of-month and month columns are small positive integers.
pub fn to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

pub fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
