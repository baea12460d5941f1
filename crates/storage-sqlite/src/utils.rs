//! Helpers for the text-encoded columns used by the SQLite tables.
//!
//! Decimals are stored as their exact string form and calendar dates as
//! `YYYY-MM-DD`, which also sorts chronologically.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use debtfolio_core::constants::DATE_FORMAT;
use debtfolio_core::errors::{DatabaseError, Error, Result};

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored decimal column. A value that fails to parse means the
/// row was written by something other than this crate.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| corrupt_column(field_name, value, e))
}

pub fn parse_date(value: &str, field_name: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| corrupt_column(field_name, value, e))
}

fn corrupt_column(field_name: &str, value: &str, err: impl std::fmt::Display) -> Error {
    log::error!("Failed to parse stored {} '{}': {}", field_name, value, err);
    Error::Database(DatabaseError::Internal(format!(
        "Invalid stored {} '{}'",
        field_name, value
    )))
}
