//! Date helpers
//!
//! Receipts carry `YYYY-MM-DD` strings on the wire; parsing and billing
//! cycle math live here so repositories only see strings.

use chrono::{Datelike, NaiveDate};

use crate::utils::{AppError, AppResult};

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// First day of the billing cycle after the given one.
///
/// Clamping is irrelevant because cycles always start on the 1st, but a
/// mid-month start still lands on the 1st of the next month.
pub fn next_cycle_start(start_date: &str) -> AppResult<String> {
    let date = parse_date(start_date)?;
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let next = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::internal(format!("Invalid next cycle for {start_date}")))?;
    Ok(next.format("%Y-%m-%d").to_string())
}

/// Whether a `YYYY-MM-DD` date falls in the given month/year
pub fn in_month(date: &str, month: u32, year: i32) -> bool {
    parse_date(date)
        .map(|d| d.month() == month && d.year() == year)
        .unwrap_or(false)
}
