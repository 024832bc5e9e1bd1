//! Date helpers — business-timezone conversions.
//!
//! Calendar dates travel as `YYYY-MM-DD` strings; all parsing and day
//! arithmetic is centralized here so repositories only ever see validated
//! strings.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use shared::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD).
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Inclusive day count between two dates. `end` must not precede `start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// First and last calendar date of a year, as stored strings.
pub fn year_bounds(year: i32) -> (String, String) {
    (format!("{year:04}-01-01"), format!("{year:04}-12-31"))
}

/// The day after `date`, for half-open `< end` comparisons.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Current calendar year in the business timezone.
pub fn current_year(tz: Tz) -> i32 {
    chrono::Utc::now().with_timezone(&tz).year()
}
