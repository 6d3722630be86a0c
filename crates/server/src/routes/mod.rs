pub mod admin;
pub mod health;
pub mod locations;
pub mod notifications;
pub mod root;
pub mod schedule;
pub mod signup;

use crate::error::{ApiError, ApiResult};
use chrono::{Local, NaiveDate, TimeDelta};

/// Longest date range a single request may ask for
pub const MAX_RANGE_DAYS: i64 = 366;

/// Today in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `date` moved by `days`, or a validation error when that leaves chrono's range
pub fn add_days(date: NaiveDate, days: i64) -> ApiResult<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| ApiError::validation("Date out of range"))
}

/// Rejects ranges longer than [`MAX_RANGE_DAYS`]. An inverted range is
/// allowed and yields nothing.
pub fn check_range(start: NaiveDate, end: NaiveDate) -> ApiResult<()> {
    if (end - start).num_days() >= MAX_RANGE_DAYS {
        return Err(ApiError::validation(format!(
            "Date range may span at most {MAX_RANGE_DAYS} days"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(date("2024-01-01"), date("2024-01-07")).is_ok());
        assert!(check_range(date("2024-01-07"), date("2024-01-01")).is_ok());
        assert!(check_range(date("2024-01-01"), date("2024-12-31")).is_ok());
        assert!(check_range(date("2024-01-01"), date("2025-01-01")).is_err());
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date("2024-01-30"), 2).unwrap(), date("2024-02-01"));
        assert!(add_days(NaiveDate::MAX, 1).is_err());
    }
}
