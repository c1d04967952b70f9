//! Calendar-day arithmetic. No time-of-day component is ever involved:
//! every difference is counted in whole civil days.

use crate::models::DateKey;
use chrono::{Datelike, NaiveDate};

/// Signed number of days from `start` to `end`.
pub fn days_between(start: DateKey, end: DateKey) -> i64 {
    (end.date() - start.date()).num_days()
}

/// `floor(days_between / 7)`, rounding toward negative infinity.
pub fn weeks_between(start: DateKey, end: DateKey) -> i64 {
    days_between(start, end).div_euclid(7)
}

/// Month distance ignoring the day of month.
pub fn months_between(start: DateKey, end: DateKey) -> i64 {
    i64::from(end.year() - start.year()) * 12 + i64::from(end.month()) - i64::from(start.month())
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|date| date.leap_year())
}

/// Length of the month, or 0 when `year`/`month` is not a calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return 0;
    }
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // December of the last representable year has no successor month
    next_first
        .and_then(|date| date.pred_opt())
        .map_or(31, |last| last.day())
}

pub fn is_weekend(date: DateKey) -> bool {
    matches!(date.weekday(), 0 | 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_days_between_is_signed() {
        assert_eq!(days_between(key("2024-01-01"), key("2024-03-01")), 60);
        assert_eq!(days_between(key("2024-03-01"), key("2024-01-01")), -60);
        assert_eq!(days_between(key("2024-01-01"), key("2024-01-01")), 0);
    }

    #[test]
    fn test_weeks_between_floors() {
        assert_eq!(weeks_between(key("2024-01-01"), key("2024-01-07")), 0);
        assert_eq!(weeks_between(key("2024-01-01"), key("2024-01-08")), 1);
        assert_eq!(weeks_between(key("2024-01-08"), key("2024-01-07")), -1);
    }

    #[test]
    fn test_months_between_ignores_day() {
        assert_eq!(months_between(key("2024-01-31"), key("2024-02-01")), 1);
        assert_eq!(months_between(key("2023-11-15"), key("2024-02-10")), 3);
        assert_eq!(months_between(key("2024-05-01"), key("2024-03-31")), -2);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(key("2024-01-06")));
        assert!(is_weekend(key("2024-01-07")));
        assert!(!is_weekend(key("2024-01-08")));
    }
}
