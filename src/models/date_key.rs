// file: src/models/date_key.rs
use crate::error::{AppError, AppResult};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar day addressed by its canonical `YYYY-MM-DD` key.
///
/// Ordering is chronological, which matches lexicographic order of the
/// canonical key for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> AppResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| AppError::invalid_date(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    /// Parses a canonical key. Anything that would not format back to the
    /// exact same string (missing padding, trailing text) is rejected.
    pub fn parse(key: &str) -> AppResult<Self> {
        let trimmed = key.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| AppError::invalid_date(format!("'{}': {}", key, e)))?;
        let parsed = Self(date);
        if parsed.to_string() != trimmed {
            return Err(AppError::invalid_date(format!(
                "'{}' is not a canonical YYYY-MM-DD key",
                key
            )));
        }
        Ok(parsed)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Weekday number with Sunday = 0 through Saturday = 6.
    pub fn weekday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Moves by whole calendar days, saturating at the representable range.
    pub fn shift(self, delta_days: i64) -> Self {
        let magnitude = Days::new(delta_days.unsigned_abs());
        let shifted = if delta_days >= 0 {
            self.0.checked_add_days(magnitude).unwrap_or(NaiveDate::MAX)
        } else {
            self.0.checked_sub_days(magnitude).unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for DateKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// Month addressed as `YYYY-MM`, used for per-month goals. Holds the
/// month's first day, so every key maps to a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| {
                AppError::invalid_date(format!("month {:04}-{:02} out of range", year, month))
            })
    }

    pub fn parse(key: &str) -> AppResult<Self> {
        let (year, month) = key
            .trim()
            .split_once('-')
            .ok_or_else(|| AppError::invalid_date(format!("'{}' is not a YYYY-MM key", key)))?;
        let year = year
            .parse::<i32>()
            .map_err(|e| AppError::invalid_date(format!("'{}': {}", key, e)))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| AppError::invalid_date(format!("'{}': {}", key, e)))?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> DateKey {
        DateKey(self.0)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
