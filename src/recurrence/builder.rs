//! Rule construction from fully collected input.
//!
//! The input layer fills a [`NewRuleRequest`] in one go and hands it over;
//! nothing here prompts or waits for more input.

use crate::error::{AppError, AppResult};
use crate::models::{DateKey, EndMode, EndPolicy, RecurrenceRule, RepeatKind};
use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;

const WEEKDAY_SEPARATOR: &str = r"[,\s]+";

/// Everything needed to create a recurring responsibility or todo.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRuleRequest<P> {
    pub start_date: DateKey,
    pub repeat: RepeatKind,
    /// Raw interval; anything below 1 is clamped to 1.
    pub interval: i64,
    /// `None` lets a weekly rule repeat on the anchor's weekday.
    pub weekdays: Option<Vec<u32>>,
    pub end: EndPolicy,
    pub payload: P,
}

impl<P> NewRuleRequest<P> {
    pub fn new(start_date: DateKey, payload: P) -> Self {
        Self {
            start_date,
            repeat: RepeatKind::None,
            interval: 1,
            weekdays: None,
            end: EndPolicy::None,
            payload,
        }
    }

    pub fn repeat(mut self, repeat: RepeatKind) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn interval(mut self, interval: i64) -> Self {
        self.interval = interval;
        self
    }

    pub fn weekdays(mut self, weekdays: Vec<u32>) -> Self {
        self.weekdays = Some(weekdays);
        self
    }

    /// Accepts the free-form weekday text typed by a user.
    pub fn weekday_input(self, input: &str) -> Self {
        self.weekdays(parse_weekdays(input))
    }

    pub fn ends(mut self, end: EndPolicy) -> Self {
        self.end = end;
        self
    }

    /// Validates the request and produces a rule with the given identity.
    pub fn build(self, id: String, created_at: DateTime<Utc>) -> AppResult<RecurrenceRule<P>> {
        let interval = u32::try_from(self.interval.max(1)).unwrap_or(u32::MAX);

        let weekdays = if self.repeat == RepeatKind::Weekly {
            let resolved = match self.weekdays {
                None => vec![self.start_date.weekday()],
                Some(days) => normalize_weekdays(days),
            };
            if resolved.is_empty() {
                return Err(AppError::invalid_rule(
                    "weekly rule needs at least one weekday between 0 (Sun) and 6 (Sat)",
                ));
            }
            Some(resolved)
        } else {
            None
        };

        let end = match self.end {
            EndPolicy::Count(0) => EndPolicy::Count(1),
            other => other,
        };

        debug!(
            "Building {} rule {} anchored {} (interval {})",
            self.repeat, id, self.start_date, interval
        );

        Ok(RecurrenceRule {
            id,
            created_at,
            start_date: self.start_date,
            repeat: self.repeat,
            interval,
            weekdays,
            end,
            payload: self.payload,
        })
    }
}

impl EndPolicy {
    /// Builds an end policy from the raw end-mode choice plus whichever of
    /// end date / count goes with it.
    pub fn from_input(mode: &str, end_date: Option<&str>, count: Option<&str>) -> AppResult<Self> {
        match mode.parse::<EndMode>()? {
            EndMode::None => Ok(EndPolicy::None),
            EndMode::Until => {
                let raw = end_date
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty())
                    .ok_or_else(|| AppError::invalid_input("End date is required for 'until'"))?;
                Ok(EndPolicy::Until(DateKey::parse(raw)?))
            }
            EndMode::Count => Ok(EndPolicy::Count(parse_count(count.unwrap_or("")))),
        }
    }
}

/// Leading integer of `input`, the way a lenient numeric field reads it.
fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[sign_len..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}

/// Lenient interval: non-numeric or non-positive input becomes 1.
pub fn parse_interval(input: &str) -> i64 {
    parse_leading_int(input).filter(|n| *n >= 1).unwrap_or(1)
}

/// Lenient occurrence count: non-numeric or non-positive input becomes 1.
pub fn parse_count(input: &str) -> u32 {
    parse_leading_int(input)
        .filter(|n| *n >= 1)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

fn weekday_from_name(token: &str) -> Option<u32> {
    let day = match token {
        "sunday" | "sun" => 0,
        "monday" | "mon" => 1,
        "tuesday" | "tue" | "tues" => 2,
        "wednesday" | "wed" => 3,
        "thursday" | "thu" | "thur" | "thurs" => 4,
        "friday" | "fri" => 5,
        "saturday" | "sat" => 6,
        _ => return None,
    };
    Some(day)
}

/// Parses weekday tokens (English names, abbreviations or 0-6, Sunday = 0)
/// separated by commas and/or whitespace. Invalid tokens are dropped and
/// duplicates keep their first position.
pub fn parse_weekdays(input: &str) -> Vec<u32> {
    let Ok(separator) = Regex::new(WEEKDAY_SEPARATOR) else {
        return Vec::new();
    };

    let days = separator
        .split(input.trim())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .filter_map(|token| {
            weekday_from_name(&token).or_else(|| {
                parse_leading_int(&token).and_then(|n| u32::try_from(n).ok())
            })
        })
        .collect();

    normalize_weekdays(days)
}

fn normalize_weekdays(days: Vec<u32>) -> Vec<u32> {
    let mut normalized = Vec::with_capacity(days.len());
    for day in days {
        if day <= 6 && !normalized.contains(&day) {
            normalized.push(day);
        }
    }
    normalized
}
