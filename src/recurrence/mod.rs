//! Recurrence evaluation
//!
//! Answers two questions about a rule: does it produce an occurrence on a
//! given date, and how many occurrences has it produced up to that date.
//! Counting is pure arithmetic/enumeration and never consults the
//! applicability predicate, so count-based end policies cannot recurse.

use crate::models::{DateKey, EndPolicy, RecurrenceRule, RepeatKind};
use crate::utils::dates::{days_between, days_in_month, is_weekend, months_between, weeks_between};

pub mod builder;

pub use builder::{parse_count, parse_interval, parse_weekdays, NewRuleRequest};

/// Whether `rule` produces an occurrence on `date`.
pub fn applies_to_date<P>(rule: &RecurrenceRule<P>, date: DateKey) -> bool {
    let start = rule.start_date;
    if date < start {
        return false;
    }

    if rule.repeat == RepeatKind::None {
        return date == start;
    }

    if !within_end_bounds(rule, date) {
        return false;
    }

    matches_pattern(rule, date)
}

/// End-policy test for a candidate date. A count policy is inclusive: the
/// Nth occurrence itself is still within bounds.
pub fn within_end_bounds<P>(rule: &RecurrenceRule<P>, date: DateKey) -> bool {
    match rule.end {
        EndPolicy::None => true,
        EndPolicy::Until(end) => date <= end,
        EndPolicy::Count(limit) => occurrences_through(rule, date) <= u64::from(limit),
    }
}

/// Number of occurrences from the anchor through `date` inclusive,
/// ignoring the end policy. Zero for dates before the anchor.
pub fn occurrences_through<P>(rule: &RecurrenceRule<P>, date: DateKey) -> u64 {
    let start = rule.start_date;
    if date < start {
        return 0;
    }

    match rule.repeat {
        RepeatKind::None => u64::from(date == start),
        RepeatKind::Daily => {
            let steps = days_between(start, date).div_euclid(rule.step());
            u64::try_from(steps + 1).unwrap_or(0)
        }
        RepeatKind::Weekdays | RepeatKind::Weekly => {
            // Linear in the number of days; horizons are years, not centuries.
            let mut count = 0;
            let mut cursor = start;
            loop {
                if matches_pattern(rule, cursor) {
                    count += 1;
                }
                if cursor >= date {
                    break;
                }
                cursor = cursor.next();
            }
            count
        }
        RepeatKind::Monthly => {
            let step = rule.step();
            let span = months_between(start, date);
            let mut count = 0;
            let mut offset = 0;
            while offset <= span {
                match monthly_target(start, offset) {
                    Some(candidate) if candidate <= date => count += 1,
                    _ => {}
                }
                offset += step;
            }
            count
        }
    }
}

/// Repeat-pattern test without the end policy. Assumes `date >= start`.
fn matches_pattern<P>(rule: &RecurrenceRule<P>, date: DateKey) -> bool {
    let start = rule.start_date;
    let step = rule.step();

    match rule.repeat {
        RepeatKind::None => date == start,
        RepeatKind::Daily => days_between(start, date).rem_euclid(step) == 0,
        RepeatKind::Weekdays => {
            !is_weekend(date) && weeks_between(start, date).rem_euclid(step) == 0
        }
        RepeatKind::Weekly => {
            rule.effective_weekdays().contains(&date.weekday())
                && weeks_between(start, date).rem_euclid(step) == 0
        }
        RepeatKind::Monthly => {
            let months = months_between(start, date);
            if months.rem_euclid(step) != 0 {
                return false;
            }
            let target_day = start.day().min(days_in_month(date.year(), date.month()));
            date.day() == target_day
        }
    }
}

/// Occurrence date `offset` months after the anchor, with the anchor's day
/// clamped to the length of the target month.
fn monthly_target(start: DateKey, offset: i64) -> Option<DateKey> {
    let month_index = i64::from(start.year()) * 12 + i64::from(start.month() - 1) + offset;
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
    let day = start.day().min(days_in_month(year, month));
    DateKey::from_ymd(year, month, day).ok()
}
