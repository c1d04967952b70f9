// file: src/models/rule.rs
use super::date_key::DateKey;
use super::day::{DayRecord, Responsibility, ResponsibilityFields, Todo, TodoFields};
use super::overrides::{OverrideMap, OverrideStore};
use super::planner_data::PlannerData;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Responsibility,
    Todo,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Responsibility => "resp",
            ItemKind::Todo => "todo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatKind {
    #[default]
    None,
    Daily,
    Weekdays,
    Weekly,
    Monthly,
}

impl RepeatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatKind::None => "none",
            RepeatKind::Daily => "daily",
            RepeatKind::Weekdays => "weekdays",
            RepeatKind::Weekly => "weekly",
            RepeatKind::Monthly => "monthly",
        }
    }

    /// Lenient parse: anything outside the vocabulary means "does not repeat".
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or(RepeatKind::None)
    }
}

impl FromStr for RepeatKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RepeatKind::None),
            "daily" => Ok(RepeatKind::Daily),
            "weekdays" => Ok(RepeatKind::Weekdays),
            "weekly" => Ok(RepeatKind::Weekly),
            "monthly" => Ok(RepeatKind::Monthly),
            other => Err(AppError::invalid_input(format!("Unknown repeat type: {}", other))),
        }
    }
}

impl fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RepeatKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RepeatKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RepeatKind::parse_lenient(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndMode {
    None,
    Until,
    Count,
}

impl FromStr for EndMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(EndMode::None),
            "until" => Ok(EndMode::Until),
            "count" => Ok(EndMode::Count),
            other => Err(AppError::invalid_input(format!("Unknown end mode: {}", other))),
        }
    }
}

/// When a series stops producing occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredEndPolicy", into = "StoredEndPolicy")]
pub enum EndPolicy {
    #[default]
    None,
    /// Last date (inclusive) that may hold an occurrence.
    Until(DateKey),
    /// Total number of occurrences, counted from the anchor.
    Count(u32),
}

impl EndPolicy {
    pub fn mode(&self) -> EndMode {
        match self {
            EndPolicy::None => EndMode::None,
            EndPolicy::Until(_) => EndMode::Until,
            EndPolicy::Count(_) => EndMode::Count,
        }
    }
}

/// On-disk layout: three sibling fields on the rule object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEndPolicy {
    #[serde(default)]
    end_mode: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    end_count: Option<i64>,
}

impl From<StoredEndPolicy> for EndPolicy {
    fn from(stored: StoredEndPolicy) -> Self {
        match stored.end_mode.as_deref() {
            Some("until") => stored
                .end_date
                .and_then(|date| DateKey::parse(&date).ok())
                .map(EndPolicy::Until)
                .unwrap_or(EndPolicy::None),
            Some("count") => stored
                .end_count
                .filter(|count| *count > 0)
                .and_then(|count| u32::try_from(count).ok())
                .map(EndPolicy::Count)
                .unwrap_or(EndPolicy::None),
            _ => EndPolicy::None,
        }
    }
}

impl From<EndPolicy> for StoredEndPolicy {
    fn from(policy: EndPolicy) -> Self {
        match policy {
            EndPolicy::None => StoredEndPolicy {
                end_mode: Some("none".to_string()),
                end_date: None,
                end_count: None,
            },
            EndPolicy::Until(date) => StoredEndPolicy {
                end_mode: Some("until".to_string()),
                end_date: Some(date.to_string()),
                end_count: None,
            },
            EndPolicy::Count(count) => StoredEndPolicy {
                end_mode: Some("count".to_string()),
                end_date: None,
                end_count: Some(i64::from(count)),
            },
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// A repeating responsibility or todo definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule<P> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Anchor date and earliest possible occurrence.
    pub start_date: DateKey,
    #[serde(rename = "repeatType")]
    pub repeat: RepeatKind,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Sunday = 0 .. Saturday = 6; only read for weekly rules.
    #[serde(default)]
    pub weekdays: Option<Vec<u32>>,
    #[serde(flatten)]
    pub end: EndPolicy,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> RecurrenceRule<P> {
    /// Interval as used by the date tests; stored zeros count as 1.
    pub fn step(&self) -> i64 {
        i64::from(self.interval.max(1))
    }

    /// Weekday set a weekly rule repeats on, falling back to the anchor's weekday.
    pub fn effective_weekdays(&self) -> Vec<u32> {
        match &self.weekdays {
            Some(days) if !days.is_empty() => days.clone(),
            _ => vec![self.start_date.weekday()],
        }
    }
}

/// Partial replacement for a responsibility occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibilityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<ResponsibilityFields> for ResponsibilityPatch {
    fn from(fields: ResponsibilityFields) -> Self {
        Self {
            title: Some(fields.title),
            start_time: Some(fields.start_time),
            end_time: Some(fields.end_time),
            description: Some(fields.description),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl From<TodoFields> for TodoPatch {
    fn from(fields: TodoFields) -> Self {
        Self {
            text: Some(fields.text),
        }
    }
}

/// Item payload carried by a rule, tying it to its collections in the
/// planner state and override store.
pub trait Payload: Clone + fmt::Debug + Serialize + DeserializeOwned {
    type Patch: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + From<Self>;

    const KIND: ItemKind;

    /// Rule defaults overlaid field by field with an edited override.
    fn apply(&self, patch: &Self::Patch) -> Self;

    fn rules(data: &PlannerData) -> &[RecurrenceRule<Self>];

    fn rules_mut(data: &mut PlannerData) -> &mut Vec<RecurrenceRule<Self>>;

    fn edits(store: &OverrideStore) -> &OverrideMap<Self::Patch>;

    fn edits_mut(store: &mut OverrideStore) -> &mut OverrideMap<Self::Patch>;

    fn push_one_off(day: &mut DayRecord, id: String, payload: Self);
}

impl Payload for ResponsibilityFields {
    type Patch = ResponsibilityPatch;

    const KIND: ItemKind = ItemKind::Responsibility;

    fn apply(&self, patch: &ResponsibilityPatch) -> Self {
        Self {
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            start_time: patch.start_time.clone().unwrap_or_else(|| self.start_time.clone()),
            end_time: patch.end_time.clone().unwrap_or_else(|| self.end_time.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
        }
    }

    fn rules(data: &PlannerData) -> &[RecurrenceRule<Self>] {
        &data.recurring.responsibilities
    }

    fn rules_mut(data: &mut PlannerData) -> &mut Vec<RecurrenceRule<Self>> {
        &mut data.recurring.responsibilities
    }

    fn edits(store: &OverrideStore) -> &OverrideMap<ResponsibilityPatch> {
        &store.resp_edited
    }

    fn edits_mut(store: &mut OverrideStore) -> &mut OverrideMap<ResponsibilityPatch> {
        &mut store.resp_edited
    }

    fn push_one_off(day: &mut DayRecord, id: String, payload: Self) {
        day.responsibilities.push(Responsibility {
            id,
            fields: payload,
        });
    }
}

impl Payload for TodoFields {
    type Patch = TodoPatch;

    const KIND: ItemKind = ItemKind::Todo;

    fn apply(&self, patch: &TodoPatch) -> Self {
        Self {
            text: patch.text.clone().unwrap_or_else(|| self.text.clone()),
        }
    }

    fn rules(data: &PlannerData) -> &[RecurrenceRule<Self>] {
        &data.recurring.todos
    }

    fn rules_mut(data: &mut PlannerData) -> &mut Vec<RecurrenceRule<Self>> {
        &mut data.recurring.todos
    }

    fn edits(store: &OverrideStore) -> &OverrideMap<TodoPatch> {
        &store.todo_edited
    }

    fn edits_mut(store: &mut OverrideStore) -> &mut OverrideMap<TodoPatch> {
        &mut store.todo_edited
    }

    fn push_one_off(day: &mut DayRecord, id: String, payload: Self) {
        day.todos.push(Todo {
            id,
            fields: payload,
            done: false,
        });
    }
}
