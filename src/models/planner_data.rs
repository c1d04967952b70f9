// file: src/models/planner_data.rs
use super::date_key::{DateKey, MonthKey};
use super::day::{DayRecord, MonthMeta, ResponsibilityFields, TodoFields};
use super::overrides::OverrideStore;
use super::rule::RecurrenceRule;
use crate::error::AppResult;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringRules {
    #[serde(default)]
    pub responsibilities: Vec<RecurrenceRule<ResponsibilityFields>>,
    #[serde(default)]
    pub todos: Vec<RecurrenceRule<TodoFields>>,
}

/// The full state graph handed to and from persistence as one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerData {
    #[serde(default)]
    pub month_meta: BTreeMap<MonthKey, MonthMeta>,
    #[serde(default)]
    pub days: BTreeMap<DateKey, DayRecord>,
    #[serde(default)]
    pub recurring: RecurringRules,
    #[serde(default)]
    pub overrides: OverrideStore,
}

/// Older documents stored month goals as plain strings and nothing else
/// besides the day records.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyPlannerData {
    month_goals: BTreeMap<MonthKey, String>,
    #[serde(default)]
    days: BTreeMap<DateKey, DayRecord>,
}

impl PlannerData {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("monthGoals").is_some_and(|goals| !goals.is_null()) {
            let legacy: LegacyPlannerData = serde_json::from_value(value)?;
            info!(
                "Migrating legacy planner document ({} month goals)",
                legacy.month_goals.len()
            );
            let month_meta = legacy
                .month_goals
                .into_iter()
                .map(|(month, goal_text)| (month, MonthMeta { goal_text }))
                .collect();
            return Ok(Self {
                month_meta,
                days: legacy.days,
                ..Self::default()
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn rule_count(&self) -> usize {
        self.recurring.responsibilities.len() + self.recurring.todos.len()
    }
}
