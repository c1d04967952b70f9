// file: src/models/occurrence.rs
use super::date_key::DateKey;
use super::day::{Responsibility, ResponsibilityFields, Todo, TodoFields};
use serde::{Deserialize, Serialize};

const OCCURRENCE_PREFIX: &str = "recurring:";

/// Synthesized id of a recurring occurrence: `recurring:<ruleId>:<dateKey>`.
pub fn occurrence_id(rule_id: &str, date: DateKey) -> String {
    format!("{}{}:{}", OCCURRENCE_PREFIX, rule_id, date)
}

/// What an edit/delete/done action on a resolved item points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTarget {
    OneOff(String),
    Occurrence { rule_id: String },
}

impl ItemTarget {
    /// Recovers the target from an id handed out by the resolver.
    pub fn from_item_id(id: &str) -> Self {
        id.strip_prefix(OCCURRENCE_PREFIX)
            .and_then(|rest| rest.rsplit_once(':'))
            .filter(|(rule_id, date)| !rule_id.is_empty() && DateKey::parse(date).is_ok())
            .map(|(rule_id, _)| ItemTarget::Occurrence {
                rule_id: rule_id.to_string(),
            })
            .unwrap_or_else(|| ItemTarget::OneOff(id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedResponsibility {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(flatten)]
    pub fields: ResponsibilityFields,
}

impl ResolvedResponsibility {
    pub fn target(&self) -> ItemTarget {
        match &self.recurring_id {
            Some(rule_id) => ItemTarget::Occurrence {
                rule_id: rule_id.clone(),
            },
            None => ItemTarget::OneOff(self.id.clone()),
        }
    }
}

impl From<&Responsibility> for ResolvedResponsibility {
    fn from(item: &Responsibility) -> Self {
        Self {
            id: item.id.clone(),
            recurring_id: None,
            is_recurring: false,
            fields: item.fields.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTodo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(flatten)]
    pub fields: TodoFields,
    pub done: bool,
}

impl ResolvedTodo {
    pub fn target(&self) -> ItemTarget {
        match &self.recurring_id {
            Some(rule_id) => ItemTarget::Occurrence {
                rule_id: rule_id.clone(),
            },
            None => ItemTarget::OneOff(self.id.clone()),
        }
    }
}

impl From<&Todo> for ResolvedTodo {
    fn from(item: &Todo) -> Self {
        Self {
            id: item.id.clone(),
            recurring_id: None,
            is_recurring: false,
            fields: item.fields.clone(),
            done: item.done,
        }
    }
}

/// Everything visible on one date. One-off items come first in each list,
/// followed by recurring occurrences in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveDay {
    pub date: DateKey,
    pub responsibilities: Vec<ResolvedResponsibility>,
    pub todos: Vec<ResolvedTodo>,
    pub notes: String,
}

impl EffectiveDay {
    pub fn summary(&self) -> DaySummary {
        DaySummary {
            date: self.date,
            responsibilities: self.responsibilities.len(),
            todos_total: self.todos.len(),
            todos_remaining: self.todos.iter().filter(|todo| !todo.done).count(),
        }
    }
}

/// Per-day counts used by month overviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: DateKey,
    pub responsibilities: usize,
    pub todos_total: usize,
    pub todos_remaining: usize,
}
