// file: src/models/day.rs
use serde::{Deserialize, Serialize};

/// Fields shared by a one-off responsibility and a responsibility rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibilityFields {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    /// Empty when no description was given.
    #[serde(default)]
    pub description: String,
}

impl ResponsibilityFields {
    pub fn new(title: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            title: title.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub text: String,
}

impl TodoFields {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsibility {
    pub id: String,
    #[serde(flatten)]
    pub fields: ResponsibilityFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    #[serde(flatten)]
    pub fields: TodoFields,
    #[serde(default)]
    pub done: bool,
}

/// Everything stored for a single date. Only one-off items live here;
/// recurring occurrences are computed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub responsibilities: Vec<Responsibility>,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub notes: String,
}

impl DayRecord {
    pub fn is_empty(&self) -> bool {
        self.responsibilities.is_empty() && self.todos.is_empty() && self.notes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthMeta {
    #[serde(default)]
    pub goal_text: String,
}
