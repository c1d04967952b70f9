// Declare modules
pub mod date_key;
pub mod day;
pub mod occurrence;
pub mod overrides;
pub mod planner_data;
pub mod rule;

// Re-export all public types so callers can `use crate::models::DateKey` directly.
pub use date_key::{DateKey, MonthKey};
pub use day::{DayRecord, MonthMeta, Responsibility, ResponsibilityFields, Todo, TodoFields};
pub use occurrence::{
    occurrence_id, DaySummary, EffectiveDay, ItemTarget, ResolvedResponsibility, ResolvedTodo,
};
pub use overrides::{OverrideMap, OverrideStore};
pub use planner_data::{PlannerData, RecurringRules};
pub use rule::{
    EndMode, EndPolicy, ItemKind, Payload, RecurrenceRule, RepeatKind, ResponsibilityPatch,
    TodoPatch,
};
