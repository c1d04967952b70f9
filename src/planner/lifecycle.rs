use super::Planner;
use crate::error::{AppError, AppResult};
use crate::models::{
    DateKey, EndPolicy, ItemKind, ItemTarget, Payload, RepeatKind, ResponsibilityFields,
    ResponsibilityPatch, TodoFields, TodoPatch,
};
use crate::recurrence::NewRuleRequest;
use crate::utils::logging::log_series_change;
use chrono::Utc;
use log::{debug, info};
use std::str::FromStr;
use uuid::Uuid;

/// Which occurrences a delete of a recurring item covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesAction {
    /// Only the occurrence on the chosen date.
    Single,
    /// The chosen date and everything after it.
    Future,
    /// The whole series, including its overrides.
    All,
}

impl FromStr for SeriesAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(SeriesAction::Single),
            "future" => Ok(SeriesAction::Future),
            "all" => Ok(SeriesAction::All),
            other => Err(AppError::invalid_input(format!("Unknown series action: {}", other))),
        }
    }
}

/// Outcome of [`Planner::schedule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scheduled {
    OneOff(String),
    Series(String),
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Planner {
    /// Creates a recurring rule with a fresh id and creation timestamp.
    pub fn create_rule<P: Payload>(&mut self, request: NewRuleRequest<P>) -> AppResult<String> {
        let rule = request.build(new_id(), Utc::now())?;
        let id = rule.id.clone();
        info!(
            "Created {} {} series {} from {}",
            rule.repeat,
            P::KIND.as_str(),
            id,
            rule.start_date
        );
        P::rules_mut(&mut self.data).push(rule);
        Ok(id)
    }

    pub fn create_responsibility_rule(
        &mut self,
        request: NewRuleRequest<ResponsibilityFields>,
    ) -> AppResult<String> {
        self.create_rule(request)
    }

    pub fn create_todo_rule(&mut self, request: NewRuleRequest<TodoFields>) -> AppResult<String> {
        self.create_rule(request)
    }

    /// Stores a non-repeating request as a plain item on its start date and
    /// anything else as a rule.
    pub fn schedule<P: Payload>(&mut self, request: NewRuleRequest<P>) -> AppResult<Scheduled> {
        if request.repeat == RepeatKind::None {
            let id = new_id();
            P::push_one_off(self.day_mut(request.start_date), id.clone(), request.payload);
            return Ok(Scheduled::OneOff(id));
        }
        self.create_rule(request).map(Scheduled::Series)
    }

    /// Records an edit of one occurrence. The rule itself is untouched.
    pub fn edit_occurrence<P: Payload>(
        &mut self,
        date: DateKey,
        rule_id: &str,
        patch: P::Patch,
    ) -> bool {
        if self.rule::<P>(rule_id).is_none() {
            return false;
        }
        debug!("Editing {} occurrence {} on {}", P::KIND.as_str(), rule_id, date);
        self.data.overrides.set_edited::<P>(date, rule_id, patch);
        true
    }

    /// Hides one occurrence of a series.
    pub fn delete_occurrence(&mut self, kind: ItemKind, date: DateKey, rule_id: &str) -> bool {
        if !self.has_rule(kind, rule_id) {
            return false;
        }
        debug!("Deleting {} occurrence {} on {}", kind.as_str(), rule_id, date);
        self.data.overrides.set_deleted(kind, date, rule_id);
        true
    }

    /// Ends the series the day before `from`. Overrides at `from` or later
    /// are dropped; earlier ones stay since those occurrences still exist.
    /// A single-date rule cut at or before its date is removed entirely.
    pub fn shorten_series(&mut self, kind: ItemKind, rule_id: &str, from: DateKey) -> bool {
        let only_date = match kind {
            ItemKind::Responsibility => self.single_date::<ResponsibilityFields>(rule_id),
            ItemKind::Todo => self.single_date::<TodoFields>(rule_id),
        };
        if only_date.is_some_and(|date| from <= date) {
            return self.delete_series(kind, rule_id);
        }

        let shortened = match kind {
            ItemKind::Responsibility => self.shorten::<ResponsibilityFields>(rule_id, from),
            ItemKind::Todo => self.shorten::<TodoFields>(rule_id, from),
        };
        if shortened {
            let pruned = self.data.overrides.prune_rule_from(rule_id, from);
            log_series_change("shortened", kind.as_str(), rule_id, pruned);
        }
        shortened
    }

    /// Anchor date of a rule that never repeats.
    fn single_date<P: Payload>(&self, rule_id: &str) -> Option<DateKey> {
        self.rule::<P>(rule_id)
            .filter(|rule| rule.repeat == RepeatKind::None)
            .map(|rule| rule.start_date)
    }

    fn shorten<P: Payload>(&mut self, rule_id: &str, from: DateKey) -> bool {
        match self.rule_mut::<P>(rule_id) {
            Some(rule) => {
                rule.end = EndPolicy::Until(from.prev());
                true
            }
            None => false,
        }
    }

    /// Removes the rule and every override that references it.
    pub fn delete_series(&mut self, kind: ItemKind, rule_id: &str) -> bool {
        let removed = match kind {
            ItemKind::Responsibility => self.remove_rule::<ResponsibilityFields>(rule_id),
            ItemKind::Todo => self.remove_rule::<TodoFields>(rule_id),
        };
        if removed {
            let pruned = self.data.overrides.prune_rule(rule_id);
            log_series_change("deleted", kind.as_str(), rule_id, pruned);
        }
        removed
    }

    fn remove_rule<P: Payload>(&mut self, rule_id: &str) -> bool {
        let rules = P::rules_mut(&mut self.data);
        let before = rules.len();
        rules.retain(|rule| rule.id != rule_id);
        rules.len() != before
    }

    fn has_rule(&self, kind: ItemKind, rule_id: &str) -> bool {
        match kind {
            ItemKind::Responsibility => self.rule::<ResponsibilityFields>(rule_id).is_some(),
            ItemKind::Todo => self.rule::<TodoFields>(rule_id).is_some(),
        }
    }

    /// Deletes a resolved item. `action` only matters for recurring items;
    /// one-off items are simply removed from their day.
    pub fn delete_item(
        &mut self,
        kind: ItemKind,
        date: DateKey,
        target: &ItemTarget,
        action: SeriesAction,
    ) -> bool {
        match target {
            ItemTarget::OneOff(id) => self.remove_one_off(kind, date, id),
            ItemTarget::Occurrence { rule_id } => match action {
                SeriesAction::Single => self.delete_occurrence(kind, date, rule_id),
                SeriesAction::Future => self.shorten_series(kind, rule_id, date),
                SeriesAction::All => self.delete_series(kind, rule_id),
            },
        }
    }

    /// Replaces a responsibility's fields: in place for one-off items, as a
    /// per-date override for occurrences.
    pub fn edit_responsibility(
        &mut self,
        date: DateKey,
        target: &ItemTarget,
        fields: ResponsibilityFields,
    ) -> bool {
        match target {
            ItemTarget::OneOff(id) => {
                let Some(day) = self.data.days.get_mut(&date) else {
                    return false;
                };
                match day.responsibilities.iter_mut().find(|item| &item.id == id) {
                    Some(item) => {
                        item.fields = fields;
                        true
                    }
                    None => false,
                }
            }
            ItemTarget::Occurrence { rule_id } => self.edit_occurrence::<ResponsibilityFields>(
                date,
                rule_id,
                ResponsibilityPatch::from(fields),
            ),
        }
    }

    pub fn edit_todo(&mut self, date: DateKey, target: &ItemTarget, fields: TodoFields) -> bool {
        match target {
            ItemTarget::OneOff(id) => {
                let Some(day) = self.data.days.get_mut(&date) else {
                    return false;
                };
                match day.todos.iter_mut().find(|item| &item.id == id) {
                    Some(item) => {
                        item.fields = fields;
                        true
                    }
                    None => false,
                }
            }
            ItemTarget::Occurrence { rule_id } => {
                self.edit_occurrence::<TodoFields>(date, rule_id, TodoPatch::from(fields))
            }
        }
    }

    /// Marks a todo (one-off or a single occurrence) done or not done.
    pub fn set_todo_done(&mut self, date: DateKey, target: &ItemTarget, done: bool) -> bool {
        match target {
            ItemTarget::OneOff(id) => {
                let Some(day) = self.data.days.get_mut(&date) else {
                    return false;
                };
                match day.todos.iter_mut().find(|item| &item.id == id) {
                    Some(item) => {
                        item.done = done;
                        true
                    }
                    None => false,
                }
            }
            ItemTarget::Occurrence { rule_id } => {
                if self.rule::<TodoFields>(rule_id).is_none() {
                    return false;
                }
                self.data.overrides.set_done(date, rule_id, done);
                true
            }
        }
    }
}
