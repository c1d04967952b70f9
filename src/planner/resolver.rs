use super::Planner;
use crate::models::{
    occurrence_id, DateKey, DaySummary, EffectiveDay, MonthKey, Payload, ResolvedResponsibility,
    ResolvedTodo, ResponsibilityFields, TodoFields,
};
use crate::recurrence::applies_to_date;
use crate::utils::dates::days_in_month;
use log::debug;

impl Planner {
    /// Effective items for `date`: the day's one-off items followed by every
    /// recurring occurrence that applies and was not deleted, with per-date
    /// edits and completion layered on. Read-only.
    pub fn resolve(&self, date: DateKey) -> EffectiveDay {
        let (mut responsibilities, mut todos, notes) = match self.day(date) {
            Some(day) => (
                day.responsibilities.iter().map(ResolvedResponsibility::from).collect::<Vec<_>>(),
                day.todos.iter().map(ResolvedTodo::from).collect::<Vec<_>>(),
                day.notes.clone(),
            ),
            None => (Vec::new(), Vec::new(), String::new()),
        };

        for (rule_id, fields) in self.occurrences::<ResponsibilityFields>(date) {
            responsibilities.push(ResolvedResponsibility {
                id: occurrence_id(&rule_id, date),
                recurring_id: Some(rule_id),
                is_recurring: true,
                fields,
            });
        }

        for (rule_id, fields) in self.occurrences::<TodoFields>(date) {
            let done = self.overrides().get_done(date, &rule_id).unwrap_or(false);
            todos.push(ResolvedTodo {
                id: occurrence_id(&rule_id, date),
                recurring_id: Some(rule_id),
                is_recurring: true,
                fields,
                done,
            });
        }

        debug!(
            "Resolved {}: {} responsibilities, {} todos",
            date,
            responsibilities.len(),
            todos.len()
        );

        EffectiveDay {
            date,
            responsibilities,
            todos,
            notes,
        }
    }

    /// Per-day counts for every date of `month`.
    pub fn month_summary(&self, month: MonthKey) -> Vec<DaySummary> {
        let first = month.first_day();
        let length = days_in_month(month.year(), month.month());
        (0..i64::from(length))
            .map(|offset| self.resolve(first.shift(offset)).summary())
            .collect()
    }

    /// `(rule id, resolved payload)` for each visible occurrence of kind `P`.
    fn occurrences<P: Payload>(&self, date: DateKey) -> Vec<(String, P)> {
        let overrides = self.overrides();
        self.rules::<P>()
            .iter()
            .filter(|rule| applies_to_date(*rule, date))
            .filter(|rule| !overrides.is_deleted(P::KIND, date, &rule.id))
            .map(|rule| {
                let payload = match overrides.get_edited::<P>(date, &rule.id) {
                    Some(patch) => rule.payload.apply(patch),
                    None => rule.payload.clone(),
                };
                (rule.id.clone(), payload)
            })
            .collect()
    }
}
