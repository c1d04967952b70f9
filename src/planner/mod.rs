//! Planner state and the operations over it.
//!
//! A [`Planner`] owns the whole state graph (day records, rules, overrides,
//! month goals). Every mutation goes through `&mut self`, so a series
//! deletion and its override pruning are never observed half-done.

use crate::models::{DateKey, DayRecord, OverrideStore, Payload, PlannerData, RecurrenceRule};

mod items;
mod lifecycle;
mod resolver;

pub use lifecycle::{Scheduled, SeriesAction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planner {
    data: PlannerData,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: PlannerData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &PlannerData {
        &self.data
    }

    pub fn into_data(self) -> PlannerData {
        self.data
    }

    pub fn rules<P: Payload>(&self) -> &[RecurrenceRule<P>] {
        P::rules(&self.data)
    }

    pub fn rule<P: Payload>(&self, rule_id: &str) -> Option<&RecurrenceRule<P>> {
        self.rules::<P>().iter().find(|rule| rule.id == rule_id)
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.data.overrides
    }

    pub fn day(&self, date: DateKey) -> Option<&DayRecord> {
        self.data.days.get(&date)
    }

    /// Day record for `date`, created on first write.
    fn day_mut(&mut self, date: DateKey) -> &mut DayRecord {
        self.data.days.entry(date).or_default()
    }

    fn rule_mut<P: Payload>(&mut self, rule_id: &str) -> Option<&mut RecurrenceRule<P>> {
        P::rules_mut(&mut self.data)
            .iter_mut()
            .find(|rule| rule.id == rule_id)
    }
}

impl From<PlannerData> for Planner {
    fn from(data: PlannerData) -> Self {
        Self::from_data(data)
    }
}
