// file: src/models/overrides.rs
use super::date_key::DateKey;
use super::rule::{ItemKind, Payload, ResponsibilityPatch, TodoPatch};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// `date -> rule id -> value`. Inner maps are never left empty.
pub type OverrideMap<V> = BTreeMap<DateKey, BTreeMap<String, V>>;

/// Per-date modifications of recurring occurrences, keyed by
/// `(rule id, date)`. Deleted, edited and done entries are independent and
/// may coexist for the same pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideStore {
    #[serde(default, deserialize_with = "without_empty_dates")]
    pub(crate) todo_done: OverrideMap<bool>,
    #[serde(default, deserialize_with = "without_empty_dates")]
    pub(crate) todo_edited: OverrideMap<TodoPatch>,
    #[serde(default, deserialize_with = "without_empty_dates")]
    pub(crate) todo_deleted: OverrideMap<bool>,
    #[serde(default, deserialize_with = "without_empty_dates")]
    pub(crate) resp_edited: OverrideMap<ResponsibilityPatch>,
    #[serde(default, deserialize_with = "without_empty_dates")]
    pub(crate) resp_deleted: OverrideMap<bool>,
}

/// Stored documents may carry dates whose entries were all removed.
fn without_empty_dates<'de, D, V>(deserializer: D) -> Result<OverrideMap<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let mut map = OverrideMap::<V>::deserialize(deserializer)?;
    map.retain(|_, by_rule| !by_rule.is_empty());
    Ok(map)
}

fn insert<V>(map: &mut OverrideMap<V>, date: DateKey, rule_id: &str, value: V) {
    map.entry(date).or_default().insert(rule_id.to_string(), value);
}

fn lookup<'a, V>(map: &'a OverrideMap<V>, date: DateKey, rule_id: &str) -> Option<&'a V> {
    map.get(&date).and_then(|by_rule| by_rule.get(rule_id))
}

/// Drops `rule_id` from every date accepted by `on_date`, then removes
/// dates left without entries. Returns the number of entries removed.
fn prune<V>(map: &mut OverrideMap<V>, rule_id: &str, on_date: impl Fn(DateKey) -> bool) -> usize {
    let mut removed = 0;
    map.retain(|date, by_rule| {
        if on_date(*date) && by_rule.remove(rule_id).is_some() {
            removed += 1;
        }
        !by_rule.is_empty()
    });
    removed
}

fn references<V>(map: &OverrideMap<V>, rule_id: &str) -> bool {
    map.values().any(|by_rule| by_rule.contains_key(rule_id))
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn deleted_map(&self, kind: ItemKind) -> &OverrideMap<bool> {
        match kind {
            ItemKind::Responsibility => &self.resp_deleted,
            ItemKind::Todo => &self.todo_deleted,
        }
    }

    fn deleted_map_mut(&mut self, kind: ItemKind) -> &mut OverrideMap<bool> {
        match kind {
            ItemKind::Responsibility => &mut self.resp_deleted,
            ItemKind::Todo => &mut self.todo_deleted,
        }
    }

    pub fn set_deleted(&mut self, kind: ItemKind, date: DateKey, rule_id: &str) {
        insert(self.deleted_map_mut(kind), date, rule_id, true);
    }

    pub fn is_deleted(&self, kind: ItemKind, date: DateKey, rule_id: &str) -> bool {
        lookup(self.deleted_map(kind), date, rule_id).copied().unwrap_or(false)
    }

    /// Replaces any previous edit of the same occurrence.
    pub fn set_edited<P: Payload>(&mut self, date: DateKey, rule_id: &str, patch: P::Patch) {
        insert(P::edits_mut(self), date, rule_id, patch);
    }

    pub fn get_edited<P: Payload>(&self, date: DateKey, rule_id: &str) -> Option<&P::Patch> {
        lookup(P::edits(self), date, rule_id)
    }

    pub fn set_done(&mut self, date: DateKey, rule_id: &str, done: bool) {
        insert(&mut self.todo_done, date, rule_id, done);
    }

    pub fn get_done(&self, date: DateKey, rule_id: &str) -> Option<bool> {
        lookup(&self.todo_done, date, rule_id).copied()
    }

    /// Removes every entry of every kind that references `rule_id`.
    pub fn prune_rule(&mut self, rule_id: &str) -> usize {
        self.prune_matching(rule_id, |_| true)
    }

    /// Removes the entries of `rule_id` dated `from` or later.
    pub fn prune_rule_from(&mut self, rule_id: &str, from: DateKey) -> usize {
        self.prune_matching(rule_id, |date| date >= from)
    }

    fn prune_matching(&mut self, rule_id: &str, on_date: impl Fn(DateKey) -> bool + Copy) -> usize {
        prune(&mut self.todo_done, rule_id, on_date)
            + prune(&mut self.todo_edited, rule_id, on_date)
            + prune(&mut self.todo_deleted, rule_id, on_date)
            + prune(&mut self.resp_edited, rule_id, on_date)
            + prune(&mut self.resp_deleted, rule_id, on_date)
    }

    pub fn references_rule(&self, rule_id: &str) -> bool {
        references(&self.todo_done, rule_id)
            || references(&self.todo_edited, rule_id)
            || references(&self.todo_deleted, rule_id)
            || references(&self.resp_edited, rule_id)
            || references(&self.resp_deleted, rule_id)
    }

    pub fn is_empty(&self) -> bool {
        self.todo_done.is_empty()
            && self.todo_edited.is_empty()
            && self.todo_deleted.is_empty()
            && self.resp_edited.is_empty()
            && self.resp_deleted.is_empty()
    }
}
