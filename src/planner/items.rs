use super::Planner;
use crate::models::{
    DateKey, ItemKind, MonthKey, MonthMeta, Payload, ResponsibilityFields, TodoFields,
};
use uuid::Uuid;

impl Planner {
    /// Adds a one-off responsibility and returns its id.
    pub fn add_responsibility(&mut self, date: DateKey, fields: ResponsibilityFields) -> String {
        self.add_one_off(date, fields)
    }

    /// Adds a one-off, not-yet-done todo and returns its id.
    pub fn add_todo(&mut self, date: DateKey, fields: TodoFields) -> String {
        self.add_one_off(date, fields)
    }

    fn add_one_off<P: Payload>(&mut self, date: DateKey, payload: P) -> String {
        let id = Uuid::new_v4().to_string();
        P::push_one_off(self.day_mut(date), id.clone(), payload);
        id
    }

    pub(super) fn remove_one_off(&mut self, kind: ItemKind, date: DateKey, id: &str) -> bool {
        let Some(day) = self.data.days.get_mut(&date) else {
            return false;
        };
        match kind {
            ItemKind::Responsibility => {
                let before = day.responsibilities.len();
                day.responsibilities.retain(|item| item.id != id);
                day.responsibilities.len() != before
            }
            ItemKind::Todo => {
                let before = day.todos.len();
                day.todos.retain(|item| item.id != id);
                day.todos.len() != before
            }
        }
    }

    pub fn notes(&self, date: DateKey) -> &str {
        self.day(date).map(|day| day.notes.as_str()).unwrap_or("")
    }

    pub fn set_notes(&mut self, date: DateKey, notes: &str) {
        self.day_mut(date).notes = notes.to_string();
    }

    pub fn month_goal(&self, month: MonthKey) -> Option<&str> {
        self.data
            .month_meta
            .get(&month)
            .map(|meta| meta.goal_text.as_str())
            .filter(|goal| !goal.is_empty())
    }

    pub fn set_month_goal(&mut self, month: MonthKey, goal: &str) {
        self.data.month_meta.insert(
            month,
            MonthMeta {
                goal_text: goal.trim().to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_day_record_created_lazily() {
        let mut planner = Planner::new();
        let date = key("2024-03-10");
        assert!(planner.day(date).is_none());
        assert_eq!(planner.notes(date), "");

        planner.set_notes(date, "Dentist at 3");
        assert_eq!(planner.notes(date), "Dentist at 3");
        assert!(planner.day(date).is_some());
    }

    #[test]
    fn test_one_off_items_keep_insertion_order() {
        let mut planner = Planner::new();
        let date = key("2024-03-10");
        let first = planner.add_responsibility(date, ResponsibilityFields::new("A", "9AM", "10AM"));
        let second = planner.add_responsibility(date, ResponsibilityFields::new("B", "1PM", "2PM"));

        let day = planner.day(date).unwrap();
        assert_eq!(day.responsibilities[0].id, first);
        assert_eq!(day.responsibilities[1].id, second);
    }

    #[test]
    fn test_remove_one_off_checks_kind() {
        let mut planner = Planner::new();
        let date = key("2024-03-10");
        let id = planner.add_todo(date, TodoFields::new("Laundry"));

        assert!(!planner.remove_one_off(ItemKind::Responsibility, date, &id));
        assert!(planner.remove_one_off(ItemKind::Todo, date, &id));
        assert!(planner.day(date).unwrap().todos.is_empty());
    }

    #[test]
    fn test_month_goal() {
        let mut planner = Planner::new();
        let month = MonthKey::parse("2024-03").unwrap();
        assert_eq!(planner.month_goal(month), None);

        planner.set_month_goal(month, "  Read two books ");
        assert_eq!(planner.month_goal(month), Some("Read two books"));
    }
}
