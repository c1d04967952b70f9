use homeace::{
    DateKey, EndPolicy, ItemKind, ItemTarget, MonthKey, NewRuleRequest, Planner, RepeatKind,
    ResponsibilityFields, ResponsibilityPatch, SeriesAction, TodoFields,
};

fn key(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

fn standup() -> ResponsibilityFields {
    ResponsibilityFields::new("Standup", "9:00AM", "9:15AM")
}

#[test]
fn test_resolve_is_deterministic() {
    let mut planner = Planner::new();
    let date = key("2024-01-03");
    planner.add_todo(date, TodoFields::new("Groceries"));
    planner
        .create_responsibility_rule(
            NewRuleRequest::new(key("2024-01-01"), standup()).repeat(RepeatKind::Weekdays),
        )
        .unwrap();

    let first = planner.resolve(date);
    let second = planner.resolve(date);
    assert_eq!(first, second);
}

#[test]
fn test_resolve_does_not_create_day_records() {
    let mut planner = Planner::new();
    planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Vitamins"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();
    let before = planner.clone();

    let day = planner.resolve(key("2024-01-20"));

    assert_eq!(day.todos.len(), 1);
    assert!(planner.day(key("2024-01-20")).is_none());
    assert_eq!(planner, before);
}

#[test]
fn test_one_off_items_precede_occurrences() {
    let mut planner = Planner::new();
    let date = key("2024-01-02");
    planner
        .create_responsibility_rule(
            NewRuleRequest::new(key("2024-01-01"), standup()).repeat(RepeatKind::Daily),
        )
        .unwrap();
    let one_off = planner.add_responsibility(date, ResponsibilityFields::new("Dentist", "2PM", "3PM"));
    planner.set_notes(date, "bring insurance card");

    let day = planner.resolve(date);

    assert_eq!(day.responsibilities.len(), 2);
    assert_eq!(day.responsibilities[0].id, one_off);
    assert!(!day.responsibilities[0].is_recurring);
    assert!(day.responsibilities[1].is_recurring);
    assert_eq!(day.notes, "bring insurance card");
}

#[test]
fn test_occurrence_ids_are_synthesized() {
    let mut planner = Planner::new();
    let rule_id = planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Journal"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();

    let day = planner.resolve(key("2024-01-05"));
    let todo = &day.todos[0];

    assert_eq!(todo.id, format!("recurring:{}:2024-01-05", rule_id));
    assert_eq!(todo.recurring_id.as_deref(), Some(rule_id.as_str()));
    assert_eq!(ItemTarget::from_item_id(&todo.id), todo.target());
    assert!(!todo.done);
}

#[test]
fn test_none_kind_rule_is_single_date() {
    let mut planner = Planner::new();
    planner
        .create_todo_rule(NewRuleRequest::new(key("2024-05-05"), TodoFields::new("Renew passport")))
        .unwrap();

    assert_eq!(planner.resolve(key("2024-05-05")).todos.len(), 1);
    assert!(planner.resolve(key("2024-05-04")).todos.is_empty());
    assert!(planner.resolve(key("2024-05-06")).todos.is_empty());
    assert!(planner.resolve(key("2025-05-05")).todos.is_empty());
}

#[test]
fn test_monthly_rule_clamps_day() {
    let mut planner = Planner::new();
    planner
        .create_responsibility_rule(
            NewRuleRequest::new(
                key("2024-01-31"),
                ResponsibilityFields::new("Pay rent", "9AM", "9:10AM"),
            )
            .repeat(RepeatKind::Monthly),
        )
        .unwrap();

    for date in ["2024-01-31", "2024-02-29", "2024-03-31", "2024-04-30"] {
        assert_eq!(planner.resolve(key(date)).responsibilities.len(), 1, "{}", date);
    }
    assert!(planner.resolve(key("2024-04-29")).responsibilities.is_empty());
}

#[test]
fn test_weekly_interval_from_weekday_input() {
    let mut planner = Planner::new();
    planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Piano"))
                .repeat(RepeatKind::Weekly)
                .interval(2)
                .weekday_input("Mon, Wed"),
        )
        .unwrap();

    let expected = ["2024-01-01", "2024-01-03", "2024-01-15", "2024-01-17"];
    let skipped = ["2024-01-08", "2024-01-10", "2024-01-02", "2024-01-16"];
    for date in expected {
        assert_eq!(planner.resolve(key(date)).todos.len(), 1, "{}", date);
    }
    for date in skipped {
        assert!(planner.resolve(key(date)).todos.is_empty(), "{}", date);
    }
}

#[test]
fn test_count_end_policy_boundary() {
    let mut planner = Planner::new();
    planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Antibiotics"))
                .repeat(RepeatKind::Daily)
                .ends(EndPolicy::from_input("count", None, Some("3")).unwrap()),
        )
        .unwrap();

    for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        assert_eq!(planner.resolve(key(date)).todos.len(), 1, "{}", date);
    }
    assert!(planner.resolve(key("2024-01-04")).todos.is_empty());
}

#[test]
fn test_deleting_one_occurrence_leaves_others() {
    let mut planner = Planner::new();
    let rule_id = planner
        .create_responsibility_rule(
            NewRuleRequest::new(key("2024-01-01"), standup()).repeat(RepeatKind::Daily),
        )
        .unwrap();
    let target = ItemTarget::Occurrence {
        rule_id: rule_id.clone(),
    };

    assert!(planner.delete_item(
        ItemKind::Responsibility,
        key("2024-01-03"),
        &target,
        SeriesAction::Single
    ));

    assert!(planner.resolve(key("2024-01-03")).responsibilities.is_empty());
    assert_eq!(planner.resolve(key("2024-01-02")).responsibilities.len(), 1);
    assert_eq!(planner.resolve(key("2024-01-04")).responsibilities.len(), 1);
    assert!(planner.rule::<ResponsibilityFields>(&rule_id).is_some());
}

#[test]
fn test_edit_occurrence_overrides_only_that_date() {
    let mut planner = Planner::new();
    let rule_id = planner
        .create_responsibility_rule(
            NewRuleRequest::new(key("2024-01-01"), standup()).repeat(RepeatKind::Daily),
        )
        .unwrap();

    let patch = ResponsibilityPatch {
        start_time: Some("10:00AM".to_string()),
        ..Default::default()
    };
    assert!(planner.edit_occurrence::<ResponsibilityFields>(key("2024-01-02"), &rule_id, patch));

    let edited = planner.resolve(key("2024-01-02"));
    assert_eq!(edited.responsibilities[0].fields.start_time, "10:00AM");
    assert_eq!(edited.responsibilities[0].fields.title, "Standup");

    let untouched = planner.resolve(key("2024-01-03"));
    assert_eq!(untouched.responsibilities[0].fields.start_time, "9:00AM");
    assert_eq!(
        planner.rule::<ResponsibilityFields>(&rule_id).unwrap().payload,
        standup()
    );
}

#[test]
fn test_todo_occurrence_edit_and_done_are_independent() {
    let mut planner = Planner::new();
    let rule_id = planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Walk dog"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();
    let date = key("2024-01-02");
    let target = ItemTarget::Occurrence { rule_id };

    assert!(planner.set_todo_done(date, &target, true));
    assert!(planner.edit_todo(date, &target, TodoFields::new("Walk dog (long)")));

    let todo = &planner.resolve(date).todos[0];
    assert!(todo.done);
    assert_eq!(todo.fields.text, "Walk dog (long)");
    assert!(!planner.resolve(key("2024-01-03")).todos[0].done);
}

#[test]
fn test_delete_series_prunes_all_overrides() {
    let mut planner = Planner::new();
    let rule_id = planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Meditate"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();
    let other_id = planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Read"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();
    let target = ItemTarget::Occurrence {
        rule_id: rule_id.clone(),
    };
    planner.set_todo_done(key("2024-01-02"), &target, true);
    planner.edit_todo(key("2024-01-03"), &target, TodoFields::new("Meditate 20m"));
    planner.delete_occurrence(ItemKind::Todo, key("2024-01-04"), &rule_id);
    planner.set_todo_done(
        key("2024-01-02"),
        &ItemTarget::Occurrence {
            rule_id: other_id.clone(),
        },
        true,
    );

    assert!(planner.delete_item(ItemKind::Todo, key("2024-01-05"), &target, SeriesAction::All));

    assert!(!planner.overrides().references_rule(&rule_id));
    assert!(planner.overrides().references_rule(&other_id));
    for date in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-10"] {
        let day = planner.resolve(key(date));
        assert!(day.todos.iter().all(|todo| todo.recurring_id.as_deref() != Some(rule_id.as_str())));
    }
}

#[test]
fn test_delete_future_shortens_series() {
    let mut planner = Planner::new();
    let rule_id = planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Water plants"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();
    let target = ItemTarget::Occurrence {
        rule_id: rule_id.clone(),
    };
    planner.set_todo_done(key("2024-01-05"), &target, true);
    planner.set_todo_done(key("2024-01-12"), &target, true);

    assert!(planner.delete_item(ItemKind::Todo, key("2024-01-10"), &target, SeriesAction::Future));

    assert_eq!(
        planner.rule::<TodoFields>(&rule_id).unwrap().end,
        EndPolicy::Until(key("2024-01-09"))
    );
    assert_eq!(planner.resolve(key("2024-01-09")).todos.len(), 1);
    assert!(planner.resolve(key("2024-01-10")).todos.is_empty());
    assert!(planner.resolve(key("2024-01-05")).todos[0].done);
    assert_eq!(planner.overrides().get_done(key("2024-01-12"), &rule_id), None);
}

#[test]
fn test_delete_one_off_item() {
    let mut planner = Planner::new();
    let date = key("2024-01-02");
    let id = planner.add_todo(date, TodoFields::new("Return library book"));

    assert!(planner.delete_item(
        ItemKind::Todo,
        date,
        &ItemTarget::from_item_id(&id),
        SeriesAction::All
    ));
    assert!(planner.resolve(date).todos.is_empty());
}

#[test]
fn test_weekly_rule_with_no_valid_weekdays_is_rejected() {
    let mut planner = Planner::new();
    let result = planner.create_todo_rule(
        NewRuleRequest::new(key("2024-01-01"), TodoFields::new("Yoga"))
            .repeat(RepeatKind::Weekly)
            .weekday_input("8, 9"),
    );

    assert!(result.is_err());
    assert!(planner.rules::<TodoFields>().is_empty());
}

#[test]
fn test_month_summary_counts() {
    let mut planner = Planner::new();
    planner
        .create_todo_rule(
            NewRuleRequest::new(key("2024-02-01"), TodoFields::new("Inbox zero"))
                .repeat(RepeatKind::Daily),
        )
        .unwrap();
    planner.add_responsibility(
        key("2024-02-14"),
        ResponsibilityFields::new("Dinner", "7PM", "9PM"),
    );
    let done = planner.resolve(key("2024-02-14")).todos[0].target();
    planner.set_todo_done(key("2024-02-14"), &done, true);

    let summary = planner.month_summary(MonthKey::parse("2024-02").unwrap());

    assert_eq!(summary.len(), 29);
    let valentines = summary[13];
    assert_eq!(valentines.date, key("2024-02-14"));
    assert_eq!(valentines.responsibilities, 1);
    assert_eq!(valentines.todos_total, 1);
    assert_eq!(valentines.todos_remaining, 0);
    assert_eq!(summary[0].todos_remaining, 1);
}

#[test]
fn test_edit_responsibility_targets() {
    let mut planner = Planner::new();
    let date = key("2024-03-04");
    let one_off = planner.add_responsibility(date, ResponsibilityFields::new("Gym", "6AM", "7AM"));
    let rule_id = planner
        .create_responsibility_rule(
            NewRuleRequest::new(key("2024-03-04"), standup()).repeat(RepeatKind::Weekdays),
        )
        .unwrap();

    let moved = ResponsibilityFields::new("Gym", "7AM", "8AM").with_description("legs");
    assert!(planner.edit_responsibility(date, &ItemTarget::OneOff(one_off), moved.clone()));
    assert!(planner.edit_responsibility(
        date,
        &ItemTarget::Occurrence { rule_id },
        ResponsibilityFields::new("Standup (remote)", "9:00AM", "9:15AM"),
    ));

    let day = planner.resolve(date);
    assert_eq!(day.responsibilities[0].fields, moved);
    assert_eq!(day.responsibilities[1].fields.title, "Standup (remote)");

    let next_day = planner.resolve(key("2024-03-05"));
    assert_eq!(next_day.responsibilities[0].fields, standup());
}
