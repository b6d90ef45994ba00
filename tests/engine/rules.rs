//! Integration tests for the rule engine
//!
//! Tests live re-evaluation, action policy, teardown, and idempotence.

use std::cell::Cell;
use std::rc::Rc;

use formforge_engine::{Control, Controls, FormGroup, RuleEngine, TeardownSignal};
use formforge_foundation::{FieldId, FieldValue};
use formforge_model::{
    Action, ActionType, ConditionNode, ConditionOperator, FieldType, FormField, FormSchema, Rule,
};
use proptest::prelude::*;

/// The checkbox-reveals-email schema.
fn show_email_schema() -> FormSchema {
    FormSchema::new("s", "Scenario")
        .with_field(FormField::new("show_email", FieldType::Checkbox, "Show email"))
        .with_field(FormField::new("email", FieldType::Text, "Email"))
        .with_rule(
            Rule::new("r1")
                .when(ConditionNode::leaf("show_email", ConditionOperator::Equals, true))
                .then(Action::new("email", ActionType::Show)),
        )
}

fn group_for(schema: &FormSchema) -> FormGroup {
    let mut controls = Controls::new();
    for field in &schema.fields {
        controls.insert(field.id.clone(), Control::for_field(field));
    }
    FormGroup::with_controls(controls)
}

fn enabled(group: &FormGroup, id: &str) -> bool {
    group.get(&FieldId::new(id)).is_some_and(Control::is_enabled)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn checkbox_reveals_email() {
    let schema = show_email_schema();
    let mut group = group_for(&schema);
    RuleEngine::default().process_rules(&mut group, schema.rules.clone(), TeardownSignal::new());

    assert!(!enabled(&group, "email"));
    group.set_value(&FieldId::new("show_email"), true).unwrap();
    assert!(enabled(&group, "email"));
    group.set_value(&FieldId::new("show_email"), false).unwrap();
    assert!(!enabled(&group, "email"));
}

#[test]
fn disabled_controls_leave_value_but_keep_snapshot_entry() {
    let schema = show_email_schema();
    let mut group = group_for(&schema);
    RuleEngine::default().process_rules(&mut group, schema.rules.clone(), TeardownSignal::new());

    let email = FieldId::new("email");
    assert!(group.snapshot().contains_key(&email));
    assert!(!group.value().contains_key(&email));
}

#[test]
fn rule_chain_settles_in_order() {
    let mut group = group_for(
        &FormSchema::new("s", "Chain")
            .with_field(FormField::new("a", FieldType::Checkbox, "A"))
            .with_field(FormField::new("b", FieldType::Text, "B"))
            .with_field(FormField::new("c", FieldType::Text, "C")),
    );
    let rules = vec![
        Rule::new("fill_b")
            .when(ConditionNode::leaf("a", ConditionOperator::Equals, true))
            .then(Action::set_value("b", "go")),
        Rule::new("require_c")
            .when(ConditionNode::leaf("b", ConditionOperator::Equals, "go"))
            .then(Action::new("c", ActionType::SetRequired)),
    ];
    RuleEngine::default().process_rules(&mut group, rules, TeardownSignal::new());

    group.set_value(&FieldId::new("a"), true).unwrap();
    let b = group.get(&FieldId::new("b")).unwrap();
    assert_eq!(b.value(), &FieldValue::from("go"));
    // The second rule saw the snapshot taken before the first rule wrote.
    assert!(!group.get(&FieldId::new("c")).unwrap().is_required());

    group.emit();
    assert!(group.get(&FieldId::new("c")).unwrap().is_required());
}

#[test]
fn actions_do_not_echo() {
    let schema = show_email_schema();
    let mut group = group_for(&schema);
    RuleEngine::default().process_rules(
        &mut group,
        vec![Rule::new("w").then(Action::set_value("email", "x@y.z"))],
        TeardownSignal::new(),
    );

    let deliveries = Rc::new(Cell::new(0));
    let seen = Rc::clone(&deliveries);
    group.subscribe(Box::new(move |_, _| seen.set(seen.get() + 1)), TeardownSignal::new());

    group.set_value(&FieldId::new("show_email"), true).unwrap();
    assert_eq!(deliveries.get(), 1);
}

#[test]
fn teardown_stops_re_evaluation() {
    let schema = show_email_schema();
    let mut group = group_for(&schema);
    let teardown = TeardownSignal::new();
    RuleEngine::default().process_rules(&mut group, schema.rules.clone(), teardown.clone());

    assert!(teardown.fire());
    assert!(!teardown.fire());
    group.set_value(&FieldId::new("show_email"), true).unwrap();
    assert!(!enabled(&group, "email"));
}

#[test]
fn dangling_targets_are_ignored() {
    let schema = show_email_schema();
    let mut group = group_for(&schema);
    let report = RuleEngine::default().apply_rules(
        &[Rule::new("ghost").then(Action::new("nowhere", ActionType::Hide))],
        &group.snapshot(),
        group.controls_mut(),
    );
    assert_eq!(report.actions_skipped, 1);
    assert!(enabled(&group, "email"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn reapplying_a_snapshot_is_idempotent(show in any::<bool>(), text in "[a-z]{0,5}") {
        let schema = show_email_schema();
        let mut group = group_for(&schema);
        group.controls_mut().set_value(&FieldId::new("show_email"), show.into());
        group.controls_mut().set_value(&FieldId::new("email"), text.into());

        let engine = RuleEngine::default();
        let snapshot = group.snapshot();
        engine.apply_rules(&schema.rules, &snapshot, group.controls_mut());
        let first: Vec<_> = group
            .controls()
            .iter()
            .map(|(id, c)| (id.clone(), c.is_enabled(), c.value().clone()))
            .collect();

        engine.apply_rules(&schema.rules, &snapshot, group.controls_mut());
        let second: Vec<_> = group
            .controls()
            .iter()
            .map(|(id, c)| (id.clone(), c.is_enabled(), c.value().clone()))
            .collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(enabled(&group, "email"), show);
    }
}
