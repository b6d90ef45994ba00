//! Integration tests for editor sessions and control synchronization

use formforge_builder::{
    BuilderStore, ControlSynchronizer, EditorSession, KeyChord, RecordingNotifier,
};
use formforge_engine::FormGroup;
use formforge_foundation::{FieldId, FieldValue, SeededIds};
use formforge_model::{
    Action, ActionType, ConditionNode, ConditionOperator, FieldType, FormField, FormSchema, Rule,
};

fn session() -> EditorSession {
    EditorSession::new(
        BuilderStore::default()
            .with_notifier(RecordingNotifier::new())
            .with_ids(SeededIds::new(4)),
    )
}

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

#[test]
fn synchronizer_is_idempotent() {
    let fields = vec![
        FormField::new("a", FieldType::MultiSelect, "A"),
        FormField::new("b", FieldType::ToggleSwitch, "B"),
    ];
    let mut group = FormGroup::new();
    let first = ControlSynchronizer::sync(&fields, &mut group);
    let second = ControlSynchronizer::sync(&fields, &mut group);

    assert_eq!(first.added.len(), 2);
    assert!(second.is_empty());
    assert_eq!(group.controls().len(), 2);
}

#[test]
fn default_value_seeds_new_controls() {
    let fields = vec![FormField::new("c", FieldType::ColorPicker, "C").with_default_value("#ffffff")];
    let mut group = FormGroup::new();
    ControlSynchronizer::sync(&fields, &mut group);
    assert_eq!(
        group.get(&FieldId::new("c")).unwrap().value(),
        &FieldValue::from("#ffffff")
    );
}

#[test]
fn loaded_schema_previews_its_rules() {
    let mut session = session();
    session.edit(|store| store.load_schema(show_email_schema())).unwrap();

    let email = FieldId::new("email");
    assert!(!session.group().get(&email).unwrap().is_enabled());
    session
        .group_mut()
        .set_value(&FieldId::new("show_email"), true)
        .unwrap();
    assert!(session.group().get(&email).unwrap().is_enabled());
}

#[test]
fn removing_the_source_field_drops_its_rules() {
    let mut session = session();
    session.edit(|store| store.load_schema(show_email_schema())).unwrap();

    assert!(session.edit(|store| store.remove_field(&FieldId::new("show_email"))));
    assert!(session.group().get(&FieldId::new("show_email")).is_none());
    assert!(formforge_model::flatten_rules(session.store().fields()).is_empty());
    assert_eq!(session.group().controls().len(), 1);
    assert_eq!(session.group().subscriber_count(), 1);
}

#[test]
fn keyboard_flow() {
    let mut session = session();
    let id = session.edit(|store| store.add_field(FieldType::Text));

    assert!(session.handle_key(&KeyChord::parse("Ctrl+D").unwrap(), false));
    assert_eq!(session.group().controls().len(), 2);

    assert!(!session.handle_key(&KeyChord::new("Backspace"), true));
    assert!(session.handle_key(&KeyChord::new("Backspace"), false));
    assert_eq!(session.group().controls().len(), 1);
    assert!(session.group().get(&id).is_some());

    assert!(!session.handle_key(&KeyChord::parse("Cmd+Shift+Z").unwrap(), false));
    assert!(session.handle_key(&KeyChord::parse("Ctrl+Z").unwrap(), false));
    assert_eq!(session.group().controls().len(), 2);
}

#[test]
fn ending_twice_is_harmless() {
    let mut session = session();
    session.end();
    session.end();
    assert!(session.is_ended());
}
