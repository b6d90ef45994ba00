//! Build a form in the editor, save it, then fill it in.

use formforge::builder::{BuilderStore, EditorSession, RecordingNotifier};
use formforge::engine::EngineConfig;
use formforge::foundation::{ErrorKind, FieldId, FieldValue, SeededIds};
use formforge::model::{
    Action, ActionType, ConditionNode, ConditionOperator, FieldPatch, FieldType, Rule,
    ValidationRule,
};
use formforge::runtime::{FormSession, from_json, to_json};

/// Builds "subscribe reveals a required email" through editor operations.
fn build_newsletter(session: &mut EditorSession) -> (FieldId, FieldId) {
    let subscribe = session.edit(|store| {
        let id = store.add_field(FieldType::Checkbox);
        store.update_field(FieldPatch::new().label("Subscribe"));
        id
    });
    let email = session.edit(|store| {
        let id = store.add_field(FieldType::Email);
        store.update_field(
            FieldPatch::new()
                .label("Email")
                .validations(vec![ValidationRule::pattern(".+@corp\\.example", "Use your work address")]),
        );
        id
    });
    let rule = Rule::new("reveal")
        .when(ConditionNode::leaf(subscribe.clone(), ConditionOperator::Equals, true))
        .then(Action::new(email.clone(), ActionType::Show))
        .then(Action::new(email.clone(), ActionType::SetRequired));
    session.edit(|store| {
        store.select_field(Some(&subscribe));
        store.update_field(FieldPatch::new().rules(vec![rule]));
    });
    (subscribe, email)
}

#[test]
fn edit_save_fill_submit() {
    let mut editor = EditorSession::new(
        BuilderStore::default()
            .with_notifier(RecordingNotifier::new())
            .with_ids(SeededIds::new(99)),
    );
    let (subscribe, email) = build_newsletter(&mut editor);

    // The preview reacts while editing.
    assert!(!editor.group().get(&email).unwrap().is_enabled());
    editor.group_mut().set_value(&subscribe, true).unwrap();
    assert!(editor.group().get(&email).unwrap().is_enabled());

    // Save through the wire format and reopen as a live form.
    let payload = editor.store().prepare_save().unwrap();
    let wire = to_json(&payload).unwrap();
    let schema = from_json::<formforge::model::FormSchemaPayload>(&wire)
        .unwrap()
        .into_schema("saved-1");
    editor.end();

    let notes = RecordingNotifier::new();
    let mut form = FormSession::open(schema, EngineConfig::default())
        .unwrap()
        .with_notifier(notes.clone());

    assert!(form.submit().is_ok());

    form.set_value(&subscribe, true).unwrap();
    let err = form.submit().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSubmission { .. }));

    form.set_value(&email, "ana@gmail.com").unwrap();
    assert_eq!(form.errors(&email)[0].message, "Use your work address");

    form.set_value(&email, "ana@corp.example").unwrap();
    let submitted = form.submit().unwrap();
    assert_eq!(submitted.form_id, "saved-1");
    assert_eq!(submitted.values.get(&email), Some(&FieldValue::from("ana@corp.example")));
    assert_eq!(submitted.values.get(&subscribe), Some(&FieldValue::Bool(true)));

    // Reset after submit puts the rule back in its initial state.
    assert!(!form.control(&email).unwrap().is_enabled());
    assert_eq!(notes.notifications().len(), 3);
}

#[test]
fn undo_in_editor_is_reflected_in_preview() {
    let mut editor = EditorSession::new(
        BuilderStore::default()
            .with_notifier(RecordingNotifier::new())
            .with_ids(SeededIds::new(3)),
    );
    let (_, email) = build_newsletter(&mut editor);
    assert!(!editor.group().get(&email).unwrap().is_enabled());

    // Undo the rule attachment: email is no longer driven by a rule.
    editor.edit(BuilderStore::undo);
    assert!(formforge::model::flatten_rules(editor.store().fields()).is_empty());

    editor.edit(BuilderStore::redo);
    assert_eq!(formforge::model::flatten_rules(editor.store().fields()).len(), 1);
    assert!(!editor.group().get(&email).unwrap().is_enabled());
}
