//! Integration tests for the builder store
//!
//! Tests editing flows, duplication, load and save.

use formforge_builder::{BuilderConfig, BuilderStore, Level, RecordingNotifier};
use formforge_foundation::{ErrorKind, FieldId, SeededIds};
use formforge_model::{
    Action, ActionType, ConditionNode, ConditionOperator, FieldPatch, FieldType, FormField,
    FormSchema, FormTheme, Rule,
};

fn store() -> (BuilderStore, RecordingNotifier) {
    let log = RecordingNotifier::new();
    let store = BuilderStore::default()
        .with_notifier(log.clone())
        .with_ids(SeededIds::new(21));
    (store, log)
}

fn signup() -> FormSchema {
    FormSchema::new("form-7", "Signup")
        .with_field(FormField::new("age", FieldType::Number, "Age"))
        .with_field(FormField::new("guardian", FieldType::Text, "Guardian"))
        .with_rule(
            Rule::new("minor")
                .when(ConditionNode::leaf("age", ConditionOperator::LessThan, 18))
                .then(Action::new("guardian", ActionType::Show)),
        )
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn new_store_is_create_mode() {
    let (store, _) = store();
    assert_eq!(store.name(), "My New Form");
    assert_eq!(store.page_title(), "Create New Form");
    assert!(!store.is_edit_mode());
    assert!(!store.can_undo());
}

#[test]
fn added_select_has_options() {
    let (mut store, _) = store();
    let id = store.add_field(FieldType::Select);
    assert!(!store.field(&id).unwrap().options.is_empty());
}

#[test]
fn duplicate_is_a_deep_copy() {
    let (mut store, _) = store();
    store.load_schema(signup()).unwrap();
    let age = FieldId::new("age");

    let copy = store.duplicate_field(&age).unwrap();
    assert_ne!(copy, age);
    assert_eq!(store.field(&copy).unwrap().label, "Age (Copy)");

    store.select_field(Some(&copy));
    store.update_field(FieldPatch::new().rules(vec![]));
    assert!(store.field(&copy).unwrap().rules.is_empty());
    assert_eq!(store.field(&age).unwrap().rules.len(), 1);
}

#[test]
fn selection_is_not_recorded() {
    let (mut store, _) = store();
    let a = store.add_field(FieldType::Text);
    store.add_field(FieldType::Text);
    let undo_len = store.history().undo_len();

    assert!(store.select_field(Some(&a)));
    assert!(store.select_field(None));
    assert!(!store.select_field(Some(&FieldId::new("nope"))));
    assert_eq!(store.history().undo_len(), undo_len);
}

#[test]
fn update_without_selection_does_nothing() {
    let (mut store, _) = store();
    store.add_field(FieldType::Text);
    store.select_field(None);
    assert!(!store.update_field(FieldPatch::new().label("x")));
}

#[test]
fn theme_edits_are_undoable() {
    let (mut store, _) = store();
    store.update_theme(FormTheme::new().with_primary_color("#111111"));
    store.update_theme(FormTheme::new().with_primary_color("#222222"));
    assert!(store.undo());
    assert_eq!(
        store.theme().and_then(|t| t.primary_color.as_deref()),
        Some("#111111")
    );
}

#[test]
fn forward_edit_clears_redo() {
    let (mut store, _) = store();
    store.add_field(FieldType::Text);
    store.add_field(FieldType::Text);
    assert!(store.undo());
    assert!(store.can_redo());
    store.add_field(FieldType::Date);
    assert!(!store.can_redo());
}

// =============================================================================
// Load and Save
// =============================================================================

#[test]
fn load_enters_edit_mode_and_clears_history() {
    let (mut store, _) = store();
    store.add_field(FieldType::Text);
    store.load_schema(signup()).unwrap();

    assert!(store.is_edit_mode());
    assert_eq!(store.page_title(), "Edit Form");
    assert_eq!(store.form_id(), Some("form-7"));
    assert!(!store.can_undo());
    assert!(store.selected().is_none());
    assert_eq!(store.field(&FieldId::new("age")).unwrap().rules.len(), 1);
}

#[test]
fn load_rejects_duplicates_without_mutating() {
    let (mut store, _) = store();
    let kept = store.add_field(FieldType::Text);
    let bad = signup().with_field(FormField::new("age", FieldType::Text, "Again"));

    let err = store.load_schema(bad).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateFieldId(_)));
    assert_eq!(store.fields().len(), 1);
    assert_eq!(store.fields()[0].id, kept);
    assert!(store.can_undo());
}

#[test]
fn generated_schema_gets_a_name_and_stays_unsaved() {
    let (mut store, _) = store();
    let mut generated = signup();
    generated.name = String::new();
    store.load_generated(generated).unwrap();

    assert_eq!(store.name(), "AI Generated Form");
    assert!(!store.is_edit_mode());
    assert_eq!(store.fields().len(), 2);
}

#[test]
fn save_payload_flattens_and_strips() {
    let (mut store, _) = store();
    store.load_schema(signup()).unwrap();
    let payload = store.prepare_save().unwrap();

    assert_eq!(payload.name, "Signup");
    assert_eq!(payload.description, "A dynamically Created Form");
    assert_eq!(payload.rules.len(), 1);
    assert!(payload.fields.iter().all(|f| f.rules.is_empty()));
}

#[test]
fn empty_form_cannot_be_saved() {
    let (store, log) = store();
    let err = store.prepare_save().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyForm));
    let note = log.last().unwrap();
    assert_eq!(note.level, Level::Info);
    assert_eq!(note.message, "Cannot save an empty form.");
}

#[test]
fn completing_a_save_announces_and_clears_history() {
    let (mut store, log) = store();
    store.add_field(FieldType::Text);
    store.complete_save("Survey");
    assert!(!store.can_undo());
    assert_eq!(
        log.last().unwrap().message,
        "Form \"Survey\" has been successfully created!"
    );

    store.load_schema(signup()).unwrap();
    store.complete_save("Signup");
    assert_eq!(
        log.last().unwrap().message,
        "Form \"Signup\" has been successfully updated!"
    );
}

#[test]
fn config_changes_defaults() {
    let config = BuilderConfig::new()
        .with_copy_suffix(" copy")
        .with_default_name("Untitled");
    let mut store = BuilderStore::new(config).with_ids(SeededIds::new(2));
    assert_eq!(store.name(), "Untitled");

    let id = store.add_field(FieldType::Text);
    let copy = store.duplicate_field(&id).unwrap();
    assert_eq!(store.field(&copy).unwrap().label, "text field copy");
}
