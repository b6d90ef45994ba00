//! Integration tests for schema load and save shapes

use formforge_foundation::{ErrorKind, FieldId};
use formforge_model::{
    Action, ActionType, ConditionNode, ConditionOperator, FieldType, FormField, FormSchema,
    FormSchemaPayload, FormTheme, Rule, flatten_rules,
};

fn two_field_rule() -> Rule {
    Rule::new("both")
        .when(ConditionNode::all(vec![
            ConditionNode::leaf("a", ConditionOperator::Equals, 1),
            ConditionNode::leaf("b", ConditionOperator::Equals, 2),
        ]))
        .then(Action::new("c", ActionType::Show))
}

fn schema() -> FormSchema {
    FormSchema::new("s1", "Survey")
        .with_field(FormField::new("a", FieldType::Number, "A"))
        .with_field(FormField::new("b", FieldType::Number, "B"))
        .with_field(FormField::new("c", FieldType::Text, "C"))
        .with_rule(two_field_rule())
}

#[test]
fn load_attaches_rule_to_every_referenced_field() {
    let fields = schema().fields_with_rules();
    assert_eq!(fields[0].rules.len(), 1);
    assert_eq!(fields[1].rules.len(), 1);
    assert!(fields[2].rules.is_empty());
}

#[test]
fn save_flattens_each_rule_once() {
    let fields = schema().fields_with_rules();
    let rules = flatten_rules(&fields);
    assert_eq!(rules, vec![two_field_rule()]);

    let payload = FormSchemaPayload::from_fields("Survey", "desc", &fields, None);
    assert_eq!(payload.rules.len(), 1);
    assert!(payload.fields.iter().all(|f| f.rules.is_empty()));
}

#[test]
fn load_save_load_is_stable() {
    let original = schema();
    let payload =
        FormSchemaPayload::from_fields("Survey", "desc", &original.fields_with_rules(), None);
    let reloaded = payload.into_schema("s1");
    assert_eq!(reloaded.fields_with_rules(), original.fields_with_rules());
}

#[test]
fn payload_theme_key_is_form_theme() {
    let theme = FormTheme::new().with_primary_color("#ff0000");
    let payload = FormSchemaPayload::from_fields("T", "d", &[], Some(theme.clone()));
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["formTheme"]["primaryColor"], "#ff0000");
    assert!(json.get("theme").is_none());

    let schema: FormSchema = serde_json::from_str(
        r##"{"id": "x", "name": "T", "fields": [], "formTheme": {"primaryColor": "#ff0000"}}"##,
    )
    .unwrap();
    assert_eq!(schema.theme, Some(theme));
}

#[test]
fn duplicate_ids_are_reported() {
    let schema = schema().with_field(FormField::new("a", FieldType::Text, "Again"));
    let err = schema.check_unique_ids().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateFieldId(ref id) if id == &FieldId::new("a")));
}

#[test]
fn schema_parses_from_collaborator_json() {
    let schema: FormSchema = serde_json::from_str(
        r#"{
            "id": "f9",
            "name": "Contact",
            "fields": [
                {"id": "kind", "type": "select", "label": "Kind",
                 "options": [{"label": "Email", "value": "email"}]},
                {"id": "addr", "type": "email", "label": "Address", "required": true}
            ],
            "rules": [{
                "id": "r",
                "conditions": [{"fieldId": "kind", "operator": "equals", "value": "email"}],
                "actions": [{"targetFieldId": "addr", "type": "show"}]
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(schema.fields.len(), 2);
    assert!(schema.fields[1].required);
    assert_eq!(schema.fields_with_rules()[0].rules.len(), 1);
}
