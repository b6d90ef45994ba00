//! Integration tests for the condition tree and rule wire format

use formforge_foundation::{FieldId, FieldValue};
use formforge_model::{
    ActionType, ConditionNode, ConditionOperator, GroupOperator, Rule,
};

const NESTED_RULE: &str = r#"{
    "id": "r1",
    "description": "Adults outside Serbia",
    "conditions": [
        {"fieldId": "age", "operator": "greaterThan", "value": 17},
        {"operator": "OR", "conditions": [
            {"fieldId": "country", "operator": "notEquals", "value": "RS"},
            {"operator": "AND", "conditions": []}
        ]}
    ],
    "actions": [
        {"targetFieldId": "passport", "type": "show"},
        {"targetFieldId": "passport", "type": "setValue", "value": "pending"}
    ]
}"#;

#[test]
fn nested_rule_parses() {
    let rule: Rule = serde_json::from_str(NESTED_RULE).unwrap();
    assert_eq!(rule.conditions.len(), 2);
    let ConditionNode::Group(group) = &rule.conditions[1] else {
        panic!("second condition should be a group");
    };
    assert_eq!(group.operator, GroupOperator::Or);
    assert!(matches!(group.conditions[1], ConditionNode::Group(_)));
    assert_eq!(rule.actions[1].action_type, ActionType::SetValue);
    assert_eq!(rule.actions[1].value, Some(FieldValue::from("pending")));
}

#[test]
fn rule_references_are_recursive() {
    let rule: Rule = serde_json::from_str(NESTED_RULE).unwrap();
    assert!(rule.references(&FieldId::new("age")));
    assert!(rule.references(&FieldId::new("country")));
    assert!(!rule.references(&FieldId::new("passport")));
}

#[test]
fn unknown_operator_survives_parsing() {
    let node: ConditionNode =
        serde_json::from_str(r#"{"fieldId": "a", "operator": "matchesRegex", "value": "x"}"#)
            .unwrap();
    let ConditionNode::Leaf(leaf) = node else {
        panic!("expected a leaf");
    };
    assert_eq!(leaf.operator, ConditionOperator::Unknown);
}

#[test]
fn rule_json_round_trip() {
    let rule: Rule = serde_json::from_str(NESTED_RULE).unwrap();
    let again: Rule = serde_json::from_str(&serde_json::to_string(&rule).unwrap()).unwrap();
    assert_eq!(again, rule);
}
