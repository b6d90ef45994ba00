//! Integration tests for condition evaluation
//!
//! Covers missing-field semantics, comparison policies, and the AND/OR laws.

use formforge_engine::{ComparisonPolicy, evaluate};
use formforge_foundation::{FieldId, FieldValue, ValueSnapshot};
use formforge_model::{ConditionNode, ConditionOperator};
use proptest::prelude::*;

fn values(pairs: &[(&str, FieldValue)]) -> ValueSnapshot {
    pairs
        .iter()
        .map(|(k, v)| (FieldId::new(*k), v.clone()))
        .collect()
}

fn strict(node: &ConditionNode, snapshot: &ValueSnapshot) -> bool {
    evaluate(node, snapshot, ComparisonPolicy::Strict)
}

fn lenient(node: &ConditionNode, snapshot: &ValueSnapshot) -> bool {
    evaluate(node, snapshot, ComparisonPolicy::Lenient)
}

// =============================================================================
// Leaf Semantics
// =============================================================================

#[test]
fn equals_five() {
    let node = ConditionNode::leaf("x", ConditionOperator::Equals, 5);
    assert!(strict(&node, &values(&[("x", 5.into())])));
    assert!(!strict(&node, &values(&[("x", 6.into())])));
    assert!(!strict(&node, &values(&[("x", "5".into())])));
    assert!(strict(&node, &values(&[("x", 5.0.into())])));
}

#[test]
fn missing_field_reads_as_null() {
    let empty = ValueSnapshot::new();
    let leaf = |op, v: FieldValue| ConditionNode::leaf("gone", op, v);

    assert!(strict(&leaf(ConditionOperator::Equals, FieldValue::Null), &empty));
    assert!(!strict(&leaf(ConditionOperator::Equals, 1.into()), &empty));
    assert!(strict(&leaf(ConditionOperator::NotEquals, 1.into()), &empty));
    assert!(!strict(&leaf(ConditionOperator::GreaterThan, 1.into()), &empty));
    assert!(!strict(&leaf(ConditionOperator::LessThan, 1.into()), &empty));
    assert!(!strict(&leaf(ConditionOperator::Contains, "a".into()), &empty));
}

#[test]
fn ordering_and_contains() {
    let snapshot = values(&[
        ("age", 30.into()),
        ("bio", "rustacean".into()),
        ("tags", FieldValue::from(vec!["a", "b"])),
    ]);
    assert!(strict(&ConditionNode::leaf("age", ConditionOperator::GreaterThan, 18), &snapshot));
    assert!(strict(&ConditionNode::leaf("age", ConditionOperator::LessThan, 30.5), &snapshot));
    assert!(strict(&ConditionNode::leaf("bio", ConditionOperator::Contains, "stace"), &snapshot));
    assert!(strict(&ConditionNode::leaf("tags", ConditionOperator::Contains, "b"), &snapshot));
    assert!(!strict(&ConditionNode::leaf("tags", ConditionOperator::Contains, "c"), &snapshot));
}

#[test]
fn unknown_operator_is_false() {
    let node = ConditionNode::leaf("x", ConditionOperator::Unknown, 1);
    assert!(!strict(&node, &values(&[("x", 1.into())])));
}

#[test]
fn lenient_coerces_text() {
    let snapshot = values(&[("n", "42".into()), ("flag", " true ".into())]);
    let n = ConditionNode::leaf("n", ConditionOperator::Equals, 42);
    let gt = ConditionNode::leaf("n", ConditionOperator::GreaterThan, 40);
    let flag = ConditionNode::leaf("flag", ConditionOperator::Equals, true);

    assert!(!strict(&n, &snapshot));
    assert!(lenient(&n, &snapshot));
    assert!(!strict(&gt, &snapshot));
    assert!(lenient(&gt, &snapshot));
    assert!(lenient(&flag, &snapshot));
}

// =============================================================================
// Groups
// =============================================================================

#[test]
fn empty_groups() {
    let snapshot = ValueSnapshot::new();
    assert!(strict(&ConditionNode::all(vec![]), &snapshot));
    assert!(!strict(&ConditionNode::any(vec![]), &snapshot));
}

#[test]
fn deep_nesting() {
    let mut node = ConditionNode::leaf("x", ConditionOperator::Equals, true);
    for depth in 0..50 {
        node = if depth % 2 == 0 {
            ConditionNode::all(vec![node])
        } else {
            ConditionNode::any(vec![node])
        };
    }
    assert!(strict(&node, &values(&[("x", true.into())])));
    assert!(!strict(&node, &values(&[("x", false.into())])));
}

// =============================================================================
// Properties
// =============================================================================

fn arb_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Bool),
        (-3i64..3).prop_map(FieldValue::Int),
        "[xy]{0,2}".prop_map(FieldValue::Text),
    ]
}

fn arb_leaf() -> impl Strategy<Value = ConditionNode> {
    let op = prop::sample::select(vec![
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::GreaterThan,
        ConditionOperator::LessThan,
        ConditionOperator::Contains,
    ]);
    ("[pqr]", op, arb_value()).prop_map(|(f, op, v)| ConditionNode::leaf(f, op, v))
}

fn arb_snapshot() -> impl Strategy<Value = ValueSnapshot> {
    prop::collection::vec(("[pqr]", arb_value()), 0..4).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (FieldId::new(k), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn and_group_is_conjunction(
        children in prop::collection::vec(arb_leaf(), 0..6),
        snapshot in arb_snapshot(),
    ) {
        let expected = children.iter().all(|c| strict(c, &snapshot));
        prop_assert_eq!(strict(&ConditionNode::all(children), &snapshot), expected);
    }

    #[test]
    fn or_group_is_disjunction(
        children in prop::collection::vec(arb_leaf(), 0..6),
        snapshot in arb_snapshot(),
    ) {
        let expected = children.iter().any(|c| strict(c, &snapshot));
        prop_assert_eq!(strict(&ConditionNode::any(children), &snapshot), expected);
    }

    #[test]
    fn equals_matches_value_equality(v in arb_value(), w in arb_value()) {
        let node = ConditionNode::leaf("p", ConditionOperator::Equals, w.clone());
        let snapshot = values(&[("p", v.clone())]);
        prop_assert_eq!(strict(&node, &snapshot), v == w);
    }
}
