//! Recursive evaluation of condition trees against a value snapshot.

use formforge_foundation::{FieldValue, ValueSnapshot};
use formforge_model::{ConditionNode, GroupOperator};

use crate::compare::{ComparisonPolicy, compare};

static NULL: FieldValue = FieldValue::Null;

/// Evaluates one node. A field missing from `values` reads as null.
///
/// An empty AND group holds; an empty OR group does not. A group with an
/// unrecognized operator never holds.
#[must_use]
pub fn evaluate(node: &ConditionNode, values: &ValueSnapshot, policy: ComparisonPolicy) -> bool {
    match node {
        ConditionNode::Leaf(condition) => {
            let actual = values.get(&condition.field_id).unwrap_or(&NULL);
            compare(condition.operator, actual, &condition.value, policy)
        }
        ConditionNode::Group(group) => match group.operator {
            GroupOperator::And => group
                .conditions
                .iter()
                .all(|child| evaluate(child, values, policy)),
            GroupOperator::Or => group
                .conditions
                .iter()
                .any(|child| evaluate(child, values, policy)),
            GroupOperator::Unknown => false,
        },
    }
}

/// Evaluates a rule's top-level conditions, which combine with AND.
#[must_use]
pub fn evaluate_all(
    conditions: &[ConditionNode],
    values: &ValueSnapshot,
    policy: ComparisonPolicy,
) -> bool {
    conditions.iter().all(|node| evaluate(node, values, policy))
}
