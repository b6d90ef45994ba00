//! Conditional rules: condition trees and the actions they drive.
//!
//! Conditions form a recursive tree of two variants: a leaf comparison
//! against one field's value, and an AND/OR group of child nodes.

use formforge_foundation::{FieldId, FieldValue, RuleId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Operators
// =============================================================================

/// Comparison applied by a leaf condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    /// Field value equals the condition value.
    Equals,
    /// Field value differs from the condition value.
    NotEquals,
    /// Field value orders after the condition value.
    GreaterThan,
    /// Field value orders before the condition value.
    LessThan,
    /// Field text contains the value, or field list has it as a member.
    Contains,
    /// Anything unrecognized on the wire. Always evaluates to false.
    #[serde(other)]
    Unknown,
}

/// How a group combines its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupOperator {
    /// Every child must hold.
    #[serde(rename = "AND", alias = "and")]
    And,
    /// At least one child must hold.
    #[serde(rename = "OR", alias = "or")]
    Or,
    /// Anything unrecognized on the wire. The group never holds.
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Condition Tree
// =============================================================================

/// Leaf comparison of one field's current value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Field whose value is compared.
    pub field_id: FieldId,
    /// Comparison to apply.
    pub operator: ConditionOperator,
    /// Right-hand side of the comparison.
    #[serde(default)]
    pub value: FieldValue,
}

impl Condition {
    /// Creates a leaf condition.
    #[must_use]
    pub fn new(
        field_id: impl Into<FieldId>,
        operator: ConditionOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
        }
    }
}

/// AND/OR composite of child nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    /// How children combine.
    pub operator: GroupOperator,
    /// Children; leaves or nested groups.
    pub conditions: Vec<ConditionNode>,
}

/// A node of the condition tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    /// Nested group. Listed first: only groups carry `conditions`.
    Group(ConditionGroup),
    /// Leaf comparison.
    Leaf(Condition),
}

impl ConditionNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn leaf(
        field_id: impl Into<FieldId>,
        operator: ConditionOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self::Leaf(Condition::new(field_id, operator, value))
    }

    /// Creates an AND group.
    #[must_use]
    pub fn all(conditions: Vec<Self>) -> Self {
        Self::Group(ConditionGroup {
            operator: GroupOperator::And,
            conditions,
        })
    }

    /// Creates an OR group.
    #[must_use]
    pub fn any(conditions: Vec<Self>) -> Self {
        Self::Group(ConditionGroup {
            operator: GroupOperator::Or,
            conditions,
        })
    }

    /// Returns true if any leaf in this subtree compares `field`.
    #[must_use]
    pub fn references(&self, field: &FieldId) -> bool {
        match self {
            Self::Leaf(c) => &c.field_id == field,
            Self::Group(g) => g.conditions.iter().any(|c| c.references(field)),
        }
    }
}

impl From<Condition> for ConditionNode {
    fn from(c: Condition) -> Self {
        Self::Leaf(c)
    }
}

impl From<ConditionGroup> for ConditionNode {
    fn from(g: ConditionGroup) -> Self {
        Self::Group(g)
    }
}

// =============================================================================
// Actions
// =============================================================================

/// What an action does to its target control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// Enable when met, disable otherwise.
    Show,
    /// Disable when met, enable otherwise.
    Hide,
    /// Enable when met, disable otherwise.
    Enable,
    /// Disable when met, enable otherwise.
    Disable,
    /// Rule-required marker follows the result.
    SetRequired,
    /// Write the action value when met.
    SetValue,
    /// Reset to the initial value when met.
    ClearValue,
    /// Anything unrecognized on the wire. Never does anything.
    #[serde(other)]
    Unknown,
}

/// An effect on one target control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Control the action applies to.
    pub target_field_id: FieldId,
    /// Effect kind.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Payload for value-carrying actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

impl Action {
    /// Creates an action with no payload.
    #[must_use]
    pub fn new(target: impl Into<FieldId>, action_type: ActionType) -> Self {
        Self {
            target_field_id: target.into(),
            action_type,
            value: None,
        }
    }

    /// Creates a `SetValue` action.
    #[must_use]
    pub fn set_value(target: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        Self {
            target_field_id: target.into(),
            action_type: ActionType::SetValue,
            value: Some(value.into()),
        }
    }
}

// =============================================================================
// Rule
// =============================================================================

/// Named pairing of conditions (implicitly ANDed) with actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Rule identifier.
    pub id: RuleId,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level conditions; all must hold.
    #[serde(default)]
    pub conditions: Vec<ConditionNode>,
    /// Actions executed with the combined result.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    /// Creates an empty rule.
    #[must_use]
    pub fn new(id: impl Into<RuleId>) -> Self {
        Self {
            id: id.into(),
            description: None,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a top-level condition.
    #[must_use]
    pub fn when(mut self, condition: impl Into<ConditionNode>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Adds an action.
    #[must_use]
    pub fn then(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Returns true if any condition compares `field`.
    #[must_use]
    pub fn references(&self, field: &FieldId) -> bool {
        self.conditions.iter().any(|c| c.references(field))
    }
}
