//! Leaf comparison of a field value against a condition value.
//!
//! Comparison is typed by default ([`ComparisonPolicy::Strict`]): values of
//! different variants never compare equal, except that integers and floats
//! compare numerically. [`ComparisonPolicy::Lenient`] additionally parses text
//! into the other side's scalar type before comparing.

use std::cmp::Ordering;

use formforge_foundation::FieldValue;
use formforge_model::ConditionOperator;
use serde::{Deserialize, Serialize};

/// How values of different variants compare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonPolicy {
    /// Typed comparison. Int and Float compare numerically; nothing else crosses variants.
    #[default]
    Strict,
    /// Text is trimmed and parsed into a bool or number when compared against one.
    Lenient,
}

/// Applies `op` with the field value on the left and the condition value on
/// the right.
#[must_use]
pub fn compare(
    op: ConditionOperator,
    left: &FieldValue,
    right: &FieldValue,
    policy: ComparisonPolicy,
) -> bool {
    match op {
        ConditionOperator::Equals => equals(left, right, policy),
        ConditionOperator::NotEquals => !equals(left, right, policy),
        ConditionOperator::GreaterThan => order(left, right, policy) == Some(Ordering::Greater),
        ConditionOperator::LessThan => order(left, right, policy) == Some(Ordering::Less),
        ConditionOperator::Contains => contains(left, right, policy),
        ConditionOperator::Unknown => false,
    }
}

/// Equality under `policy`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn equals(left: &FieldValue, right: &FieldValue, policy: ComparisonPolicy) -> bool {
    if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
        return a == b;
    }
    if policy == ComparisonPolicy::Lenient {
        if let Some(coerced) = coerce_pair(left, right) {
            return match coerced {
                Coerced::Bool(a, b) => a == b,
                Coerced::Number(a, b) => a == b,
                Coerced::Mismatch => false,
            };
        }
    }
    left == right
}

fn order(left: &FieldValue, right: &FieldValue, policy: ComparisonPolicy) -> Option<Ordering> {
    match (left, right) {
        (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
        _ => {
            if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
                return a.partial_cmp(&b);
            }
            if policy == ComparisonPolicy::Lenient {
                if let Some(Coerced::Number(a, b)) = coerce_pair(left, right) {
                    return a.partial_cmp(&b);
                }
            }
            None
        }
    }
}

fn contains(haystack: &FieldValue, needle: &FieldValue, policy: ComparisonPolicy) -> bool {
    match (haystack, needle) {
        (FieldValue::Text(h), FieldValue::Text(n)) => h.contains(n.as_str()),
        (FieldValue::List(items), needle) => items.iter().any(|item| equals(item, needle, policy)),
        (FieldValue::Text(h), FieldValue::Bool(_) | FieldValue::Int(_) | FieldValue::Float(_))
            if policy == ComparisonPolicy::Lenient =>
        {
            h.contains(&needle.to_string())
        }
        _ => false,
    }
}

enum Coerced {
    Bool(bool, bool),
    Number(f64, f64),
    Mismatch,
}

/// Parses the text side of a text/scalar pair. `None` when the pair isn't
/// text against a bool or number.
fn coerce_pair(left: &FieldValue, right: &FieldValue) -> Option<Coerced> {
    match (left, right) {
        (FieldValue::Text(t), other) => coerce_text(t, other, false),
        (other, FieldValue::Text(t)) => coerce_text(t, other, true),
        _ => None,
    }
}

fn coerce_text(text: &str, other: &FieldValue, text_on_right: bool) -> Option<Coerced> {
    let text = text.trim();
    let coerced = match other {
        FieldValue::Bool(b) => match text {
            "true" => Coerced::Bool(true, *b),
            "false" => Coerced::Bool(false, *b),
            _ => Coerced::Mismatch,
        },
        FieldValue::Int(_) | FieldValue::Float(_) => {
            match (text.parse::<f64>(), other.as_number()) {
                (Ok(t), Some(n)) => Coerced::Number(t, n),
                _ => Coerced::Mismatch,
            }
        }
        _ => return None,
    };
    Some(match coerced {
        Coerced::Bool(t, o) if text_on_right => Coerced::Bool(o, t),
        Coerced::Number(t, o) if text_on_right => Coerced::Number(o, t),
        same => same,
    })
}
