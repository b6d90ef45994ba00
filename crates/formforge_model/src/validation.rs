//! Declarative validators attached to fields.

use formforge_foundation::FieldValue;
use serde::{Deserialize, Serialize};

/// Kind of check a validator performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidatorType {
    /// Value must be present.
    Required,
    /// Text/list length lower bound.
    MinLength,
    /// Text/list length upper bound.
    MaxLength,
    /// Text must match a regular expression.
    Pattern,
    /// Numeric lower bound.
    Min,
    /// Numeric upper bound.
    Max,
    /// Text must look like an email address.
    Email,
    /// Text must look like a URL.
    Url,
    /// Anything unrecognized on the wire. Never fails.
    #[serde(other)]
    Unknown,
}

/// A validator with its parameter and user-facing message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Check to perform.
    #[serde(rename = "type")]
    pub kind: ValidatorType,
    /// Parameter (length, bound, or pattern).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    /// Message shown when the check fails.
    #[serde(default)]
    pub message: String,
}

impl ValidationRule {
    /// Creates a validator.
    #[must_use]
    pub fn new(kind: ValidatorType, value: Option<FieldValue>, message: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            message: message.into(),
        }
    }

    /// Value must be present.
    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(ValidatorType::Required, None, message)
    }

    /// At least `n` characters or items.
    #[must_use]
    pub fn min_length(n: i64, message: impl Into<String>) -> Self {
        Self::new(ValidatorType::MinLength, Some(FieldValue::Int(n)), message)
    }

    /// At most `n` characters or items.
    #[must_use]
    pub fn max_length(n: i64, message: impl Into<String>) -> Self {
        Self::new(ValidatorType::MaxLength, Some(FieldValue::Int(n)), message)
    }

    /// Whole value must match `pattern`.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ValidatorType::Pattern,
            Some(FieldValue::Text(pattern.into())),
            message,
        )
    }

    /// Number must be at least `bound`.
    #[must_use]
    pub fn min(bound: f64, message: impl Into<String>) -> Self {
        Self::new(ValidatorType::Min, Some(FieldValue::Float(bound)), message)
    }

    /// Number must be at most `bound`.
    #[must_use]
    pub fn max(bound: f64, message: impl Into<String>) -> Self {
        Self::new(ValidatorType::Max, Some(FieldValue::Float(bound)), message)
    }

    /// Text must look like an email address.
    #[must_use]
    pub fn email(message: impl Into<String>) -> Self {
        Self::new(ValidatorType::Email, None, message)
    }

    /// Text must look like a URL.
    #[must_use]
    pub fn url(message: impl Into<String>) -> Self {
        Self::new(ValidatorType::Url, None, message)
    }
}
