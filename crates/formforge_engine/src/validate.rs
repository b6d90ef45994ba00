//! Compiled validators and the checks they run against control values.
//!
//! Declared [`ValidationRule`]s are compiled once when a control is built.
//! Empty values (null, `""`, `[]`) pass every check except `required`.

use std::sync::OnceLock;

use formforge_foundation::FieldValue;
use formforge_model::{FieldType, FormField, ValidationRule, ValidatorType};
use regex::Regex;
use tracing::warn;

/// Message used when a field is required and no message was declared.
pub const REQUIRED_MESSAGE: &str = "This field is required.";
/// Message of the implicit validator on email fields.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
/// Message of the implicit validator on URL fields.
pub const URL_MESSAGE: &str = "Please enter a valid URL.";

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
const URL_PATTERN: &str = r"(?i)^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$";

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

fn url_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).ok()).as_ref()
}

// =============================================================================
// Validation Error
// =============================================================================

/// A failed check on one control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Which check failed.
    pub kind: ValidatorType,
    /// User-facing message.
    pub message: String,
}

impl ValidationError {
    fn from_rule(rule: &ValidationRule) -> Self {
        let message = if rule.message.is_empty() {
            default_message(rule.kind).to_string()
        } else {
            rule.message.clone()
        };
        Self {
            kind: rule.kind,
            message,
        }
    }

    /// The error for a missing required value.
    #[must_use]
    pub fn required() -> Self {
        Self {
            kind: ValidatorType::Required,
            message: REQUIRED_MESSAGE.to_string(),
        }
    }
}

fn default_message(kind: ValidatorType) -> &'static str {
    match kind {
        ValidatorType::Required => REQUIRED_MESSAGE,
        ValidatorType::MinLength => "Value is too short.",
        ValidatorType::MaxLength => "Value is too long.",
        ValidatorType::Pattern => "Value has an invalid format.",
        ValidatorType::Min => "Value is too small.",
        ValidatorType::Max => "Value is too large.",
        ValidatorType::Email => EMAIL_MESSAGE,
        ValidatorType::Url => URL_MESSAGE,
        ValidatorType::Unknown => "Value is invalid.",
    }
}

// =============================================================================
// Compiled Validator
// =============================================================================

#[derive(Clone, Debug)]
enum Check {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Min(f64),
    Max(f64),
    Email,
    Url,
    /// Unknown kind or unusable parameter. Always passes.
    Skip,
}

/// A declared validator with its parameter parsed and any pattern compiled.
#[derive(Clone, Debug)]
pub struct Validator {
    rule: ValidationRule,
    check: Check,
}

impl Validator {
    /// Compiles a declared rule.
    ///
    /// A rule whose parameter is missing or unusable, or whose pattern does
    /// not compile, becomes a no-op.
    #[must_use]
    pub fn compile(rule: ValidationRule) -> Self {
        let check = match rule.kind {
            ValidatorType::Required => Check::Required,
            ValidatorType::MinLength => {
                length_param(rule.value.as_ref()).map_or(Check::Skip, Check::MinLength)
            }
            ValidatorType::MaxLength => {
                length_param(rule.value.as_ref()).map_or(Check::Skip, Check::MaxLength)
            }
            ValidatorType::Min => number_param(rule.value.as_ref()).map_or(Check::Skip, Check::Min),
            ValidatorType::Max => number_param(rule.value.as_ref()).map_or(Check::Skip, Check::Max),
            ValidatorType::Pattern => match rule.value.as_ref().and_then(FieldValue::as_str) {
                Some(pattern) => match Regex::new(&format!("^(?:{pattern})$")) {
                    Ok(re) => Check::Pattern(re),
                    Err(e) => {
                        warn!(%pattern, error = %e, "ignoring invalid pattern validator");
                        Check::Skip
                    }
                },
                None => Check::Skip,
            },
            ValidatorType::Email => Check::Email,
            ValidatorType::Url => Check::Url,
            ValidatorType::Unknown => Check::Skip,
        };
        Self { rule, check }
    }

    /// Returns the declared rule.
    #[must_use]
    pub fn rule(&self) -> &ValidationRule {
        &self.rule
    }

    /// Returns true if this validator marks its control required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.check, Check::Required)
    }

    /// Runs the check. `field_type` decides what counts as a missing value
    /// for `required`.
    #[must_use]
    pub fn check(&self, value: &FieldValue, field_type: FieldType) -> Option<ValidationError> {
        if self.passes(value, field_type) {
            None
        } else {
            Some(ValidationError::from_rule(&self.rule))
        }
    }

    fn passes(&self, value: &FieldValue, field_type: FieldType) -> bool {
        if let Check::Required = self.check {
            return !is_missing(value, field_type);
        }
        if value.is_empty() {
            return true;
        }
        match &self.check {
            Check::MinLength(n) => length_of(value).is_none_or(|len| len >= *n),
            Check::MaxLength(n) => length_of(value).is_none_or(|len| len <= *n),
            Check::Pattern(re) => match value {
                FieldValue::Text(s) => re.is_match(s),
                FieldValue::Int(_) | FieldValue::Float(_) => re.is_match(&value.to_string()),
                _ => true,
            },
            Check::Min(bound) => numeric(value).is_none_or(|n| n >= *bound),
            Check::Max(bound) => numeric(value).is_none_or(|n| n <= *bound),
            Check::Email => value.as_str().is_none_or(is_email),
            Check::Url => value
                .as_str()
                .is_none_or(|s| url_regex().is_none_or(|re| re.is_match(s))),
            Check::Required | Check::Skip => true,
        }
    }
}

/// Returns true if `value` counts as absent for a required check.
#[must_use]
pub fn is_missing(value: &FieldValue, field_type: FieldType) -> bool {
    value.is_empty() || (field_type.is_boolean() && value.as_bool() == Some(false))
}

/// Compiles a field's declared validators, adding the implicit email or URL
/// check when the field type calls for one and none is declared.
#[must_use]
pub fn validators_for(field: &FormField) -> Vec<Validator> {
    let declares = |kind| field.validations.iter().any(|v| v.kind == kind);
    let mut validators: Vec<_> = field
        .validations
        .iter()
        .cloned()
        .map(Validator::compile)
        .collect();

    match field.field_type {
        FieldType::Email if !declares(ValidatorType::Email) => {
            validators.push(Validator::compile(ValidationRule::email(EMAIL_MESSAGE)));
        }
        FieldType::Url if !declares(ValidatorType::Url) => {
            validators.push(Validator::compile(ValidationRule::url(URL_MESSAGE)));
        }
        _ => {}
    }
    validators
}

fn is_email(s: &str) -> bool {
    let Some((local, _)) = s.split_once('@') else {
        return false;
    };
    s.len() <= EMAIL_MAX_LEN
        && local.len() <= EMAIL_LOCAL_MAX_LEN
        && email_regex().is_none_or(|re| re.is_match(s))
}

fn length_of(value: &FieldValue) -> Option<usize> {
    match value {
        FieldValue::Text(s) => Some(s.chars().count()),
        FieldValue::List(items) => Some(items.len()),
        _ => None,
    }
}

fn numeric(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Text(s) => s.trim().parse().ok(),
        other => other.as_number(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
fn length_param(value: Option<&FieldValue>) -> Option<usize> {
    match value? {
        FieldValue::Int(n) => usize::try_from(*n).ok(),
        FieldValue::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Some(*f as usize),
        _ => None,
    }
}

fn number_param(value: Option<&FieldValue>) -> Option<f64> {
    value?.as_number()
}
