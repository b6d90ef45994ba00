//! Field, rule, and schema data model for FormForge.
//!
//! This crate provides:
//! - [`FormField`] / [`FieldType`] - Fields placed on a form canvas
//! - [`Rule`] / [`ConditionNode`] / [`Action`] - Conditional rules
//! - [`ValidationRule`] - Declarative validators
//! - [`FormSchema`] / [`FormSchemaPayload`] - Load and save shapes
//! - [`FieldDefaults`] - Defaults for freshly dropped fields

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod defaults;
pub mod field;
pub mod rule;
pub mod schema;
pub mod validation;

pub use defaults::FieldDefaults;
pub use field::{ColorFormat, FieldOption, FieldPatch, FieldType, FormField};
pub use rule::{
    Action, ActionType, Condition, ConditionGroup, ConditionNode, ConditionOperator,
    GroupOperator, Rule,
};
pub use schema::{FormSchema, FormSchemaPayload, FormTheme, flatten_rules, strip_rules};
pub use validation::{ValidationRule, ValidatorType};
