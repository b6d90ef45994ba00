//! Form schemas as exchanged with the data-access collaborator.
//!
//! A loaded [`FormSchema`] keeps rules in one schema-level list; the editor
//! keeps them on the fields whose values they test. [`FormSchema::fields_with_rules`]
//! and [`FormSchemaPayload::from_fields`] convert between the two shapes.

use std::collections::{BTreeMap, HashSet};

use formforge_foundation::{Error, FieldId, Result};
use serde::{Deserialize, Serialize};

use crate::field::FormField;
use crate::rule::Rule;

// =============================================================================
// Theme
// =============================================================================

/// Visual theme override for one form.
///
/// Only the properties the core compares are named; anything else the
/// presentation layer stores rides along in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTheme {
    /// Accent color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// Page background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Body text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Font stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Corner radius (CSS length).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// Unrecognized properties, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FormTheme {
    /// Creates an empty theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accent color.
    #[must_use]
    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

// =============================================================================
// Loaded Schema
// =============================================================================

/// A stored form as returned by the data-access collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Stored form id.
    pub id: String,
    /// Form name.
    pub name: String,
    /// Form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in canvas order.
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// Schema-level rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// Theme override.
    #[serde(default, alias = "formTheme", skip_serializing_if = "Option::is_none")]
    pub theme: Option<FormTheme>,
}

impl FormSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            fields: Vec::new(),
            rules: Vec::new(),
            theme: None,
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a schema-level rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Checks that no field id appears twice.
    ///
    /// # Errors
    /// Returns [`ErrorKind::DuplicateFieldId`](formforge_foundation::ErrorKind::DuplicateFieldId)
    /// naming the first repeated id.
    pub fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(&field.id) {
                return Err(Error::duplicate_field_id(field.id.clone()));
            }
        }
        Ok(())
    }

    /// Returns the fields with each one's `rules` populated from the
    /// schema-level rules whose conditions reference it.
    ///
    /// A rule testing several fields is attached to each of them.
    #[must_use]
    pub fn fields_with_rules(&self) -> Vec<FormField> {
        self.fields
            .iter()
            .map(|field| {
                let mut field = field.clone();
                field.rules = self
                    .rules
                    .iter()
                    .filter(|rule| rule.references(&field.id))
                    .cloned()
                    .collect();
                field
            })
            .collect()
    }

    /// Returns the schema-level rules plus any rules only owned by fields,
    /// deduplicated by id.
    #[must_use]
    pub fn all_rules(&self) -> Vec<Rule> {
        let mut rules = self.rules.clone();
        let mut seen: HashSet<_> = rules.iter().map(|r| r.id.clone()).collect();
        for rule in self.fields.iter().flat_map(|f| &f.rules) {
            if seen.insert(rule.id.clone()) {
                rules.push(rule.clone());
            }
        }
        rules
    }

    /// Returns the field with the given id.
    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| &f.id == id)
    }
}

// =============================================================================
// Save Payload
// =============================================================================

/// A form as sent to the data-access collaborator for create or update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchemaPayload {
    /// Form name.
    pub name: String,
    /// Form description.
    pub description: String,
    /// Fields with their rules stripped.
    pub fields: Vec<FormField>,
    /// Every field's rules, flattened.
    pub rules: Vec<Rule>,
    /// Theme override.
    #[serde(
        default,
        rename = "formTheme",
        alias = "theme",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme: Option<FormTheme>,
}

impl FormSchemaPayload {
    /// Builds a payload from editor fields.
    #[must_use]
    pub fn from_fields(
        name: impl Into<String>,
        description: impl Into<String>,
        fields: &[FormField],
        theme: Option<FormTheme>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: strip_rules(fields),
            rules: flatten_rules(fields),
            theme,
        }
    }

    /// Converts a saved payload back into a loadable schema under `id`.
    #[must_use]
    pub fn into_schema(self, id: impl Into<String>) -> FormSchema {
        FormSchema {
            id: id.into(),
            name: self.name,
            description: Some(self.description),
            fields: self.fields,
            rules: self.rules,
            theme: self.theme,
        }
    }
}

/// Collects every field's rules in canvas order, keeping the first rule with
/// each id.
#[must_use]
pub fn flatten_rules(fields: &[FormField]) -> Vec<Rule> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .flat_map(|f| &f.rules)
        .filter(|rule| seen.insert(&rule.id))
        .cloned()
        .collect()
}

/// Returns copies of the fields with their rules removed.
#[must_use]
pub fn strip_rules(fields: &[FormField]) -> Vec<FormField> {
    fields
        .iter()
        .map(|field| FormField {
            rules: Vec::new(),
            ..field.clone()
        })
        .collect()
}
