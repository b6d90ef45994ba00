//! Field definitions: types, options, and the field record itself.

use std::fmt;

use formforge_foundation::{FieldId, FieldValue};
use serde::{Deserialize, Serialize};

use crate::rule::Rule;
use crate::validation::ValidationRule;

// =============================================================================
// Field Type
// =============================================================================

/// The kind of input a field renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Single-line text input.
    Text,
    /// Numeric input.
    Number,
    /// Dropdown with a single choice.
    Select,
    /// Dropdown with multiple choices.
    MultiSelect,
    /// Radio button group.
    Radio,
    /// Single checkbox.
    Checkbox,
    /// On/off switch.
    ToggleSwitch,
    /// Date picker.
    Date,
    /// Email address input.
    Email,
    /// Phone number input with optional country selector.
    Phone,
    /// Multi-line text input.
    TextArea,
    /// File upload.
    FileUpload,
    /// Rich text editor.
    RichText,
    /// Color picker.
    ColorPicker,
    /// Likert agreement scale.
    LikertScale,
    /// URL input.
    Url,
    /// Masked password input.
    Password,
}

impl FieldType {
    /// Every field type, in palette order.
    pub const ALL: [Self; 17] = [
        Self::Text,
        Self::Number,
        Self::Select,
        Self::MultiSelect,
        Self::Radio,
        Self::Checkbox,
        Self::ToggleSwitch,
        Self::Date,
        Self::Email,
        Self::Phone,
        Self::TextArea,
        Self::FileUpload,
        Self::RichText,
        Self::ColorPicker,
        Self::LikertScale,
        Self::Url,
        Self::Password,
    ];

    /// Returns the wire name used in serialized schemas.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::MultiSelect => "multiSelect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::ToggleSwitch => "toggleSwitch",
            Self::Date => "date",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::TextArea => "textArea",
            Self::FileUpload => "fileUpload",
            Self::RichText => "richText",
            Self::ColorPicker => "colorPicker",
            Self::LikertScale => "likertScale",
            Self::Url => "url",
            Self::Password => "password",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.wire_name() == name)
    }

    /// Returns true for types that must carry a non-empty option list.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(
            self,
            Self::Select | Self::Radio | Self::MultiSelect | Self::LikertScale
        )
    }

    /// Returns true for types whose value is a list.
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::MultiSelect)
    }

    /// Returns true for types whose value is a boolean.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Checkbox | Self::ToggleSwitch)
    }

    /// Returns the value a fresh control of this type starts with.
    #[must_use]
    pub fn initial_value(self) -> FieldValue {
        match self {
            Self::MultiSelect => FieldValue::List(Vec::new()),
            Self::Checkbox | Self::ToggleSwitch => FieldValue::Bool(false),
            Self::Number => FieldValue::Null,
            _ => FieldValue::Text(String::new()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Output format of a color picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#RRGGBB`
    #[default]
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
    /// `rgba(r, g, b, a)`
    Rgba,
    /// `hsl(h, s%, l%)`
    Hsl,
    /// `hsla(h, s%, l%, a)`
    Hsla,
}

// =============================================================================
// Field Option
// =============================================================================

/// One choice of a select, radio, multi-select, or Likert field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Display label.
    pub label: String,
    /// Submitted value (string, number, or boolean).
    pub value: FieldValue,
}

impl FieldOption {
    /// Creates an option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Form Field
// =============================================================================

/// A field placed on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique id within the canvas.
    pub id: FieldId,
    /// Input kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display label.
    pub label: String,
    /// Placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether a value is required on submission.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Choices for choice types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Declared validators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationRule>,
    /// Rules owned by this field in the editor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// Lower bound for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Increment for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Output format for color pickers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_format: Option<ColorFormat>,
    /// ISO 3166-1 alpha-2 default country for phone fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_country: Option<String>,
    /// Whether phone fields show a country selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_country_selector: Option<bool>,
    /// Value a fresh control starts with, overriding the type default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
}

impl FormField {
    /// Creates a bare field with no type-specific defaults.
    #[must_use]
    pub fn new(id: impl Into<FieldId>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            options: Vec::new(),
            validations: Vec::new(),
            rules: Vec::new(),
            min: None,
            max: None,
            step: None,
            color_format: None,
            default_country: None,
            show_country_selector: None,
            default_value: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Adds an option.
    #[must_use]
    pub fn with_option(mut self, option: FieldOption) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validations.push(rule);
        self
    }

    /// Adds an owned rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Returns the value a fresh control for this field starts with.
    #[must_use]
    pub fn initial_value(&self) -> FieldValue {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.field_type.initial_value())
    }

    /// Merges a partial update into this field. The id never changes.
    pub fn apply(&mut self, patch: FieldPatch) {
        let FieldPatch {
            field_type,
            label,
            placeholder,
            required,
            options,
            validations,
            rules,
            min,
            max,
            step,
            color_format,
            default_country,
            show_country_selector,
            default_value,
        } = patch;

        if let Some(v) = field_type {
            self.field_type = v;
        }
        if let Some(v) = label {
            self.label = v;
        }
        if let Some(v) = placeholder {
            self.placeholder = v;
        }
        if let Some(v) = required {
            self.required = v;
        }
        if let Some(v) = options {
            self.options = v;
        }
        if let Some(v) = validations {
            self.validations = v;
        }
        if let Some(v) = rules {
            self.rules = v;
        }
        if let Some(v) = min {
            self.min = v;
        }
        if let Some(v) = max {
            self.max = v;
        }
        if let Some(v) = step {
            self.step = v;
        }
        if let Some(v) = color_format {
            self.color_format = v;
        }
        if let Some(v) = default_country {
            self.default_country = v;
        }
        if let Some(v) = show_country_selector {
            self.show_country_selector = v;
        }
        if let Some(v) = default_value {
            self.default_value = v;
        }
    }
}

// =============================================================================
// Field Patch
// =============================================================================

/// Partial update for the selected field, as produced by a property panel.
///
/// `None` leaves a property untouched. For optional properties the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(clippy::option_option)]
pub struct FieldPatch {
    /// New input kind.
    pub field_type: Option<FieldType>,
    /// New label.
    pub label: Option<String>,
    /// New placeholder.
    pub placeholder: Option<Option<String>>,
    /// New required flag.
    pub required: Option<bool>,
    /// Replacement option list.
    pub options: Option<Vec<FieldOption>>,
    /// Replacement validator list.
    pub validations: Option<Vec<ValidationRule>>,
    /// Replacement owned rules.
    pub rules: Option<Vec<Rule>>,
    /// New lower bound.
    pub min: Option<Option<f64>>,
    /// New upper bound.
    pub max: Option<Option<f64>>,
    /// New increment.
    pub step: Option<Option<f64>>,
    /// New color format.
    pub color_format: Option<Option<ColorFormat>>,
    /// New default country.
    pub default_country: Option<Option<String>>,
    /// New country selector flag.
    pub show_country_selector: Option<Option<bool>>,
    /// New default value.
    pub default_value: Option<Option<FieldValue>>,
}

impl FieldPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(Some(placeholder.into()));
        self
    }

    /// Sets the required flag.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Replaces the options.
    #[must_use]
    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Replaces the validators.
    #[must_use]
    pub fn validations(mut self, validations: Vec<ValidationRule>) -> Self {
        self.validations = Some(validations);
        self
    }

    /// Replaces the owned rules.
    #[must_use]
    pub fn rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Sets numeric bounds and step.
    #[must_use]
    pub fn range(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    /// Changes the field type.
    #[must_use]
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Returns true if the patch touches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
