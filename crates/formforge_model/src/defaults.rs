//! Defaults applied to freshly dropped fields.

use formforge_foundation::{FieldId, FieldValue};
use serde::{Deserialize, Serialize};

use crate::field::{ColorFormat, FieldOption, FieldType, FormField};

/// Per-type defaults for new fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDefaults {
    /// Options for select, radio, and multi-select fields.
    pub select: SelectDefaults,
    /// Options for Likert scales.
    pub likert: LikertDefaults,
    /// Numeric bounds and step.
    pub number: NumberDefaults,
    /// Color picker format and value.
    pub color_picker: ColorDefaults,
    /// Phone country settings.
    pub phone: PhoneDefaults,
}

/// Default choice list for select-like fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectDefaults {
    /// Initial options.
    pub options: Vec<FieldOption>,
}

impl Default for SelectDefaults {
    fn default() -> Self {
        Self {
            options: vec![FieldOption::new("Option 1", "option1")],
        }
    }
}

/// Default agreement scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikertDefaults {
    /// Initial options, from strongest disagreement to strongest agreement.
    pub options: Vec<FieldOption>,
}

impl Default for LikertDefaults {
    fn default() -> Self {
        Self {
            options: vec![
                FieldOption::new("Strongly Disagree", "strongly_disagree"),
                FieldOption::new("Disagree", "disagree"),
                FieldOption::new("Neutral", "neutral"),
                FieldOption::new("Agree", "agree"),
                FieldOption::new("Strongly Agree", "strongly_agree"),
            ],
        }
    }
}

/// Numeric field defaults. Bounds are unset unless configured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberDefaults {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
    /// Increment.
    pub step: f64,
}

impl Default for NumberDefaults {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: 1.0,
        }
    }
}

/// Color picker defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorDefaults {
    /// Output format.
    pub format: ColorFormat,
    /// Initial color.
    pub default_value: String,
}

impl Default for ColorDefaults {
    fn default() -> Self {
        Self {
            format: ColorFormat::Hex,
            default_value: "#000000".to_string(),
        }
    }
}

/// Phone field defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneDefaults {
    /// ISO 3166-1 alpha-2 country preselected in the selector.
    pub default_country: String,
    /// Whether the country selector is shown.
    pub show_country_selector: bool,
}

impl Default for PhoneDefaults {
    fn default() -> Self {
        Self {
            default_country: "RS".to_string(),
            show_country_selector: true,
        }
    }
}

impl FieldDefaults {
    /// Builds a new field of `field_type` with these defaults applied.
    ///
    /// Choice types always end up with at least one option; an empty
    /// configured list falls back to the built-in one.
    #[must_use]
    pub fn build_field(&self, id: FieldId, field_type: FieldType) -> FormField {
        let mut field = FormField::new(id, field_type, format!("{} field", field_type.wire_name()));
        field.placeholder = Some(String::new());

        if let Some(options) = self.options_for(field_type) {
            field.options = options;
        }
        match field_type {
            FieldType::Number => {
                field.min = self.number.min;
                field.max = self.number.max;
                field.step = Some(self.number.step);
            }
            FieldType::ColorPicker => {
                field.color_format = Some(self.color_picker.format);
                field.default_value =
                    Some(FieldValue::Text(self.color_picker.default_value.clone()));
            }
            FieldType::Phone => {
                field.default_country = Some(self.phone.default_country.clone());
                field.show_country_selector = Some(self.phone.show_country_selector);
            }
            _ => {}
        }

        field
    }

    /// The starting options for a choice type, or `None` for other types.
    /// Never returns an empty list.
    #[must_use]
    pub fn options_for(&self, field_type: FieldType) -> Option<Vec<FieldOption>> {
        match field_type {
            FieldType::Select | FieldType::Radio | FieldType::MultiSelect => Some(non_empty_or(
                &self.select.options,
                || SelectDefaults::default().options,
            )),
            FieldType::LikertScale => Some(non_empty_or(&self.likert.options, || {
                LikertDefaults::default().options
            })),
            _ => None,
        }
    }

    /// Gives a choice-type field with no options its default ones. Returns
    /// true if the field was changed.
    pub fn fill_missing_options(&self, field: &mut FormField) -> bool {
        if !field.options.is_empty() {
            return false;
        }
        match self.options_for(field.field_type) {
            Some(options) => {
                field.options = options;
                true
            }
            None => false,
        }
    }
}

fn non_empty_or(options: &[FieldOption], fallback: impl FnOnce() -> Vec<FieldOption>) -> Vec<FieldOption> {
    if options.is_empty() {
        fallback()
    } else {
        options.to_vec()
    }
}
