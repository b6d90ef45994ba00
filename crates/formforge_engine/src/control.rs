//! Live form controls and the mutable view handed to value-change handlers.

use std::collections::BTreeMap;

use formforge_foundation::{FieldId, FieldValue, ValueSnapshot};
use formforge_model::{FieldType, FormField};

use crate::validate::{ValidationError, Validator, is_missing, validators_for};

// =============================================================================
// Control
// =============================================================================

/// The live state of one field.
#[derive(Clone, Debug)]
pub struct Control {
    field_type: FieldType,
    value: FieldValue,
    initial: FieldValue,
    enabled: bool,
    required: bool,
    rule_required: bool,
    validators: Vec<Validator>,
    dirty: bool,
}

impl Control {
    /// Creates an enabled, optional control with no validators.
    #[must_use]
    pub fn new(field_type: FieldType, initial: FieldValue) -> Self {
        Self {
            field_type,
            value: initial.clone(),
            initial,
            enabled: true,
            required: false,
            rule_required: false,
            validators: Vec::new(),
            dirty: false,
        }
    }

    /// Creates a control for `field`: its initial value, static required
    /// flag, and declared plus implicit validators.
    #[must_use]
    pub fn for_field(field: &FormField) -> Self {
        Self::new(field.field_type, field.initial_value())
            .with_required(field.required)
            .with_validators(validators_for(field))
    }

    /// Sets the static required flag.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replaces the validators.
    #[must_use]
    pub fn with_validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators = validators;
        self
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Returns the value the control was created with.
    #[must_use]
    pub fn initial_value(&self) -> &FieldValue {
        &self.initial
    }

    /// Writes a value and marks the control dirty.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.dirty = true;
    }

    /// Restores the initial value and clears the dirty flag.
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.dirty = false;
    }

    /// Returns true if the control participates in submission and validation.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the control.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if a value is required, statically or by a rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required || self.rule_required || self.validators.iter().any(Validator::is_required)
    }

    /// Returns the rule-driven required marker.
    #[must_use]
    pub fn is_rule_required(&self) -> bool {
        self.rule_required
    }

    /// Sets the rule-driven required marker. The static flag is untouched.
    pub fn set_rule_required(&mut self, required: bool) {
        self.rule_required = required;
    }

    /// Returns true if a rule has disabled the control or marked it required.
    #[must_use]
    pub fn has_rule_effects(&self) -> bool {
        !self.is_enabled() || self.is_rule_required()
    }

    /// Undoes everything rules can toggle: re-enables the control and clears
    /// the rule-required marker. Values are left alone.
    pub fn clear_rule_effects(&mut self) {
        self.enabled = true;
        self.rule_required = false;
    }

    /// Returns true once the value has been written since creation or reset.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Runs every check. Disabled controls are always valid.
    #[must_use]
    pub fn errors(&self) -> Vec<ValidationError> {
        if !self.enabled {
            return Vec::new();
        }
        let mut errors = Vec::new();
        let declared_required = self.validators.iter().any(Validator::is_required);
        if (self.required || self.rule_required)
            && !declared_required
            && is_missing(&self.value, self.field_type)
        {
            errors.push(ValidationError::required());
        }
        errors.extend(
            self.validators
                .iter()
                .filter_map(|v| v.check(&self.value, self.field_type)),
        );
        errors
    }

    /// Returns true if [`errors`](Self::errors) is empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

// =============================================================================
// Controls
// =============================================================================

/// An ordered set of controls keyed by field id.
///
/// Value-change handlers receive `&mut Controls`: they can read and write any
/// control, but nothing here emits, so writes made from a handler never
/// trigger another round of handlers.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    entries: BTreeMap<FieldId, Control>,
    order: Vec<FieldId>,
}

impl Controls {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a control. New ids go to the end of the order.
    pub fn insert(&mut self, id: FieldId, control: Control) -> Option<Control> {
        let previous = self.entries.insert(id.clone(), control);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Removes a control.
    pub fn remove(&mut self, id: &FieldId) -> Option<Control> {
        let removed = self.entries.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Returns a control.
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&Control> {
        self.entries.get(id)
    }

    /// Returns a control mutably.
    pub fn get_mut(&mut self, id: &FieldId) -> Option<&mut Control> {
        self.entries.get_mut(id)
    }

    /// Returns true if a control exists for `id`.
    #[must_use]
    pub fn contains(&self, id: &FieldId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.order.iter()
    }

    /// Controls in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Control)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|c| (id, c)))
    }

    /// Writes a value without notifying anyone. Returns false if `id` is unknown.
    pub fn set_value(&mut self, id: &FieldId, value: FieldValue) -> bool {
        match self.entries.get_mut(id) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Every control's value, enabled or not.
    #[must_use]
    pub fn snapshot(&self) -> ValueSnapshot {
        self.entries
            .iter()
            .map(|(id, c)| (id.clone(), c.value.clone()))
            .collect()
    }

    /// Values of enabled controls only.
    #[must_use]
    pub fn value(&self) -> ValueSnapshot {
        self.entries
            .iter()
            .filter(|(_, c)| c.enabled)
            .map(|(id, c)| (id.clone(), c.value.clone()))
            .collect()
    }

    /// Ids of enabled controls that fail validation, in insertion order.
    #[must_use]
    pub fn invalid_ids(&self) -> Vec<FieldId> {
        self.iter()
            .filter(|(_, c)| !c.is_valid())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Clears rule-driven state on every control. Returns how many controls
    /// carried any.
    pub fn clear_rule_effects(&mut self) -> usize {
        let mut cleared = 0;
        for control in self.entries.values_mut() {
            if control.has_rule_effects() {
                control.clear_rule_effects();
                cleared += 1;
            }
        }
        cleared
    }

    /// Resets every control to its initial value.
    pub fn reset_all(&mut self) {
        for control in self.entries.values_mut() {
            control.reset();
        }
    }
}
