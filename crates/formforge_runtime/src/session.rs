//! Live form sessions: a loaded schema being filled in.
//!
//! A [`FormSession`] owns the controls built from a schema, the rule
//! subscription driving them, and the teardown signal that ends it.

use std::collections::BTreeMap;
use std::fmt;

use formforge_builder::{Notifier, TracingNotifier};
use formforge_engine::{
    Control, Controls, EngineConfig, FormGroup, RuleEngine, SubscriptionId, TeardownSignal,
    ValidationError,
};
use formforge_foundation::{Error, ErrorContext, FieldId, FieldValue, Result};
use formforge_model::FormSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Shown when a submission fails validation.
pub const INVALID_SUBMISSION_MESSAGE: &str = "Please fill out all required fields correctly.";

/// Shown after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Your response has been successfully submitted!";

/// Values collected from one submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Stored form id.
    pub form_id: String,
    /// Enabled controls' values.
    pub values: BTreeMap<FieldId, FieldValue>,
}

/// A schema opened for filling in.
pub struct FormSession {
    schema: FormSchema,
    group: FormGroup,
    teardown: TeardownSignal,
    subscription: Option<SubscriptionId>,
    notifier: Box<dyn Notifier>,
}

impl FormSession {
    /// Builds controls for every field and, if the schema has rules, starts
    /// the rule engine on them.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateFieldId`](formforge_foundation::ErrorKind::DuplicateFieldId)
    /// if two fields share an id.
    pub fn open(schema: FormSchema, config: EngineConfig) -> Result<Self> {
        schema.check_unique_ids().map_err(|e| {
            e.with_context(
                ErrorContext::new()
                    .with_operation("open form")
                    .with_source(schema.id.clone()),
            )
        })?;

        let mut controls = Controls::new();
        for field in &schema.fields {
            controls.insert(field.id.clone(), Control::for_field(field));
        }
        let mut group = FormGroup::with_controls(controls);

        let teardown = TeardownSignal::new();
        let rules = schema.all_rules();
        let subscription = if rules.is_empty() {
            None
        } else {
            Some(RuleEngine::new(config).process_rules(&mut group, rules, teardown.clone()))
        };

        debug!(form = %schema.id, fields = schema.fields.len(), "form session opened");
        Ok(Self {
            schema,
            group,
            teardown,
            subscription,
            notifier: Box::new(TracingNotifier),
        })
    }

    /// Replaces the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// The schema this session was opened from.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The live controls.
    #[must_use]
    pub fn group(&self) -> &FormGroup {
        &self.group
    }

    /// Returns a control.
    #[must_use]
    pub fn control(&self, id: &FieldId) -> Option<&Control> {
        self.group.get(id)
    }

    /// Returns true once the session has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.teardown.is_fired()
    }

    /// Writes a value; rules re-run before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::FieldNotFound`](formforge_foundation::ErrorKind::FieldNotFound)
    /// for an unknown id.
    pub fn set_value(&mut self, id: &FieldId, value: impl Into<FieldValue>) -> Result<()> {
        self.group.set_value(id, value)
    }

    /// Validation errors of one control. Disabled controls have none.
    #[must_use]
    pub fn errors(&self, id: &FieldId) -> Vec<ValidationError> {
        self.group.get(id).map(Control::errors).unwrap_or_default()
    }

    /// Returns true if every enabled control is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.group.controls().invalid_ids().is_empty()
    }

    /// Validates and collects the enabled controls' values, then resets the
    /// form.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidSubmission`](formforge_foundation::ErrorKind::InvalidSubmission)
    /// naming every invalid enabled control. Nothing is reset.
    pub fn submit(&mut self) -> Result<SubmissionPayload> {
        let invalid = self.group.controls().invalid_ids();
        if !invalid.is_empty() {
            self.notifier.error(INVALID_SUBMISSION_MESSAGE);
            debug!(form = %self.schema.id, invalid = invalid.len(), "submission rejected");
            return Err(Error::invalid_submission(invalid)
                .with_context(ErrorContext::new().with_operation("submit")));
        }

        let payload = SubmissionPayload {
            form_id: self.schema.id.clone(),
            values: self.group.value().into_iter().collect(),
        };
        self.notifier.success(SUBMITTED_MESSAGE);
        info!(form = %self.schema.id, values = payload.values.len(), "form submitted");
        self.reset();
        Ok(payload)
    }

    /// Restores every control's initial value and re-runs the rules.
    pub fn reset(&mut self) {
        self.group.controls_mut().reset_all();
        self.group.emit();
    }

    /// Ends the session. Later value changes no longer run rules.
    pub fn close(&mut self) {
        if self.teardown.fire() {
            if let Some(id) = self.subscription.take() {
                self.group.unsubscribe(id);
            }
            debug!(form = %self.schema.id, "form session closed");
        }
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("form", &self.schema.id)
            .field("group", &self.group)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
