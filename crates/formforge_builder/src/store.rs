//! The form-builder editing state machine.
//!
//! [`BuilderStore`] owns the canvas fields, selection, theme, and undo
//! history of one editing session. Every mutating operation records the
//! current state in history before changing anything; selection changes are
//! not recorded.

use std::fmt;

use formforge_foundation::{
    Error, ErrorContext, FieldId, IdGenerator, RandomIds, Result, RuleId,
};
use formforge_model::{FieldPatch, FieldType, FormField, FormSchema, FormSchemaPayload, FormTheme};
use tracing::{debug, info, trace};

use crate::command::EditorCommand;
use crate::config::BuilderConfig;
use crate::history::{EditorSnapshot, HistoryManager};
use crate::notify::{Notifier, TracingNotifier};

/// Editing state for one form.
pub struct BuilderStore {
    fields: Vec<FormField>,
    selected: Option<FieldId>,
    theme: Option<FormTheme>,
    name: String,
    description: Option<String>,
    form_id: Option<String>,
    history: HistoryManager,
    notifier: Box<dyn Notifier>,
    ids: Box<dyn IdGenerator>,
    config: BuilderConfig,
}

impl Default for BuilderStore {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl BuilderStore {
    /// Creates an empty store with random ids and tracing notifications.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            fields: Vec::new(),
            selected: None,
            theme: None,
            name: config.default_name.clone(),
            description: None,
            form_id: None,
            history: HistoryManager::new(config.history_capacity),
            notifier: Box::new(TracingNotifier),
            ids: Box::new(RandomIds),
            config,
        }
    }

    /// Replaces the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Replaces the id source.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Fields in canvas order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Returns a field by id.
    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// The selected field.
    #[must_use]
    pub fn selected(&self) -> Option<&FormField> {
        self.selected.as_ref().and_then(|id| self.field(id))
    }

    /// The selected field's id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    /// Theme override.
    #[must_use]
    pub fn theme(&self) -> Option<&FormTheme> {
        self.theme.as_ref()
    }

    /// Form name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the form. Not recorded in history.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Description of a loaded form.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Stored id of the form being edited, if any.
    #[must_use]
    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    /// Returns true when editing a stored form rather than creating one.
    #[must_use]
    pub fn is_edit_mode(&self) -> bool {
        self.form_id.is_some()
    }

    /// Heading for the editor page.
    #[must_use]
    pub fn page_title(&self) -> &'static str {
        if self.is_edit_mode() {
            "Edit Form"
        } else {
            "Create New Form"
        }
    }

    /// Undo/redo history.
    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Returns true if there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there is something to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// The current fields, theme, and selection.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot::new(self.fields.clone(), self.theme.clone(), self.selected.clone())
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    fn record(&mut self) {
        let state = self.snapshot();
        self.history.push_state(&state);
    }

    fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    fn fresh_field_id(&mut self) -> FieldId {
        loop {
            let id = self.ids.next_field_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Appends a new field of `field_type` with its defaults and selects it.
    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        self.record();
        let id = self.fresh_field_id();
        let field = self.config.field_defaults.build_field(id.clone(), field_type);
        self.fields.push(field);
        self.selected = Some(id.clone());
        debug!(field = %id, %field_type, "field added");
        id
    }

    /// Removes a field. Returns false, recording nothing, if it is absent.
    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.record();
        self.fields.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.notifier.success("Field removed");
        debug!(field = %id, "field removed");
        true
    }

    /// Inserts a deep copy of a field right after it and selects the copy.
    ///
    /// The copy gets a new id, a suffixed label, and fresh ids for its rules.
    ///
    /// # Errors
    /// Returns [`ErrorKind::FieldNotFound`](formforge_foundation::ErrorKind::FieldNotFound)
    /// without changing anything if `id` is absent.
    pub fn duplicate_field(&mut self, id: &FieldId) -> Result<FieldId> {
        let Some(index) = self.position(id) else {
            self.notifier.error("Field not found for duplication.");
            return Err(Error::field_not_found(id.clone())
                .with_context(ErrorContext::new().with_operation("duplicate_field")));
        };
        self.record();

        let mut copy = self.fields[index].clone();
        copy.id = self.fresh_field_id();
        copy.label = format!("{}{}", copy.label, self.config.copy_suffix);
        for rule in &mut copy.rules {
            rule.id = self.ids.next_rule_id();
        }

        let new_id = copy.id.clone();
        self.fields.insert(index + 1, copy);
        self.selected = Some(new_id.clone());
        self.notifier.success("Field duplicated successfully.");
        debug!(source = %id, copy = %new_id, "field duplicated");
        Ok(new_id)
    }

    /// Moves the field at `from` to `to`. Indices are clamped to the canvas.
    /// Returns false when nothing moves.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> bool {
        let Some(last) = self.fields.len().checked_sub(1) else {
            return false;
        };
        let (from, to) = (from.min(last), to.min(last));
        if from == to {
            return false;
        }
        self.record();
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        debug!(from, to, "fields reordered");
        true
    }

    /// Merges `patch` into the selected field. Returns false without a
    /// selection.
    ///
    /// A choice field left without options gets its default ones back. When
    /// the patch replaces rules, other fields holding a rule with the same id
    /// receive the new version, and lose it if it was dropped.
    pub fn update_field(&mut self, patch: FieldPatch) -> bool {
        let Some(index) = self.selected.as_ref().and_then(|id| self.position(id)) else {
            return false;
        };
        self.record();
        let replaces_rules = patch.rules.is_some();
        let previous: Vec<RuleId> = self.fields[index]
            .rules
            .iter()
            .map(|r| r.id.clone())
            .collect();

        let field = &mut self.fields[index];
        field.apply(patch);
        if self.config.field_defaults.fill_missing_options(field) {
            debug!(field = %field.id, "default options restored");
        }
        if replaces_rules {
            self.share_rules(index, &previous);
        }
        true
    }

    fn share_rules(&mut self, owner: usize, previous: &[RuleId]) {
        let rules = self.fields[owner].rules.clone();
        for (i, field) in self.fields.iter_mut().enumerate() {
            if i == owner {
                continue;
            }
            field.rules.retain(|held| {
                !previous.contains(&held.id) || rules.iter().any(|r| r.id == held.id)
            });
            for held in &mut field.rules {
                if let Some(updated) = rules.iter().find(|r| r.id == held.id && **r != *held) {
                    held.clone_from(updated);
                    trace!(rule = %held.id, field = %field.id, "shared rule updated");
                }
            }
        }
    }

    /// Replaces the theme.
    pub fn update_theme(&mut self, theme: FormTheme) {
        self.record();
        self.theme = Some(theme);
    }

    /// Selects a field, or clears the selection with `None`.
    ///
    /// Selecting an unknown id clears the selection and returns false.
    pub fn select_field(&mut self, id: Option<&FieldId>) -> bool {
        match id {
            Some(id) if self.position(id).is_some() => {
                self.selected = Some(id.clone());
                true
            }
            Some(_) => {
                self.selected = None;
                false
            }
            None => {
                self.selected = None;
                true
            }
        }
    }

    fn apply_snapshot(&mut self, state: EditorSnapshot) {
        let EditorSnapshot {
            fields,
            theme,
            selected_field_id,
        } = state;
        self.fields = fields;
        self.theme = theme;
        self.selected = selected_field_id.filter(|id| self.position(id).is_some());
    }

    /// Restores the previous state. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(previous) = self.history.undo(&current) else {
            return false;
        };
        self.apply_snapshot(previous);
        self.notifier.info("Action undone");
        true
    }

    /// Reapplies the last undone state. Returns false if there was none.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(next) = self.history.redo(&current) else {
            return false;
        };
        self.apply_snapshot(next);
        self.notifier.info("Action redone");
        true
    }

    /// Runs a keyboard command. Returns true if it changed something.
    pub fn dispatch(&mut self, command: EditorCommand) -> bool {
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::DuplicateSelected => match self.selected.clone() {
                Some(id) => self.duplicate_field(&id).is_ok(),
                None => false,
            },
            EditorCommand::RemoveSelected => match self.selected.clone() {
                Some(id) => self.remove_field(&id),
                None => false,
            },
        }
    }

    // -------------------------------------------------------------------------
    // Load / Save
    // -------------------------------------------------------------------------

    /// Opens a stored form for editing.
    ///
    /// Schema-level rules are attached to every field they reference.
    /// Selection and history are cleared.
    ///
    /// # Errors
    /// Returns [`ErrorKind::DuplicateFieldId`](formforge_foundation::ErrorKind::DuplicateFieldId)
    /// without changing anything if two fields share an id.
    pub fn load_schema(&mut self, schema: FormSchema) -> Result<()> {
        self.replace_with(&schema)?;
        self.name = schema.name;
        self.description = schema.description;
        self.form_id = Some(schema.id);
        info!(form = %self.name, fields = self.fields.len(), "form loaded for editing");
        Ok(())
    }

    /// Starts a new form from a generated schema. The result is unsaved, so
    /// saving creates a new form.
    ///
    /// # Errors
    /// Returns [`ErrorKind::DuplicateFieldId`](formforge_foundation::ErrorKind::DuplicateFieldId)
    /// without changing anything if two fields share an id.
    pub fn load_generated(&mut self, schema: FormSchema) -> Result<()> {
        self.replace_with(&schema)?;
        self.name = if schema.name.is_empty() {
            self.config.generated_name.clone()
        } else {
            schema.name
        };
        self.description = schema.description;
        self.form_id = None;
        info!(form = %self.name, fields = self.fields.len(), "generated form loaded");
        Ok(())
    }

    fn replace_with(&mut self, schema: &FormSchema) -> Result<()> {
        schema.check_unique_ids().map_err(|e| {
            e.with_context(
                ErrorContext::new()
                    .with_operation("load_schema")
                    .with_source(schema.name.clone()),
            )
        })?;
        self.fields = schema.fields_with_rules();
        self.theme.clone_from(&schema.theme);
        self.selected = None;
        self.history.clear();
        Ok(())
    }

    /// Builds the payload for saving the canvas.
    ///
    /// # Errors
    /// Returns [`ErrorKind::EmptyForm`](formforge_foundation::ErrorKind::EmptyForm)
    /// if the canvas has no fields.
    pub fn prepare_save(&self) -> Result<FormSchemaPayload> {
        if self.fields.is_empty() {
            self.notifier.info("Cannot save an empty form.");
            return Err(Error::empty_form()
                .with_context(ErrorContext::new().with_operation("prepare_save")));
        }
        Ok(FormSchemaPayload::from_fields(
            self.name.clone(),
            self.config.save_description.clone(),
            &self.fields,
            self.theme.clone(),
        ))
    }

    /// Finishes a save the collaborator accepted: clears history and
    /// announces the result.
    pub fn complete_save(&mut self, saved_name: &str) {
        self.history.clear();
        let verb = if self.is_edit_mode() {
            "updated"
        } else {
            "created"
        };
        self.notifier
            .success(&format!("Form \"{saved_name}\" has been successfully {verb}!"));
        info!(form = %saved_name, verb, "form saved");
    }
}

impl fmt::Debug for BuilderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderStore")
            .field("name", &self.name)
            .field("form_id", &self.form_id)
            .field("fields", &self.fields.len())
            .field("selected", &self.selected)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
