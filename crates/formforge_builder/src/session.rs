//! An editing session: the store, its preview controls, and the preview's
//! rule subscription, owned together.

use formforge_engine::{FormGroup, RuleEngine, SubscriptionId, TeardownSignal};
use formforge_model::flatten_rules;
use tracing::debug;

use crate::command::KeyChord;
use crate::config::BuilderConfig;
use crate::store::BuilderStore;
use crate::sync::{ControlSynchronizer, SyncReport};

/// Context object for one form-builder session.
///
/// Dropping the session ends it.
#[derive(Debug)]
pub struct EditorSession {
    store: BuilderStore,
    group: FormGroup,
    engine: RuleEngine,
    preview: Option<(SubscriptionId, TeardownSignal)>,
    ended: TeardownSignal,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(BuilderStore::default())
    }
}

impl EditorSession {
    /// Starts a session around `store`, synchronizing controls and wiring the
    /// preview rules immediately.
    #[must_use]
    pub fn new(store: BuilderStore) -> Self {
        let engine = RuleEngine::new(store.config().engine.clone());
        let mut session = Self {
            store,
            group: FormGroup::new(),
            engine,
            preview: None,
            ended: TeardownSignal::new(),
        };
        session.sync();
        session.refresh_preview();
        session
    }

    /// Starts a session with a fresh store built from `config`.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        Self::new(BuilderStore::new(config))
    }

    /// The editing state.
    #[must_use]
    pub fn store(&self) -> &BuilderStore {
        &self.store
    }

    /// The preview controls.
    #[must_use]
    pub fn group(&self) -> &FormGroup {
        &self.group
    }

    /// The preview controls, mutably (for entering preview values).
    pub fn group_mut(&mut self) -> &mut FormGroup {
        &mut self.group
    }

    /// Returns true once [`end`](Self::end) has run.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended.is_fired()
    }

    /// Reconciles the preview controls with the canvas fields.
    pub fn sync(&mut self) -> SyncReport {
        ControlSynchronizer::sync(self.store.fields(), &mut self.group)
    }

    /// Replaces the preview's rule subscription with one over the current
    /// rules. Does nothing once the session has ended.
    ///
    /// Rule-driven state left by the previous rules is cleared first, so a
    /// removed rule stops affecting its targets.
    pub fn refresh_preview(&mut self) -> Option<SubscriptionId> {
        self.drop_preview();
        if self.is_ended() {
            return None;
        }
        let cleared = self.group.controls_mut().clear_rule_effects();
        let rules = flatten_rules(self.store.fields());
        let teardown = TeardownSignal::new();
        debug!(rules = rules.len(), cleared, "preview rules refreshed");
        let id = self
            .engine
            .process_rules(&mut self.group, rules, teardown.clone());
        self.preview = Some((id, teardown));
        Some(id)
    }

    fn drop_preview(&mut self) {
        if let Some((id, teardown)) = self.preview.take() {
            teardown.fire();
            self.group.unsubscribe(id);
        }
    }

    /// Runs an edit against the store, then resynchronizes the preview.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut BuilderStore) -> R) -> R {
        let result = f(&mut self.store);
        self.sync();
        self.refresh_preview();
        result
    }

    /// Handles a key press. Returns true if it changed the canvas.
    pub fn handle_key(&mut self, chord: &KeyChord, input_focused: bool) -> bool {
        match chord.command(input_focused) {
            Some(command) => self.edit(|store| store.dispatch(command)),
            None => false,
        }
    }

    /// Ends the session: the preview subscription is torn down for good.
    pub fn end(&mut self) {
        if self.ended.fire() {
            self.drop_preview();
            debug!("editor session ended");
        }
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.end();
    }
}
