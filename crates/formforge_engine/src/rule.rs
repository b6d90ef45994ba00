//! Rule engine: evaluates rules against value snapshots and applies their
//! actions to controls.
//!
//! # Action policy
//!
//! Visibility and required actions always toggle: they apply their effect
//! when the rule's conditions hold and the inverse when they don't.
//! `SetValue` and `ClearValue` only act when the conditions hold. When
//! several rules touch one control, rules apply in order and the last write
//! wins.

use formforge_foundation::ValueSnapshot;
use formforge_model::{Action, ActionType, Rule};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::compare::ComparisonPolicy;
use crate::control::Controls;
use crate::evaluate::evaluate_all;
use crate::group::{FormGroup, SubscriptionId};
use crate::teardown::TeardownSignal;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the rule engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// How leaf conditions compare values of different types.
    pub comparison: ComparisonPolicy,
}

impl EngineConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comparison policy.
    #[must_use]
    pub fn with_comparison(mut self, comparison: ComparisonPolicy) -> Self {
        self.comparison = comparison;
        self
    }
}

// =============================================================================
// Apply Report
// =============================================================================

/// What one pass over a rule set did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Rules whose conditions all held.
    pub rules_met: usize,
    /// Actions that touched a control.
    pub actions_applied: usize,
    /// Actions that did nothing: missing target, unknown kind, or a
    /// value action whose rule was not met.
    pub actions_skipped: usize,
}

impl ApplyReport {
    fn merge(&mut self, other: Self) {
        self.rules_met += other.rules_met;
        self.actions_applied += other.actions_applied;
        self.actions_skipped += other.actions_skipped;
    }
}

// =============================================================================
// Rule Engine
// =============================================================================

/// Evaluates rules and applies their actions.
#[derive(Clone, Debug, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns true if every top-level condition of `rule` holds.
    #[must_use]
    pub fn evaluate_rule(&self, rule: &Rule, values: &ValueSnapshot) -> bool {
        evaluate_all(&rule.conditions, values, self.config.comparison)
    }

    /// Evaluates each rule against `values` and applies its actions, in order.
    pub fn apply_rules(
        &self,
        rules: &[Rule],
        values: &ValueSnapshot,
        controls: &mut Controls,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();
        for rule in rules {
            report.merge(self.apply_rule(rule, values, controls));
        }
        report
    }

    /// Evaluates one rule and applies its actions.
    pub fn apply_rule(
        &self,
        rule: &Rule,
        values: &ValueSnapshot,
        controls: &mut Controls,
    ) -> ApplyReport {
        let met = self.evaluate_rule(rule, values);
        trace!(rule = %rule.id, met, "rule evaluated");

        let mut report = ApplyReport {
            rules_met: usize::from(met),
            ..ApplyReport::default()
        };
        for action in &rule.actions {
            if execute_action(action, met, controls) {
                report.actions_applied += 1;
            } else {
                report.actions_skipped += 1;
            }
        }
        report
    }

    /// Applies `rules` to the group now, then again on every value change
    /// until `teardown` fires.
    ///
    /// Nothing runs if `teardown` has already fired.
    pub fn process_rules(
        &self,
        group: &mut FormGroup,
        rules: Vec<Rule>,
        teardown: TeardownSignal,
    ) -> SubscriptionId {
        debug!(rules = rules.len(), "processing rules");
        if !teardown.is_fired() {
            let snapshot = group.snapshot();
            let report = self.apply_rules(&rules, &snapshot, group.controls_mut());
            trace!(?report, "initial rule pass");
        }

        let engine = self.clone();
        group.subscribe(
            Box::new(move |snapshot, controls| {
                let report = engine.apply_rules(&rules, snapshot, controls);
                trace!(?report, "rule pass");
            }),
            teardown,
        )
    }
}

/// Applies one action. Returns true if a control was touched.
fn execute_action(action: &Action, met: bool, controls: &mut Controls) -> bool {
    let Some(control) = controls.get_mut(&action.target_field_id) else {
        trace!(field = %action.target_field_id, "action target missing, skipped");
        return false;
    };
    match action.action_type {
        ActionType::Show | ActionType::Enable => control.set_enabled(met),
        ActionType::Hide | ActionType::Disable => control.set_enabled(!met),
        ActionType::SetRequired => control.set_rule_required(met),
        ActionType::SetValue if met => {
            control.set_value(action.value.clone().unwrap_or_default());
        }
        ActionType::ClearValue if met => control.reset(),
        ActionType::SetValue | ActionType::ClearValue | ActionType::Unknown => return false,
    }
    true
}
