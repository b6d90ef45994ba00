//! Keeps a [`FormGroup`]'s controls in step with the canvas fields.

use std::collections::HashSet;

use formforge_engine::{Control, FormGroup};
use formforge_foundation::FieldId;
use formforge_model::FormField;
use tracing::debug;

/// Controls added and removed by one synchronization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Ids that gained a control, in canvas order.
    pub added: Vec<FieldId>,
    /// Ids whose control was dropped.
    pub removed: Vec<FieldId>,
}

impl SyncReport {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Reconciles controls with fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSynchronizer;

impl ControlSynchronizer {
    /// Drops controls whose field is gone and creates controls for new
    /// fields. Existing controls keep their values.
    ///
    /// Emits one value change if anything changed, so subscribed rules see
    /// the new control set.
    pub fn sync(fields: &[FormField], group: &mut FormGroup) -> SyncReport {
        let wanted: HashSet<&FieldId> = fields.iter().map(|f| &f.id).collect();
        let controls = group.controls_mut();

        let removed: Vec<FieldId> = controls
            .ids()
            .filter(|id| !wanted.contains(id))
            .cloned()
            .collect();
        for id in &removed {
            controls.remove(id);
        }

        let mut added = Vec::new();
        for field in fields {
            if !controls.contains(&field.id) {
                controls.insert(field.id.clone(), Control::for_field(field));
                added.push(field.id.clone());
            }
        }

        let report = SyncReport { added, removed };
        if !report.is_empty() {
            debug!(
                added = report.added.len(),
                removed = report.removed.len(),
                "controls synchronized"
            );
            group.emit();
        }
        report
    }
}
