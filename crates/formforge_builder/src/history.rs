//! Bounded undo/redo history of editor snapshots.
//!
//! The undo stack is a ring buffer: pushing past capacity evicts the oldest
//! entry. Every entry is an owned copy sharing nothing with live state.

use std::collections::VecDeque;

use formforge_foundation::FieldId;
use formforge_model::{FormField, FormTheme};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::DEFAULT_HISTORY_CAPACITY;

// =============================================================================
// Editor Snapshot
// =============================================================================

/// Everything undo/redo restores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    /// Fields in canvas order.
    pub fields: Vec<FormField>,
    /// Theme override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<FormTheme>,
    /// Selected field at the time of the snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_field_id: Option<FieldId>,
}

impl EditorSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(
        fields: Vec<FormField>,
        theme: Option<FormTheme>,
        selected_field_id: Option<FieldId>,
    ) -> Self {
        Self {
            fields,
            theme,
            selected_field_id,
        }
    }
}

// =============================================================================
// History Manager
// =============================================================================

/// Undo and redo stacks with a bounded undo depth.
#[derive(Clone, Debug)]
pub struct HistoryManager {
    /// Oldest first.
    undo: VecDeque<EditorSnapshot>,
    /// Most recently undone last.
    redo: Vec<EditorSnapshot>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryManager {
    /// Creates an empty history keeping at most `capacity` undo steps.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity.min(1024)),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Returns the maximum undo depth.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records `state` as an undo step and clears redo.
    ///
    /// A state equal to the newest undo entry is skipped entirely, leaving
    /// redo untouched.
    pub fn push_state(&mut self, state: &EditorSnapshot) {
        if self.undo.back() == Some(state) {
            trace!("history push skipped, state unchanged");
            return;
        }
        self.push_undo(state.clone());
        self.redo.clear();
        debug!(undo = self.undo.len(), "history state pushed");
    }

    /// Pops the newest undo step, saving `current` for redo.
    pub fn undo(&mut self, current: &EditorSnapshot) -> Option<EditorSnapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.clone());
        debug!(undo = self.undo.len(), redo = self.redo.len(), "undo");
        Some(previous)
    }

    /// Pops the newest redo step, saving `current` for undo.
    pub fn redo(&mut self, current: &EditorSnapshot) -> Option<EditorSnapshot> {
        let next = self.redo.pop()?;
        self.push_undo(current.clone());
        debug!(undo = self.undo.len(), redo = self.redo.len(), "redo");
        Some(next)
    }

    /// Empties both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Returns true if there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns true if there is something to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo steps.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo steps.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Returns the oldest retained undo step.
    #[must_use]
    pub fn oldest(&self) -> Option<&EditorSnapshot> {
        self.undo.front()
    }

    fn push_undo(&mut self, state: EditorSnapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.undo.len() >= self.capacity {
            self.undo.pop_front();
            trace!(capacity = self.capacity, "oldest undo step evicted");
        }
        self.undo.push_back(state);
    }
}
