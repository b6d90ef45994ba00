//! A set of controls plus the subscribers to its value changes.
//!
//! Every value change emits one consolidated [`ValueSnapshot`] to each live
//! subscriber, synchronously. Subscribers get `&mut Controls` rather than the
//! group, so nothing they do can emit again.

use std::fmt;

use formforge_foundation::{Error, FieldId, FieldValue, Result, ValueSnapshot};
use tracing::trace;

use crate::control::{Control, Controls};
use crate::teardown::TeardownSignal;

/// Callback invoked with each consolidated snapshot.
pub type ValueHandler = Box<dyn FnMut(&ValueSnapshot, &mut Controls)>;

/// Identifies one subscription on a [`FormGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    teardown: TeardownSignal,
    handler: ValueHandler,
}

/// Controls with a synchronous value-change stream.
#[derive(Default)]
pub struct FormGroup {
    controls: Controls,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl FormGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group over existing controls.
    #[must_use]
    pub fn with_controls(controls: Controls) -> Self {
        Self {
            controls,
            ..Self::default()
        }
    }

    /// Returns the controls.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Returns the controls for silent structural edits. Call
    /// [`emit`](Self::emit) afterwards if subscribers should see them.
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Returns a control.
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&Control> {
        self.controls.get(id)
    }

    /// Writes a value and emits.
    ///
    /// # Errors
    /// Returns [`ErrorKind::FieldNotFound`](formforge_foundation::ErrorKind::FieldNotFound)
    /// if no control has this id.
    pub fn set_value(&mut self, id: &FieldId, value: impl Into<FieldValue>) -> Result<()> {
        if !self.controls.set_value(id, value.into()) {
            return Err(Error::field_not_found(id.clone()));
        }
        self.emit();
        Ok(())
    }

    /// Every control's value, enabled or not.
    #[must_use]
    pub fn snapshot(&self) -> ValueSnapshot {
        self.controls.snapshot()
    }

    /// Values of enabled controls only.
    #[must_use]
    pub fn value(&self) -> ValueSnapshot {
        self.controls.value()
    }

    /// Registers a handler that runs on every emission until `teardown` fires
    /// or it is unsubscribed.
    pub fn subscribe(&mut self, handler: ValueHandler, teardown: TeardownSignal) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            teardown,
            handler,
        });
        trace!(subscription = id.0, "subscribed");
        id
    }

    /// Removes a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    /// Number of subscribers whose teardown has not fired.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|s| !s.teardown.is_fired())
            .count()
    }

    /// Sends the current snapshot to every live subscriber. Returns how many
    /// handlers ran.
    pub fn emit(&mut self) -> usize {
        self.subscribers.retain(|s| !s.teardown.is_fired());
        let snapshot = self.controls.snapshot();
        let mut delivered = 0;
        for subscriber in &mut self.subscribers {
            if subscriber.teardown.is_fired() {
                continue;
            }
            (subscriber.handler)(&snapshot, &mut self.controls);
            delivered += 1;
        }
        trace!(delivered, controls = snapshot.len(), "value change emitted");
        delivered
    }
}

impl fmt::Debug for FormGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormGroup")
            .field("controls", &self.controls)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
