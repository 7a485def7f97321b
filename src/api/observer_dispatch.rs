use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::extensions::{WorkflowEvent, WorkflowObserver};

use super::{WorkflowController, WorkflowSnapshot, workflow_state::WorkflowState};

/// Registered observer. The id is stored outside the observer lock so the
/// registry can be queried while that observer is being notified.
#[derive(Clone)]
pub(super) struct ObserverEntry {
    pub(super) id: String,
    pub(super) observer: Arc<Mutex<Box<dyn WorkflowObserver>>>,
}

impl ObserverEntry {
    pub(super) fn new(observer: Box<dyn WorkflowObserver>) -> Self {
        Self {
            id: observer.id().to_owned(),
            observer: Arc::new(Mutex::new(observer)),
        }
    }
}

/// Notifications waiting for delivery. At most one thread drains at a time.
#[derive(Default)]
pub(super) struct DispatchQueue {
    pending: VecDeque<(WorkflowEvent, WorkflowSnapshot)>,
    draining: bool,
}

impl WorkflowController {
    /// Ends an intent: snapshots `state`, releases it and notifies observers.
    ///
    /// Notifications are queued before the state is released, so observers
    /// see transitions in the order they happened. No controller lock is held
    /// while an observer runs; an intent forwarded from a callback is queued
    /// and delivered by the same drain loop once the current event is done.
    pub(super) fn commit(&self, state: MutexGuard<'_, WorkflowState>, event: WorkflowEvent) {
        let snapshot = state.snapshot();
        let mut queue = self.lock_dispatch();
        queue.pending.push_back((event, snapshot));
        drop(state);

        if queue.draining {
            return;
        }
        queue.draining = true;
        drop(queue);

        let _reset = DrainReset(self);
        while let Some((event, snapshot)) = self.next_notification() {
            let observers = self.lock_observers().clone();
            trace!(?event, observers = observers.len(), "publishing state change");
            for entry in &observers {
                entry
                    .observer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .on_state_changed(&event, &snapshot);
            }
        }
    }

    fn next_notification(&self) -> Option<(WorkflowEvent, WorkflowSnapshot)> {
        let mut queue = self.lock_dispatch();
        let next = queue.pending.pop_front();
        if next.is_none() {
            queue.draining = false;
        }
        next
    }

    pub(super) fn lock_dispatch(&self) -> MutexGuard<'_, DispatchQueue> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// A panicking observer must not leave the queue marked as draining, or no
// later notification would ever be delivered.
struct DrainReset<'a>(&'a WorkflowController);

impl Drop for DrainReset<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock_dispatch().draining = false;
        }
    }
}
