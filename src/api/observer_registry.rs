use crate::error::{PlaygroundError, PlaygroundResult};
use crate::extensions::WorkflowObserver;

use super::{WorkflowController, observer_dispatch::ObserverEntry};

impl WorkflowController {
    /// Registers an observer with unique identifier.
    ///
    /// Safe to call from inside an observer callback; the new observer
    /// receives notifications from the next event on.
    pub fn register_observer(&self, observer: Box<dyn WorkflowObserver>) -> PlaygroundResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(PlaygroundError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        let mut observers = self.lock_observers();
        if observers.iter().any(|entry| entry.id == observer_id) {
            return Err(PlaygroundError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        observers.push(ObserverEntry::new(observer));
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&self, observer_id: &str) -> bool {
        let mut observers = self.lock_observers();
        if let Some(position) = observers.iter().position(|entry| entry.id == observer_id) {
            observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.lock_observers()
            .iter()
            .any(|observer| observer.id == observer_id)
    }
}
