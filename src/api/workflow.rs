use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::{ChartConfiguration, Dataset, RenderedChart};
use crate::error::PlaygroundError;
use crate::export::ChartExporter;
use crate::orchestrator::{RequestOrchestrator, RequestStatus};

use super::observer_dispatch::{DispatchQueue, ObserverEntry};
use super::{ErrorClearPolicy, WorkflowSnapshot, workflow_state::WorkflowState};

/// Result of one user intent.
///
/// Intents never fail with `Err`: failures are folded into the surfaced
/// error and reported here for callers that want to branch on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Completed,
    /// The intent failed and its error is now the surfaced error.
    Failed(PlaygroundError),
    /// The intent was refused without touching state (single-flight).
    Rejected(PlaygroundError),
    /// Nothing to do.
    Skipped,
}

impl IntentOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub fn error(&self) -> Option<&PlaygroundError> {
        match self {
            Self::Failed(err) | Self::Rejected(err) => Some(err),
            Self::Completed | Self::Skipped => None,
        }
    }
}

/// Single source of truth for the chart playground UI.
///
/// Owns the dataset, chart configuration, last rendered chart and both
/// request trackers. Presentation layers read snapshots, subscribe with a
/// [`WorkflowObserver`](crate::extensions::WorkflowObserver), and forward
/// user actions as intents.
pub struct WorkflowController {
    pub(super) orchestrator: RequestOrchestrator,
    pub(super) exporter: Arc<dyn ChartExporter>,
    pub(super) error_clear_policy: ErrorClearPolicy,
    pub(super) state: Mutex<WorkflowState>,
    pub(super) observers: Mutex<Vec<ObserverEntry>>,
    pub(super) dispatch: Mutex<DispatchQueue>,
}

impl WorkflowController {
    /// Consistent copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.lock_state().snapshot()
    }

    #[must_use]
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.lock_state().dataset.clone()
    }

    #[must_use]
    pub fn configuration(&self) -> ChartConfiguration {
        self.lock_state().config.clone()
    }

    #[must_use]
    pub fn chart(&self) -> Option<Arc<RenderedChart>> {
        self.lock_state().chart.clone()
    }

    #[must_use]
    pub fn ingest_status(&self) -> RequestStatus {
        self.lock_state().ingest.status()
    }

    #[must_use]
    pub fn render_status(&self) -> RequestStatus {
        self.lock_state().render.status()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.snapshot().is_busy()
    }

    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.snapshot().can_generate()
    }

    #[must_use]
    pub fn can_export(&self) -> bool {
        self.snapshot().can_export()
    }

    #[must_use]
    pub fn y_column_applicable(&self) -> bool {
        self.snapshot().y_column_applicable()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.snapshot().error_message().map(str::to_owned)
    }

    #[must_use]
    pub fn error_clear_policy(&self) -> ErrorClearPolicy {
        self.error_clear_policy
    }

    // Poisoning is recovered: state is only ever changed by whole-field
    // assignments, so a panicking observer can not leave it half-written.
    pub(super) fn lock_state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn lock_observers(&self) -> MutexGuard<'_, Vec<ObserverEntry>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
