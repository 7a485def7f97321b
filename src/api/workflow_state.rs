use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ChartConfiguration, Dataset, RenderedChart};
use crate::orchestrator::{RequestKind, RequestTracker};

use super::WorkflowSnapshot;

/// Intent family that raised the surfaced error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    Ingest,
    Render,
    Config,
    Export,
}

impl From<RequestKind> for ErrorSource {
    fn from(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Ingest => Self::Ingest,
            RequestKind::Render => Self::Render,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacedError {
    pub source: ErrorSource,
    pub message: String,
}

/// Everything the controller owns. Guarded by one mutex so every intent
/// publishes a consistent whole.
pub(super) struct WorkflowState {
    pub(super) dataset: Option<Arc<Dataset>>,
    pub(super) config: ChartConfiguration,
    pub(super) chart: Option<Arc<RenderedChart>>,
    pub(super) ingest: RequestTracker<Arc<Dataset>>,
    pub(super) render: RequestTracker<Arc<RenderedChart>>,
    pub(super) error: Option<SurfacedError>,
}

impl WorkflowState {
    #[must_use]
    pub(super) fn new(config: ChartConfiguration) -> Self {
        Self {
            dataset: None,
            config,
            chart: None,
            ingest: RequestTracker::new(RequestKind::Ingest),
            render: RequestTracker::new(RequestKind::Render),
            error: None,
        }
    }

    pub(super) fn raise(&mut self, source: ErrorSource, message: impl Into<String>) {
        self.error = Some(SurfacedError {
            source,
            message: message.into(),
        });
    }

    /// Clears the surfaced error when it was raised by `source`.
    pub(super) fn resolve(&mut self, source: ErrorSource) {
        if self.error.as_ref().is_some_and(|error| error.source == source) {
            self.error = None;
        }
    }

    #[must_use]
    pub(super) fn any_in_flight(&self) -> Option<RequestKind> {
        if self.render.is_in_flight() {
            Some(RequestKind::Render)
        } else if self.ingest.is_in_flight() {
            Some(RequestKind::Ingest)
        } else {
            None
        }
    }

    #[must_use]
    pub(super) fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            dataset: self.dataset.clone(),
            configuration: self.config.clone(),
            chart: self.chart.clone(),
            ingest_status: self.ingest.status(),
            render_status: self.render.status(),
            error: self.error.clone(),
        }
    }
}
