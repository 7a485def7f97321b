use std::sync::Arc;

use crate::core::{ChartConfiguration, Dataset, RenderedChart};
use crate::orchestrator::RequestStatus;

use super::{ErrorSource, SurfacedError};

/// Point-in-time copy of the workflow state.
///
/// The derived flags are computed from the stored fields on every call and
/// are never cached, so they can not drift from the state they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    pub(super) dataset: Option<Arc<Dataset>>,
    pub(super) configuration: ChartConfiguration,
    pub(super) chart: Option<Arc<RenderedChart>>,
    pub(super) ingest_status: RequestStatus,
    pub(super) render_status: RequestStatus,
    pub(super) error: Option<SurfacedError>,
}

impl WorkflowSnapshot {
    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_deref()
    }

    #[must_use]
    pub fn configuration(&self) -> &ChartConfiguration {
        &self.configuration
    }

    #[must_use]
    pub fn chart(&self) -> Option<&RenderedChart> {
        self.chart.as_deref()
    }

    #[must_use]
    pub fn ingest_status(&self) -> RequestStatus {
        self.ingest_status
    }

    #[must_use]
    pub fn render_status(&self) -> RequestStatus {
        self.render_status
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.ingest_status == RequestStatus::InFlight
            || self.render_status == RequestStatus::InFlight
    }

    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.dataset.is_some() && !self.configuration.x_column().is_empty() && !self.is_busy()
    }

    #[must_use]
    pub fn can_export(&self) -> bool {
        self.chart.is_some()
    }

    #[must_use]
    pub fn y_column_applicable(&self) -> bool {
        self.configuration.y_column_applicable()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|error| error.message.as_str())
    }

    #[must_use]
    pub fn error_source(&self) -> Option<ErrorSource> {
        self.error.as_ref().map(|error| error.source)
    }
}
