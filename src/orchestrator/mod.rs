//! Single-flight wrapper around the two remote operations.
//!
//! The orchestrator admits and settles requests on [`RequestTracker`]s owned
//! by the caller, and performs the network half of each operation without
//! holding any state of its own. This keeps every tracker transition in the
//! hands of one component while the owner decides when state is published.

mod request_state;

pub use request_state::{RequestKind, RequestState, RequestStatus, RequestTicket, RequestTracker};

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::core::{ChartConfiguration, Dataset, RenderedChart, SelectedFile};
use crate::error::{PlaygroundError, PlaygroundResult, ServiceError};
use crate::service::{ChartService, RenderRequest};

pub const INGEST_FALLBACK_MESSAGE: &str = "Failed to upload dataset";
pub const RENDER_FALLBACK_MESSAGE: &str = "Failed to generate chart";
pub const NO_DATASET_MESSAGE: &str = "Please upload a dataset first";
pub const NO_X_COLUMN_MESSAGE: &str = "Please select an X column";

pub struct RequestOrchestrator {
    service: Arc<dyn ChartService>,
}

impl RequestOrchestrator {
    #[must_use]
    pub fn new(service: Arc<dyn ChartService>) -> Self {
        Self { service }
    }

    /// Admits a request on `tracker`, or rejects it while one is in flight.
    pub fn begin<T>(&self, tracker: &mut RequestTracker<T>) -> PlaygroundResult<RequestTicket> {
        match tracker.begin() {
            Ok(ticket) => {
                trace!(kind = %ticket.kind, seq = ticket.seq, "request admitted");
                Ok(ticket)
            }
            Err(err) => {
                debug!(kind = %tracker.kind(), "request rejected: already in flight");
                Err(err)
            }
        }
    }

    /// Moves `tracker` to its terminal state. Returns `false` when the ticket
    /// is stale and the outcome was discarded.
    pub fn settle<T: Clone>(
        &self,
        tracker: &mut RequestTracker<T>,
        ticket: RequestTicket,
        outcome: &PlaygroundResult<T>,
    ) -> bool {
        let outcome = outcome.as_ref().cloned().map_err(ToString::to_string);
        let succeeded = outcome.is_ok();
        let applied = tracker.settle(ticket, outcome);
        if applied {
            trace!(kind = %ticket.kind, seq = ticket.seq, succeeded, "request settled");
        } else {
            warn!(
                kind = %ticket.kind,
                seq = ticket.seq,
                latest = tracker.last_issued(),
                "discarding stale response"
            );
        }
        applied
    }

    /// Uploads `file` and validates the response into a [`Dataset`].
    ///
    /// A missing file fails locally with `NoFileSelected`. Service and shape
    /// failures surface as `IngestionFailed`.
    pub async fn ingest(&self, file: Option<&SelectedFile>) -> PlaygroundResult<Dataset> {
        let file = file.ok_or(PlaygroundError::NoFileSelected)?;

        let response = self
            .service
            .upload_dataset(file)
            .await
            .map_err(|err| service_failure(RequestKind::Ingest, &err))?;

        let dataset = Dataset::from_ingest_response(response).map_err(|err| {
            warn!(error = %err, file = file.name(), "ingestion response rejected");
            PlaygroundError::IngestionFailed(err.to_string())
        })?;

        info!(
            file = dataset.filename(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "dataset ingested"
        );
        Ok(dataset)
    }

    /// Renders `config` against `dataset`.
    ///
    /// Fails locally with `InvalidConfiguration` when there is no dataset or
    /// no X column; no request is sent in that case.
    pub async fn render(
        &self,
        dataset: Option<&Dataset>,
        config: &ChartConfiguration,
    ) -> PlaygroundResult<RenderedChart> {
        let dataset = dataset.ok_or_else(|| {
            PlaygroundError::InvalidConfiguration(NO_DATASET_MESSAGE.to_owned())
        })?;
        if config.x_column().is_empty() {
            return Err(PlaygroundError::InvalidConfiguration(
                NO_X_COLUMN_MESSAGE.to_owned(),
            ));
        }

        let request = RenderRequest::new(dataset, config);
        let response = self
            .service
            .generate_chart(&request)
            .await
            .map_err(|err| service_failure(RequestKind::Render, &err))?;

        let chart = RenderedChart::from_render_response(response, config.title())?;
        info!(
            chart_type = %config.chart_type(),
            x_column = config.x_column(),
            chart_id = chart.chart_id().unwrap_or(""),
            "chart rendered"
        );
        Ok(chart)
    }
}

fn service_failure(kind: RequestKind, err: &ServiceError) -> PlaygroundError {
    warn!(kind = %kind, error = %err, "remote operation failed");
    match kind {
        RequestKind::Ingest => PlaygroundError::IngestionFailed(
            err.detail().unwrap_or(INGEST_FALLBACK_MESSAGE).to_owned(),
        ),
        RequestKind::Render => PlaygroundError::RenderFailed(
            err.detail().unwrap_or(RENDER_FALLBACK_MESSAGE).to_owned(),
        ),
    }
}
