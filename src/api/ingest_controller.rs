use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{Dataset, SelectedFile};
use crate::error::{PlaygroundError, PlaygroundResult};
use crate::extensions::WorkflowEvent;
use crate::orchestrator::{RequestKind, RequestTicket};

use super::{ErrorSource, IntentOutcome, WorkflowController, request_guard::InFlightGuard};

impl WorkflowController {
    /// Uploads `file` and, on success, replaces the dataset.
    ///
    /// The X/Y selection is reset from the new dataset while every styling
    /// field is kept, and the previous chart and render error are dropped.
    /// A failed upload leaves the previous dataset in place.
    pub async fn on_file_selected(&self, file: Option<SelectedFile>) -> IntentOutcome {
        let Some(file) = file else {
            return self.reject_missing_file();
        };

        let ticket = match self.admit_ingest(&file) {
            Ok(ticket) => ticket,
            Err(err) => return IntentOutcome::Rejected(err),
        };

        let guard = InFlightGuard::new(self, ticket);
        let outcome = self.orchestrator.ingest(Some(&file)).await;
        guard.disarm();

        self.finish_ingest(ticket, outcome.map(Arc::new))
    }

    fn reject_missing_file(&self) -> IntentOutcome {
        let err = PlaygroundError::NoFileSelected;
        debug!("upload requested without a file");
        let mut state = self.lock_state();
        state.raise(ErrorSource::Ingest, err.to_string());
        self.commit(
            state,
            WorkflowEvent::ValidationFailed {
                kind: RequestKind::Ingest,
            },
        );
        IntentOutcome::Failed(err)
    }

    fn admit_ingest(&self, file: &SelectedFile) -> PlaygroundResult<RequestTicket> {
        let mut state = self.lock_state();
        let ticket = self.orchestrator.begin(&mut state.ingest)?;
        debug!(file = file.name(), bytes = file.len(), seq = ticket.seq, "upload started");
        self.commit(
            state,
            WorkflowEvent::RequestStarted {
                kind: RequestKind::Ingest,
            },
        );
        Ok(ticket)
    }

    fn finish_ingest(
        &self,
        ticket: RequestTicket,
        outcome: PlaygroundResult<Arc<Dataset>>,
    ) -> IntentOutcome {
        let mut state = self.lock_state();
        if !self.orchestrator.settle(&mut state.ingest, ticket, &outcome) {
            return IntentOutcome::Skipped;
        }

        match outcome {
            Ok(dataset) => {
                state.config.apply_dataset_defaults(&dataset);
                state.chart = None;
                // Readiness and render errors refer to the previous dataset.
                state.resolve(ErrorSource::Ingest);
                state.resolve(ErrorSource::Render);
                let event = WorkflowEvent::DatasetLoaded {
                    rows: dataset.row_count(),
                    columns: dataset.column_count(),
                };
                info!(
                    file = dataset.filename(),
                    x_column = state.config.x_column(),
                    y_column = state.config.y_column(),
                    "dataset replaced"
                );
                state.dataset = Some(dataset);
                self.commit(state, event);
                IntentOutcome::Completed
            }
            Err(err) => {
                state.raise(ErrorSource::Ingest, err.to_string());
                self.commit(state, WorkflowEvent::IngestFailed);
                IntentOutcome::Failed(err)
            }
        }
    }
}
