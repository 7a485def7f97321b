use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{ChartConfiguration, Dataset, RenderedChart};
use crate::error::{PlaygroundError, PlaygroundResult};
use crate::extensions::WorkflowEvent;
use crate::orchestrator::{RequestKind, RequestTicket};

use super::validation::validate_for_render;
use super::{ErrorSource, IntentOutcome, WorkflowController, request_guard::InFlightGuard};

const DATASET_REPLACED_MESSAGE: &str = "dataset was replaced while the chart was rendering";

/// Inputs of an admitted render, copied out of the state at admission.
struct RenderAdmission {
    ticket: RequestTicket,
    dataset: Arc<Dataset>,
    config: ChartConfiguration,
}

impl WorkflowController {
    /// Renders the current configuration against the current dataset.
    ///
    /// The request is bound to the configuration as it was when `generate`
    /// was called; edits made while it is in flight apply to the next
    /// render. Refused without any state change while another request is in
    /// flight. On failure the previous chart stays in place.
    pub async fn generate(&self) -> IntentOutcome {
        let RenderAdmission {
            ticket,
            dataset,
            config,
        } = match self.admit_render() {
            Ok(admission) => admission,
            Err(outcome) => return outcome,
        };

        let guard = InFlightGuard::new(self, ticket);
        let outcome = self.orchestrator.render(Some(&*dataset), &config).await;
        guard.disarm();

        self.finish_render(ticket, &dataset, outcome.map(Arc::new))
    }

    fn admit_render(&self) -> Result<RenderAdmission, IntentOutcome> {
        let mut state = self.lock_state();
        if let Some(kind) = state.any_in_flight() {
            debug!(busy = %kind, "generate refused while a request is in flight");
            return Err(IntentOutcome::Rejected(PlaygroundError::RequestInFlight {
                kind,
            }));
        }

        let dataset = match validate_for_render(state.dataset.as_ref(), &state.config) {
            Ok(dataset) => Arc::clone(dataset),
            Err(err) => {
                debug!(error = %err, "generate failed readiness checks");
                state.raise(ErrorSource::Render, err.to_string());
                self.commit(
                    state,
                    WorkflowEvent::ValidationFailed {
                        kind: RequestKind::Render,
                    },
                );
                return Err(IntentOutcome::Failed(err));
            }
        };

        let ticket = self
            .orchestrator
            .begin(&mut state.render)
            .map_err(IntentOutcome::Rejected)?;
        let config = state.config.clone();
        debug!(
            seq = ticket.seq,
            chart_type = %config.chart_type(),
            x_column = config.x_column(),
            "render started"
        );
        self.commit(
            state,
            WorkflowEvent::RequestStarted {
                kind: RequestKind::Render,
            },
        );
        Ok(RenderAdmission {
            ticket,
            dataset,
            config,
        })
    }

    fn finish_render(
        &self,
        ticket: RequestTicket,
        rendered_from: &Arc<Dataset>,
        outcome: PlaygroundResult<Arc<RenderedChart>>,
    ) -> IntentOutcome {
        let mut state = self.lock_state();

        let dataset_unchanged = state
            .dataset
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, rendered_from));
        if !dataset_unchanged {
            let discarded: PlaygroundResult<Arc<RenderedChart>> = Err(
                PlaygroundError::RenderFailed(DATASET_REPLACED_MESSAGE.to_owned()),
            );
            if !self.orchestrator.settle(&mut state.render, ticket, &discarded) {
                return IntentOutcome::Skipped;
            }
            warn!(seq = ticket.seq, "render result discarded: dataset replaced");
            self.commit(
                state,
                WorkflowEvent::RequestAbandoned {
                    kind: RequestKind::Render,
                },
            );
            return IntentOutcome::Skipped;
        }

        if !self.orchestrator.settle(&mut state.render, ticket, &outcome) {
            return IntentOutcome::Skipped;
        }

        match outcome {
            Ok(chart) => {
                info!(title = chart.title(), seq = ticket.seq, "chart replaced");
                state.chart = Some(chart);
                state.resolve(ErrorSource::Render);
                self.commit(state, WorkflowEvent::ChartRendered);
                IntentOutcome::Completed
            }
            Err(err) => {
                state.raise(ErrorSource::Render, err.to_string());
                self.commit(state, WorkflowEvent::RenderFailed);
                IntentOutcome::Failed(err)
            }
        }
    }
}
