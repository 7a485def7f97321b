use tracing::warn;

use crate::error::PlaygroundError;
use crate::extensions::WorkflowEvent;
use crate::orchestrator::{RequestKind, RequestTicket};

use super::WorkflowController;

const ABANDONED_MESSAGE: &str = "request was cancelled before completion";

/// Settles an admitted request as failed if its intent future is dropped
/// before the response is applied.
pub(super) struct InFlightGuard<'a> {
    controller: &'a WorkflowController,
    ticket: RequestTicket,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    pub(super) fn new(controller: &'a WorkflowController, ticket: RequestTicket) -> Self {
        Self {
            controller,
            ticket,
            armed: true,
        }
    }

    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon(self.ticket);
        }
    }
}

impl WorkflowController {
    fn abandon(&self, ticket: RequestTicket) {
        let mut state = self.lock_state();
        let state_ref = &mut *state;
        let message = ABANDONED_MESSAGE.to_owned();
        let applied = match ticket.kind {
            RequestKind::Ingest => self.orchestrator.settle(
                &mut state_ref.ingest,
                ticket,
                &Err(PlaygroundError::IngestionFailed(message)),
            ),
            RequestKind::Render => self.orchestrator.settle(
                &mut state_ref.render,
                ticket,
                &Err(PlaygroundError::RenderFailed(message)),
            ),
        };
        if !applied {
            return;
        }
        warn!(kind = %ticket.kind, seq = ticket.seq, "in-flight request abandoned");
        self.commit(state, WorkflowEvent::RequestAbandoned { kind: ticket.kind });
    }
}
