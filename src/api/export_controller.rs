use tracing::{debug, info};

use crate::export::{ExportRequest, export_filename};
use crate::extensions::WorkflowEvent;

use super::{ErrorSource, IntentOutcome, WorkflowController};

impl WorkflowController {
    /// Hands the current chart to the exporter.
    ///
    /// Without a chart this is a no-op: nothing is saved, no error is raised
    /// and observers are not notified. The filename is derived from the
    /// current title.
    pub fn export_chart(&self) -> IntentOutcome {
        let request = {
            let state = self.lock_state();
            let Some(chart) = state.chart.as_ref() else {
                debug!("export requested without a chart");
                return IntentOutcome::Skipped;
            };
            ExportRequest {
                encoded_image: chart.encoded_image().to_owned(),
                filename: export_filename(state.config.title()),
            }
        };

        // The exporter may touch the filesystem; run it outside the lock.
        let result = self.exporter.save(&request);

        let mut state = self.lock_state();
        match result {
            Ok(()) => {
                info!(filename = %request.filename, "chart exported");
                state.resolve(ErrorSource::Export);
                self.commit(
                    state,
                    WorkflowEvent::ChartExported {
                        filename: request.filename,
                    },
                );
                IntentOutcome::Completed
            }
            Err(err) => {
                state.raise(ErrorSource::Export, err.to_string());
                self.commit(state, WorkflowEvent::ExportFailed);
                IntentOutcome::Failed(err)
            }
        }
    }
}
