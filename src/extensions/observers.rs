use serde::{Deserialize, Serialize};

use crate::api::WorkflowSnapshot;
use crate::core::ConfigField;
use crate::orchestrator::RequestKind;

/// Event stream exposed to observers. One event is emitted per completed
/// state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowEvent {
    RequestStarted { kind: RequestKind },
    DatasetLoaded { rows: usize, columns: usize },
    IngestFailed,
    ConfigChanged { field: ConfigField },
    ConfigRejected { field: ConfigField },
    ValidationFailed { kind: RequestKind },
    ChartRendered,
    RenderFailed,
    RequestAbandoned { kind: RequestKind },
    ChartExported { filename: String },
    ExportFailed,
}

/// Subscription hook for presentation layers.
///
/// Observers receive the event together with a consistent snapshot taken at
/// the end of the transition. Callbacks may call back into the controller:
/// forwarded intents and registry changes take effect immediately, and their
/// notifications are delivered after the current one.
pub trait WorkflowObserver: Send {
    fn id(&self) -> &str;
    fn on_state_changed(&mut self, event: &WorkflowEvent, snapshot: &WorkflowSnapshot);
}
