mod config_controller;
mod export_controller;
mod ingest_controller;
mod json_contract;
mod observer_dispatch;
mod observer_registry;
mod playground_config;
mod render_controller;
mod request_guard;
mod validation;
mod workflow;
mod workflow_init;
mod workflow_options;
mod workflow_snapshot;
mod workflow_state;

pub use json_contract::{
    ChartReceiptView, WORKFLOW_SNAPSHOT_JSON_SCHEMA_V1, WorkflowSnapshotJsonContractV1,
    WorkflowSnapshotView,
};
pub use playground_config::{
    API_BASE_URL_ENV, API_TIMEOUT_SECS_ENV, DEFAULT_API_BASE_URL, DEFAULT_GENERATE_PATH,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_UPLOAD_PATH, PlaygroundConfig,
};
pub use workflow::{IntentOutcome, WorkflowController};
pub use workflow_options::{ErrorClearPolicy, WorkflowOptions};
pub use workflow_snapshot::WorkflowSnapshot;
pub use workflow_state::{ErrorSource, SurfacedError};
