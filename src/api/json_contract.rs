use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ChartConfiguration, DatasetSummary};
use crate::error::{PlaygroundError, PlaygroundResult};
use crate::orchestrator::RequestStatus;

use super::{SurfacedError, WorkflowController, WorkflowSnapshot};

pub const WORKFLOW_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable projection of a [`WorkflowSnapshot`].
///
/// Carries the dataset summary instead of the records and the chart receipt
/// instead of the image, plus every derived flag so a remote presentation
/// layer never has to recompute them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshotView {
    pub dataset: Option<DatasetSummary>,
    pub configuration: ChartConfiguration,
    pub chart: Option<ChartReceiptView>,
    pub ingest_status: RequestStatus,
    pub render_status: RequestStatus,
    pub is_busy: bool,
    pub can_generate: bool,
    pub can_export: bool,
    pub y_column_applicable: bool,
    pub error: Option<SurfacedError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartReceiptView {
    pub chart_id: Option<String>,
    pub title: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: WorkflowSnapshotView,
}

impl WorkflowSnapshot {
    #[must_use]
    pub fn view(&self) -> WorkflowSnapshotView {
        WorkflowSnapshotView {
            dataset: self.dataset().map(|dataset| dataset.summary()),
            configuration: self.configuration.clone(),
            chart: self.chart().map(|chart| ChartReceiptView {
                chart_id: chart.chart_id().map(str::to_owned),
                title: chart.title().to_owned(),
                generated_at: chart.generated_at(),
            }),
            ingest_status: self.ingest_status,
            render_status: self.render_status,
            is_busy: self.is_busy(),
            can_generate: self.can_generate(),
            can_export: self.can_export(),
            y_column_applicable: self.y_column_applicable(),
            error: self.error.clone(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlaygroundResult<String> {
        let payload = WorkflowSnapshotJsonContractV1 {
            schema_version: WORKFLOW_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.view(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlaygroundError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }
}

impl WorkflowSnapshotView {
    /// Reads a view back from its versioned envelope.
    pub fn from_json_contract_str(input: &str) -> PlaygroundResult<Self> {
        let payload: WorkflowSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlaygroundError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != WORKFLOW_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(PlaygroundError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl WorkflowController {
    pub fn snapshot_json_contract_v1_pretty(&self) -> PlaygroundResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
