#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chart_playground::api::{WorkflowController, WorkflowOptions, WorkflowSnapshot};
use chart_playground::core::{Record, SelectedFile};
use chart_playground::error::ServiceError;
use chart_playground::export::MemoryExporter;
use chart_playground::extensions::{WorkflowEvent, WorkflowObserver};
use chart_playground::service::{ChartService, IngestResponse, RenderRequest, RenderResponse};
use serde_json::json;
use tokio::sync::Notify;

/// Base64 of the PNG signature; decodes cleanly.
pub const PNG_STUB_BASE64: &str = "iVBORw0KGgo=";

/// Holds a scripted request open until the test releases it.
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Scripted `ChartService` that records every call.
#[derive(Default)]
pub struct FakeChartService {
    uploads: Mutex<VecDeque<Result<IngestResponse, ServiceError>>>,
    renders: Mutex<VecDeque<Result<RenderResponse, ServiceError>>>,
    upload_calls: AtomicUsize,
    render_calls: AtomicUsize,
    uploaded_files: Mutex<Vec<String>>,
    render_requests: Mutex<Vec<RenderRequest>>,
    upload_gate: Option<Arc<Gate>>,
    render_gate: Option<Arc<Gate>>,
}

impl FakeChartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upload_gate(mut self, gate: Arc<Gate>) -> Self {
        self.upload_gate = Some(gate);
        self
    }

    pub fn with_render_gate(mut self, gate: Arc<Gate>) -> Self {
        self.render_gate = Some(gate);
        self
    }

    pub fn push_upload(&self, response: Result<IngestResponse, ServiceError>) {
        self.uploads.lock().expect("uploads lock").push_back(response);
    }

    pub fn push_render(&self, response: Result<RenderResponse, ServiceError>) {
        self.renders.lock().expect("renders lock").push_back(response);
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn render_calls(&self) -> usize {
        self.render_calls.load(Ordering::SeqCst)
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.uploaded_files.lock().expect("files lock").clone()
    }

    pub fn render_requests(&self) -> Vec<RenderRequest> {
        self.render_requests.lock().expect("requests lock").clone()
    }

    pub fn last_render_request(&self) -> RenderRequest {
        self.render_requests()
            .pop()
            .expect("at least one render request")
    }
}

#[async_trait]
impl ChartService for FakeChartService {
    async fn upload_dataset(&self, file: &SelectedFile) -> Result<IngestResponse, ServiceError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded_files
            .lock()
            .expect("files lock")
            .push(file.name().to_owned());
        let scripted = self.uploads.lock().expect("uploads lock").pop_front();
        if let Some(gate) = &self.upload_gate {
            gate.pass().await;
        }
        scripted.unwrap_or_else(|| Err(ServiceError::Transport("no scripted upload".to_owned())))
    }

    async fn generate_chart(&self, request: &RenderRequest) -> Result<RenderResponse, ServiceError> {
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        self.render_requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        let scripted = self.renders.lock().expect("renders lock").pop_front();
        if let Some(gate) = &self.render_gate {
            gate.pass().await;
        }
        scripted.unwrap_or_else(|| Err(ServiceError::Transport("no scripted render".to_owned())))
    }
}

/// Ingestion response with `row_count` full rows. Numeric columns hold the
/// row index, other columns a label.
pub fn ingest_response(columns: &[&str], numeric: &[&str], row_count: usize) -> IngestResponse {
    let rows: Vec<Record> = (0..row_count)
        .map(|i| {
            columns
                .iter()
                .map(|column| {
                    let value = if numeric.contains(column) {
                        json!(i)
                    } else {
                        json!(format!("{column}-{i}"))
                    };
                    ((*column).to_owned(), value)
                })
                .collect()
        })
        .collect();
    IngestResponse {
        filename: "data.csv".to_owned(),
        row_count,
        column_count: columns.len(),
        columns: columns.iter().map(|c| (*c).to_owned()).collect(),
        numeric_columns: numeric.iter().map(|c| (*c).to_owned()).collect(),
        categorical_columns: columns
            .iter()
            .filter(|c| !numeric.contains(c))
            .map(|c| (*c).to_owned())
            .collect(),
        preview: rows.iter().take(10).cloned().collect(),
        rows: Some(rows),
        data: None,
    }
}

pub fn chart_response() -> RenderResponse {
    RenderResponse {
        chart_image: PNG_STUB_BASE64.to_owned(),
        id: Some("chart-1".to_owned()),
        message: Some("Chart generated successfully".to_owned()),
    }
}

pub fn status_error(status: u16, detail: &str) -> ServiceError {
    ServiceError::Status {
        status,
        detail: Some(detail.to_owned()),
    }
}

pub fn csv_file() -> SelectedFile {
    SelectedFile::new("data.csv", b"x,y\n1,2\n".to_vec())
}

pub fn controller(service: &Arc<FakeChartService>) -> (WorkflowController, Arc<MemoryExporter>) {
    controller_with_options(service, WorkflowOptions::default())
}

pub fn controller_with_options(
    service: &Arc<FakeChartService>,
    options: WorkflowOptions,
) -> (WorkflowController, Arc<MemoryExporter>) {
    let exporter = Arc::new(MemoryExporter::default());
    let controller = WorkflowController::with_options(service.clone(), exporter.clone(), options);
    (controller, exporter)
}

/// Controller with a dataset of columns `x`, `y` (numeric) and 5 rows
/// already loaded.
pub async fn loaded_controller(
    service: &Arc<FakeChartService>,
) -> (WorkflowController, Arc<MemoryExporter>) {
    let (controller, exporter) = controller(service);
    service.push_upload(Ok(ingest_response(&["x", "y"], &["y"], 5)));
    let outcome = controller.on_file_selected(Some(csv_file())).await;
    assert!(outcome.is_completed(), "upload should succeed: {outcome:?}");
    (controller, exporter)
}

/// Observer that records every notification.
pub struct RecordingObserver {
    id: String,
    seen: Arc<Mutex<Vec<(WorkflowEvent, WorkflowSnapshot)>>>,
}

impl RecordingObserver {
    pub fn new(id: &str) -> (Self, Arc<Mutex<Vec<(WorkflowEvent, WorkflowSnapshot)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                id: id.to_owned(),
                seen: seen.clone(),
            },
            seen,
        )
    }
}

impl WorkflowObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_state_changed(&mut self, event: &WorkflowEvent, snapshot: &WorkflowSnapshot) {
        self.seen
            .lock()
            .expect("observer lock")
            .push((event.clone(), snapshot.clone()));
    }
}

pub fn events(seen: &Arc<Mutex<Vec<(WorkflowEvent, WorkflowSnapshot)>>>) -> Vec<WorkflowEvent> {
    seen.lock()
        .expect("observer lock")
        .iter()
        .map(|(event, _)| event.clone())
        .collect()
}
