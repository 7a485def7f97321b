use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::export::ChartExporter;
use crate::orchestrator::RequestOrchestrator;
use crate::service::ChartService;

#[cfg(feature = "http-client")]
use crate::error::PlaygroundResult;
#[cfg(feature = "http-client")]
use crate::service::HttpChartService;

#[cfg(feature = "http-client")]
use super::PlaygroundConfig;
use super::{WorkflowController, WorkflowOptions, workflow_state::WorkflowState};

impl WorkflowController {
    /// Creates a controller with default configuration and options.
    #[must_use]
    pub fn new(service: Arc<dyn ChartService>, exporter: Arc<dyn ChartExporter>) -> Self {
        Self::with_options(service, exporter, WorkflowOptions::default())
    }

    #[must_use]
    pub fn with_options(
        service: Arc<dyn ChartService>,
        exporter: Arc<dyn ChartExporter>,
        options: WorkflowOptions,
    ) -> Self {
        debug!(
            error_clear_policy = ?options.error_clear_policy,
            chart_type = %options.initial_configuration.chart_type(),
            "workflow controller created"
        );
        Self {
            orchestrator: RequestOrchestrator::new(service),
            exporter,
            error_clear_policy: options.error_clear_policy,
            state: Mutex::new(WorkflowState::new(options.initial_configuration)),
            observers: Mutex::new(Vec::new()),
            dispatch: Mutex::default(),
        }
    }

    /// Creates a controller talking to the HTTP API described by `config`.
    #[cfg(feature = "http-client")]
    pub fn from_config(
        config: &PlaygroundConfig,
        exporter: Arc<dyn ChartExporter>,
        options: WorkflowOptions,
    ) -> PlaygroundResult<Self> {
        let service = HttpChartService::new(config)?;
        debug!(base_url = %config.api_base_url, "using http chart service");
        Ok(Self::with_options(Arc::new(service), exporter, options))
    }
}
