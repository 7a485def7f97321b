mod wire;

#[cfg(feature = "http-client")]
mod http;

pub use wire::{
    IngestResponse, RenderPayload, RenderRequest, RenderResponse, WireChartConfig,
    extract_error_detail,
};

#[cfg(feature = "http-client")]
pub use http::HttpChartService;

use async_trait::async_trait;

use crate::core::SelectedFile;
use crate::error::ServiceError;

/// Contract of the remote ingestion and rendering API.
///
/// Implementations perform exactly one remote call per method invocation and
/// never retry. Every call must eventually resolve; transports are expected
/// to bound their own wait time.
#[async_trait]
pub trait ChartService: Send + Sync {
    /// Uploads one file and returns the parsed dataset description.
    async fn upload_dataset(&self, file: &SelectedFile) -> Result<IngestResponse, ServiceError>;

    /// Renders a chart for the given data and configuration.
    async fn generate_chart(&self, request: &RenderRequest)
    -> Result<RenderResponse, ServiceError>;
}
