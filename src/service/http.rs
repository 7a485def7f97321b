use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::PlaygroundConfig;
use crate::core::SelectedFile;
use crate::error::{PlaygroundError, PlaygroundResult, ServiceError};

use super::{ChartService, IngestResponse, RenderRequest, RenderResponse, extract_error_detail};

/// `reqwest` transport for the playground HTTP API.
#[derive(Debug, Clone)]
pub struct HttpChartService {
    client: reqwest::Client,
    upload_url: String,
    generate_url: String,
}

impl HttpChartService {
    pub fn new(config: &PlaygroundConfig) -> PlaygroundResult<Self> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            PlaygroundError::InvalidSettings(format!("failed to build http client: {e}"))
        })?;
        Ok(Self::with_client(client, config))
    }

    /// Uses a caller-provided client (shared pools, custom TLS, proxies).
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &PlaygroundConfig) -> Self {
        Self {
            client,
            upload_url: config.upload_url(),
            generate_url: config.generate_url(),
        }
    }

    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    #[must_use]
    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }
}

#[async_trait]
impl ChartService for HttpChartService {
    async fn upload_dataset(&self, file: &SelectedFile) -> Result<IngestResponse, ServiceError> {
        let part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_owned())
            .mime_str(file.mime_type())
            .map_err(|e| ServiceError::Transport(format!("invalid mime type: {e}")))?;
        let form = Form::new().part("file", part);

        debug!(
            url = %self.upload_url,
            file = file.name(),
            bytes = file.len(),
            "uploading dataset"
        );
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        decode_json_response(response).await
    }

    async fn generate_chart(
        &self,
        request: &RenderRequest,
    ) -> Result<RenderResponse, ServiceError> {
        debug!(
            url = %self.generate_url,
            chart_type = %request.config.chart_type,
            x_column = %request.config.x_column,
            "requesting chart render"
        );
        let response = self
            .client
            .post(&self.generate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        decode_json_response(response).await
    }
}

async fn decode_json_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;

    if !status.is_success() {
        let detail = extract_error_detail(&body);
        warn!(
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "service returned error status"
        );
        return Err(ServiceError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
}
