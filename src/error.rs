use thiserror::Error;

use crate::core::ConfigField;
use crate::orchestrator::RequestKind;

pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaygroundError {
    #[error("please select a file to upload")]
    NoFileSelected,

    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("{0}")]
    IngestionFailed(String),

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("{0}")]
    RenderFailed(String),

    #[error("a {kind} request is already in flight")]
    RequestInFlight { kind: RequestKind },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidFieldValue { field: ConfigField, reason: String },

    #[error("failed to export chart: {0}")]
    ExportFailed(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Failure reported by a `ChartService` transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service responded with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Structured `detail` text supplied by the remote service, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref().filter(|text| !text.is_empty()),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}
