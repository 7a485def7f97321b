use base64::Engine as _;
use base64::engine::general_purpose;
use chrono::{DateTime, Utc};

use crate::error::{PlaygroundError, PlaygroundResult};
use crate::service::RenderResponse;

/// Image produced by one successful render.
///
/// The encoded payload is opaque to the workflow; it is only decoded for
/// validation and export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    encoded_image: String,
    chart_id: Option<String>,
    message: Option<String>,
    title: String,
    generated_at: DateTime<Utc>,
}

impl RenderedChart {
    /// Validates a render response. `title` is the title the chart was
    /// requested with.
    pub fn from_render_response(
        response: RenderResponse,
        title: impl Into<String>,
    ) -> PlaygroundResult<Self> {
        let encoded_image = response.chart_image.trim().to_owned();
        if encoded_image.is_empty() {
            return Err(PlaygroundError::RenderFailed(
                "chart service returned an empty image".to_owned(),
            ));
        }
        decode_image_payload(&encoded_image).map_err(|e| {
            PlaygroundError::RenderFailed(format!(
                "chart service returned an invalid image payload: {e}"
            ))
        })?;

        Ok(Self {
            encoded_image,
            chart_id: response.id,
            message: response.message,
            title: title.into(),
            generated_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn encoded_image(&self) -> &str {
        &self.encoded_image
    }

    #[must_use]
    pub fn chart_id(&self) -> Option<&str> {
        self.chart_id.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn decode_image(&self) -> PlaygroundResult<Vec<u8>> {
        decode_export_payload(&self.encoded_image)
    }
}

fn decode_image_payload(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(encoded)
}

/// Decodes an image about to be written out.
pub(crate) fn decode_export_payload(encoded: &str) -> PlaygroundResult<Vec<u8>> {
    decode_image_payload(encoded)
        .map_err(|e| PlaygroundError::ExportFailed(format!("invalid image payload: {e}")))
}
