use serde::{Deserialize, Serialize};

use crate::core::{ChartConfiguration, ChartType, ColorScheme, Dataset, Record};

/// Body returned by the dataset upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub filename: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    #[serde(default)]
    pub categorical_columns: Vec<String>,
    pub preview: Vec<Record>,
    /// Full record list, when the service returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Record>>,
    /// Base64 of the uploaded CSV, when the service echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Dataset content carried by a render request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderPayload {
    Rows(Vec<Record>),
    Encoded(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireChartConfig {
    pub chart_type: ChartType,
    pub x_column: String,
    pub y_column: Option<String>,
    pub color_scheme: ColorScheme,
    pub title: String,
    pub width: i64,
    pub height: i64,
}

impl From<&ChartConfiguration> for WireChartConfig {
    fn from(config: &ChartConfiguration) -> Self {
        Self {
            chart_type: config.chart_type(),
            x_column: config.x_column().to_owned(),
            y_column: config.effective_y_column().map(str::to_owned),
            color_scheme: config.color_scheme(),
            title: config.title().to_owned(),
            width: config.width(),
            height: config.height(),
        }
    }
}

/// Body sent to the chart generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub filename: String,
    pub data: RenderPayload,
    pub config: WireChartConfig,
}

impl RenderRequest {
    #[must_use]
    pub fn new(dataset: &Dataset, config: &ChartConfiguration) -> Self {
        Self {
            filename: dataset.filename().to_owned(),
            data: dataset.render_payload(),
            config: WireChartConfig::from(config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub chart_image: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

/// Extracts the human-readable `detail` from an error body.
///
/// Accepts a plain string detail or a list of validation entries carrying a
/// `msg` field (joined with `"; "`). Anything else yields `None`.
#[must_use]
pub fn extract_error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = match parsed.detail {
        serde_json::Value::String(text) => text,
        serde_json::Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    let detail = detail.trim();
    (!detail.is_empty()).then(|| detail.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_extracted() {
        assert_eq!(
            extract_error_detail(r#"{"detail":"Only CSV files are allowed"}"#).as_deref(),
            Some("Only CSV files are allowed")
        );
    }

    #[test]
    fn validation_list_detail_is_joined() {
        let body = r#"{"detail":[{"loc":["body","config"],"msg":"field required"},{"msg":"bad width"}]}"#;
        assert_eq!(
            extract_error_detail(body).as_deref(),
            Some("field required; bad width")
        );
    }

    #[test]
    fn missing_or_blank_detail_yields_none() {
        assert_eq!(extract_error_detail(r#"{"error":"x"}"#), None);
        assert_eq!(extract_error_detail(r#"{"detail":"  "}"#), None);
        assert_eq!(extract_error_detail("<html>502</html>"), None);
    }

    #[test]
    fn wire_config_drops_inapplicable_y_column() {
        let mut config = ChartConfiguration::default();
        config.set_x_column("region");
        config.set_y_column("sales");
        config.set_chart_type(ChartType::Pie);

        let wire = WireChartConfig::from(&config);
        assert_eq!(wire.y_column, None);
        let json = serde_json::to_value(&wire).expect("serialize");
        assert_eq!(json["chart_type"], "pie");
        assert_eq!(json["color_scheme"], "viridis");
        assert!(json["y_column"].is_null());
    }
}
