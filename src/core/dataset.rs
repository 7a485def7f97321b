use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, PlaygroundResult};
use crate::service::{IngestResponse, RenderPayload};

/// Maximum number of records the ingestion service returns for display.
pub const PREVIEW_ROW_LIMIT: usize = 10;

/// One dataset record keyed by column name, in source column order.
pub type Record = IndexMap<String, serde_json::Value>;

/// Immutable snapshot of an ingested dataset.
///
/// Built only through [`Dataset::from_ingest_response`], which enforces the
/// shape invariants (unique columns, typed column subsets, record keys and
/// cardinalities). A new upload replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    filename: String,
    row_count: usize,
    column_count: usize,
    columns: Vec<String>,
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    raw_rows: Vec<Record>,
    preview_rows: Vec<Record>,
    encoded_source: Option<String>,
}

/// Compact dataset description used by snapshots and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub filename: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl Dataset {
    /// Validates an ingestion response into a dataset.
    pub fn from_ingest_response(response: IngestResponse) -> PlaygroundResult<Self> {
        let IngestResponse {
            filename,
            row_count,
            column_count,
            columns,
            numeric_columns,
            categorical_columns,
            preview,
            rows,
            data,
        } = response;

        if column_count != columns.len() {
            return Err(malformed(format!(
                "column_count {column_count} does not match {} listed columns",
                columns.len()
            )));
        }

        let mut known = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !known.insert(column.as_str()) {
                return Err(malformed(format!("duplicate column `{column}`")));
            }
        }

        ensure_subset("numeric_columns", &numeric_columns, &known)?;
        ensure_subset("categorical_columns", &categorical_columns, &known)?;

        let expected_preview = row_count.min(PREVIEW_ROW_LIMIT);
        if preview.len() != expected_preview {
            return Err(malformed(format!(
                "preview holds {} rows, expected {expected_preview} for {row_count} rows",
                preview.len()
            )));
        }
        ensure_record_keys("preview", &preview, &known)?;

        let encoded_source = data.filter(|encoded| !encoded.is_empty());
        let raw_rows = match rows {
            Some(rows) => {
                if rows.len() != row_count {
                    return Err(malformed(format!(
                        "rows holds {} records but row_count is {row_count}",
                        rows.len()
                    )));
                }
                ensure_record_keys("rows", &rows, &known)?;
                rows
            }
            None => {
                if encoded_source.is_none() && preview.len() != row_count {
                    return Err(malformed(format!(
                        "response carries neither full rows nor an encoded source for {row_count} rows"
                    )));
                }
                preview.clone()
            }
        };

        Ok(Self {
            filename,
            row_count,
            column_count,
            columns,
            numeric_columns,
            categorical_columns,
            raw_rows,
            preview_rows: preview,
            encoded_source,
        })
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    #[must_use]
    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    /// Records known to the client. Equal to the full dataset when
    /// [`Dataset::has_full_rows`] is true, otherwise the preview.
    #[must_use]
    pub fn raw_rows(&self) -> &[Record] {
        &self.raw_rows
    }

    #[must_use]
    pub fn preview_rows(&self) -> &[Record] {
        &self.preview_rows
    }

    /// Base64 CSV payload echoed by the ingestion service, when present.
    #[must_use]
    pub fn encoded_source(&self) -> Option<&str> {
        self.encoded_source.as_deref()
    }

    #[must_use]
    pub fn has_full_rows(&self) -> bool {
        self.raw_rows.len() == self.row_count
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    #[must_use]
    pub fn is_numeric_column(&self, name: &str) -> bool {
        self.numeric_columns.iter().any(|column| column == name)
    }

    /// Payload sent to the rendering service for this dataset.
    #[must_use]
    pub fn render_payload(&self) -> RenderPayload {
        match (&self.encoded_source, self.has_full_rows()) {
            (_, true) => RenderPayload::Rows(self.raw_rows.clone()),
            (Some(encoded), false) => RenderPayload::Encoded(encoded.clone()),
            // Unreachable through `from_ingest_response`; keep what we have.
            (None, false) => RenderPayload::Rows(self.raw_rows.clone()),
        }
    }

    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            filename: self.filename.clone(),
            row_count: self.row_count,
            column_count: self.column_count,
            columns: self.columns.clone(),
            numeric_columns: self.numeric_columns.clone(),
            categorical_columns: self.categorical_columns.clone(),
        }
    }
}

fn malformed(reason: String) -> PlaygroundError {
    PlaygroundError::MalformedDataset(reason)
}

fn ensure_subset(name: &str, subset: &[String], known: &HashSet<&str>) -> PlaygroundResult<()> {
    match subset.iter().find(|column| !known.contains(column.as_str())) {
        Some(column) => Err(malformed(format!(
            "{name} lists `{column}` which is not a dataset column"
        ))),
        None => Ok(()),
    }
}

fn ensure_record_keys(name: &str, records: &[Record], known: &HashSet<&str>) -> PlaygroundResult<()> {
    for (index, record) in records.iter().enumerate() {
        if let Some(key) = record.keys().find(|key| !known.contains(key.as_str())) {
            return Err(malformed(format!(
                "{name} record {index} has unknown column `{key}`"
            )));
        }
    }
    Ok(())
}
