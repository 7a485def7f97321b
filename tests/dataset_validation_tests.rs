mod support;

use chart_playground::core::{Dataset, PREVIEW_ROW_LIMIT};
use chart_playground::error::PlaygroundError;
use chart_playground::service::{IngestResponse, RenderPayload};
use serde_json::json;

fn malformed(response: IngestResponse) -> String {
    match Dataset::from_ingest_response(response) {
        Err(PlaygroundError::MalformedDataset(reason)) => reason,
        other => panic!("expected malformed dataset, got {other:?}"),
    }
}

#[test]
fn service_body_without_optional_fields_builds_dataset() {
    let body = json!({
        "filename": "sales.csv",
        "row_count": 2,
        "column_count": 3,
        "columns": ["month", "region", "revenue"],
        "numeric_columns": ["revenue"],
        "preview": [
            {"month": "Jan", "region": "north", "revenue": 10.5},
            {"month": "Feb", "region": "south", "revenue": 12}
        ]
    });
    let response: IngestResponse = serde_json::from_value(body).expect("decode response");
    let dataset = Dataset::from_ingest_response(response).expect("valid dataset");

    assert_eq!(dataset.filename(), "sales.csv");
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.columns(), ["month", "region", "revenue"]);
    assert!(dataset.categorical_columns().is_empty());
    assert!(dataset.has_full_rows());
    assert!(dataset.is_numeric_column("revenue"));
    assert!(!dataset.is_numeric_column("region"));

    let first = &dataset.raw_rows()[0];
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(keys, ["month", "region", "revenue"]);
}

#[test]
fn preview_is_capped_and_rows_are_kept() {
    let dataset = Dataset::from_ingest_response(support::ingest_response(&["x", "y"], &["y"], 42))
        .expect("valid dataset");

    assert_eq!(dataset.preview_rows().len(), PREVIEW_ROW_LIMIT);
    assert_eq!(dataset.raw_rows().len(), 42);
    match dataset.render_payload() {
        RenderPayload::Rows(rows) => assert_eq!(rows.len(), 42),
        RenderPayload::Encoded(_) => panic!("expected full rows"),
    }
}

#[test]
fn column_count_mismatch_is_malformed() {
    let mut response = support::ingest_response(&["x", "y"], &["y"], 3);
    response.column_count = 3;
    assert!(malformed(response).contains("column_count"));
}

#[test]
fn duplicate_columns_are_malformed() {
    let mut response = support::ingest_response(&["x", "y"], &["y"], 0);
    response.columns = vec!["x".to_owned(), "x".to_owned()];
    assert!(malformed(response).contains("duplicate"));
}

#[test]
fn typed_columns_must_be_dataset_columns() {
    let mut response = support::ingest_response(&["x", "y"], &["y"], 3);
    response.numeric_columns.push("z".to_owned());
    assert!(malformed(response).contains("numeric_columns"));

    let mut response = support::ingest_response(&["x", "y"], &["y"], 3);
    response.categorical_columns = vec!["label".to_owned()];
    assert!(malformed(response).contains("categorical_columns"));
}

#[test]
fn records_with_unknown_keys_are_malformed() {
    let mut response = support::ingest_response(&["x", "y"], &["y"], 3);
    response.preview[1].insert("extra".to_owned(), json!(1));
    assert!(malformed(response).contains("extra"));
}

#[test]
fn preview_and_rows_must_match_row_count() {
    let mut response = support::ingest_response(&["x", "y"], &["y"], 12);
    response.preview.pop();
    assert!(malformed(response).contains("preview"));

    let mut response = support::ingest_response(&["x", "y"], &["y"], 12);
    if let Some(rows) = response.rows.as_mut() {
        rows.pop();
    }
    assert!(malformed(response).contains("rows"));
}

#[test]
fn empty_dataset_is_valid() {
    let dataset = Dataset::from_ingest_response(support::ingest_response(&["x"], &[], 0))
        .expect("valid dataset");
    assert_eq!(dataset.row_count(), 0);
    assert!(dataset.numeric_columns().is_empty());
    assert!(dataset.preview_rows().is_empty());
}
