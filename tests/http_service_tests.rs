#![cfg(feature = "http-client")]

mod support;

use std::sync::Arc;

use chart_playground::api::{PlaygroundConfig, WorkflowController, WorkflowOptions};
use chart_playground::core::{ChartConfiguration, Dataset, SelectedFile};
use chart_playground::error::ServiceError;
use chart_playground::export::MemoryExporter;
use chart_playground::service::{ChartService, HttpChartService, RenderRequest};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Serves one canned HTTP/1.1 response per connection, in order, and returns
/// the raw requests it received.
async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.expect("accept");
            requests.push(read_request(&mut stream).await);
            let reason = if status < 400 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            stream.shutdown().await.expect("shutdown");
        }
        requests
    });
    (base_url, handle)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..read]);
        if request_complete(&raw) {
            break;
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let headers = text[..header_end].to_ascii_lowercase();
    let body_len = text.len() - header_end - 4;
    if headers.contains("transfer-encoding: chunked") {
        return text.ends_with("0\r\n\r\n");
    }
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body_len >= content_length
}

fn service(base_url: &str) -> HttpChartService {
    let config = PlaygroundConfig::default().with_api_base_url(base_url);
    HttpChartService::new(&config).expect("http service")
}

fn ingest_body() -> String {
    json!({
        "filename": "data.csv",
        "row_count": 2,
        "column_count": 2,
        "columns": ["x", "y"],
        "numeric_columns": ["y"],
        "categorical_columns": ["x"],
        "preview": [{"x": "a", "y": 1}, {"x": "b", "y": 2}]
    })
    .to_string()
}

fn render_request() -> RenderRequest {
    let response = serde_json::from_str(&ingest_body()).expect("ingest body");
    let dataset = Dataset::from_ingest_response(response).expect("dataset");
    let mut config = ChartConfiguration::default();
    config.apply_dataset_defaults(&dataset);
    RenderRequest::new(&dataset, &config)
}

#[tokio::test]
async fn upload_posts_multipart_file_field() {
    let (base_url, server) = serve(vec![(200, ingest_body())]).await;

    let response = service(&base_url)
        .upload_dataset(&support::csv_file())
        .await
        .expect("upload");
    assert_eq!(response.columns, ["x", "y"]);
    assert_eq!(response.row_count, 2);

    let requests = server.await.expect("server task");
    let request = &requests[0];
    assert!(request.starts_with("POST /api/upload-csv HTTP/1.1"), "{request}");
    assert!(request.to_ascii_lowercase().contains("multipart/form-data"));
    assert!(request.contains("name=\"file\""));
    assert!(request.contains("filename=\"data.csv\""));
    assert!(request.contains("text/csv"));
}

#[tokio::test]
async fn upload_sends_explicit_mime_type() {
    let (base_url, server) = serve(vec![(200, ingest_body())]).await;
    let file = SelectedFile::new("export", b"x,y\na,1\n".to_vec())
        .with_mime_type("application/vnd.ms-excel");
    assert_eq!(file.mime_type(), "application/vnd.ms-excel");

    service(&base_url).upload_dataset(&file).await.expect("upload");

    let requests = server.await.expect("server task");
    let request = &requests[0];
    assert!(request.contains("filename=\"export\""), "{request}");
    assert!(request.contains("application/vnd.ms-excel"), "{request}");
}

#[tokio::test]
async fn error_status_carries_structured_detail() {
    let body = json!({"detail": "Only CSV files are allowed"}).to_string();
    let (base_url, _server) = serve(vec![(400, body)]).await;

    let err = service(&base_url)
        .upload_dataset(&support::csv_file())
        .await
        .expect_err("error status");
    assert_eq!(
        err,
        ServiceError::Status {
            status: 400,
            detail: Some("Only CSV files are allowed".to_owned())
        }
    );
}

#[tokio::test]
async fn generate_posts_json_and_reads_image() {
    let body = json!({
        "chart_image": support::PNG_STUB_BASE64,
        "id": "abc",
        "message": "Chart generated successfully"
    })
    .to_string();
    let (base_url, server) = serve(vec![(200, body)]).await;

    let response = service(&base_url)
        .generate_chart(&render_request())
        .await
        .expect("render");
    assert_eq!(response.chart_image, support::PNG_STUB_BASE64);
    assert_eq!(response.id.as_deref(), Some("abc"));

    let requests = server.await.expect("server task");
    let request = &requests[0];
    assert!(request.starts_with("POST /api/generate-chart HTTP/1.1"), "{request}");
    assert!(request.contains("\"x_column\":\"x\""));
    assert!(request.contains("\"chart_type\":\"bar\""));
}

#[tokio::test]
async fn unstructured_error_and_bad_body_are_distinguished() {
    let (base_url, _server) = serve(vec![
        (502, "<html>bad gateway</html>".to_owned()),
        (200, "{\"unexpected\":true}".to_owned()),
    ])
    .await;
    let service = service(&base_url);
    let request = render_request();

    let err = service.generate_chart(&request).await.expect_err("502");
    assert_eq!(
        err,
        ServiceError::Status {
            status: 502,
            detail: None
        }
    );
    assert_eq!(err.detail(), None);

    let err = service.generate_chart(&request).await.expect_err("bad body");
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);

    let err = service(&base_url)
        .upload_dataset(&support::csv_file())
        .await
        .expect_err("connection refused");
    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn controller_surfaces_render_detail_over_http() {
    let (base_url, _server) = serve(vec![
        (200, ingest_body()),
        (400, json!({"detail": "bad column"}).to_string()),
    ])
    .await;
    let config = PlaygroundConfig::default().with_api_base_url(&base_url);
    let controller = WorkflowController::from_config(
        &config,
        Arc::new(MemoryExporter::default()),
        WorkflowOptions::default(),
    )
    .expect("controller");

    assert!(
        controller
            .on_file_selected(Some(support::csv_file()))
            .await
            .is_completed()
    );
    let _ = controller.generate().await;

    assert_eq!(controller.error_message().as_deref(), Some("bad column"));
    assert!(controller.chart().is_none());
    assert!(!controller.is_busy());
}
