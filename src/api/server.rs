//! HTTP server for the octojira API.
//!
//! Provides REST endpoints for workbook upload, mapping and download.
//!
//! # API Endpoints
//!
//! | Method | Path                | Description                              |
//! |--------|---------------------|------------------------------------------|
//! | GET    | `/health`           | Health check                             |
//! | POST   | `/api/preview`      | Upload workbook, preview input rows      |
//! | POST   | `/api/map`          | Upload workbook, return mapping preview  |
//! | POST   | `/api/map/download` | Upload workbook, download mapped `.xlsx` |
//! | GET    | `/api/logs`         | SSE stream for real-time progress logs   |

use axum::{
    extract::Multipart,
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{
    error_kind, error_response, MapResponse, PreviewResponse, SheetMetadata, PREVIEW_ROWS,
};
use crate::error::PipelineError;
use crate::mapper::pipeline::map_bytes;
use crate::models::OUTPUT_FILE_NAME;
use crate::reader::read_bytes;
use crate::writer::write_to_buffer;

/// MIME type of the output artifact.
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

type ApiError = (StatusCode, Json<Value>);

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/preview", post(preview_workbook))
        .route("/api/map", post(map_workbook))
        .route("/api/map/download", post(download_mapping))
        .route("/api/logs", get(sse_logs))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 octojira server running on http://localhost:{}", port);
    println!("   POST /api/preview      - Preview input rows");
    println!("   POST /api/map          - Map a workbook");
    println!("   POST /api/map/download - Download the mapped workbook");
    println!("   GET  /api/logs         - SSE log stream");
    println!("   GET  /health           - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "octojira",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "preview": "POST /api/preview",
            "map": "POST /api/map",
            "download": "POST /api/map/download",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Pull the uploaded workbook out of a multipart form
async fn read_upload(mut multipart: Multipart) -> Result<(Vec<u8>, Option<String>), ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(&format!("Read error: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data.ok_or_else(|| bad_request("No file provided"))?;
    Ok((bytes, file_name))
}

/// Upload endpoint: preview the first input rows
async fn preview_workbook(multipart: Multipart) -> Result<Json<PreviewResponse>, ApiError> {
    let (bytes, file_name) = read_upload(multipart).await?;
    announce(&file_name, bytes.len());

    let data = read_bytes(&bytes, None).map_err(|e| pipeline_failure(e.into()))?;

    Ok(Json(PreviewResponse {
        sheet: SheetMetadata {
            sheet_name: data.sheet_name,
            row_count: data.records.len(),
            columns: data.headers,
        },
        preview: data.records.into_iter().take(PREVIEW_ROWS).collect(),
    }))
}

/// Upload endpoint: run the mapping, return a JSON preview
async fn map_workbook(multipart: Multipart) -> Result<Json<MapResponse>, ApiError> {
    let (bytes, file_name) = read_upload(multipart).await?;
    announce(&file_name, bytes.len());

    let outcome = map_bytes(&bytes, None).map_err(pipeline_failure)?;

    Ok(Json(MapResponse::from(outcome)))
}

/// Upload endpoint: run the mapping, return the `.xlsx` artifact
async fn download_mapping(multipart: Multipart) -> Result<Response, ApiError> {
    let (bytes, file_name) = read_upload(multipart).await?;
    announce(&file_name, bytes.len());

    let outcome = map_bytes(&bytes, None).map_err(pipeline_failure)?;
    let artifact =
        write_to_buffer(&outcome.rows).map_err(|e| pipeline_failure(e.into()))?;

    let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact,
    )
        .into_response())
}

fn announce(file_name: &Option<String>, size: usize) {
    println!(
        "📄 NEW UPLOAD: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        size
    );
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(error_response("bad-request", message)),
    )
}

fn pipeline_failure(err: PipelineError) -> ApiError {
    log_error(err.to_string());
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(error_response(error_kind(&err), &err.to_string())),
    )
}
