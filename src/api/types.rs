//! REST API types for front-end integration.
//!
//! Responses are camelCase JSON; errors carry a stable `errorKind` tag so
//! a client can render a precise message per failure kind.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{MapError, PipelineError};
use crate::mapper::engine::SkippedRow;
use crate::mapper::pipeline::{MapOutcome, SheetInfo};
use crate::models::MappingRow;

/// Number of rows shown in previews.
pub const PREVIEW_ROWS: usize = 10;

/// Response sent after a workbook upload and mapping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Always "ok" - a zero-row table is a valid outcome
    pub status: String,

    /// First rows of the mapping table
    pub preview: Vec<MappingRow>,

    /// Total number of mapping rows produced
    pub row_count: usize,

    /// Input rows that emitted nothing (missing required fields)
    pub skipped: Vec<SkippedRow>,

    /// Input worksheet metadata
    pub sheet: SheetMetadata,
}

/// Input worksheet metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMetadata {
    pub sheet_name: String,
    pub row_count: usize,
    pub columns: Vec<String>,
}

/// Response for an input preview request (before mapping).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub sheet: SheetMetadata,

    /// First input rows, as read
    pub preview: Vec<Value>,
}

impl From<SheetInfo> for SheetMetadata {
    fn from(info: SheetInfo) -> Self {
        SheetMetadata {
            sheet_name: info.sheet_name,
            row_count: info.row_count,
            columns: info.headers,
        }
    }
}

impl From<MapOutcome> for MapResponse {
    fn from(outcome: MapOutcome) -> Self {
        let preview: Vec<MappingRow> =
            outcome.rows.iter().take(PREVIEW_ROWS).cloned().collect();

        MapResponse {
            job_id: Uuid::new_v4().to_string(),
            status: "ok".to_string(),
            preview,
            row_count: outcome.rows.len(),
            skipped: outcome.skipped,
            sheet: outcome.sheet.into(),
        }
    }
}

/// Stable error-kind tag for a pipeline failure.
pub fn error_kind(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::Read(_) => "unreadable-workbook",
        PipelineError::Map(MapError::BadOctaneId { .. }) => "bad-octane-id",
        PipelineError::Map(MapError::BadTeamValue { .. }) => "bad-team-value",
        PipelineError::Write(_) => "output-failed",
    }
}

/// Create an error response body.
pub fn error_response(kind: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "errorKind": kind,
        "error": message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;

    fn outcome() -> MapOutcome {
        MapOutcome {
            rows: (0..12)
                .map(|i| MappingRow::new("QA", i.to_string(), format!("J-{}", i)))
                .collect(),
            skipped: vec![SkippedRow {
                row: 4,
                missing_fields: vec!["ID".to_string()],
            }],
            sheet: SheetInfo {
                sheet_name: "Runs".to_string(),
                headers: vec!["Test Team".to_string(), "ID".to_string()],
                row_count: 13,
            },
        }
    }

    #[test]
    fn test_map_response_preview_truncated() {
        let response = MapResponse::from(outcome());

        assert_eq!(response.status, "ok");
        assert_eq!(response.row_count, 12);
        assert_eq!(response.preview.len(), PREVIEW_ROWS);
        assert_eq!(response.sheet.sheet_name, "Runs");
    }

    #[test]
    fn test_map_response_camel_case() {
        let json = serde_json::to_value(MapResponse::from(outcome())).unwrap();

        assert!(json.get("jobId").is_some());
        assert!(json.get("rowCount").is_some());
        assert_eq!(json["skipped"][0]["missingFields"][0], "ID");
        assert_eq!(json["sheet"]["sheetName"], "Runs");
    }

    #[test]
    fn test_error_kind_tags() {
        let read: PipelineError = ReadError::NoSheets.into();
        assert_eq!(error_kind(&read), "unreadable-workbook");

        let map: PipelineError = MapError::BadOctaneId {
            row: 1,
            value: "x".into(),
        }
        .into();
        assert_eq!(error_kind(&map), "bad-octane-id");
    }

    #[test]
    fn test_error_response_shape() {
        let body = error_response("bad-octane-id", "Row 3: nope");

        assert_eq!(body["status"], "error");
        assert_eq!(body["errorKind"], "bad-octane-id");
        assert_eq!(body["error"], "Row 3: nope");
    }
}
