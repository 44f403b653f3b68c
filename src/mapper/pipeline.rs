//! High-level pipeline: read a workbook, map its rows.
//!
//! Both front ends call through here so the transform exists exactly once.
//!
//! # Example
//!
//! ```rust,ignore
//! use octojira::mapper::pipeline::map_file;
//! use std::path::Path;
//!
//! let outcome = map_file(Path::new("test_runs.xlsx"), None)?;
//! println!("Mapped {} rows", outcome.rows.len());
//! ```

use std::path::Path;

use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::PipelineResult;
use crate::mapper::engine::{map_records, SkippedRow};
use crate::models::MappingRow;
use crate::reader::{read_bytes, read_file, SheetData};

/// Result of a complete mapping run.
#[derive(Debug, Clone)]
pub struct MapOutcome {
    /// Mapping rows, in input order.
    pub rows: Vec<MappingRow>,
    /// Input rows that emitted nothing (missing required fields).
    pub skipped: Vec<SkippedRow>,
    /// Input worksheet metadata.
    pub sheet: SheetInfo,
}

/// Input worksheet information.
#[derive(Debug, Clone)]
pub struct SheetInfo {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Map a test-run export file.
///
/// `sheet` selects a worksheet by name; `None` reads the first sheet.
pub fn map_file(path: &Path, sheet: Option<&str>) -> PipelineResult<MapOutcome> {
    log_info(format!("📖 Reading workbook: {}", path.display()));
    let data = read_file(path, sheet)?;
    map_sheet(data)
}

/// Map an uploaded test-run export.
///
/// Same as [`map_file`] but accepts raw `.xlsx` bytes.
pub fn map_bytes(bytes: &[u8], sheet: Option<&str>) -> PipelineResult<MapOutcome> {
    log_info("📖 Reading uploaded workbook...");
    let data = read_bytes(bytes, sheet)?;
    map_sheet(data)
}

fn map_sheet(data: SheetData) -> PipelineResult<MapOutcome> {
    log_success(format!(
        "Read {} rows from sheet '{}'",
        data.records.len(),
        data.sheet_name
    ));

    let sheet = SheetInfo {
        sheet_name: data.sheet_name,
        headers: data.headers,
        row_count: data.records.len(),
    };

    log_info("⚙️  Mapping rows...");
    let result = map_records(&data.records)?;
    log_success(result.summary());

    if !result.skipped.is_empty() {
        log_warning(format!(
            "{} rows skipped (missing required fields)",
            result.skipped.len()
        ));
    }

    Ok(MapOutcome {
        rows: result.rows,
        skipped: result.skipped,
        sheet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MapError, PipelineError, ReadError};
    use rust_xlsxwriter::Workbook;

    fn export_workbook(rows: &[(&str, f64, &str)]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "Test Team").unwrap();
        ws.write_string(0, 1, "ID").unwrap();
        ws.write_string(0, 2, "Test: JIRA ID").unwrap();
        for (i, (team, id, jira)) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            ws.write_string(r, 0, *team).unwrap();
            ws.write_number(r, 1, *id).unwrap();
            ws.write_string(r, 2, *jira).unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_map_bytes_end_to_end() {
        let bytes = export_workbook(&[
            ("QA", 42.0, "JIRA-1, JIRA-2"),
            ("Perf", 7.0, ""),
            ("", 9.0, "ignored"),
        ]);

        let outcome = map_bytes(&bytes, None).unwrap();

        assert_eq!(outcome.sheet.row_count, 3);
        assert_eq!(outcome.sheet.headers, vec!["Test Team", "ID", "Test: JIRA ID"]);
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(outcome.rows[0].jira_id, "JIRA-1");
        assert_eq!(outcome.rows[1].jira_id, "JIRA-2");
        assert_eq!(outcome.rows[2], crate::models::MappingRow::new("Perf", "7", ""));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].row, 3);
    }

    #[test]
    fn test_map_bytes_unreadable() {
        let err = map_bytes(b"not an xlsx", None).unwrap_err();
        assert!(matches!(err, PipelineError::Read(ReadError::Invalid(_))));
    }

    #[test]
    fn test_map_bytes_bad_id_aborts() {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "Test Team").unwrap();
        ws.write_string(0, 1, "ID").unwrap();
        ws.write_string(1, 0, "QA").unwrap();
        ws.write_string(1, 1, "not-a-number").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = map_bytes(&bytes, None).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Map(MapError::BadOctaneId { row: 1, .. })
        ));
    }

    #[test]
    fn test_map_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.xlsx");
        std::fs::write(&path, export_workbook(&[("QA", 1.0, "J-1")])).unwrap();

        let outcome = map_file(&path, None).unwrap();

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].octane_id, "1");
    }
}
