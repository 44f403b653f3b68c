//! Output workbook writing.
//!
//! Emits the mapping table as a single-sheet `.xlsx`: header row first,
//! one data row per mapping row. A zero-row table is a valid artifact.

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::{WriteError, WriteResult};
use crate::models::{MappingRow, OUTPUT_COLUMNS, OUTPUT_SHEET};

/// Build the output workbook in memory (e.g. for an HTTP download).
pub fn write_to_buffer(rows: &[MappingRow]) -> WriteResult<Vec<u8>> {
    let mut workbook = build_workbook(rows)?;
    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Write the output workbook to a file.
pub fn write_to_file<P: AsRef<Path>>(path: P, rows: &[MappingRow]) -> WriteResult<()> {
    let mut workbook = build_workbook(rows)?;
    workbook.save(path.as_ref()).map_err(xlsx_err)
}

fn build_workbook(rows: &[MappingRow]) -> WriteResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET).map_err(xlsx_err)?;

    for (col, header) in OUTPUT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.test_team).map_err(xlsx_err)?;
        worksheet.write_string(r, 1, &row.octane_id).map_err(xlsx_err)?;
        worksheet.write_string(r, 2, &row.jira_id).map_err(xlsx_err)?;
    }

    Ok(workbook)
}

fn xlsx_err(err: XlsxError) -> WriteError {
    match err {
        XlsxError::IoError(e) => WriteError::Io(e),
        other => WriteError::Workbook(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_bytes;

    #[test]
    fn test_buffer_round_trips_through_reader() {
        let rows = vec![
            MappingRow::new("QA", "42", "JIRA-1"),
            MappingRow::new("Perf", "7", ""),
        ];

        let bytes = write_to_buffer(&rows).unwrap();
        let data = read_bytes(&bytes, None).unwrap();

        assert_eq!(data.sheet_name, OUTPUT_SHEET);
        assert_eq!(data.headers, vec!["Test Team", "Octane ID", "JIRA ID"]);
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0]["Test Team"], "QA");
        assert_eq!(data.records[0]["Octane ID"], "42");
        assert_eq!(data.records[0]["JIRA ID"], "JIRA-1");
    }

    #[test]
    fn test_zero_rows_writes_header_only() {
        let bytes = write_to_buffer(&[]).unwrap();
        let data = read_bytes(&bytes, None).unwrap();

        assert_eq!(data.headers, vec!["Test Team", "Octane ID", "JIRA ID"]);
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        write_to_file(&path, &[MappingRow::new("QA", "1", "J-1")]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let data = read_bytes(&bytes, Some(OUTPUT_SHEET)).unwrap();
        assert_eq!(data.records.len(), 1);
    }
}
