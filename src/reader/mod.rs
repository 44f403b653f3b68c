//! Workbook reading.
//!
//! Converts worksheet rows into JSON objects keyed by column header.
//! No mapping logic here - the mapper decides which columns matter.

use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use serde_json::{Map, Number, Value};

use crate::error::{ReadError, ReadResult};

/// Result of reading a worksheet, with metadata.
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Name of the worksheet that was read.
    pub sheet_name: String,
    /// Column headers from the first row, trimmed.
    pub headers: Vec<String>,
    /// Data rows as JSON objects, in sheet order. Fully blank rows are
    /// dropped; cells keep their type (text, number, bool, null).
    pub records: Vec<Value>,
}

/// Read a worksheet from an `.xlsx` file.
///
/// `sheet` selects a worksheet by name; `None` reads the first sheet.
pub fn read_file<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> ReadResult<SheetData> {
    let file = std::fs::File::open(path.as_ref())?;
    let mut workbook =
        Xlsx::new(BufReader::new(file)).map_err(|e| ReadError::Invalid(e.to_string()))?;
    read_sheet(&mut workbook, sheet)
}

/// Read a worksheet from in-memory `.xlsx` bytes (e.g. an upload).
pub fn read_bytes(bytes: &[u8], sheet: Option<&str>) -> ReadResult<SheetData> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| ReadError::Invalid(e.to_string()))?;
    read_sheet(&mut workbook, sheet)
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    sheet: Option<&str>,
) -> ReadResult<SheetData> {
    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(ReadError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .ok_or(ReadError::NoSheets)?
            .clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReadError::Invalid(e.to_string()))?;

    let mut rows = range.rows();

    // First row = column headers
    let header_row = rows
        .next()
        .ok_or_else(|| ReadError::EmptySheet(sheet_name.clone()))?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ReadError::NoHeaders(sheet_name));
    }

    let mut records = Vec::new();

    for row in rows {
        if row.iter().all(is_blank_cell) {
            continue;
        }

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = row.get(i).map(cell_to_value).unwrap_or(Value::Null);
            obj.insert(header.clone(), value);
        }
        records.push(Value::Object(obj));
    }

    Ok(SheetData {
        sheet_name,
        headers,
        records,
    })
}

fn is_blank_cell(cell: &Data) -> bool {
    cell.to_string().trim().is_empty()
}

/// Convert a worksheet cell to a JSON value, preserving its type.
///
/// Formula errors (`#N/A`, `#DIV/0!`, ...) read as null, the same
/// missing-value marker as an empty cell. Native datetimes surface as
/// their numeric serial value so the mapper can reject them where text
/// is required.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Number::from_f64(dt.as_f64())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Error(_) => Value::Null,
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn sample_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Runs").unwrap();

        ws.write_string(0, 0, " Test Team ").unwrap();
        ws.write_string(0, 1, "ID").unwrap();
        ws.write_string(0, 2, "Test: JIRA ID").unwrap();

        ws.write_string(1, 0, "QA").unwrap();
        ws.write_number(1, 1, 42.0).unwrap();
        ws.write_string(1, 2, "JIRA-1, JIRA-2").unwrap();

        // blank row, then another data row
        ws.write_string(3, 0, "Perf").unwrap();
        ws.write_number(3, 1, 7.0).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_read_bytes_basic() {
        let data = read_bytes(&sample_workbook(), None).unwrap();

        assert_eq!(data.sheet_name, "Runs");
        assert_eq!(data.headers, vec!["Test Team", "ID", "Test: JIRA ID"]);
        assert_eq!(data.records.len(), 2);

        assert_eq!(data.records[0]["Test Team"], "QA");
        assert_eq!(data.records[0]["ID"], 42.0);
        assert_eq!(data.records[0]["Test: JIRA ID"], "JIRA-1, JIRA-2");

        // Cell missing from the row reads as null
        assert_eq!(data.records[1]["Test Team"], "Perf");
        assert!(data.records[1]["Test: JIRA ID"].is_null());
    }

    #[test]
    fn test_blank_rows_dropped() {
        let data = read_bytes(&sample_workbook(), None).unwrap();
        // Row 3 of the sheet is fully blank and must not appear
        assert_eq!(data.records.len(), 2);
    }

    #[test]
    fn test_sheet_selection() {
        let data = read_bytes(&sample_workbook(), Some("Runs")).unwrap();
        assert_eq!(data.sheet_name, "Runs");

        let err = read_bytes(&sample_workbook(), Some("Nope")).unwrap_err();
        assert!(matches!(err, ReadError::SheetNotFound(_)));
    }

    #[test]
    fn test_invalid_bytes() {
        let err = read_bytes(b"this is not a zip archive", None).unwrap_err();
        assert!(matches!(err, ReadError::Invalid(_)));
    }

    #[test]
    fn test_empty_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = read_bytes(&bytes, None).unwrap_err();
        assert!(matches!(err, ReadError::EmptySheet(_)));
    }

    #[test]
    fn test_cell_types_preserved() {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "a").unwrap();
        ws.write_string(0, 1, "b").unwrap();
        ws.write_string(0, 2, "c").unwrap();
        ws.write_number(1, 0, 1.5).unwrap();
        ws.write_boolean(1, 1, true).unwrap();
        ws.write_string(1, 2, "text").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let data = read_bytes(&bytes, None).unwrap();
        assert_eq!(data.records[0]["a"], 1.5);
        assert_eq!(data.records[0]["b"], true);
        assert_eq!(data.records[0]["c"], "text");
    }

    #[test]
    fn test_read_file_missing() {
        let err = read_file("/no/such/file.xlsx", None).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }
}
