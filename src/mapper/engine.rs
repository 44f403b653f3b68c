//! Row mapping engine.
//!
//! Produces one output row per (team, Octane ID, JIRA ID) tuple. A row
//! listing N comma-separated JIRA IDs explodes into N rows; a row listing
//! none still yields one row with an empty JIRA ID. Rows missing the team
//! or the Octane ID emit nothing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MapError;
use crate::models::{MappingRow, COL_JIRA_IDS, COL_OCTANE_ID, COL_TEST_TEAM};

/// Result of mapping a set of records.
#[derive(Debug, Default)]
pub struct MapResult {
    /// Mapping rows, in input order.
    pub rows: Vec<MappingRow>,
    /// Rows skipped due to missing required fields.
    pub skipped: Vec<SkippedRow>,
}

/// A row that was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// Data-row number within the sheet (1-based, header excluded).
    pub row: usize,
    /// Required columns that were absent or blank.
    pub missing_fields: Vec<String>,
}

impl MapResult {
    /// Get summary statistics.
    pub fn summary(&self) -> String {
        format!(
            "Mapped: {} rows, {} skipped",
            self.rows.len(),
            self.skipped.len()
        )
    }
}

/// Map input records to the normalized mapping table.
///
/// # Arguments
/// * `records` - JSON objects from worksheet parsing (each object is a row)
///
/// # Errors
/// The whole run fails on the first `ID` cell that is present but not
/// numerically interpretable, or `Test Team` cell that is non-blank but
/// not text. No partial output is produced in that case.
pub fn map_records(records: &[Value]) -> Result<MapResult, MapError> {
    let mut result = MapResult::default();

    for (idx, record) in records.iter().enumerate() {
        let row_num = idx + 1;
        let obj = match record.as_object() {
            Some(obj) => obj,
            None => continue,
        };

        let team_cell = obj.get(COL_TEST_TEAM).filter(|v| !is_blank(v));
        let id_cell = obj.get(COL_OCTANE_ID).filter(|v| !is_blank(v));

        let (team_cell, id_cell) = match (team_cell, id_cell) {
            (Some(team), Some(id)) => (team, id),
            (team, id) => {
                let mut missing = Vec::new();
                if team.is_none() {
                    missing.push(COL_TEST_TEAM.to_string());
                }
                if id.is_none() {
                    missing.push(COL_OCTANE_ID.to_string());
                }
                result.skipped.push(SkippedRow {
                    row: row_num,
                    missing_fields: missing,
                });
                continue;
            }
        };

        let test_team = team_text(team_cell, row_num)?;
        let octane_id = octane_id_text(id_cell, row_num)?;

        let jira_ids = cell_text(obj.get(COL_JIRA_IDS));
        let jira_ids = jira_ids.trim();

        if jira_ids.is_empty() {
            result.rows.push(MappingRow::new(&test_team, &octane_id, ""));
        } else {
            // Tokens are trimmed but never filtered: consecutive commas
            // still yield a row with an empty JIRA ID.
            for token in jira_ids.split(',') {
                result
                    .rows
                    .push(MappingRow::new(&test_team, &octane_id, token.trim()));
            }
        }
    }

    Ok(result)
}

/// Check if a cell is "blank" (null or whitespace-only text).
fn is_blank(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// `Test Team` must be text; any other non-blank type is a hard error.
fn team_text(cell: &Value, row: usize) -> Result<String, MapError> {
    match cell {
        Value::String(s) => Ok(s.trim().to_string()),
        other => Err(MapError::BadTeamValue {
            row,
            value: other.to_string(),
        }),
    }
}

/// Render an `ID` cell as its decimal integer form.
///
/// Numeric cells truncate any fractional part (so `42.0` and `42.7` both
/// render as `"42"`); text cells must parse as a plain integer. Booleans
/// and everything else abort the run.
fn octane_id_text(cell: &Value, row: usize) -> Result<String, MapError> {
    match cell {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else if let Some(f) = n.as_f64() {
                Ok((f.trunc() as i64).to_string())
            } else {
                Err(MapError::BadOctaneId {
                    row,
                    value: n.to_string(),
                })
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .map(|i| i.to_string())
                .map_err(|_| MapError::BadOctaneId {
                    row,
                    value: trimmed.to_string(),
                })
        }
        other => Err(MapError::BadOctaneId {
            row,
            value: other.to_string(),
        }),
    }
}

/// Render a JIRA-ID cell as display text.
///
/// Whole-number cells render without a fractional part, matching how the
/// sheet displays them.
fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}
