//! Domain models for the Octane/JIRA mapping table.
//!
//! The column contract is literal: input files must carry the exact
//! headers named here, and the output workbook carries exactly the three
//! output columns in [`OUTPUT_COLUMNS`] order.

use serde::{Deserialize, Serialize};

// =============================================================================
// Column Contract
// =============================================================================

/// Input column holding the team name.
pub const COL_TEST_TEAM: &str = "Test Team";

/// Input column holding the Octane identifier.
pub const COL_OCTANE_ID: &str = "ID";

/// Input column holding zero or more comma-separated JIRA identifiers.
pub const COL_JIRA_IDS: &str = "Test: JIRA ID";

/// Output column headers, in sheet order.
pub const OUTPUT_COLUMNS: [&str; 3] = ["Test Team", "Octane ID", "JIRA ID"];

/// Worksheet name of the output workbook.
pub const OUTPUT_SHEET: &str = "Mapped Data";

/// Default file name of the output artifact.
pub const OUTPUT_FILE_NAME: &str = "octane_jira_mapping_output.xlsx";

// =============================================================================
// Mapping Row
// =============================================================================

/// One row of the normalized mapping table.
///
/// `octane_id` is the decimal integer rendering of the source `ID` cell;
/// `jira_id` is a single trimmed identifier, or empty when the source row
/// listed none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRow {
    pub test_team: String,
    pub octane_id: String,
    pub jira_id: String,
}

impl MappingRow {
    pub fn new(
        test_team: impl Into<String>,
        octane_id: impl Into<String>,
        jira_id: impl Into<String>,
    ) -> Self {
        Self {
            test_team: test_team.into(),
            octane_id: octane_id.into(),
            jira_id: jira_id.into(),
        }
    }
}
