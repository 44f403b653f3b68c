//! Error types for the octojira mapping pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ReadError`] - workbook reading errors
//! - [`MapError`] - row mapping errors
//! - [`WriteError`] - output workbook errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Workbook Reading Errors
// =============================================================================

/// Errors while reading an input workbook.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Not a readable Excel workbook.
    #[error("Not a readable Excel workbook: {0}")]
    Invalid(String),

    /// Workbook has no sheets at all.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// A worksheet was requested by name and does not exist.
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The worksheet has no rows.
    #[error("Worksheet '{0}' is empty")]
    EmptySheet(String),

    /// The first row contains no usable column headers.
    #[error("No column headers found in worksheet '{0}'")]
    NoHeaders(String),
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors during row mapping.
///
/// Both variants abort the whole run: the mapping table is only produced
/// when every kept row converts cleanly.
#[derive(Debug, Error)]
pub enum MapError {
    /// An `ID` cell is present but not numerically interpretable.
    #[error("Row {row}: cannot interpret Octane ID '{value}' as an integer")]
    BadOctaneId { row: usize, value: String },

    /// A `Test Team` cell holds a non-text value (boolean, date, number).
    #[error("Row {row}: 'Test Team' must be text, got '{value}'")]
    BadTeamValue { row: usize, value: String },
}

// =============================================================================
// Output Writing Errors
// =============================================================================

/// Errors while writing the output workbook.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Workbook serialization failed.
    #[error("Failed to build output workbook: {0}")]
    Workbook(String),

    /// Failed to write the output file.
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the main error type returned by [`crate::mapper::pipeline`].
/// Each variant corresponds to one user-visible failure kind.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input workbook could not be read.
    #[error("Workbook error: {0}")]
    Read(#[from] ReadError),

    /// Row mapping failed.
    #[error("Mapping error: {0}")]
    Map(#[from] MapError),

    /// Output workbook could not be produced.
    #[error("Output error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook reading.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for output writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ReadError -> PipelineError
        let read_err = ReadError::NoSheets;
        let pipeline_err: PipelineError = read_err.into();
        assert!(pipeline_err.to_string().contains("no sheets"));

        // MapError -> PipelineError
        let map_err = MapError::BadOctaneId {
            row: 7,
            value: "N/A".into(),
        };
        let pipeline_err: PipelineError = map_err.into();
        assert!(pipeline_err.to_string().contains("Row 7"));
        assert!(pipeline_err.to_string().contains("N/A"));

        // WriteError -> PipelineError
        let write_err = WriteError::Workbook("disk full".into());
        let pipeline_err: PipelineError = write_err.into();
        assert!(pipeline_err.to_string().contains("disk full"));
    }

    #[test]
    fn test_bad_team_value_format() {
        let err = MapError::BadTeamValue {
            row: 3,
            value: "true".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 3"));
        assert!(msg.contains("Test Team"));
        assert!(msg.contains("true"));
    }
}
