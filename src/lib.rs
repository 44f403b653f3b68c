//! # octojira - Octane ID / JIRA ID mapping
//!
//! octojira reads a test-management export (`.xlsx`) and produces the
//! normalized mapping table relating a test team, an Octane ID and the
//! JIRA IDs listed against it - one output row per JIRA ID.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ .xlsx file  │────▶│   Reader    │────▶│   Mapper    │────▶│ .xlsx output │
//! │ (test runs) │     │ (calamine)  │     │  (explode)  │     │ (xlsxwriter) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use octojira::{map_file, write_to_file, OUTPUT_FILE_NAME};
//! use std::path::Path;
//!
//! let outcome = map_file(Path::new("test_runs.xlsx"), None).unwrap();
//! write_to_file(OUTPUT_FILE_NAME, &outcome.rows).unwrap();
//! println!("Mapped {} rows", outcome.rows.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (mapping row, column contract)
//! - [`reader`] - Workbook parsing
//! - [`mapper`] - The row transform and its pipeline
//! - [`writer`] - Output workbook writing
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Workbook I/O
pub mod reader;
pub mod writer;

// Mapping
pub mod mapper;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{MapError, PipelineError, ReadError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    MappingRow, COL_JIRA_IDS, COL_OCTANE_ID, COL_TEST_TEAM, OUTPUT_COLUMNS, OUTPUT_FILE_NAME,
    OUTPUT_SHEET,
};

// =============================================================================
// Re-exports - Reader
// =============================================================================

pub use reader::{read_bytes, read_file, SheetData};

// =============================================================================
// Re-exports - Mapper
// =============================================================================

pub use mapper::engine::{map_records, MapResult, SkippedRow};
pub use mapper::pipeline::{map_bytes, map_file, MapOutcome, SheetInfo};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{write_to_buffer, write_to_file};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, MapResponse, PreviewResponse, SheetMetadata};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
