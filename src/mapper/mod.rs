//! Row mapping module.
//!
//! This module turns test-run records into the normalized mapping table:
//! - `engine`: the row transform (skip, trim, explode)
//! - `pipeline`: read-and-map orchestration for files and uploads

pub mod engine;
pub mod pipeline;

pub use engine::{map_records, MapResult, SkippedRow};
pub use pipeline::{map_bytes, map_file, MapOutcome, SheetInfo};
