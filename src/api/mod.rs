//! HTTP API module.
//!
//! This module provides the HTTP server, response types and the progress
//! log broadcaster.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::start_server;
pub use types::*;
