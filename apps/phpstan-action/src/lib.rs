//! phpstan-action core library.
//!
//! Turns a PHPStan JSON report into GitHub annotations and publishes them
//! either as workflow commands or as a Check Run.
//!
//! High-level modules:
//! - `report`: Tolerant decoding of the report into `models::Report`.
//! - `annotate`: Workspace-relative annotations, one per finding.
//! - `summary`: Pluralized "N issue(s) found" text.
//! - `publish`: The `Publisher` capability and its two sinks.
//! - `github`: Blocking Checks API client.
//! - `config`: Config file discovery and effective settings.
//! - `pipeline`: The end-to-end run used by the binary.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Stderr styling.
pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod publish;
pub mod report;
pub mod summary;

pub use error::Error;
