//! Stable DTOs and identifiers used across the sigdir workspace.
//!
//! This crate is intentionally boring:
//! - canonical basis-relative path handling
//! - the argument list handed to the per-file signature operation
//! - the batch error taxonomy and its stable kind strings
//! - data types for the emitted run report

#![forbid(unsafe_code)]

pub mod error;
pub mod ids;
pub mod invocation;
pub mod path;
pub mod report;

pub use error::BatchError;
pub use invocation::Invocation;
pub use path::RelativePath;
pub use report::{Phase, RunFailure, RunReport, RunStatus, SCHEMA_RUN_REPORT_V1, ToolMeta};
