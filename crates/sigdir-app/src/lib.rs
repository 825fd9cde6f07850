//! Use case orchestration for sigdir.
//!
//! This crate provides the application layer: the batch dispatcher that ties validation,
//! discovery and path mapping to the per-file signature operation. It is intentionally thin
//! and delegates path math to `sigdir-domain` and filesystem access to `sigdir-repo`.
//!
//! The CLI crate depends on this; it only handles argument parsing, logging setup and I/O.

#![forbid(unsafe_code)]

mod dispatch;
mod operation;
mod report;

pub use dispatch::{
    BatchFailure, BatchInput, BatchOutcome, BatchSummary, Dispatcher, error_exit_code,
    run_signature_dir,
};
pub use operation::{CommandOperation, PlanRecorder, SignatureOperation, render_plan};
pub use report::{build_run_report, serialize_report, write_report};
