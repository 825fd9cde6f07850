//! Run report use cases: build the receipt for a finished batch and persist it.

use crate::dispatch::BatchOutcome;
use anyhow::Context;
use camino::Utf8Path;
use sigdir_types::{RunFailure, RunReport, RunStatus, SCHEMA_RUN_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

pub const TOOL_NAME: &str = "sigdir";

pub fn build_run_report(
    outcome: &BatchOutcome,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
    dry_run: bool,
) -> RunReport {
    let tool = ToolMeta {
        name: TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match outcome {
        Ok(summary) => RunReport {
            schema: SCHEMA_RUN_REPORT_V1.to_string(),
            tool,
            started_at,
            finished_at,
            basis_dir: Some(summary.basis_dir.clone()),
            signature_dir: summary.signature_dir.clone(),
            dry_run,
            status: RunStatus::Succeeded,
            files_dispatched: summary.files_dispatched,
            failure: None,
        },
        Err(failure) => RunReport {
            schema: SCHEMA_RUN_REPORT_V1.to_string(),
            tool,
            started_at,
            finished_at,
            basis_dir: failure.basis_dir.clone(),
            signature_dir: failure.signature_dir.clone(),
            dry_run,
            status: RunStatus::Failed,
            files_dispatched: failure.files_dispatched,
            failure: Some(RunFailure::from_error(&failure.error, failure.phase)),
        },
    }
}

/// Pretty JSON with a trailing newline.
pub fn serialize_report(report: &RunReport) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(report).context("serialize run report")?;
    out.push('\n');
    Ok(out)
}

pub fn write_report(path: &Utf8Path, report: &RunReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
