use crate::BatchError;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for run reports.
pub const SCHEMA_RUN_REPORT_V1: &str = "sigdir.report.v1";

/// States of the batch state machine.
///
/// `Idle -> Validating -> Walking -> Dispatching -> Succeeded | Failed`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Validating,
    Walking,
    Dispatching,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Walking => "walking",
            Phase::Dispatching => "dispatching",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Diagnostic block for a failed run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    pub kind: String,
    pub message: String,
    /// Phase the batch was in when the error surfaced.
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Utf8PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl RunFailure {
    pub fn from_error(err: &BatchError, phase: Phase) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            phase,
            path: err.path().map(|p| p.to_path_buf()),
            code: err.code(),
        }
    }
}

/// Receipt for one batch run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Resolved basis directory; absent when validation rejected the argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis_dir: Option<Utf8PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_dir: Option<Utf8PathBuf>,
    pub dry_run: bool,
    pub status: RunStatus,
    pub files_dispatched: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<RunFailure>,
}
