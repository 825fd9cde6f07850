//! Batch error taxonomy.
//!
//! Every variant is fatal to the run. Nothing is retried or skipped.

use crate::ids;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    /// A required argument was missing or blank.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The resolved basis directory does not exist or is not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: Utf8PathBuf },

    /// Directory traversal failed after it started.
    #[error("failed to walk '{path}': {source}")]
    WalkFailure {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The per-file operation returned a non-zero result code.
    #[error("signature operation returned {code} for basis file '{path}'")]
    SignatureOperationFailed { path: Utf8PathBuf, code: i32 },

    /// The per-file operation could not be run at all.
    #[error("failed to run {operation} for basis file '{path}': {source}")]
    OperationLaunchFailed {
        path: Utf8PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl BatchError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BatchError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case discriminator used in run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            BatchError::InvalidArgument { .. } => ids::KIND_INVALID_ARGUMENT,
            BatchError::DirectoryNotFound { .. } => ids::KIND_DIRECTORY_NOT_FOUND,
            BatchError::WalkFailure { .. } => ids::KIND_WALK_FAILURE,
            BatchError::SignatureOperationFailed { .. } => ids::KIND_SIGNATURE_OPERATION_FAILED,
            BatchError::OperationLaunchFailed { .. } => ids::KIND_OPERATION_LAUNCH_FAILED,
        }
    }

    /// The path the error is about, if any.
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            BatchError::InvalidArgument { .. } => None,
            BatchError::DirectoryNotFound { path }
            | BatchError::WalkFailure { path, .. }
            | BatchError::SignatureOperationFailed { path, .. }
            | BatchError::OperationLaunchFailed { path, .. } => Some(path),
        }
    }

    /// Result code returned by the per-file operation, for operation failures.
    pub fn code(&self) -> Option<i32> {
        match self {
            BatchError::SignatureOperationFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}
