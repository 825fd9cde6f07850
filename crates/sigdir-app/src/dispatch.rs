//! The batch use case: validate, walk, map and dispatch, stopping at the first failure.

use crate::operation::SignatureOperation;
use camino::{Utf8Path, Utf8PathBuf};
use sigdir_domain::PathMapper;
use sigdir_repo::{collect_files, validate_input};
use sigdir_types::{BatchError, Phase};
use std::io;
use tracing::{debug, info, trace};

/// Raw arguments for one batch run.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchInput<'a> {
    /// Basis directory argument (required; blank counts as missing).
    pub basis_dir: Option<&'a str>,
    /// Signature directory argument (optional; blank counts as absent).
    pub signature_dir: Option<&'a str>,
}

/// Result of a batch in which every file succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchSummary {
    pub basis_dir: Utf8PathBuf,
    pub signature_dir: Option<Utf8PathBuf>,
    pub files_dispatched: u64,
}

/// A batch that stopped early, with enough context for diagnostics and reports.
#[derive(Debug)]
pub struct BatchFailure {
    /// Phase the dispatcher was in when the error surfaced.
    pub phase: Phase,
    pub error: BatchError,
    /// Present once validation succeeded.
    pub basis_dir: Option<Utf8PathBuf>,
    pub signature_dir: Option<Utf8PathBuf>,
    /// Invocations attempted, including the one that failed.
    pub files_dispatched: u64,
}

pub type BatchOutcome = Result<BatchSummary, BatchFailure>;

/// Sequential, fail-fast batch driver.
///
/// Walks the state machine `Idle -> Validating -> Walking -> Dispatching -> Succeeded | Failed`.
/// The walk is completed before the first invocation, so the batch covers exactly the files
/// present at walk time: files the operation writes below the basis are never picked up, and a
/// walk failure aborts with zero invocations. Each invocation completes before the next one
/// starts. There is no retry state.
pub struct Dispatcher<'o, O: SignatureOperation + ?Sized> {
    operation: &'o mut O,
    phase: Phase,
    dispatched: u64,
    basis_dir: Option<Utf8PathBuf>,
    signature_dir: Option<Utf8PathBuf>,
}

impl<'o, O: SignatureOperation + ?Sized> Dispatcher<'o, O> {
    pub fn new(operation: &'o mut O) -> Self {
        Self {
            operation,
            phase: Phase::Idle,
            dispatched: 0,
            basis_dir: None,
            signature_dir: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run(mut self, input: BatchInput<'_>) -> BatchOutcome {
        match self.drive(input) {
            Ok(()) => {
                self.enter(Phase::Succeeded);
                info!(files = self.dispatched, "signature batch succeeded");
                Ok(BatchSummary {
                    basis_dir: self.basis_dir.unwrap_or_default(),
                    signature_dir: self.signature_dir,
                    files_dispatched: self.dispatched,
                })
            }
            Err(err) => {
                let phase = self.phase;
                self.enter(Phase::Failed);
                debug!(
                    phase = phase.as_str(),
                    files = self.dispatched,
                    "signature batch failed: {err}"
                );
                Err(BatchFailure {
                    phase,
                    error: err,
                    basis_dir: self.basis_dir,
                    signature_dir: self.signature_dir,
                    files_dispatched: self.dispatched,
                })
            }
        }
    }

    fn drive(&mut self, input: BatchInput<'_>) -> Result<(), BatchError> {
        self.enter(Phase::Validating);
        let validated = validate_input(input.basis_dir, input.signature_dir)?;
        self.basis_dir = Some(validated.basis_dir.clone());
        self.signature_dir = validated.signature_dir.clone();

        let signature_dir = validated
            .signature_dir
            .as_ref()
            .map_or("<co-located>", |p| p.as_str());
        info!(
            basis_dir = %validated.basis_dir,
            signature_dir,
            operation = %self.operation.describe(),
            "starting signature batch"
        );

        let mapper = PathMapper::new(&validated.basis_dir, validated.signature_dir.as_deref());
        self.enter(Phase::Walking);
        let files = collect_files(&validated.basis_dir)?;
        debug!(files = files.len(), "walk complete");

        self.enter(Phase::Dispatching);
        for file in &files {
            self.dispatch(&mapper, file)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, mapper: &PathMapper<'_>, file: &Utf8Path) -> Result<(), BatchError> {
        let invocation = mapper.map(file).ok_or_else(|| BatchError::WalkFailure {
            path: file.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "discovered file is not below the basis directory",
            ),
        })?;

        debug!(
            index = self.dispatched,
            source = %invocation.source,
            destination = invocation.destination().map_or("<default>", |p| p.as_str()),
            "dispatching"
        );
        self.dispatched += 1;

        let code = self.operation.execute(&invocation).map_err(|source| {
            BatchError::OperationLaunchFailed {
                path: file.to_path_buf(),
                operation: self.operation.describe(),
                source,
            }
        })?;
        if code != 0 {
            return Err(BatchError::SignatureOperationFailed {
                path: file.to_path_buf(),
                code,
            });
        }
        Ok(())
    }

    fn enter(&mut self, next: Phase) {
        if self.phase != next {
            trace!(from = self.phase.as_str(), to = next.as_str(), "phase");
            self.phase = next;
        }
    }
}

/// Run one batch and keep only the error of a failed run.
pub fn run_signature_dir<O: SignatureOperation + ?Sized>(
    input: BatchInput<'_>,
    operation: &mut O,
) -> Result<BatchSummary, BatchError> {
    Dispatcher::new(operation).run(input).map_err(|f| f.error)
}

/// Map a batch error to a process exit code.
///
/// Operation failures propagate their code when it fits in `1..=255`; everything else is `1`.
pub fn error_exit_code(err: &BatchError) -> i32 {
    match err.code() {
        Some(code) if (1..=255).contains(&code) => code,
        _ => 1,
    }
}
