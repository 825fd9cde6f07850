//! CLI entry point for sigdir.
//!
//! This crate is intentionally thin: it handles argument parsing, logging setup, I/O and exit
//! codes. All batch logic lives in the `sigdir-app` crate.

#![forbid(unsafe_code)]

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use sigdir_app::{
    BatchInput, BatchOutcome, CommandOperation, Dispatcher, PlanRecorder, build_run_report,
    error_exit_code, render_plan, write_report,
};
use sigdir_settings::Overrides;
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "signature-dir",
    version,
    about = "Given a basis directory, creates signature files for all files inside - including subdirectories",
    after_help = "EXAMPLES:\n    \
        signature-dir ./basis\n    \
        signature-dir ./basis ./signatures\n    \
        signature-dir ./basis ./signatures --dry-run\n    \
        signature-dir ./basis --program sigtool --program-arg create"
)]
pub struct Cli {
    /// The directory to read and create signatures from.
    #[arg(value_name = "BASIS_DIR")]
    basis_dir: Option<String>,

    /// The directory to write the signatures to, mirroring the basis layout.
    #[arg(value_name = "SIGNATURE_DIR")]
    signature_dir: Option<String>,

    /// Path to sigdir config TOML (a missing file is allowed).
    #[arg(long, default_value = "sigdir.toml")]
    config: Utf8PathBuf,

    /// Program run once per basis file (overrides config).
    #[arg(long, value_name = "PROGRAM")]
    program: Option<String>,

    /// Leading argument for the program, placed before the paths. Repeatable.
    #[arg(long = "program-arg", value_name = "ARG", allow_hyphen_values = true)]
    program_args: Vec<String>,

    /// Walk and map without running the program; print one planned invocation per line.
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON run report to this path.
    #[arg(long, value_name = "FILE")]
    report_out: Option<Utf8PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Shared `main` for both binaries.
pub fn main_entry() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("signature-dir error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cfg_text = read_config(cli)?;
    let cfg = if cfg_text.trim().is_empty() {
        sigdir_settings::SigdirConfigV1::default()
    } else {
        sigdir_settings::parse_config_toml(&cfg_text)
            .with_context(|| format!("parse config {}", cli.config))?
    };

    let overrides = Overrides {
        signature_dir: cli.signature_dir.clone(),
        program: cli.program.clone(),
        program_args: (!cli.program_args.is_empty()).then(|| cli.program_args.clone()),
    };
    let resolved = sigdir_settings::resolve_config(cfg, overrides).context("resolve config")?;
    debug!(
        config = %cli.config,
        program = %resolved.operation.program,
        args = ?resolved.operation.args,
        dry_run = cli.dry_run,
        "resolved configuration"
    );

    let input = BatchInput {
        basis_dir: cli.basis_dir.as_deref(),
        signature_dir: resolved.signature_dir.as_deref(),
    };

    let started_at = OffsetDateTime::now_utc();
    let outcome = if cli.dry_run {
        let mut plan = PlanRecorder::default();
        let outcome = Dispatcher::new(&mut plan).run(input);
        print!("{}", render_plan(plan.planned()));
        outcome
    } else {
        let mut operation = CommandOperation::from_spec(&resolved.operation);
        Dispatcher::new(&mut operation).run(input)
    };
    let finished_at = OffsetDateTime::now_utc();

    if let Some(report_out) = &cli.report_out {
        let report = build_run_report(&outcome, started_at, finished_at, cli.dry_run);
        if let Err(err) = write_report(report_out, &report) {
            // A failed batch keeps its own exit code; the report is secondary.
            if outcome.is_ok() {
                return Err(err.context("write run report"));
            }
            warn!("could not write run report: {err:#}");
        }
    }

    Ok(finish(outcome))
}

fn finish(outcome: BatchOutcome) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(failure) => {
            eprintln!("signature-dir error: {}", failure.error);
            error_exit_code(&failure.error)
        }
    }
}

/// Read the config file; a missing file at the default location yields defaults.
fn read_config(cli: &Cli) -> anyhow::Result<String> {
    match std::fs::read_to_string(&cli.config) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("read config {}", cli.config)),
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose {
        "sigdir=debug,warn"
    } else {
        "sigdir=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
