//! The per-file signature operation seam.

use sigdir_settings::OperationSpec;
use sigdir_types::Invocation;
use std::io;
use std::process::Command;
use tracing::warn;

/// Per-file signature operation supplied by an external collaborator.
///
/// Receives the source path and, when a signature directory was given, the mirrored
/// destination path. Returns the operation's result code: `0` for success, anything else
/// for failure. An `Err` means the operation could not be run at all.
pub trait SignatureOperation {
    fn execute(&mut self, invocation: &Invocation) -> io::Result<i32>;

    /// Short label used in diagnostics.
    fn describe(&self) -> String {
        "signature operation".to_string()
    }
}

impl<F> SignatureOperation for F
where
    F: FnMut(&Invocation) -> io::Result<i32>,
{
    fn execute(&mut self, invocation: &Invocation) -> io::Result<i32> {
        self(invocation)
    }
}

/// Runs an external program once per file: `<program> <args...> <source> [<destination>]`.
///
/// Standard streams are inherited. A process that ends without an exit code (for example
/// killed by a signal) reports `-1`.
#[derive(Clone, Debug)]
pub struct CommandOperation {
    program: String,
    leading_args: Vec<String>,
}

impl CommandOperation {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    pub fn from_spec(spec: &OperationSpec) -> Self {
        Self::new(spec.program.clone(), spec.args.clone())
    }

    fn command_for(&self, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args).args(invocation.args());
        cmd
    }
}

impl SignatureOperation for CommandOperation {
    fn execute(&mut self, invocation: &Invocation) -> io::Result<i32> {
        let status = self.command_for(invocation).status()?;
        Ok(status.code().unwrap_or_else(|| {
            warn!(
                program = %self.program,
                source = %invocation.source,
                "operation terminated without an exit code"
            );
            -1
        }))
    }

    fn describe(&self) -> String {
        format!("'{}'", self.program)
    }
}

/// Dry-run operation: records every planned invocation and reports success.
#[derive(Debug, Default)]
pub struct PlanRecorder {
    planned: Vec<Invocation>,
}

impl PlanRecorder {
    pub fn planned(&self) -> &[Invocation] {
        &self.planned
    }
}

impl SignatureOperation for PlanRecorder {
    fn execute(&mut self, invocation: &Invocation) -> io::Result<i32> {
        self.planned.push(invocation.clone());
        Ok(0)
    }

    fn describe(&self) -> String {
        "dry run".to_string()
    }
}

/// One line per invocation, arguments separated by a tab.
pub fn render_plan(planned: &[Invocation]) -> String {
    let mut out = String::new();
    for invocation in planned {
        out.push_str(&invocation.args().join("\t"));
        out.push('\n');
    }
    out
}
