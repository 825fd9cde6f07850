use crate::model::{SCHEMA_CONFIG_V1, SigdirConfigV1};

pub const DEFAULT_PROGRAM: &str = "octodiff";
pub const DEFAULT_PROGRAM_ARGS: &[&str] = &["signature"];

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub signature_dir: Option<String>,
    pub program: Option<String>,
    pub program_args: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationSpec {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Raw signature directory argument; validation resolves it to an absolute path.
    pub signature_dir: Option<String>,
    pub operation: OperationSpec,
}

pub fn resolve_config(
    cfg: SigdirConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let signature_dir = overrides
        .signature_dir
        .or(cfg.signature_dir)
        .filter(|s| !s.trim().is_empty());

    // The program and its leading args travel together: overriding one from the CLI
    // does not inherit args configured for a different program.
    let program_overridden = overrides.program.is_some();
    let program = overrides
        .program
        .or(cfg.operation.program)
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    if program.trim().is_empty() {
        anyhow::bail!("operation program must not be empty");
    }

    let args = match overrides.program_args {
        Some(args) => args,
        None if program_overridden => Vec::new(),
        None => cfg.operation.args.unwrap_or_else(|| {
            if program == DEFAULT_PROGRAM {
                DEFAULT_PROGRAM_ARGS.iter().map(|s| s.to_string()).collect()
            } else {
                Vec::new()
            }
        }),
    };

    Ok(ResolvedConfig {
        signature_dir,
        operation: OperationSpec { program, args },
    })
}
