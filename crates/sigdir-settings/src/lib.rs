//! Config parsing and override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{OperationConfig, SCHEMA_CONFIG_V1, SigdirConfigV1};
pub use resolve::{
    DEFAULT_PROGRAM, DEFAULT_PROGRAM_ARGS, OperationSpec, Overrides, ResolvedConfig,
};

/// Parse `sigdir.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SigdirConfigV1> {
    let cfg: SigdirConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (built-in defaults < config file < CLI overrides).
pub fn resolve_config(cfg: SigdirConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
