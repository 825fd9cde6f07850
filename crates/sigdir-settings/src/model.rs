use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "sigdir.config.v1";

/// `sigdir.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigdirConfigV1 {
    /// Optional schema string for tooling (`sigdir.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Default output root when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_dir: Option<String>,

    #[serde(default)]
    pub operation: OperationConfig,
}

/// The program run once per basis file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Leading arguments, placed before the source and destination paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}
