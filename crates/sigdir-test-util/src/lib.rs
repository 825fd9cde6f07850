//! Shared test utilities for the sigdir workspace.
//!
//! This crate exists because the repo, app and CLI test suites all need the same on-disk
//! tree builders and the same stub for the per-file operation. A `#[cfg(test)]` module
//! inside one crate would not be visible to the others.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use sigdir_types::Invocation;
use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory and return it together with its UTF-8 path.
///
/// Keep the `TempDir` alive for as long as the path is used.
pub fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 temp path");
    (tmp, root)
}

/// Write one small file per `/`-separated relative path below `root`, creating parents.
pub fn write_tree(root: &Utf8Path, files: &[&str]) {
    for rel in files {
        let mut path = root.to_path_buf();
        for segment in rel.split('/') {
            path.push(segment);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, rel.as_bytes()).expect("write file");
    }
}

/// Path to the shared fixture trees (repo root / tests / fixtures).
pub fn fixtures_dir() -> Utf8PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/sigdir-test-util -> crates -> repo root
    let repo_root = manifest_dir
        .parent()
        .expect("sigdir-test-util should have parent (crates)")
        .parent()
        .expect("crates should have parent (repo root)");
    Utf8PathBuf::from_path_buf(repo_root.join("tests").join("fixtures"))
        .expect("fixture path should be valid UTF-8")
}

/// `/`-joined form of `path` relative to `root`, for order-independent comparisons.
pub fn rel_string(path: &Utf8Path, root: &Utf8Path) -> String {
    path.strip_prefix(root)
        .expect("path below root")
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Stand-in for the per-file signature operation.
///
/// Records every invocation and answers with scripted result codes, then `0` once the
/// script runs out.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Vec<Invocation>,
    codes: VecDeque<i32>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes<I: IntoIterator<Item = i32>>(codes: I) -> Self {
        Self {
            calls: Vec::new(),
            codes: codes.into_iter().collect(),
        }
    }

    pub fn call(&mut self, invocation: &Invocation) -> std::io::Result<i32> {
        self.calls.push(invocation.clone());
        Ok(self.codes.pop_front().unwrap_or(0))
    }

    pub fn calls(&self) -> &[Invocation] {
        &self.calls
    }

    /// Sources of all recorded calls, relative to `root`.
    pub fn sources_below(&self, root: &Utf8Path) -> BTreeSet<String> {
        self.calls
            .iter()
            .map(|c| rel_string(&c.source, root))
            .collect()
    }
}

/// Normalize non-deterministic run report fields for golden comparison.
///
/// `started_at` and `finished_at` become `"__TIMESTAMP__"` at any depth. `tool.version`
/// becomes `"__VERSION__"` only on a root object that looks like a run report.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("status");
        if is_report
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
