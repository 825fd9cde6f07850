//! End-to-end CLI tests.
//!
//! Every test runs with its working directory set to a fresh temp dir so that no stray
//! `sigdir.toml` is picked up, and with `RUST_LOG` cleared so log output stays at defaults.

use assert_cmd::Command;
use camino::Utf8Path;
use predicates::prelude::*;
use serde_json::Value;
use sigdir_test_util::{fixtures_dir, normalize_nondeterministic, utf8_tempdir, write_tree};

#[allow(deprecated)]
fn signature_dir_cmd(cwd: &Utf8Path) -> Command {
    let mut cmd =
        Command::cargo_bin("signature-dir").expect("signature-dir binary not found");
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Utf8Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read report");
    serde_json::from_str(&text).expect("parse report")
}

#[test]
fn missing_basis_is_rejected() {
    let (_tmp, cwd) = utf8_tempdir();
    signature_dir_cmd(&cwd)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no basis directory was specified"));
}

#[test]
fn nonexistent_basis_is_directory_not_found() {
    let (_tmp, cwd) = utf8_tempdir();
    signature_dir_cmd(&cwd)
        .arg("does-not-exist")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("directory not found"));
}

#[test]
fn dry_run_lists_one_invocation_per_file() {
    let (_tmp, cwd) = utf8_tempdir();
    let basis = fixtures_dir().join("nested");

    let output = signature_dir_cmd(&cwd)
        .arg(basis.as_str())
        .arg("--dry-run")
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in &lines {
        assert!(!line.contains('\t'), "no destination expected: {line}");
        assert!(line.starts_with(basis.as_str()), "{line}");
    }
}

#[test]
fn dry_run_with_signature_dir_pairs_source_and_destination() {
    let (_tmp, cwd) = utf8_tempdir();
    let basis = fixtures_dir().join("nested");
    let sigs = cwd.join("sigs");

    let output = signature_dir_cmd(&cwd)
        .arg(basis.as_str())
        .arg("sigs")
        .arg("--dry-run")
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let pairs: Vec<(String, String)> = stdout
        .lines()
        .map(|line| {
            let (src, dst) = line.split_once('\t').expect("tab separated");
            (src.to_string(), dst.to_string())
        })
        .collect();
    assert_eq!(pairs.len(), 5);
    assert!(pairs.iter().any(|(src, dst)| {
        src == basis.join("sub/deeper/c.txt").as_str() && dst.ends_with("/sigs/sub/deeper/c.txt")
    }));

    // Nothing is created during a dry run.
    assert!(!sigs.exists());
}

#[cfg(unix)]
#[test]
fn succeeding_program_exits_zero() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["a.txt", "sub/b.txt"]);

    signature_dir_cmd(&cwd)
        .args(["basis", "--program", "true"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn operation_exit_code_is_propagated() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["a.txt", "b.txt"]);
    let report = cwd.join("out/report.json");

    signature_dir_cmd(&cwd)
        .args(["basis", "--program", "sh", "--program-arg", "-c"])
        .args(["--program-arg", "exit 3"])
        .arg("--report-out")
        .arg(report.as_str())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("signature operation returned 3"));

    let value = read_json(&report);
    assert_eq!(value["status"], "failed");
    assert_eq!(value["files_dispatched"], 1);
    assert_eq!(value["failure"]["kind"], "signature_operation_failed");
    assert_eq!(value["failure"]["code"], 3);
    assert_eq!(value["failure"]["phase"], "dispatching");
}

#[cfg(unix)]
#[test]
fn batch_failure_is_reported_once() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["a.txt"]);

    let output = signature_dir_cmd(&cwd)
        .args(["basis", "--program", "false"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert_eq!(stderr.matches("signature operation returned 1").count(), 1, "{stderr}");
}

#[cfg(unix)]
#[test]
fn unwritable_report_keeps_the_operation_exit_code() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["a.txt"]);
    // A regular file where the report's parent directory should go.
    std::fs::write(cwd.join("blocker"), "x").expect("write blocker");

    signature_dir_cmd(&cwd)
        .args(["basis", "--program", "sh", "--program-arg", "-c"])
        .args(["--program-arg", "exit 3"])
        .args(["--report-out", "blocker/report.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("signature operation returned 3"))
        .stderr(predicate::str::contains("could not write run report"));
}

#[cfg(unix)]
#[test]
fn unwritable_report_after_success_is_an_error() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["a.txt"]);
    std::fs::write(cwd.join("blocker"), "x").expect("write blocker");

    signature_dir_cmd(&cwd)
        .args(["basis", "--program", "true"])
        .args(["--report-out", "blocker/report.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("write run report"));
}

#[cfg(unix)]
#[test]
fn program_receives_mirrored_destinations() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["a.txt", "sub/b.txt", "sub/deeper/c.txt"]);

    // `sh -c script src dst` binds src to $0 and dst to $1.
    signature_dir_cmd(&cwd)
        .args(["basis", "sigs", "--program", "sh", "--program-arg", "-c"])
        .args(["--program-arg", r#"mkdir -p "$(dirname "$1")" && cp "$0" "$1""#])
        .assert()
        .success();

    for rel in ["a.txt", "sub/b.txt", "sub/deeper/c.txt"] {
        let copied = std::fs::read_to_string(cwd.join("sigs").join(rel)).expect("mirrored file");
        assert_eq!(copied, rel);
    }
}

#[cfg(unix)]
#[test]
fn config_file_supplies_program_and_signature_dir() {
    let (_tmp, cwd) = utf8_tempdir();
    write_tree(&cwd.join("basis"), &["only.txt"]);
    std::fs::write(
        cwd.join("sigdir.toml"),
        "schema = \"sigdir.config.v1\"\nsignature_dir = \"sigs\"\n\n[operation]\nprogram = \"false\"\n",
    )
    .expect("write config");
    let report = cwd.join("report.json");

    signature_dir_cmd(&cwd)
        .arg("basis")
        .arg("--report-out")
        .arg(report.as_str())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only.txt"));

    let value = normalize_nondeterministic(read_json(&report));
    assert_eq!(value["tool"]["version"], "__VERSION__");
    assert_eq!(value["started_at"], "__TIMESTAMP__");
    let sig_dir = value["signature_dir"].as_str().expect("signature_dir");
    assert!(sig_dir.ends_with("/sigs"), "{sig_dir}");
    assert_eq!(value["failure"]["code"], 1);
}

#[test]
fn unknown_config_key_is_an_error() {
    let (_tmp, cwd) = utf8_tempdir();
    std::fs::write(cwd.join("sigdir.toml"), "bogus = true\n").expect("write config");

    signature_dir_cmd(&cwd)
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse config"));
}

#[test]
fn successful_report_counts_every_file() {
    let (_tmp, cwd) = utf8_tempdir();
    let report = cwd.join("report.json");

    signature_dir_cmd(&cwd)
        .arg(fixtures_dir().join("nested").as_str())
        .args(["--dry-run", "--report-out", report.as_str()])
        .assert()
        .success();

    let value = read_json(&report);
    assert_eq!(value["schema"], "sigdir.report.v1");
    assert_eq!(value["status"], "succeeded");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["files_dispatched"], 5);
    assert!(value.get("failure").is_none());
}
