//! `signature-dir`: create signatures for every file below a basis directory.

use std::process::ExitCode;

fn main() -> ExitCode {
    sigdir_cli::main_entry()
}
