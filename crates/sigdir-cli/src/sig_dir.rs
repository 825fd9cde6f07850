//! `sig-dir`: short alias for `signature-dir`.

use std::process::ExitCode;

fn main() -> ExitCode {
    sigdir_cli::main_entry()
}
