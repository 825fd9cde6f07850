//! Filesystem adapters: validate the basis directory and discover the files below it.
//!
//! This crate is allowed to read the filesystem. It never writes, and it does not spawn
//! external processes; running the per-file operation is the caller's job.

#![forbid(unsafe_code)]

mod validate;
mod walk;

pub use validate::{ValidatedInput, validate_input, validate_input_in};
pub use walk::{FileWalker, collect_files};
