//! Stable identifiers for batch error kinds.
//!
//! Kinds are short snake_case discriminators written into run reports.

pub const KIND_INVALID_ARGUMENT: &str = "invalid_argument";
pub const KIND_DIRECTORY_NOT_FOUND: &str = "directory_not_found";
pub const KIND_WALK_FAILURE: &str = "walk_failure";
pub const KIND_SIGNATURE_OPERATION_FAILED: &str = "signature_operation_failed";
pub const KIND_OPERATION_LAUNCH_FAILED: &str = "operation_launch_failed";
