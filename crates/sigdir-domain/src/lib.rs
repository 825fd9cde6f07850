//! Pure path logic (no IO).
//!
//! Input: absolute paths produced by validation and the walker.
//! Output: basis-relative paths and the invocation for each discovered file.

#![forbid(unsafe_code)]

pub mod mapper;
pub mod normalize;

#[cfg(test)]
mod proptest;

pub use mapper::{PathMapper, destination_for, relative_path};
pub use normalize::{absolutize, normalize_lexically};
