//! Shared foundational helpers used across the uvmgen testbench generator.
//!
//! This crate provides the identifier and relative-path sanitizers every
//! renderer runs user text through, plus the internal error type used when
//! an artifact cannot be produced at all.

#![warn(missing_docs)]

pub mod result;
pub mod sanitize;

pub use result::{GenResult, InternalError};
pub use sanitize::{is_identifier, safe_name, safe_rel_path, RelPath};
