//! Error types for disk generation.

use std::path::PathBuf;
use uvmgen_common::InternalError;

/// Errors that abort a disk generation.
///
/// Override problems and model normalization issues never appear here; they
/// are returned as warnings next to a successful result.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Pre-flight validation failed; nothing was written.
    #[error("{}", .0.join("\n"))]
    Validation(Vec<String>),

    /// A renderer could not produce its artifact.
    #[error(transparent)]
    Render(#[from] InternalError),

    /// A generated file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The background generation thread panicked.
    #[error("generation job panicked")]
    JobPanicked,
}
