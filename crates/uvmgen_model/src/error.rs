//! Error types for reading and writing snapshot files.

use std::path::PathBuf;

/// Errors that can occur when loading or saving a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// An I/O error occurred while reading or writing the snapshot.
    #[error("failed to access snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The file content could not be parsed.
    #[error("failed to parse {format} snapshot: {message}")]
    Parse {
        /// `json` or `toml`.
        format: &'static str,
        /// The parser's message.
        message: String,
    },

    /// The snapshot could not be encoded.
    #[error("failed to encode {format} snapshot: {message}")]
    Encode {
        /// `json` or `toml`.
        format: &'static str,
        /// The encoder's message.
        message: String,
    },

    /// The top level of the file is not a key/value table.
    #[error("snapshot must be a table of units")]
    NotATable,

    /// The file extension names no known snapshot format.
    #[error("unsupported snapshot format for '{}' (expected .json or .toml)", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },
}
