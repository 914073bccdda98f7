//! Snapshot file loading and saving.
//!
//! The same key/value model can be kept as JSON (the form tool's native
//! format) or TOML (easier to write by hand).

use crate::error::ModelError;
use crate::snapshot::Snapshot;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk encodings of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `*.json`
    Json,
    /// `*.toml`
    Toml,
}

impl SnapshotFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SnapshotFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(SnapshotFormat::Toml),
            _ => Err(ModelError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Toml => "toml",
        }
    }
}

/// Loads a snapshot from `path`, choosing the format by extension.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, ModelError> {
    let format = SnapshotFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    load_snapshot_from_str(&content, format)
}

/// Parses a snapshot from a string.
///
/// An empty or whitespace-only document is an empty snapshot.
pub fn load_snapshot_from_str(content: &str, format: SnapshotFormat) -> Result<Snapshot, ModelError> {
    if content.trim().is_empty() {
        return Ok(Snapshot::new());
    }
    let parse_err = |message: String| ModelError::Parse {
        format: format.name(),
        message,
    };
    let map: Map<String, Value> = match format {
        SnapshotFormat::Json => {
            let value: Value = serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            match value {
                Value::Object(map) => map,
                _ => return Err(ModelError::NotATable),
            }
        }
        SnapshotFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
    };
    Ok(Snapshot::from_map(map))
}

/// Encodes a snapshot in the given format.
pub fn snapshot_to_string(snapshot: &Snapshot, format: SnapshotFormat) -> Result<String, ModelError> {
    let encode_err = |message: String| ModelError::Encode {
        format: format.name(),
        message,
    };
    match format {
        SnapshotFormat::Json => serde_json::to_string_pretty(snapshot.as_map())
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| encode_err(e.to_string())),
        SnapshotFormat::Toml => {
            toml::to_string_pretty(snapshot.as_map()).map_err(|e| encode_err(e.to_string()))
        }
    }
}

/// Saves a snapshot to `path`, choosing the format by extension.
///
/// The file is written to a uniquely named temporary file in the same
/// directory and persisted over `path`, so a failed save leaves the old
/// snapshot intact.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), ModelError> {
    let format = SnapshotFormat::from_path(path)?;
    let text = snapshot_to_string(snapshot, format)?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), "saved snapshot");
    Ok(())
}
