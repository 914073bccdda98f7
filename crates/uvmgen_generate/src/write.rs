//! Per-file atomic writes.

use crate::error::GenerateError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `content` to `path` through a temporary file in the same
/// directory, renamed over the destination once fully written.
///
/// Missing parent directories are created. A reader never sees a partially
/// written file at `path`.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), GenerateError> {
    let write_err = |source: std::io::Error| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("file.sv");
        atomic_write(&path, "first\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");
        atomic_write(&path, "second\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = atomic_write(&blocker.join("out.sv"), "y").unwrap_err();
        match err {
            GenerateError::Write { path, .. } => assert!(path.ends_with("out.sv")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
