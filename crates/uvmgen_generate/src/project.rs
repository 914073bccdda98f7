//! Disk generation.

use crate::error::GenerateError;
use crate::files::generate_files;
use crate::validate::validate_state;
use crate::write::atomic_write;
use std::path::PathBuf;
use uvmgen_common::safe_name;
use uvmgen_diagnostics::Diagnostic;
use uvmgen_hdl::SourceProvider;
use uvmgen_model::{ProjectModel, Snapshot};

/// The outcome of a successful [`generate_project`].
#[derive(Debug)]
pub struct GenerationResult {
    /// `<output_dir>/<project name>`.
    pub output_root: PathBuf,
    /// Every written file, in file set order.
    pub files_written: Vec<PathBuf>,
    /// Normalization and override warnings.
    pub warnings: Vec<Diagnostic>,
}

/// Validates `snapshot`, renders it and writes every file under
/// `<output_dir>/<project name>`.
///
/// Validation failures abort before anything touches the disk. Each file is
/// written atomically, but the set as a whole is not: a failure part-way
/// leaves the files already written in place.
pub fn generate_project(
    snapshot: &Snapshot,
    source: &dyn SourceProvider,
) -> Result<GenerationResult, GenerateError> {
    let errors = validate_state(snapshot);
    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "validation failed; nothing written");
        return Err(GenerateError::Validation(errors));
    }

    let output_root = output_root(snapshot);
    let (files, warnings) = generate_files(snapshot, source)?.into_parts();
    tracing::info!(root = %output_root.display(), files = files.len(), "writing project");

    let mut files_written = Vec::with_capacity(files.len());
    for (rel, content) in &files {
        let path = output_root.join(rel);
        atomic_write(&path, content)?;
        tracing::debug!(path = %path.display(), "wrote");
        files_written.push(path);
    }
    tracing::info!(written = files_written.len(), warnings = warnings.len(), "generation finished");

    Ok(GenerationResult {
        output_root,
        files_written,
        warnings,
    })
}

/// The directory [`generate_project`] writes into.
pub fn output_root(snapshot: &Snapshot) -> PathBuf {
    let model = ProjectModel::from_snapshot(snapshot).value;
    let project = model.project.unwrap_or_default();
    PathBuf::from(project.output_dir.trim()).join(safe_name(&project.project_name, "testbench"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use uvmgen_hdl::MemorySource;

    fn snapshot(out: &std::path::Path) -> Snapshot {
        Snapshot::from_value(json!({
            "project": {"project_name": "demo tb", "output_dir": out.to_string_lossy()},
            "interface": {"name": "bus_if"},
            "transaction": {"class_name": "pkt"},
            "agent": {},
            "environment": {},
            "test": {},
            "top": {},
            "custom_files": {"../escape.txt": "x", "docs/extra.txt": "hello"}
        }))
        .unwrap()
    }

    #[test]
    fn writes_full_tree() {
        let dir = TempDir::new().unwrap();
        let result = generate_project(&snapshot(dir.path()), &MemorySource::new()).unwrap();
        assert_eq!(result.output_root, dir.path().join("demo_tb"));
        for rel in ["manifest.json", "filelist.f", "README.md", "src/tb_pkg.sv", "src/top.sv"] {
            assert!(result.output_root.join(rel).is_file(), "{rel} missing");
        }
        assert_eq!(
            std::fs::read_to_string(result.output_root.join("docs/extra.txt")).unwrap(),
            "hello\n"
        );
        assert!(!dir.path().join("escape.txt").exists());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.files_written.iter().all(|p| p.starts_with(&result.output_root)));
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let snap = Snapshot::from_value(json!({
            "project": {"project_name": "p", "output_dir": dir.path().to_string_lossy()}
        }))
        .unwrap();
        let err = generate_project(&snap, &MemorySource::new()).unwrap_err();
        match err {
            GenerateError::Validation(messages) => {
                assert_eq!(messages.len(), 6);
                assert_eq!(messages[0], "Interface is missing.");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn regenerating_overwrites_in_place() {
        let dir = TempDir::new().unwrap();
        let snap = snapshot(dir.path());
        let first = generate_project(&snap, &MemorySource::new()).unwrap();
        let second = generate_project(&snap, &MemorySource::new()).unwrap();
        assert_eq!(first.files_written, second.files_written);
    }
}
