//! `uvmgen init`: writes a starter project model.

use std::path::Path;

use serde_json::json;
use uvmgen_common::safe_name;
use uvmgen_model::{keys, save_snapshot, Snapshot};

use crate::model_file::resolve_model_path;
use crate::GlobalArgs;

/// Runs `uvmgen init`. Refuses to overwrite an existing model.
pub fn run(name: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let path = resolve_model_path(global.model.as_deref(), &cwd);
    let fallback = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("testbench")
        .to_string();
    let project_name = name.unwrap_or(fallback);
    write_starter(&path, &project_name)?;
    if !global.quiet {
        eprintln!("    Creating project model `{project_name}`");
        eprintln!("     Created {}", path.display());
    }
    Ok(0)
}

/// The starter model: only a project record.
pub fn starter_snapshot(project_name: &str) -> Snapshot {
    let mut snapshot = Snapshot::new();
    snapshot.insert(
        keys::PROJECT,
        json!({
            "project_name": safe_name(project_name, "testbench"),
            "output_dir": "generated",
            "dut_path": "",
            "module_name": "",
        }),
    );
    snapshot
}

/// Writes the starter model to `path` unless a file is already there.
pub fn write_starter(path: &Path, project_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()).into());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save_snapshot(path, &starter_snapshot(project_name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uvmgen_model::load_snapshot;

    #[test]
    fn writes_json_starter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("uvmgen.json");
        write_starter(&path, "my alu").unwrap();
        let snap = load_snapshot(&path).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get("project").unwrap()["project_name"], "my_alu");
    }

    #[test]
    fn writes_toml_starter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("uvmgen.toml");
        write_starter(&path, "alu").unwrap();
        let snap = load_snapshot(&path).unwrap();
        assert_eq!(snap.get("project").unwrap()["output_dir"], "generated");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("uvmgen.json");
        std::fs::write(&path, "{}").unwrap();
        let err = write_starter(&path, "x").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
