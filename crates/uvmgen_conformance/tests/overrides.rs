//! The override layer as seen through whole generation runs.

use serde_json::json;
use tempfile::TempDir;
use uvmgen_conformance::{alu_source, full_project, generate, with};
use uvmgen_generate::generate_project;

#[test]
fn overrides_replace_and_add_files() {
    let dir = TempDir::new().unwrap();
    let snap = with(
        &full_project(dir.path()),
        "custom_files",
        json!({"src/driver.sv": "// hand-written driver", "scripts/run.do": "run -all\n"}),
    );
    let out = generate(&snap);
    assert!(out.is_clean());
    assert_eq!(out.value["src/driver.sv"], "// hand-written driver\n");
    assert_eq!(out.value["scripts/run.do"], "run -all\n");
}

#[test]
fn disabled_overrides_keep_generated_content() {
    let dir = TempDir::new().unwrap();
    let base = with(
        &full_project(dir.path()),
        "custom_files",
        json!({"src/driver.sv": "// hand-written driver"}),
    );
    for flag in [json!(false), json!("no"), json!(0)] {
        let snap = with(&base, "custom_files_enabled", flag);
        let out = generate(&snap);
        assert!(out.value["src/driver.sv"].starts_with("class alu_agent_driver"));
        assert!(out.is_clean());
    }
}

#[test]
fn bad_entries_warn_and_fall_back() {
    let dir = TempDir::new().unwrap();
    let snap = with(
        &full_project(dir.path()),
        "custom_files",
        json!({
            "../outside.sv": "x",
            "C:/windows.sv": "x",
            "src/top.sv": 42,
            "src/monitor.sv": "// custom monitor\n"
        }),
    );
    let result = generate_project(&snap, &alu_source()).unwrap();
    assert_eq!(result.warnings.len(), 3);
    let messages: Vec<&str> = result.warnings.iter().map(|w| w.message.as_str()).collect();
    assert!(messages.contains(&"Ignored override with unsafe path: '../outside.sv'"));
    assert!(messages.contains(&"Ignored override (non-string content) for: src/top.sv"));

    let root = result.output_root;
    assert!(!dir.path().join("outside.sv").exists());
    assert!(std::fs::read_to_string(root.join("src/top.sv"))
        .unwrap()
        .contains("module alu_tb;"));
    assert_eq!(
        std::fs::read_to_string(root.join("src/monitor.sv")).unwrap(),
        "// custom monitor\n"
    );
}

#[test]
fn file_directory_conflicts_do_not_abort_generation() {
    let dir = TempDir::new().unwrap();
    let snap = with(
        &full_project(dir.path()),
        "custom_files",
        json!({"src": "x", "src/top.sv/extra.sv": "y", "README.md/notes": "z"}),
    );
    let result = generate_project(&snap, &alu_source()).unwrap();
    assert_eq!(result.warnings.len(), 3);
    assert!(result
        .warnings
        .iter()
        .all(|w| w.message.starts_with("Ignored override that conflicts with")));

    let root = result.output_root;
    assert!(root.join("src").is_dir());
    assert!(std::fs::read_to_string(root.join("src/top.sv"))
        .unwrap()
        .contains("module alu_tb;"));
    assert!(root.join("src/agent.sv").is_file());
    assert!(root.join("README.md").is_file());
}

#[test]
fn overrides_do_not_change_manifest_listing() {
    let dir = TempDir::new().unwrap();
    let snap = with(&full_project(dir.path()), "custom_files", json!({"extra.sv": "// x"}));
    let files = generate(&snap).value;
    let manifest: serde_json::Value = serde_json::from_str(&files["manifest.json"]).unwrap();
    let listed = manifest["generated_files"].as_array().unwrap();
    assert!(!listed.iter().any(|v| v == "extra.sv"));
    assert_eq!(files["extra.sv"], "// x\n");
}
