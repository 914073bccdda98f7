//! Assembly of the complete generated file set.

use crate::overrides::apply_overrides;
use serde::Serialize;
use std::collections::BTreeMap;
use uvmgen_common::{GenResult, InternalError};
use uvmgen_diagnostics::{Degraded, DiagnosticSink};
use uvmgen_hdl::SourceProvider;
use uvmgen_model::{ProjectModel, Snapshot};
use uvmgen_render::{render_sources, RenderContext, SourceFiles, PACKAGE_FILE};

/// Generated files keyed by POSIX relative path under the project root.
///
/// A sorted map, so iteration and serialization order never depend on
/// insertion order.
pub type FileSet = BTreeMap<String, String>;

/// Manifest file name.
pub const MANIFEST_FILE: &str = "manifest.json";
/// Simulator file list name.
pub const FILELIST_FILE: &str = "filelist.f";
/// README file name.
pub const README_FILE: &str = "README.md";

#[derive(Serialize)]
struct Manifest<'a> {
    project_name: &'a str,
    generated_files: Vec<&'a str>,
}

/// Renders every file for `snapshot`.
///
/// Normalization and override problems come back as warnings. Only a
/// renderer failure is an error.
pub fn generate_files(
    snapshot: &Snapshot,
    source: &dyn SourceProvider,
) -> GenResult<Degraded<FileSet>> {
    let sink = DiagnosticSink::new();
    let (model, normalized) = ProjectModel::from_snapshot(snapshot).into_parts();
    sink.extend(normalized);
    let ctx = RenderContext::new(&model, source);
    let sources = render_sources(&ctx)?;
    let files = assemble(&model, sources, &sink)?;
    Ok(sink.finish(files))
}

/// Wraps rendered sources with the manifest, file list and README, then
/// applies overrides when enabled.
pub(crate) fn assemble(
    model: &ProjectModel,
    sources: SourceFiles,
    sink: &DiagnosticSink,
) -> GenResult<FileSet> {
    let project_name = model
        .project
        .as_ref()
        .map(|p| uvmgen_common::safe_name(&p.project_name, "testbench"))
        .unwrap_or_else(|| "testbench".to_string());

    let mut files = FileSet::new();
    let manifest = Manifest {
        project_name: &project_name,
        generated_files: sources.keys().map(String::as_str).collect(),
    };
    let mut manifest_text = serde_json::to_string_pretty(&manifest)
        .map_err(|e| InternalError::new(format!("failed to encode manifest: {e}")))?;
    manifest_text.push('\n');
    files.insert(MANIFEST_FILE.to_string(), manifest_text);

    let filelist: Vec<String> = ["interface.sv", PACKAGE_FILE, "top.sv"]
        .into_iter()
        .filter(|f| sources.contains_key(*f))
        .map(|f| format!("src/{f}\n"))
        .collect();
    files.insert(FILELIST_FILE.to_string(), filelist.concat());

    files.insert(
        README_FILE.to_string(),
        format!(
            "# {project_name}\n\nGenerated by uvmgen.\n\n## Files\n\n- `src/tb_pkg.sv`\n- `src/top.sv`\n"
        ),
    );

    for (name, text) in sources {
        files.insert(format!("src/{name}"), text);
    }

    if model.custom_files_enabled && !model.custom_files.is_empty() {
        sink.extend(apply_overrides(&mut files, &model.custom_files));
    }
    Ok(files)
}
