//! In-memory preview that never fails.

use crate::files::{assemble, FileSet};
use std::fmt;
use uvmgen_diagnostics::{Diagnostic, DiagnosticSink};
use uvmgen_hdl::SourceProvider;
use uvmgen_model::{ProjectModel, Snapshot};
use uvmgen_render::{add_package, Artifact, RenderContext, SourceFiles, PACKAGE_FILE};

/// A rendered but unwritten file set.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    /// Every file that generation would write.
    pub files: FileSet,
    /// Normalization and override warnings.
    pub warnings: Vec<Diagnostic>,
}

fn placeholder(err: impl fmt::Display) -> String {
    format!("// preview error: {err}\n")
}

/// Renders `snapshot` for display.
///
/// A renderer failure replaces only the affected file with a
/// `// preview error: ...` line.
pub fn render_preview(snapshot: &Snapshot, source: &dyn SourceProvider) -> Preview {
    let sink = DiagnosticSink::new();
    let (model, normalized) = ProjectModel::from_snapshot(snapshot).into_parts();
    sink.extend(normalized);
    let ctx = RenderContext::new(&model, source);

    let mut sources = SourceFiles::new();
    for artifact in Artifact::ALL {
        match artifact.render(&ctx) {
            Ok(rendered) => {
                for (name, text) in rendered {
                    sources.insert(name.to_string(), text);
                }
            }
            Err(e) => {
                tracing::warn!(file = artifact.file_name(), error = %e, "preview render failed");
                sources.insert(artifact.file_name().to_string(), placeholder(&e));
            }
        }
    }
    if let Err(e) = add_package(&mut sources) {
        sources.insert(PACKAGE_FILE.to_string(), placeholder(&e));
    }

    let files = match assemble(&model, sources.clone(), &sink) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(error = %e, "preview assembly failed");
            sources
                .into_iter()
                .map(|(name, text)| (format!("src/{name}"), text))
                .collect()
        }
    };
    Preview {
        files,
        warnings: sink.finish(()).warnings,
    }
}

impl Preview {
    /// The text of one file.
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// The combined view: a warnings block, then every `.sv` file in path
    /// order under a `// ===== path =====` banner.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if !self.warnings.is_empty() {
            out.push_str("// WARNINGS:\n");
            let lines: Vec<String> = self
                .warnings
                .iter()
                .map(|w| format!("// - {}", w.message))
                .collect();
            out.push_str(&lines.join("\n"));
            out.push_str("\n\n");
        }
        for (path, text) in self.files.iter().filter(|(p, _)| p.ends_with(".sv")) {
            out.push_str(&format!("// ===== {path} =====\n"));
            out.push_str(text);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::generate_files;
    use serde_json::json;
    use uvmgen_hdl::MemorySource;

    #[test]
    fn matches_generated_files() {
        let snap = Snapshot::from_value(json!({
            "project": {"project_name": "p"},
            "custom_files": {"src/top.sv": "// mine"}
        }))
        .unwrap();
        let src = MemorySource::new();
        let preview = render_preview(&snap, &src);
        let generated = generate_files(&snap, &src).unwrap();
        assert_eq!(preview.files, generated.value);
        assert_eq!(preview.file("src/top.sv"), Some("// mine\n"));
    }

    #[test]
    fn combined_text_layout() {
        let snap = Snapshot::from_value(json!({
            "custom_files": {"/abs.sv": "x"}
        }))
        .unwrap();
        let text = render_preview(&snap, &MemorySource::new()).to_text();
        assert!(text.starts_with("// WARNINGS:\n// - Ignored override with unsafe path: '/abs.sv'\n\n"));
        let agent = text.find("// ===== src/agent.sv =====\n").unwrap();
        let top = text.find("// ===== src/top.sv =====\n").unwrap();
        assert!(agent < top);
        assert!(!text.contains("manifest.json"));
        assert!(text.ends_with("endclass : txn_item\n\n"));
    }

    #[test]
    fn clean_preview_has_no_warning_block() {
        let snap = Snapshot::from_value(json!({})).unwrap();
        let text = render_preview(&snap, &MemorySource::new()).to_string();
        assert!(text.starts_with("// ===== src/agent.sv =====\n"));
    }
}
