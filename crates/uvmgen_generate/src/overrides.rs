//! The user override layer, applied after rendering.

use crate::files::FileSet;
use uvmgen_common::safe_rel_path;
use uvmgen_diagnostics::{Category, Diagnostic, DiagnosticCode};
use uvmgen_model::OverrideEntry;

/// Diagnostic codes for override problems.
pub mod codes {
    use super::{Category, DiagnosticCode};

    /// The override path is empty, absolute, escapes the output root, or
    /// would turn a file into a directory (or the reverse).
    pub const UNSAFE_PATH: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);
    /// The override value is not text.
    pub const NON_TEXT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 205);
}

/// Returns the file in `files` that `rel` cannot coexist with on disk: one
/// stored below `rel`, or one that `rel` would need as a directory.
fn conflicting_file<'a>(files: &'a FileSet, rel: &str) -> Option<&'a str> {
    files
        .keys()
        .map(String::as_str)
        .find(|existing| {
            let below = existing.strip_prefix(rel).is_some_and(|rest| rest.starts_with('/'));
            let above = rel.strip_prefix(existing).is_some_and(|rest| rest.starts_with('/'));
            below || above
        })
}

/// Replaces or adds files from `entries`, in order.
///
/// Rejected entries leave the generated content in place and produce a
/// warning. Accepted non-empty text gains a trailing newline if it lacks one.
/// Every accepted path can be written next to the files already in `files`.
pub fn apply_overrides(files: &mut FileSet, entries: &[OverrideEntry]) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    for entry in entries {
        let Some(rel) = safe_rel_path(&entry.path) else {
            tracing::warn!(path = %entry.path, "ignored override with unsafe path");
            warnings.push(
                Diagnostic::warning(
                    codes::UNSAFE_PATH,
                    format!("Ignored override with unsafe path: '{}'", entry.path),
                )
                .with_subject(entry.path.clone())
                .with_help("override paths must be relative to the project root without `..`"),
            );
            continue;
        };
        if let Some(existing) = conflicting_file(files, rel.as_str()) {
            tracing::warn!(path = %rel, conflicts_with = existing, "ignored override");
            warnings.push(
                Diagnostic::warning(
                    codes::UNSAFE_PATH,
                    format!("Ignored override that conflicts with '{existing}': '{rel}'"),
                )
                .with_subject(rel.as_str())
                .with_note("a path cannot be both a file and a directory"),
            );
            continue;
        }
        let Some(text) = &entry.text else {
            tracing::warn!(path = %rel, "ignored non-text override");
            warnings.push(
                Diagnostic::warning(
                    codes::NON_TEXT,
                    format!("Ignored override (non-string content) for: {rel}"),
                )
                .with_subject(rel.as_str()),
            );
            continue;
        };
        let mut content = text.clone();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        tracing::debug!(path = %rel, "applied override");
        files.insert(rel.as_str().to_string(), content);
    }
    warnings
}
