//! Pre-flight checks run before anything is written to disk.

use uvmgen_diagnostics::{Category, Diagnostic, DiagnosticCode};
use uvmgen_model::{keys, ProjectModel, Snapshot};

/// Diagnostic codes for pre-flight validation.
pub mod codes {
    use super::{Category, DiagnosticCode};

    /// A required project field is blank.
    pub const MISSING_FIELD: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
    /// A required unit is absent from the snapshot.
    pub const MISSING_UNIT: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
}

/// Units that must be present, with the name used in messages.
const REQUIRED_UNITS: [(&str, &str); 6] = [
    (keys::INTERFACE, "Interface"),
    (keys::TRANSACTION, "Transaction"),
    (keys::AGENT, "Agent"),
    (keys::ENVIRONMENT, "Environment"),
    (keys::TEST, "Test"),
    (keys::TOP, "Top Module"),
];

/// The minimum a disk generation needs, as diagnostics.
///
/// This is a coarser gate than the workflow engine: it checks the project
/// name, the output directory and the presence of the structural units.
pub fn validation_diagnostics(snapshot: &Snapshot) -> Vec<Diagnostic> {
    let model = ProjectModel::from_snapshot(snapshot).value;
    let project = model.project.unwrap_or_default();
    let mut out = Vec::new();

    if project.project_name.trim().is_empty() {
        out.push(
            Diagnostic::error(codes::MISSING_FIELD, "Project Name is required.")
                .with_subject(keys::PROJECT),
        );
    }
    if project.output_dir.trim().is_empty() {
        out.push(
            Diagnostic::error(codes::MISSING_FIELD, "Output Directory is required.")
                .with_subject(keys::PROJECT),
        );
    }
    for (key, label) in REQUIRED_UNITS {
        if !snapshot.contains(key) {
            out.push(
                Diagnostic::error(codes::MISSING_UNIT, format!("{label} is missing."))
                    .with_subject(key),
            );
        }
    }
    out
}

/// The pre-flight error messages; empty means generation may proceed.
pub fn validate_state(snapshot: &Snapshot) -> Vec<String> {
    validation_diagnostics(snapshot)
        .into_iter()
        .map(|d| d.message)
        .collect()
}
