//! The dashboard summary built from computed statuses.

use crate::engine::{ready_to_generate, ModuleStatuses};
use crate::status::Status;
use crate::unit::WorkflowUnit;
use serde::Serialize;
use std::fmt;
use uvmgen_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Diagnostic codes emitted by the workflow report.
pub mod codes {
    use super::{Category, DiagnosticCode};

    /// A required unit is waiting on an absent prerequisite.
    pub const BLOCKED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
    /// A unit is reachable but unsaved or incomplete.
    pub const INCOMPLETE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 302);
}

/// Message shown when nothing is left to do.
pub const ALL_COMPLETE: &str = "OK: All required modules complete. Ready to generate.";

/// Progress lines, completion percentage and outstanding work.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkflowReport {
    /// One `[OK]` / `[TODO]` / `[BLOCKED]` line per configurable unit.
    pub lines: Vec<String>,
    /// Completed required units over all required units, rounded down.
    pub percent: u8,
    /// Count of COMPLETE required units.
    pub completed: usize,
    /// Count of required units.
    pub required: usize,
    /// One entry per unit that still needs attention.
    pub diagnostics: Vec<Diagnostic>,
    /// Every required unit is COMPLETE.
    pub ready: bool,
}

fn joined(missing: &[String], fallback: &str) -> String {
    if missing.is_empty() {
        fallback.to_string()
    } else {
        missing.join(", ")
    }
}

/// An optional unit that lists nothing or only absent prerequisite units
/// has not been started.
fn not_started(missing: &[String]) -> bool {
    missing.iter().all(|m| {
        WorkflowUnit::CONFIGURABLE
            .iter()
            .any(|u| u.requirement_name() == m)
    })
}

impl WorkflowReport {
    /// Summarizes `statuses`.
    ///
    /// The optional scoreboard contributes a diagnostic only when it has been
    /// saved but left incomplete; it never counts toward the percentage.
    pub fn from_statuses(statuses: &ModuleStatuses) -> Self {
        let mut lines = Vec::new();
        let mut diagnostics = Vec::new();
        let required = WorkflowUnit::ALL.iter().filter(|u| u.is_required()).count();
        let mut completed = 0;

        for unit in WorkflowUnit::CONFIGURABLE {
            let Some(st) = statuses.get(&unit) else {
                continue;
            };
            let label = unit.label();
            match st.status {
                Status::Complete => {
                    lines.push(format!("[OK] {label}"));
                    if unit.is_required() {
                        completed += 1;
                    }
                }
                Status::Blocked => {
                    let missing = joined(&st.missing, "dependencies");
                    lines.push(format!("[BLOCKED] {label}  (missing: {missing})"));
                    diagnostics.push(
                        Diagnostic::warning(
                            codes::BLOCKED,
                            format!("{label} is BLOCKED (missing: {missing})."),
                        )
                        .with_subject(unit.key())
                        .with_help(st.hint.clone()),
                    );
                }
                Status::Ready => {
                    if st.missing.is_empty() {
                        lines.push(format!("[TODO] {label}"));
                    } else {
                        lines.push(format!("[TODO] {label}  (missing: {})", st.missing.join(", ")));
                    }
                    if !(unit.is_optional() && not_started(&st.missing)) {
                        let missing = joined(&st.missing, "pending");
                        diagnostics.push(
                            Diagnostic::warning(
                                codes::INCOMPLETE,
                                format!("{label} is TODO (missing: {missing})."),
                            )
                            .with_subject(unit.key())
                            .with_help(st.hint.clone()),
                        );
                    }
                }
            }
        }

        let percent = if required == 0 {
            100
        } else {
            (completed * 100 / required) as u8
        };
        Self {
            lines,
            percent,
            completed,
            required,
            diagnostics,
            ready: ready_to_generate(statuses),
        }
    }

    /// Renders the report as dashboard text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Progress: {}% ({}/{} required modules complete)\n\n",
            self.percent, self.completed, self.required
        ));
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        if self.diagnostics.is_empty() {
            out.push_str(ALL_COMPLETE);
            out.push('\n');
        } else {
            out.push_str("Diagnostics:\n");
            for diag in &self.diagnostics {
                out.push_str(&format!("- {}\n", diag.message));
                for help in diag.help.iter().filter(|h| !h.is_empty()) {
                    out.push_str(&format!("  Hint: {help}\n"));
                }
            }
        }
        out
    }
}

impl fmt::Display for WorkflowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_module_statuses;
    use serde_json::json;
    use uvmgen_model::Snapshot;

    fn report(value: serde_json::Value) -> WorkflowReport {
        let snap = Snapshot::from_value(value).unwrap();
        WorkflowReport::from_statuses(&compute_module_statuses(&snap))
    }

    fn full() -> serde_json::Value {
        json!({
            "project": {"project_name": "demo", "output_dir": "out", "dut_path": "dut.sv", "module_name": "dut"},
            "interface": {"name": "bus_if", "clock": "clk", "reset": "rst", "signals": [{"name": "clk"}]},
            "transaction": {"class_name": "pkt", "fields": [{"name": "data"}]},
            "agent": {"agent_name": "a"},
            "environment": {"name": "env"},
            "sequence": {"name": "seq"},
            "test": {"name": "t"},
            "top": {"name": "top"}
        })
    }

    #[test]
    fn empty_snapshot_report() {
        let r = report(json!({}));
        assert_eq!(r.percent, 0);
        assert!(!r.ready);
        assert_eq!(
            r.lines[0],
            "[TODO] Project Details  (missing: Project Name, Output Directory, DUT File Path)"
        );
        assert_eq!(r.lines[1], "[BLOCKED] Interface & DUT  (missing: Project Details)");
        assert_eq!(r.lines.len(), WorkflowUnit::CONFIGURABLE.len());
        // the scoreboard waits on the transaction silently
        assert!(r
            .diagnostics
            .iter()
            .all(|d| d.subject.as_deref() != Some("scoreboard_class")));
        assert_eq!(r.diagnostics[1].code, codes::BLOCKED);
        assert_eq!(r.diagnostics[1].help, vec!["Save Project Details first."]);
    }

    #[test]
    fn percent_rounds_down() {
        let mut snap = full();
        let map = snap.as_object_mut().unwrap();
        for key in ["test", "top", "sequence"] {
            map.remove(key);
        }
        let r = report(snap);
        // 5 of 8 complete
        assert_eq!(r.percent, 62);
        assert_eq!((r.completed, r.required), (5, 8));
    }

    #[test]
    fn complete_project_is_ready() {
        let r = report(full());
        assert_eq!(r.percent, 100);
        assert!(r.ready);
        assert!(r.diagnostics.is_empty());
        assert!(r.to_text().contains(ALL_COMPLETE));
        assert!(r.lines.contains(&"[TODO] Scoreboard (Optional)".to_string()));
    }

    #[test]
    fn incomplete_scoreboard_is_reported() {
        let mut snap = full();
        snap["scoreboard"] = json!({"name": ""});
        let r = report(snap);
        assert!(r.ready);
        assert_eq!(r.diagnostics.len(), 1);
        let d = &r.diagnostics[0];
        assert_eq!(d.code, codes::INCOMPLETE);
        assert_eq!(d.message, "Scoreboard (Optional) is TODO (missing: Scoreboard Name).");
    }

    #[test]
    fn text_lists_hints() {
        let text = report(json!({})).to_text();
        assert!(text.starts_with("Progress: 0% (0/8 required modules complete)\n"));
        assert!(text.contains("- Interface & DUT is BLOCKED (missing: Project Details).\n  Hint: Save Project Details first.\n"));
        assert!(text.contains("- Project Details is TODO (missing: Project Name, Output Directory, DUT File Path).\n"));
    }
}
