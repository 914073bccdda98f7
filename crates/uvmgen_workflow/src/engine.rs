//! Status computation for every workflow unit.

use crate::graph::WorkflowGraph;
use crate::status::{ModuleStatus, Status};
use crate::unit::WorkflowUnit;
use std::collections::BTreeMap;
use uvmgen_model::{ProjectModel, Snapshot};

/// Statuses keyed by unit, iterating in display order.
pub type ModuleStatuses = BTreeMap<WorkflowUnit, ModuleStatus>;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Computes the status of every unit from `snapshot`.
///
/// Pure and idempotent: the result depends only on the snapshot. A unit is
/// BLOCKED when a prerequisite key is absent, COMPLETE when its own key is
/// present and every required field is filled, READY otherwise. The
/// scoreboard is optional and never BLOCKED; nothing waits on it.
pub fn compute_module_statuses(snapshot: &Snapshot) -> ModuleStatuses {
    let model = ProjectModel::from_snapshot(snapshot).value;
    let graph = WorkflowGraph::new();
    let mut statuses = ModuleStatuses::new();

    for unit in WorkflowUnit::ALL {
        let Some(key) = unit.snapshot_key() else {
            statuses.insert(unit, ModuleStatus::page());
            continue;
        };

        let absent: Vec<WorkflowUnit> = graph
            .prerequisites(unit)
            .into_iter()
            .filter(|p| p.snapshot_key().is_some_and(|k| !snapshot.contains(k)))
            .collect();

        let status = if !absent.is_empty() {
            let names: Vec<&str> = absent.iter().map(|p| p.requirement_name()).collect();
            if unit.is_optional() {
                ModuleStatus::ready(names, "Optional: define Transaction first to add a scoreboard.")
            } else {
                ModuleStatus::blocked(names, blocked_hint(unit))
            }
        } else {
            let (missing, hint) = required_fields(unit, &model);
            if missing.is_empty() && snapshot.contains(key) {
                ModuleStatus::complete()
            } else {
                ModuleStatus::ready(missing, hint)
            }
        };
        statuses.insert(unit, status);
    }
    tracing::debug!(
        complete = statuses.values().filter(|s| s.status == Status::Complete).count(),
        blocked = statuses.values().filter(|s| s.status == Status::Blocked).count(),
        "computed module statuses"
    );
    statuses
}

fn blocked_hint(unit: WorkflowUnit) -> &'static str {
    match unit {
        WorkflowUnit::InterfaceDut => "Save Project Details first.",
        WorkflowUnit::TransactionClass => "Define Interface first (then Import fields).",
        WorkflowUnit::AgentClass | WorkflowUnit::SequenceClass => "Define Transaction first.",
        WorkflowUnit::EnvironmentClass => "Configure Agent first.",
        WorkflowUnit::TestClass => "Define Environment first.",
        WorkflowUnit::TopModule => "Define Test and Interface first.",
        _ => "Save the prerequisite units first.",
    }
}

/// Blank required fields of `unit` and the hint shown while any remain.
fn required_fields(unit: WorkflowUnit, model: &ProjectModel) -> (Vec<&'static str>, &'static str) {
    let mut missing = Vec::new();
    let hint = match unit {
        WorkflowUnit::ProjectDetails => {
            let p = model.project.clone().unwrap_or_default();
            if blank(&p.project_name) {
                missing.push("Project Name");
            }
            if blank(&p.output_dir) {
                missing.push("Output Directory");
            }
            if blank(&p.dut_path) {
                missing.push("DUT File Path");
            }
            "Fill project basics and save."
        }
        WorkflowUnit::InterfaceDut => {
            let i = model.interface.clone().unwrap_or_default();
            if blank(&i.name) {
                missing.push("Interface Name");
            }
            if i.signals.is_empty() {
                missing.push("Signals");
            }
            if blank(&i.clock) {
                missing.push("Clock Signal");
            }
            if blank(&i.reset) {
                missing.push("Reset Signal");
            }
            "Import signals from DUT and choose clock/reset."
        }
        WorkflowUnit::TransactionClass => {
            let t = model.transaction.clone().unwrap_or_default();
            if blank(&t.class_name) {
                missing.push("Class Name");
            }
            if t.fields.is_empty() {
                missing.push("Fields");
            }
            "Import from Interface."
        }
        WorkflowUnit::AgentClass => {
            if model.agent.as_ref().map_or(true, |a| blank(&a.agent_name)) {
                missing.push("Agent Name");
            }
            "Configure agent components."
        }
        WorkflowUnit::ScoreboardClass => {
            if model.scoreboard.as_ref().is_some_and(|s| blank(&s.name)) {
                missing.push("Scoreboard Name");
            }
            "Optional: add scoreboard."
        }
        WorkflowUnit::EnvironmentClass => {
            if model.environment.as_ref().map_or(true, |e| blank(&e.name)) {
                missing.push("Environment Name");
            }
            "Include agent/scoreboard as needed."
        }
        WorkflowUnit::SequenceClass => {
            if model.sequence.as_ref().map_or(true, |s| blank(&s.name)) {
                missing.push("Sequence Name");
            }
            "Add steps and preview."
        }
        WorkflowUnit::TestClass => {
            if model.test.as_ref().map_or(true, |t| blank(&t.name)) {
                missing.push("Test Name");
            }
            "Create env instance if needed."
        }
        WorkflowUnit::TopModule => {
            let top = model.top.clone().unwrap_or_default();
            if blank(&top.name) {
                missing.push("Top Name");
            }
            let project_module = model.project.as_ref().map_or("", |p| p.module_name.as_str());
            if blank(&top.dut_module) && blank(project_module) {
                missing.push("DUT Module");
            }
            "Detect DUT module and preview."
        }
        WorkflowUnit::Preview | WorkflowUnit::StateMachine | WorkflowUnit::Dashboard => "",
    };
    (missing, hint)
}

/// Returns `true` if every required unit is COMPLETE.
pub fn ready_to_generate(statuses: &ModuleStatuses) -> bool {
    WorkflowUnit::ALL
        .iter()
        .filter(|u| u.is_required())
        .all(|u| statuses.get(u).is_some_and(|s| s.status == Status::Complete))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statuses(value: serde_json::Value) -> ModuleStatuses {
        compute_module_statuses(&Snapshot::from_value(value).unwrap())
    }

    fn full() -> serde_json::Value {
        json!({
            "project": {"project_name": "demo", "output_dir": "out", "dut_path": "rtl/dut.sv", "module_name": "dut"},
            "interface": {"name": "bus_if", "clock": "clk", "reset": "rst", "signals": [{"name": "clk"}]},
            "transaction": {"class_name": "pkt", "fields": [{"name": "data"}]},
            "agent": {"agent_name": "bus_agent"},
            "environment": {"name": "env"},
            "sequence": {"name": "seq"},
            "test": {"name": "base_test"},
            "top": {"name": "top_tb"}
        })
    }

    #[test]
    fn empty_snapshot() {
        let st = statuses(json!({}));
        let pd = &st[&WorkflowUnit::ProjectDetails];
        assert_eq!(pd.status, Status::Ready);
        assert_eq!(pd.missing, vec!["Project Name", "Output Directory", "DUT File Path"]);
        assert_eq!(st[&WorkflowUnit::InterfaceDut].status, Status::Blocked);
        assert_eq!(st[&WorkflowUnit::TopModule].missing, vec!["Test", "Interface"]);
        assert_eq!(st[&WorkflowUnit::Preview].status, Status::Ready);
    }

    #[test]
    fn project_only() {
        let st = statuses(json!({
            "project": {"project_name": "demo", "output_dir": "out", "dut_path": "dut.sv"}
        }));
        assert_eq!(st[&WorkflowUnit::ProjectDetails].status, Status::Complete);
        let intf = &st[&WorkflowUnit::InterfaceDut];
        assert_eq!(intf.status, Status::Ready);
        assert_eq!(
            intf.missing,
            vec!["Interface Name", "Signals", "Clock Signal", "Reset Signal"]
        );
        let txn = &st[&WorkflowUnit::TransactionClass];
        assert_eq!(txn.status, Status::Blocked);
        assert_eq!(txn.missing, vec!["Interface"]);
        assert_eq!(txn.hint, "Define Interface first (then Import fields).");
    }

    #[test]
    fn saved_but_blank_is_ready() {
        let st = statuses(json!({"project": {}}));
        assert_eq!(st[&WorkflowUnit::ProjectDetails].status, Status::Ready);
        assert_eq!(st[&WorkflowUnit::InterfaceDut].status, Status::Ready);
    }

    #[test]
    fn filled_but_unsaved_is_never_complete() {
        let mut snap = full();
        snap.as_object_mut().unwrap().remove("test");
        let st = statuses(snap);
        let test = &st[&WorkflowUnit::TestClass];
        assert_eq!(test.status, Status::Ready);
        assert_eq!(test.missing, vec!["Test Name"]);
        let top = &st[&WorkflowUnit::TopModule];
        assert_eq!(top.status, Status::Blocked);
        assert_eq!(top.missing, vec!["Test"]);
    }

    #[test]
    fn full_snapshot_is_ready_to_generate() {
        let st = statuses(full());
        for unit in WorkflowUnit::ALL.iter().filter(|u| u.is_required()) {
            assert_eq!(st[unit].status, Status::Complete, "{unit}");
        }
        assert!(ready_to_generate(&st));
    }

    #[test]
    fn scoreboard_is_never_blocked() {
        let st = statuses(json!({}));
        let sb = &st[&WorkflowUnit::ScoreboardClass];
        assert_eq!(sb.status, Status::Ready);
        assert_eq!(sb.missing, vec!["Transaction"]);

        let st = statuses(full());
        let sb = &st[&WorkflowUnit::ScoreboardClass];
        assert_eq!(sb.status, Status::Ready);
        assert!(sb.missing.is_empty());

        let mut snap = full();
        snap["scoreboard"] = json!({"name": " "});
        let st = statuses(snap);
        assert_eq!(st[&WorkflowUnit::ScoreboardClass].missing, vec!["Scoreboard Name"]);

        let mut snap = full();
        snap["scoreboard"] = json!({"name": "sb"});
        let st = statuses(snap);
        assert_eq!(st[&WorkflowUnit::ScoreboardClass].status, Status::Complete);
    }

    #[test]
    fn top_dut_module_falls_back_to_project() {
        let mut snap = full();
        snap["project"]["module_name"] = json!("");
        let st = statuses(snap.clone());
        assert_eq!(st[&WorkflowUnit::TopModule].missing, vec!["DUT Module"]);
        snap["top"]["dut_module"] = json!("alu");
        let st = statuses(snap);
        assert_eq!(st[&WorkflowUnit::TopModule].status, Status::Complete);
    }

    #[test]
    fn idempotent() {
        let snap = Snapshot::from_value(full()).unwrap();
        assert_eq!(compute_module_statuses(&snap), compute_module_statuses(&snap));
    }
}
