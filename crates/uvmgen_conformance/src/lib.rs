//! Shared fixtures for the uvmgen conformance tests.
//!
//! Every builder returns a fresh [`Snapshot`] so tests can mutate it freely.
//! The DUT source is served from memory through [`alu_source`].

#![warn(missing_docs)]

use serde_json::{json, Value};
use std::path::Path;
use uvmgen_diagnostics::Degraded;
use uvmgen_generate::{generate_files, FileSet};
use uvmgen_hdl::MemorySource;
use uvmgen_model::Snapshot;

/// Path the fixtures use for the DUT source.
pub const ALU_PATH: &str = "rtl/alu.sv";

/// A small parameterized DUT with one port no interface signal matches.
pub const ALU_SV: &str = "\
// 8-bit ALU
module alu #(
  parameter WIDTH = 8,
  parameter OPS = 4
) (
  input  logic                   clk,
  input  logic                   rst_n,
  input  logic [WIDTH-1:0]       a,
  input  logic [WIDTH-1:0]       b,
  input  logic [$clog2(OPS)-1:0] op,
  output logic [WIDTH-1:0]       y,
  output logic                   irq
);
endmodule
";

/// A source provider holding [`ALU_SV`] at [`ALU_PATH`].
pub fn alu_source() -> MemorySource {
    MemorySource::new().with_file(ALU_PATH, ALU_SV)
}

/// Converts a JSON object into a snapshot. Panics on non-objects.
pub fn snapshot(value: Value) -> Snapshot {
    Snapshot::from_value(value).expect("fixture must be a JSON object")
}

/// Only the project record.
pub fn project_only(output_dir: &Path) -> Snapshot {
    snapshot(json!({
        "project": {
            "project_name": "alu tb",
            "output_dir": output_dir.to_string_lossy(),
            "dut_path": ALU_PATH,
            "module_name": "alu"
        }
    }))
}

/// A project where every unit, the scoreboard included, is saved and
/// complete.
pub fn full_project(output_dir: &Path) -> Snapshot {
    snapshot(json!({
        "project": {
            "project_name": "alu tb",
            "output_dir": output_dir.to_string_lossy(),
            "dut_path": ALU_PATH,
            "module_name": "alu"
        },
        "interface": {
            "name": "alu_if",
            "clock": "clk",
            "reset": "rst_n",
            "signals": [
                {"direction": "input", "name": "a", "width": "8"},
                {"direction": "input", "name": "b", "width": "8"},
                {"direction": "input", "name": "op", "width": "2"},
                {"direction": "output", "name": "y", "width": "8"}
            ],
            "modports": {
                "drv": {"a": "output", "b": "output", "op": "output"},
                "mon": {"a": "input", "b": "input", "op": "input", "y": "input"}
            }
        },
        "transaction": {
            "class_name": "alu_txn",
            "fields": [
                {"rand": true, "type": "bit [7:0]", "name": "a"},
                {"rand": true, "type": "bit [7:0]", "name": "b"},
                {"rand": true, "type": "bit [1:0]", "name": "op"},
                {"rand": false, "type": "bit [7:0]", "name": "y"},
                {"rand": false, "type": "string", "name": "tag"}
            ],
            "constraints": [{"name": "op_c", "body": "op inside {[0:2]}"}]
        },
        "agent": {"agent_name": "alu_agent", "type": "active"},
        "scoreboard": {
            "name": "alu_sb",
            "compare_mode": "manual",
            "enable_coverage": true,
            "fields": ["y", "tag"]
        },
        "environment": {"name": "alu_env", "include_scoreboard": true},
        "sequence": {
            "name": "alu_seq",
            "steps": [
                {"item_name": "warmup", "repeat": 4},
                {"item_name": "add", "randomize": false, "assignments": {"op": "0", "a": "8'h01"}, "delay": 10}
            ]
        },
        "test": {"name": "alu_test", "start_sequence": true, "sequence_name": "alu_seq"},
        "top": {"name": "alu_tb"}
    }))
}

/// A copy of `snapshot` without `key`.
pub fn without(snapshot: &Snapshot, key: &str) -> Snapshot {
    let mut out = snapshot.clone();
    out.remove(key);
    out
}

/// A copy of `snapshot` with `key` set to `value`.
pub fn with(snapshot: &Snapshot, key: &str, value: Value) -> Snapshot {
    let mut out = snapshot.clone();
    out.insert(key, value);
    out
}

/// Runs [`generate_files`] against [`alu_source`].
pub fn generate(snapshot: &Snapshot) -> Degraded<FileSet> {
    generate_files(snapshot, &alu_source()).expect("rendering must not fail")
}
