//! `tb_pkg.sv`, the package that includes every class file.

use std::fmt::Write;
use uvmgen_common::GenResult;

/// Package file name.
pub const PACKAGE_FILE: &str = "tb_pkg.sv";

/// Class files in include order.
///
/// The transaction comes first so the sequence and every component can name
/// it; sub-components precede the agent that instantiates them, and each
/// container follows what it contains.
pub const INCLUDE_ORDER: [&str; 9] = [
    "transaction.sv",
    "sequence.sv",
    "sequencer.sv",
    "driver.sv",
    "monitor.sv",
    "agent.sv",
    "scoreboard.sv",
    "environment.sv",
    "test.sv",
];

/// The subset of [`INCLUDE_ORDER`] for which `present` returns `true`.
pub fn include_order(present: impl Fn(&str) -> bool) -> Vec<&'static str> {
    INCLUDE_ORDER.into_iter().filter(|f| present(*f)).collect()
}

/// Renders the package including `files` in the given order.
pub fn render_package(files: &[&str]) -> GenResult<String> {
    let mut out = String::new();
    writeln!(out, "package tb_pkg;")?;
    writeln!(out, "  import uvm_pkg::*;")?;
    writeln!(out, "  `include \"uvm_macros.svh\"")?;
    writeln!(out)?;
    for file in files {
        writeln!(out, "  `include \"{file}\"")?;
    }
    writeln!(out)?;
    writeln!(out, "endpackage : tb_pkg")?;
    Ok(out)
}
