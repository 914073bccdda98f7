//! The agent and its sub-components: `agent.sv`, `driver.sv`, `monitor.sv`,
//! `sequencer.sv`.
//!
//! Each file is independently overridable by the agent's custom code. A
//! component with custom text is emitted verbatim; the rest are generated.

use crate::context::RenderContext;
use std::fmt::Write;
use uvmgen_common::GenResult;
use uvmgen_model::AgentUnit;

/// Agent component keys and the file each one renders to.
pub const AGENT_FILES: [(&str, &str); 4] = [
    ("agent", "agent.sv"),
    ("driver", "driver.sv"),
    ("monitor", "monitor.sv"),
    ("sequencer", "sequencer.sv"),
];

fn custom(text: &str) -> String {
    let mut out = text.trim().to_string();
    out.push('\n');
    out
}

/// Renders every agent file that applies, in [`AGENT_FILES`] order.
///
/// The agent file is always produced. Sequencer and driver files exist only
/// for active agents that include them; the monitor only when included.
pub fn render_agent_files(ctx: &RenderContext<'_>) -> GenResult<Vec<(&'static str, String)>> {
    let agent = ctx.agent();
    let agent_name = ctx.agent_name();
    let txn = ctx.txn_type(&agent.transaction);

    let mut files = Vec::new();
    for (component, file) in AGENT_FILES {
        if let Some(text) = agent.custom_text(component) {
            tracing::debug!(file, "using custom agent code");
            files.push((file, custom(text)));
            continue;
        }
        let text = match component {
            "agent" => Some(render_agent(&agent, &agent_name)?),
            "driver" if agent.has_driver() => Some(render_driver(&agent_name, &txn)?),
            "monitor" if agent.has_monitor() => Some(render_monitor(&agent_name, &txn)?),
            "sequencer" if agent.has_sequencer() => Some(render_sequencer(&agent_name, &txn)?),
            _ => None,
        };
        if let Some(text) = text {
            files.push((file, text));
        }
    }
    Ok(files)
}

fn render_agent(agent: &AgentUnit, name: &str) -> GenResult<String> {
    let seqr = agent.has_sequencer();
    let drv = agent.has_driver();
    let mon = agent.has_monitor();

    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_agent;")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    if seqr {
        writeln!(out, "  {name}_sequencer seqr;")?;
    }
    if drv {
        writeln!(out, "  {name}_driver drv;")?;
    }
    if mon {
        writeln!(out, "  {name}_monitor mon;")?;
    }
    writeln!(out)?;
    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  function void build_phase(uvm_phase phase);")?;
    writeln!(out, "    super.build_phase(phase);")?;
    if seqr {
        writeln!(out, "    seqr = {name}_sequencer::type_id::create(\"seqr\", this);")?;
    }
    if drv {
        writeln!(out, "    drv = {name}_driver::type_id::create(\"drv\", this);")?;
    }
    if mon {
        writeln!(out, "    mon = {name}_monitor::type_id::create(\"mon\", this);")?;
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  function void connect_phase(uvm_phase phase);")?;
    writeln!(out, "    super.connect_phase(phase);")?;
    if seqr && drv {
        writeln!(
            out,
            "    if (seqr != null && drv != null) drv.seq_item_port.connect(seqr.seq_item_export);"
        )?;
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}

fn render_driver(agent_name: &str, txn: &str) -> GenResult<String> {
    let name = format!("{agent_name}_driver");
    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_driver #({txn});")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  task run_phase(uvm_phase phase);")?;
    writeln!(out, "    super.run_phase(phase);")?;
    writeln!(out, "    // Drive logic here")?;
    writeln!(out, "  endtask")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}

fn render_monitor(agent_name: &str, txn: &str) -> GenResult<String> {
    let name = format!("{agent_name}_monitor");
    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_monitor;")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    writeln!(out, "  uvm_analysis_port #({txn}) ap;")?;
    writeln!(out)?;
    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "    ap = new(\"ap\", this);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  task run_phase(uvm_phase phase);")?;
    writeln!(out, "    super.run_phase(phase);")?;
    writeln!(out, "    // Sample bus and publish {txn} on ap")?;
    writeln!(out, "  endtask")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}

fn render_sequencer(agent_name: &str, txn: &str) -> GenResult<String> {
    let name = format!("{agent_name}_sequencer");
    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_sequencer #({txn});")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}
