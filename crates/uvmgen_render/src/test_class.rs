//! `test.sv`

use crate::context::RenderContext;
use std::fmt::Write;
use uvmgen_common::{safe_name, GenResult};

/// Renders the UVM test.
///
/// Starting a sequence needs the whole chain: the test creates the
/// environment, the environment includes the agent, and the agent has a
/// sequencer. When a link is missing a `NOTE` comment replaces the start.
pub fn render_test(ctx: &RenderContext<'_>) -> GenResult<String> {
    let test = ctx.test();
    let name = ctx.test_name();
    let base = safe_name(&test.base_class, "uvm_test");
    let env_name = ctx.environment_name();
    let sequence_name = if test.sequence_name.trim().is_empty() {
        ctx.sequence_name()
    } else {
        safe_name(&test.sequence_name, "my_sequence")
    };

    let blocker = if !test.start_sequence {
        None
    } else if !test.create_env {
        Some("// NOTE: start_sequence enabled but create_env is disabled")
    } else if !ctx.environment().include_agent {
        Some("// NOTE: environment does not include an agent; cannot start sequence")
    } else if !ctx.agent().has_sequencer() {
        Some("// NOTE: agent sequencer disabled; cannot start sequence")
    } else {
        None
    };
    let starts = test.start_sequence && blocker.is_none();

    let mut out = String::new();
    writeln!(out, "class {name} extends {base};")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    if test.create_env {
        writeln!(out, "  {env_name} env_h;")?;
        writeln!(out)?;
    }
    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  function void build_phase(uvm_phase phase);")?;
    writeln!(out, "    super.build_phase(phase);")?;
    if test.create_env {
        writeln!(out, "    env_h = {env_name}::type_id::create(\"env_h\", this);")?;
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;

    if test.print_topology {
        writeln!(out, "  function void end_of_elaboration_phase(uvm_phase phase);")?;
        writeln!(out, "    super.end_of_elaboration_phase(phase);")?;
        writeln!(out, "    uvm_top.print_topology();")?;
        writeln!(out, "  endfunction")?;
        writeln!(out)?;
    }

    writeln!(out, "  task run_phase(uvm_phase phase);")?;
    if starts {
        writeln!(out, "    {sequence_name} seq;")?;
    }
    writeln!(out, "    super.run_phase(phase);")?;
    if let Some(note) = blocker {
        writeln!(out)?;
        writeln!(out, "    {note}")?;
    }
    if starts {
        writeln!(out)?;
        if test.raise_objection {
            writeln!(out, "    phase.raise_objection(this);")?;
        }
        writeln!(out, "    seq = {sequence_name}::type_id::create(\"seq\");")?;
        writeln!(out, "    seq.start(env_h.agent.seqr);")?;
        if test.raise_objection {
            writeln!(out, "    phase.drop_objection(this);")?;
        }
    }
    writeln!(out, "  endtask")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}
