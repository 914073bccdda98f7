//! `environment.sv`

use crate::context::RenderContext;
use std::fmt::Write;
use uvmgen_common::GenResult;

/// Renders the environment.
///
/// The monitor is connected to the scoreboard only when the environment
/// includes both and the agent has a monitor; otherwise a comment says why
/// not.
pub fn render_environment(ctx: &RenderContext<'_>) -> GenResult<String> {
    let env = ctx.environment();
    let name = ctx.environment_name();
    let agent_name = ctx.agent_name();
    let sb_name = ctx.scoreboard_name();
    let has_monitor = ctx.agent().has_monitor();

    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_env;")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    if env.include_agent {
        writeln!(out, "  {agent_name} agent;")?;
    }
    if env.include_scoreboard {
        writeln!(out, "  {sb_name} sb;")?;
    }
    writeln!(out)?;
    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  function void build_phase(uvm_phase phase);")?;
    writeln!(out, "    super.build_phase(phase);")?;
    if env.include_agent {
        writeln!(out, "    agent = {agent_name}::type_id::create(\"agent\", this);")?;
    }
    if env.include_scoreboard {
        writeln!(out, "    sb = {sb_name}::type_id::create(\"sb\", this);")?;
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  function void connect_phase(uvm_phase phase);")?;
    writeln!(out, "    super.connect_phase(phase);")?;
    if env.include_agent && env.include_scoreboard {
        if has_monitor {
            writeln!(out, "    // Connect monitor analysis port to scoreboard")?;
            writeln!(out, "    agent.mon.ap.connect(sb.ap);")?;
        } else {
            writeln!(out, "    // Monitor disabled in agent; no auto-connect to scoreboard")?;
        }
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_with;
    use serde_json::json;

    #[test]
    fn connects_monitor_to_scoreboard() {
        let text = render_with(
            json!({
                "agent": {"agent_name": "bus_agent"},
                "scoreboard": {"name": "bus_sb"},
                "environment": {"name": "bus_env"}
            }),
            render_environment,
        );
        assert!(text.starts_with("class bus_env extends uvm_env;\n"));
        assert!(text.contains("  bus_agent agent;\n"));
        assert!(text.contains("  bus_sb sb;\n"));
        assert!(text.contains("    agent.mon.ap.connect(sb.ap);\n"));
    }

    #[test]
    fn monitor_disabled_leaves_comment() {
        let text = render_with(
            json!({"agent": {"include_components": {"monitor": false}}}),
            render_environment,
        );
        assert!(!text.contains("connect(sb.ap)"));
        assert!(text.contains("// Monitor disabled in agent; no auto-connect to scoreboard"));
    }

    #[test]
    fn scoreboard_excluded() {
        let text = render_with(
            json!({"environment": {"include_scoreboard": false}}),
            render_environment,
        );
        assert!(text.contains("  my_agent agent;\n"));
        assert!(!text.contains(" sb"));
        assert!(!text.contains("no auto-connect"));
    }

    #[test]
    fn tolerates_missing_scoreboard_unit() {
        let text = render_with(json!({"environment": {"name": "e"}}), render_environment);
        assert!(text.contains("  my_scoreboard sb;\n"));
        assert!(text.contains("agent.mon.ap.connect(sb.ap);"));
    }
}
