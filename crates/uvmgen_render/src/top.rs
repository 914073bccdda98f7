//! `top.sv`

use crate::context::RenderContext;
use std::collections::HashSet;
use std::fmt::Write;
use uvmgen_common::{safe_name, GenResult};
use uvmgen_hdl::dut_ports;

const VIF: &str = "vif";

/// How one DUT port gets wired.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Wiring {
    Connected(String),
    Unmatched(String),
}

/// Renders the top-level testbench module.
///
/// DUT ports are read from the DUT source when possible and matched by name
/// against clock, then reset, then interface signals. Unmatched ports are
/// listed as comments. Without a readable port list every interface signal
/// is connected by its own name.
pub fn render_top(ctx: &RenderContext<'_>) -> GenResult<String> {
    let intf = ctx.interface();
    let top_name = ctx.top_name();
    let dut_module = ctx.dut_module();
    let test_name = {
        let top = ctx.top();
        if top.test.trim().is_empty() {
            ctx.test_name()
        } else {
            safe_name(&top.test, "base_test")
        }
    };
    let intf_name = {
        let top = ctx.top();
        if top.interface.trim().is_empty() {
            ctx.interface_name()
        } else {
            safe_name(&top.interface, "my_if")
        }
    };
    let clk = safe_name(&intf.clock, "");
    let rst = safe_name(&intf.reset, "");

    let signals: Vec<String> = intf
        .signals
        .iter()
        .map(|s| s.name.trim())
        .filter(|n| !n.is_empty())
        .map(|n| safe_name(n, "sig"))
        .collect();
    let signal_set: HashSet<&str> = signals.iter().map(String::as_str).collect();

    let ports = dut_ports(ctx.source, &ctx.dut_path(), &dut_module);
    let wiring: Vec<Wiring> = if ports.is_empty() {
        signals
            .iter()
            .map(|n| Wiring::Connected(format!("    .{n}({VIF}.{n})")))
            .collect()
    } else {
        ports
            .iter()
            .map(|p| {
                if !clk.is_empty() && *p == clk {
                    Wiring::Connected(format!("    .{p}({clk})"))
                } else if !rst.is_empty() && *p == rst {
                    Wiring::Connected(format!("    .{p}({rst})"))
                } else if signal_set.contains(p.as_str()) {
                    Wiring::Connected(format!("    .{p}({VIF}.{p})"))
                } else {
                    Wiring::Unmatched(p.clone())
                }
            })
            .collect()
    };
    let connections: Vec<&str> = wiring
        .iter()
        .filter_map(|w| match w {
            Wiring::Connected(c) => Some(c.as_str()),
            Wiring::Unmatched(_) => None,
        })
        .collect();
    let unmatched: Vec<&str> = wiring
        .iter()
        .filter_map(|w| match w {
            Wiring::Unmatched(p) => Some(p.as_str()),
            Wiring::Connected(_) => None,
        })
        .collect();
    tracing::debug!(
        ports = ports.len(),
        connected = connections.len(),
        unmatched = unmatched.len(),
        "wired DUT ports"
    );

    let mut out = String::new();
    writeln!(out, "`timescale 1ns/1ps")?;
    writeln!(out)?;
    writeln!(out, "module {top_name};")?;
    writeln!(out)?;
    if !clk.is_empty() {
        writeln!(out, "  logic {clk};")?;
    }
    if !rst.is_empty() {
        writeln!(out, "  logic {rst};")?;
    }
    writeln!(out)?;

    let intf_conn: Vec<String> = [&clk, &rst]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| format!(".{s}({s})"))
        .collect();
    writeln!(out, "  {intf_name} {VIF}({});", intf_conn.join(", "))?;
    writeln!(out)?;

    writeln!(out, "  {dut_module} dut_inst (")?;
    if connections.is_empty() {
        writeln!(out, "    // TODO: connect DUT ports")?;
    } else {
        writeln!(out, "{}", connections.join(",\n"))?;
    }
    writeln!(out, "  );")?;
    writeln!(out)?;

    if !unmatched.is_empty() {
        writeln!(out, "  // Unconnected DUT ports (not auto-matched):")?;
        for p in &unmatched {
            writeln!(out, "  // - {p}")?;
        }
        writeln!(out)?;
    }
    if !clk.is_empty() {
        writeln!(out, "  initial begin")?;
        writeln!(out, "    {clk} = 0;")?;
        writeln!(out, "    forever #5 {clk} = ~{clk};")?;
        writeln!(out, "  end")?;
        writeln!(out)?;
    }
    if !rst.is_empty() {
        writeln!(out, "  initial begin")?;
        writeln!(out, "    {rst} = 1;")?;
        writeln!(out, "    #20;")?;
        writeln!(out, "    {rst} = 0;")?;
        writeln!(out, "  end")?;
        writeln!(out)?;
    }
    writeln!(out, "  initial begin")?;
    writeln!(out, "    run_test(\"{test_name}\");")?;
    writeln!(out, "  end")?;
    writeln!(out)?;
    writeln!(out, "endmodule")?;
    Ok(out)
}
