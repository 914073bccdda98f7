//! `interface.sv`

use crate::context::RenderContext;
use std::fmt::Write;
use uvmgen_common::{safe_name, GenResult};

/// The packed range prefix for a declared width, including the trailing
/// space, or empty for scalars.
///
/// Integers above 1 become `[W-1:0]`. Text already in brackets is kept as
/// written; any other expression becomes `[(expr)-1:0]`.
pub fn vector_decl(width: &str) -> String {
    let width = width.trim();
    if width.is_empty() {
        return String::new();
    }
    match width.parse::<i64>() {
        Ok(w) if w > 1 => format!("[{}:0] ", w - 1),
        Ok(_) => String::new(),
        Err(_) if width.starts_with('[') => format!("{width} "),
        Err(_) => format!("[({width})-1:0] "),
    }
}

/// Renders the SystemVerilog interface.
///
/// Clock and reset appear in the header port clause only when set.
pub fn render_interface(ctx: &RenderContext<'_>) -> GenResult<String> {
    let intf = ctx.interface();
    let name = ctx.interface_name();
    let clk = safe_name(&intf.clock, "");
    let rst = safe_name(&intf.reset, "");

    let header: Vec<String> = [&clk, &rst]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| format!("input logic {s}"))
        .collect();

    let mut out = String::new();
    if header.is_empty() {
        writeln!(out, "interface {name};")?;
    } else {
        writeln!(out, "interface {name}({});", header.join(", "))?;
    }
    writeln!(out)?;

    for sig in &intf.signals {
        let direction = match sig.direction.trim() {
            "" => "input",
            d => d,
        };
        let sig_name = safe_name(&sig.name, "sig");
        writeln!(
            out,
            "  {direction} logic {}{sig_name};",
            vector_decl(&sig.width)
        )?;
    }

    if !intf.modports.is_empty() {
        writeln!(out)?;
        for mp in &intf.modports {
            let mp_name = safe_name(&mp.name, "mp");
            let entries: Vec<String> = mp
                .access
                .iter()
                .map(|(sig, access)| format!("    {} {}", access.trim(), safe_name(sig, "sig")))
                .collect();
            if entries.is_empty() {
                writeln!(out, "  modport {mp_name} ();")?;
            } else {
                writeln!(out, "  modport {mp_name} (\n{}\n  );", entries.join(",\n"))?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "endinterface : {name}")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_with;
    use serde_json::json;

    #[test]
    fn vector_prefix() {
        assert_eq!(vector_decl("1"), "");
        assert_eq!(vector_decl("0"), "");
        assert_eq!(vector_decl(""), "");
        assert_eq!(vector_decl("8"), "[7:0] ");
        assert_eq!(vector_decl("[W-1:0]"), "[W-1:0] ");
        assert_eq!(vector_decl("WIDTH"), "[(WIDTH)-1:0] ");
    }

    #[test]
    fn header_and_signals() {
        let text = render_with(
            json!({"interface": {
                "name": "bus_if",
                "clock": "clk",
                "reset": "rst_n",
                "signals": [
                    {"direction": "input", "name": "clk", "width": "1"},
                    {"direction": "output", "name": "data", "width": 8}
                ]
            }}),
            render_interface,
        );
        assert!(text.starts_with("interface bus_if(input logic clk, input logic rst_n);\n\n"));
        assert!(text.contains("  input logic clk;\n"));
        assert!(text.contains("  output logic [7:0] data;\n"));
        assert!(text.ends_with("\nendinterface : bus_if\n"));
    }

    #[test]
    fn no_clock_no_port_clause() {
        let text = render_with(json!({}), render_interface);
        assert_eq!(text, "interface my_if;\n\n\nendinterface : my_if\n");
    }

    #[test]
    fn modports_grouped() {
        let text = render_with(
            json!({"interface": {
                "name": "bus_if",
                "modports": {"drv": {"data": "output", "valid": "output"}, "empty": {}}
            }}),
            render_interface,
        );
        assert!(text.contains("  modport drv (\n    output data,\n    output valid\n  );\n"));
        assert!(text.contains("  modport empty ();\n"));
    }
}
