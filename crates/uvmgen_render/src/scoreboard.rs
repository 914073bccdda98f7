//! `scoreboard.sv`

use crate::context::RenderContext;
use std::collections::HashMap;
use std::fmt::Write;
use uvmgen_common::{safe_name, GenResult};
use uvmgen_model::CompareMode;

/// Returns `true` if a transaction field of type `ty` can be a coverpoint.
///
/// Strings, class handles, pointer-like types and anything from the `uvm_`
/// library are excluded. An unknown (empty) type counts as integral.
pub fn is_integral_type(ty: &str) -> bool {
    let t = ty.to_ascii_lowercase();
    !(t.contains("string")
        || t.contains("class")
        || t.contains("handle")
        || t.contains('*')
        || t.contains("uvm_"))
}

/// Renders the scoreboard.
///
/// The analysis imp and pass/fail counters are always present. The expected
/// queue, its counter and the empty-queue check exist only with
/// `use_expected_queue`; the covergroup only with `enable_coverage`.
pub fn render_scoreboard(ctx: &RenderContext<'_>) -> GenResult<String> {
    let sb = ctx.scoreboard();
    let name = ctx.scoreboard_name();
    let txn = ctx.txn_type(&sb.transaction);
    let use_queue = sb.use_expected_queue;
    let use_cov = sb.enable_coverage;

    let txn_unit = ctx.transaction();
    let types: HashMap<&str, &str> = txn_unit
        .fields
        .iter()
        .filter(|f| !f.name.trim().is_empty())
        .map(|f| (f.name.trim(), f.ty.as_str()))
        .collect();
    let selected: Vec<&str> = sb
        .fields
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();
    let manual = sb.compare_mode == CompareMode::Manual && !selected.is_empty();

    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_component;")?;
    writeln!(out, "  `uvm_component_utils({name})")?;
    writeln!(out)?;
    writeln!(out, "  uvm_analysis_imp #({txn}, {name}) ap;")?;
    if use_queue {
        writeln!(out, "  {txn} expected_q[$];")?;
    }
    writeln!(out, "  int unsigned pass_count;")?;
    writeln!(out, "  int unsigned fail_count;")?;
    if use_queue {
        writeln!(out, "  int unsigned expected_count;")?;
    }
    writeln!(out)?;

    if use_cov {
        let cov: Vec<&str> = selected
            .iter()
            .copied()
            .filter(|f| is_integral_type(types.get(f).copied().unwrap_or("")))
            .collect();
        writeln!(out, "  // Coverage (auto-generated)")?;
        writeln!(out, "  covergroup cg_t with function sample({txn} t);")?;
        if cov.is_empty() {
            writeln!(out, "    // No integral fields selected for coverage")?;
        }
        for f in cov {
            writeln!(out, "    coverpoint t.{};", safe_name(f, "sig"))?;
        }
        writeln!(out, "  endgroup")?;
        writeln!(out)?;
        writeln!(out, "  cg_t cg;")?;
        writeln!(out)?;
    }

    writeln!(out, "  function new(string name, uvm_component parent);")?;
    writeln!(out, "    super.new(name, parent);")?;
    writeln!(out, "    ap = new(\"ap\", this);")?;
    if use_cov {
        writeln!(out, "    cg = new();")?;
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;

    if use_queue {
        writeln!(out, "  function void expect({txn} exp);")?;
        writeln!(out, "    expected_q.push_back(exp);")?;
        writeln!(out, "    expected_count++;")?;
        writeln!(out, "  endfunction")?;
        writeln!(out)?;
    }

    writeln!(out, "  function void write({txn} tx);")?;
    if use_queue {
        writeln!(out, "    {txn} exp;")?;
        if manual {
            writeln!(out, "    bit ok = 1;")?;
        } else {
            writeln!(out, "    uvm_comparer cmp = new();")?;
        }
        writeln!(out)?;
    }
    if use_cov {
        writeln!(out, "    cg.sample(tx);")?;
        writeln!(out)?;
    }

    if use_queue {
        writeln!(out, "    if (expected_q.size() == 0) begin")?;
        writeln!(out, "      `uvm_error(\"SB\", \"Received tx but expected_q is empty\")")?;
        writeln!(out, "      fail_count++;")?;
        writeln!(out, "      return;")?;
        writeln!(out, "    end")?;
        writeln!(out)?;
        writeln!(out, "    exp = expected_q.pop_front();")?;
        writeln!(out)?;
        if manual {
            for f in &selected {
                let f = safe_name(f, "field");
                writeln!(out, "    if (tx.{f} !== exp.{f}) begin")?;
                writeln!(
                    out,
                    "      `uvm_error(\"SB\", $sformatf(\"Mismatch {f}: act=%0h exp=%0h\", tx.{f}, exp.{f}))"
                )?;
                writeln!(out, "      ok = 0;")?;
                writeln!(out, "    end")?;
            }
            writeln!(out, "    if (ok) pass_count++; else fail_count++;")?;
        } else {
            writeln!(out, "    if (!tx.compare(exp, cmp)) begin")?;
            writeln!(out, "      `uvm_error(\"SB\", \"Transaction compare failed\")")?;
            writeln!(out, "      fail_count++;")?;
            writeln!(out, "    end else begin")?;
            writeln!(out, "      pass_count++;")?;
            writeln!(out, "    end")?;
        }
    } else {
        writeln!(out, "    // Add checks here (no expected queue)")?;
        writeln!(out, "    pass_count++;")?;
    }
    writeln!(out, "  endfunction")?;
    writeln!(out)?;

    writeln!(out, "  function void report_phase(uvm_phase phase);")?;
    writeln!(out, "    super.report_phase(phase);")?;
    if use_queue {
        writeln!(
            out,
            "    `uvm_info(\"SB\", $sformatf(\"pass=%0d fail=%0d expected_seen=%0d pending_expected=%0d\", pass_count, fail_count, expected_count, expected_q.size()), UVM_LOW)"
        )?;
    } else {
        writeln!(
            out,
            "    `uvm_info(\"SB\", $sformatf(\"pass=%0d fail=%0d\", pass_count, fail_count), UVM_LOW)"
        )?;
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

    fn txn() -> serde_json::Value {
        json!({
            "class_name": "pkt",
            "fields": [
                {"type": "bit [7:0]", "name": "data"},
                {"type": "string", "name": "tag"},
                {"type": "uvm_object", "name": "payload"}
            ]
        })
    }

    #[test]
    fn integral_heuristic() {
        assert!(is_integral_type("bit [7:0]"));
        assert!(is_integral_type(""));
        assert!(!is_integral_type("string"));
        assert!(!is_integral_type("my_class"));
        assert!(!is_integral_type("uvm_object"));
        assert!(!is_integral_type("void*"));
    }

    #[test]
    fn default_compare_with_queue() {
        let text = render_with(
            json!({"transaction": txn(), "scoreboard": {"name": "sb"}}),
            render_scoreboard,
        );
        assert!(text.contains("  uvm_analysis_imp #(pkt, sb) ap;\n"));
        assert!(text.contains("  pkt expected_q[$];\n"));
        assert!(text.contains("  int unsigned expected_count;\n"));
        assert!(text.contains("expected_q is empty"));
        assert!(text.contains("    if (!tx.compare(exp, cmp)) begin\n"));
        assert!(!text.contains("covergroup"));
    }

    #[test]
    fn no_queue_has_no_queue_logic() {
        let text = render_with(
            json!({"scoreboard": {"use_expected_queue": false, "compare_mode": "manual", "fields": ["data"]}}),
            render_scoreboard,
        );
        assert!(text.contains("uvm_analysis_imp #(txn_item, my_scoreboard) ap;"));
        assert!(!text.contains("expected_q"));
        assert!(!text.contains("expected_count"));
        assert!(!text.contains("Mismatch"));
        assert!(text.contains("    // Add checks here (no expected queue)\n"));
        assert!(text.contains("$sformatf(\"pass=%0d fail=%0d\", pass_count, fail_count)"));
    }

    #[test]
    fn legacy_queue_alias_honoured() {
        let text = render_with(json!({"scoreboard": {"use_queue": false}}), render_scoreboard);
        assert!(!text.contains("expected_q"));
    }

    #[test]
    fn manual_compare_per_field() {
        let text = render_with(
            json!({"transaction": txn(), "scoreboard": {"compare_mode": "manual", "fields": ["data", "tag"]}}),
            render_scoreboard,
        );
        assert!(text.contains("    bit ok = 1;\n"));
        assert!(text.contains("    if (tx.data !== exp.data) begin\n"));
        assert!(text.contains("Mismatch tag: act=%0h exp=%0h\", tx.tag, exp.tag))"));
        assert_eq!(text.matches("ok = 0;").count(), 2);
        assert!(text.contains("    if (ok) pass_count++; else fail_count++;\n"));
        assert!(!text.contains("tx.compare"));
    }

    #[test]
    fn manual_without_fields_uses_compare() {
        let text = render_with(json!({"scoreboard": {"compare_mode": "manual"}}), render_scoreboard);
        assert!(text.contains("tx.compare(exp, cmp)"));
    }

    #[test]
    fn coverage_only_integral_fields() {
        let text = render_with(
            json!({"transaction": txn(), "scoreboard": {
                "enable_coverage": true,
                "fields": ["data", "tag", "payload"]
            }}),
            render_scoreboard,
        );
        assert!(text.contains("  covergroup cg_t with function sample(pkt t);\n"));
        assert!(text.contains("    coverpoint t.data;\n"));
        assert!(!text.contains("coverpoint t.tag"));
        assert!(!text.contains("coverpoint t.payload"));
        assert!(text.contains("    cg = new();\n"));
        assert!(text.contains("    cg.sample(tx);\n"));
    }

    #[test]
    fn coverage_without_integral_fields() {
        let text = render_with(
            json!({"transaction": txn(), "scoreboard": {"enable_coverage": true, "fields": ["tag"]}}),
            render_scoreboard,
        );
        assert!(text.contains("    // No integral fields selected for coverage\n"));
    }
}
