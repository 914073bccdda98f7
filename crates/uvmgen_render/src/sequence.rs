//! `sequence.sv`

use crate::context::RenderContext;
use std::fmt::Write;
use uvmgen_common::{safe_name, GenResult};
use uvmgen_model::SequenceStep;

/// Renders the sequence class.
///
/// Each stored step becomes its own `begin ... end` block (a `repeat (N)`
/// block when the count is above one), so every step can declare its own
/// item. With no stored steps one default item is sent.
pub fn render_sequence(ctx: &RenderContext<'_>) -> GenResult<String> {
    let seq = ctx.sequence();
    let name = ctx.sequence_name();
    let txn = ctx.txn_type(&seq.transaction_class);

    let mut out = String::new();
    writeln!(out, "class {name} extends uvm_sequence #({txn});")?;
    writeln!(out, "  `uvm_object_utils({name})")?;
    writeln!(out)?;
    writeln!(out, "  function new(string name = \"{name}\");")?;
    writeln!(out, "    super.new(name);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  virtual task body();")?;

    if seq.steps.is_empty() {
        let step = SequenceStep {
            item_name: "tx".to_string(),
            ..SequenceStep::default()
        };
        render_step(&mut out, &step, 0, &txn)?;
        writeln!(out)?;
    }
    for (idx, step) in seq.steps.iter().enumerate() {
        render_step(&mut out, step, idx, &txn)?;
        writeln!(out)?;
    }

    writeln!(out, "  endtask")?;
    writeln!(out)?;
    writeln!(out, "endclass : {name}")?;
    Ok(out)
}

fn render_step(out: &mut String, step: &SequenceStep, idx: usize, txn: &str) -> GenResult<()> {
    let fallback = format!("tx_{idx}");
    let item = safe_name(&step.item_name, &fallback);
    let delay = step.delay.trim();
    let repeat = step.repeat_count();

    if repeat > 1 {
        writeln!(out, "    repeat ({repeat}) begin")?;
    } else {
        writeln!(out, "    begin")?;
    }
    let ind = "      ";
    writeln!(out, "{ind}{txn} tx;")?;
    if !delay.is_empty() && delay != "0" {
        writeln!(out, "{ind}#({delay});")?;
    }
    writeln!(out, "{ind}tx = {txn}::type_id::create(\"{item}\");")?;
    writeln!(out, "{ind}start_item(tx);")?;

    let directed: Vec<(String, &str)> = step
        .assignments
        .iter()
        .map(|(field, expr)| (safe_name(field, "field"), expr.trim()))
        .filter(|(_, expr)| !expr.is_empty())
        .collect();

    // Without directed values the item is sent as created.
    if step.randomize && !directed.is_empty() {
        writeln!(out, "{ind}if (!tx.randomize() with {{")?;
        for (field, expr) in &directed {
            writeln!(out, "{ind}  {field} == ({expr});")?;
        }
        writeln!(out, "{ind}}}) begin")?;
        writeln!(out, "{ind}  `uvm_error(\"SEQ\", \"Randomization failed\")")?;
        writeln!(out, "{ind}end")?;
    } else {
        for (field, expr) in &directed {
            writeln!(out, "{ind}tx.{field} = ({expr});")?;
        }
    }

    writeln!(out, "{ind}finish_item(tx);")?;
    writeln!(out, "    end")?;
    Ok(())
}
