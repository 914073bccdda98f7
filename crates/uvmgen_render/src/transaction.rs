//! `transaction.sv`

use crate::context::{RenderContext, DEFAULT_TXN};
use std::fmt::{self, Write};
use uvmgen_common::{safe_name, GenResult};

/// The UVM field automation macro chosen for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMacro {
    /// `uvm_field_enum`
    Enum,
    /// `uvm_field_string`
    String,
    /// `uvm_field_object`
    Object,
    /// `uvm_field_int`
    Int,
}

impl FieldMacro {
    /// Picks the macro from the declared type text, first match wins:
    /// `enum`, then `string`, then `class` / `handle` / `*`, else integer.
    pub fn for_type(ty: &str) -> Self {
        let t = ty.to_ascii_lowercase();
        if t.contains("enum") {
            FieldMacro::Enum
        } else if t.contains("string") {
            FieldMacro::String
        } else if t.contains("class") || t.contains("handle") || t.contains('*') {
            FieldMacro::Object
        } else {
            FieldMacro::Int
        }
    }

    /// The macro name without the backtick.
    pub fn name(self) -> &'static str {
        match self {
            FieldMacro::Enum => "uvm_field_enum",
            FieldMacro::String => "uvm_field_string",
            FieldMacro::Object => "uvm_field_object",
            FieldMacro::Int => "uvm_field_int",
        }
    }
}

impl fmt::Display for FieldMacro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders the sequence item class.
///
/// Fields keep their stored order; each gets one automation macro inside the
/// `uvm_object_utils_begin` block, which also registers the class.
pub fn render_transaction(ctx: &RenderContext<'_>) -> GenResult<String> {
    let txn = ctx.transaction();
    let class_name = safe_name(&txn.class_name, DEFAULT_TXN);
    let base = safe_name(&txn.base_class, "uvm_sequence_item");

    let mut out = String::new();
    writeln!(out, "class {class_name} extends {base};")?;
    writeln!(out)?;
    for field in &txn.fields {
        let rand = if field.rand { "rand " } else { "" };
        let ty = match field.ty.trim() {
            "" => "bit",
            t => t,
        };
        writeln!(out, "  {rand}{ty} {};", safe_name(&field.name, "field"))?;
    }
    writeln!(out)?;

    for c in &txn.constraints {
        let body = c.body.trim().trim_end_matches(';').trim_end();
        if body.is_empty() {
            continue;
        }
        writeln!(out, "  constraint {} {{ {body}; }}", safe_name(&c.name, "c"))?;
    }
    writeln!(out)?;

    writeln!(out, "  function new(string name = \"{class_name}\");")?;
    writeln!(out, "    super.new(name);")?;
    writeln!(out, "  endfunction")?;
    writeln!(out)?;
    writeln!(out, "  `uvm_object_utils_begin({class_name})")?;
    for field in &txn.fields {
        writeln!(
            out,
            "    `{}({}, UVM_ALL_ON)",
            FieldMacro::for_type(&field.ty),
            safe_name(&field.name, "field")
        )?;
    }
    writeln!(out, "  `uvm_object_utils_end")?;
    writeln!(out)?;
    writeln!(out, "endclass : {class_name}")?;
    Ok(out)
}
