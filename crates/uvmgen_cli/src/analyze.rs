//! `uvmgen analyze`: DUT introspection.

use std::fmt::Write;
use std::path::Path;

use serde_json::Value;
use uvmgen_hdl::{analyze_dut, apply_dut_analysis, FsSource, ModuleInfo, WidthSource};
use uvmgen_model::{keys, DocumentStore, ProjectModel};

use crate::model_file::ModelFile;
use crate::{AnalyzeArgs, GlobalArgs};

/// Runs `uvmgen analyze`.
///
/// The DUT path comes from `--dut` or the project's `dut_path`. With
/// `--write` the result (and an explicit `--dut`) is saved to the project
/// record.
pub fn run(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let model = ModelFile::open(global)?;
    let project = ProjectModel::from_snapshot(&model.snapshot())
        .value
        .project
        .unwrap_or_default();
    let dut = args
        .dut
        .clone()
        .unwrap_or_else(|| project.dut_path.trim().to_string());

    if !global.quiet {
        eprintln!("   Analyzing {dut}");
    }
    let info = analyze_dut(Path::new(&dut), &FsSource)?;
    print!("{}", format_info(&info)?);

    if args.write {
        let mut record = model
            .store()
            .get(keys::PROJECT)
            .unwrap_or_else(|| Value::Object(Default::default()));
        apply_dut_analysis(&mut record, &info);
        if let (Some(explicit), Value::Object(map)) = (&args.dut, &mut record) {
            map.insert("dut_path".to_string(), Value::String(explicit.clone()));
        }
        model.store().set(keys::PROJECT, record);
        model.save()?;
        if !global.quiet {
            eprintln!("     Updated {}", model.path().display());
        }
    }
    Ok(0)
}

/// The human-readable analysis summary.
pub fn format_info(info: &ModuleInfo) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "module: {}", info.module_name)?;
    if !info.parameters.is_empty() {
        writeln!(out, "parameters:")?;
        for (name, value) in info.parameters.iter() {
            writeln!(out, "  {name} = {value}")?;
        }
    }
    writeln!(out, "signals:")?;
    for sig in &info.signals {
        let source = match sig.width_source {
            WidthSource::Literal => "literal",
            WidthSource::Parameter => "parameter",
        };
        writeln!(
            out,
            "  {:<6} {} width={} ({source})",
            sig.direction, sig.name, sig.width
        )?;
    }
    Ok(out)
}
