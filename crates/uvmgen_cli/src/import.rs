//! `uvmgen import`: fills one unit from another.

use serde_json::Value;
use uvmgen_hdl::{default_scoreboard_fields, import_fields, suggest_interface};
use uvmgen_model::{keys, DocumentStore, ProjectModel, Snapshot};

use crate::model_file::ModelFile;
use crate::{GlobalArgs, ImportTarget};

/// Runs `uvmgen import` and saves the model.
pub fn run(target: ImportTarget, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let model = ModelFile::open(global)?;
    let (key, value, count) = import(target, &model.snapshot())?;
    model.store().set(key, value);
    model.save()?;
    if !global.quiet {
        eprintln!("    Imported {count} entries into `{key}`");
        eprintln!("     Updated {}", model.path().display());
    }
    Ok(0)
}

/// Computes the updated unit record for `target`: the unit key, its new
/// value and how many entries were imported.
///
/// Fields the import does not produce are kept from the existing record.
pub fn import(
    target: ImportTarget,
    snapshot: &Snapshot,
) -> Result<(&'static str, Value, usize), Box<dyn std::error::Error>> {
    let model = ProjectModel::from_snapshot(snapshot).value;
    match target {
        ImportTarget::Interface => {
            let project = model.project.unwrap_or_default();
            if project.dut_info.signals.is_empty() {
                return Err("no DUT signals stored; run `uvmgen analyze --write` first".into());
            }
            let suggested = suggest_interface(&project);
            let mut unit = model.interface.unwrap_or_default();
            if unit.name.trim().is_empty() {
                unit.name = suggested.name;
            }
            unit.clock = suggested.clock;
            unit.reset = suggested.reset;
            unit.signals = suggested.signals;
            let count = unit.signals.len();
            Ok((keys::INTERFACE, serde_json::to_value(unit)?, count))
        }
        ImportTarget::Fields => {
            let interface = model.interface.unwrap_or_default();
            if interface.signals.is_empty() {
                return Err("the interface has no signals to import".into());
            }
            let mut unit = model.transaction.unwrap_or_default();
            unit.fields = import_fields(&interface);
            let count = unit.fields.len();
            Ok((keys::TRANSACTION, serde_json::to_value(unit)?, count))
        }
        ImportTarget::ScoreboardFields => {
            let Some(transaction) = model.transaction else {
                return Err("no transaction defined".into());
            };
            let mut unit = model.scoreboard.unwrap_or_default();
            unit.fields = default_scoreboard_fields(&transaction);
            let count = unit.fields.len();
            Ok((keys::SCOREBOARD, serde_json::to_value(unit)?, count))
        }
    }
}
