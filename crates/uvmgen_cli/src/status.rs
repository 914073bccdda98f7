//! `uvmgen status`: workflow progress.

use uvmgen_workflow::{compute_module_statuses, WorkflowReport};

use crate::model_file::ModelFile;
use crate::{GlobalArgs, ReportFormat};

/// Runs `uvmgen status`. The exit code is 0 whether or not the project is
/// ready; the report says which.
pub fn run(format: ReportFormat, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let model = ModelFile::open(global)?;
    let statuses = compute_module_statuses(&model.snapshot());
    let report = WorkflowReport::from_statuses(&statuses);
    match format {
        ReportFormat::Text => print!("{}", report.to_text()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(0)
}
