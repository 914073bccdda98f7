//! `uvmgen generate`: pre-flight validation and disk generation.

use std::sync::Arc;

use serde_json::Value;
use uvmgen_diagnostics::{DiagnosticRenderer, TerminalRenderer};
use uvmgen_generate::{validation_diagnostics, GenerateError, GenerationJob};
use uvmgen_hdl::FsSource;
use uvmgen_model::keys;

use crate::model_file::ModelFile;
use crate::{GenerateArgs, GlobalArgs};

/// Runs `uvmgen generate`.
///
/// Returns exit code 1 after printing the validation errors when the model
/// is not ready; nothing is written in that case.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let model = ModelFile::open(global)?;
    let mut snapshot = model.snapshot();
    if args.no_overrides {
        snapshot.insert(keys::CUSTOM_FILES_ENABLED, Value::Bool(false));
    }
    let renderer = TerminalRenderer::new(global.color);

    let diagnostics = validation_diagnostics(&snapshot);
    if !diagnostics.is_empty() {
        eprint!("{}", renderer.render_all(&diagnostics));
        eprintln!(
            "error: generation aborted due to {} validation error(s)",
            diagnostics.len()
        );
        return Ok(1);
    }

    if !global.quiet {
        eprintln!("  Generating testbench from {}", model.path().display());
    }
    let job = GenerationJob::spawn(snapshot, Arc::new(FsSource));
    let result = match job.join() {
        Ok(result) => result,
        Err(GenerateError::Validation(messages)) => {
            for message in &messages {
                eprintln!("error: {message}");
            }
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    if !global.quiet {
        eprint!("{}", renderer.render_all(&result.warnings));
        if global.verbose {
            for path in &result.files_written {
                eprintln!("     Created {}", path.display());
            }
        }
        eprintln!(
            "    Finished {} file(s) in {}",
            result.files_written.len(),
            result.output_root.display()
        );
    }
    Ok(0)
}
