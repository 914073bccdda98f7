//! `uvmgen preview`: rendered output without writing it.

use uvmgen_diagnostics::{DiagnosticRenderer, TerminalRenderer};
use uvmgen_generate::render_preview;
use uvmgen_hdl::FsSource;

use crate::model_file::ModelFile;
use crate::GlobalArgs;

/// Runs `uvmgen preview`.
///
/// Without `--file` the combined view goes to stdout, warnings included.
/// With `--file` only that file is printed and warnings go to stderr.
pub fn run(file: Option<&str>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let model = ModelFile::open(global)?;
    let preview = render_preview(&model.snapshot(), &FsSource);

    let Some(file) = file else {
        print!("{}", preview.to_text());
        return Ok(0);
    };
    if !global.quiet {
        eprint!("{}", TerminalRenderer::new(global.color).render_all(&preview.warnings));
    }
    match preview.file(file) {
        Some(text) => {
            print!("{text}");
            Ok(0)
        }
        None => {
            let known: Vec<&str> = preview.files.keys().map(String::as_str).collect();
            Err(format!("no generated file '{file}' (known: {})", known.join(", ")).into())
        }
    }
}
