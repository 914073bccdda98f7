//! uvmgen CLI: drives the testbench generation engine over a snapshot file.
//!
//! `uvmgen init` writes a starter model, `uvmgen analyze` and `uvmgen import`
//! fill it from the DUT source, `uvmgen status` reports workflow progress,
//! `uvmgen preview` prints what would be generated and `uvmgen generate`
//! writes the testbench to disk.

#![warn(missing_docs)]

mod analyze;
mod generate;
mod import;
mod init;
mod model_file;
mod preview;
mod status;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;

/// uvmgen: UVM testbench generator.
#[derive(Parser, Debug)]
#[command(name = "uvmgen", version, about = "UVM testbench generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (info-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to the project model (`.json` or `.toml`).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter project model.
    Init {
        /// Project name stored in the model.
        name: Option<String>,
    },
    /// Extract module name, parameters and signals from the DUT source.
    Analyze(AnalyzeArgs),
    /// Fill a unit from earlier analysis results.
    Import {
        /// What to import.
        #[arg(value_enum)]
        target: ImportTarget,
    },
    /// Show workflow progress.
    Status {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Print the generated files without writing them.
    Preview {
        /// Print only this file (e.g. `src/top.sv`).
        #[arg(long)]
        file: Option<String>,
    },
    /// Validate the model and write the testbench to disk.
    Generate(GenerateArgs),
}

/// Arguments for `uvmgen analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// DUT source path; defaults to the project's `dut_path`.
    #[arg(long)]
    pub dut: Option<String>,

    /// Store the result in the project record.
    #[arg(long)]
    pub write: bool,
}

/// Arguments for `uvmgen generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Ignore `custom_files` for this run.
    #[arg(long)]
    pub no_overrides: bool,
}

/// Targets for `uvmgen import`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportTarget {
    /// Interface signals, clock and reset from the DUT analysis.
    Interface,
    /// Transaction fields from the interface signals.
    Fields,
    /// Scoreboard compare fields from the non-rand transaction fields.
    ScoreboardFields,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional explicit model path.
    pub model: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    init_tracing(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        model: cli.model,
    };

    let result = match cli.command {
        Command::Init { name } => init::run(name, &global),
        Command::Analyze(ref args) => analyze::run(args, &global),
        Command::Import { target } => import::run(target, &global),
        Command::Status { format } => status::run(format, &global),
        Command::Preview { ref file } => preview::run(file.as_deref(), &global),
        Command::Generate(ref args) => generate::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The default log level for the given flags. `RUST_LOG` overrides it.
fn log_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = log_level(quiet, verbose);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
