//! Lightweight HDL introspection.
//!
//! Recovers a module's name, `parameter`/`localparam` values, header port
//! list and port declarations from SystemVerilog text without a full parser.
//! All extraction runs over one shared [`scanner`], so comment handling and
//! bracket matching behave the same everywhere.
//!
//! [`analyze_dut`] is the authoritative action and reports failures.
//! [`dut_ports`] is the best-effort lookup used by renderers and degrades to
//! an empty list.

#![warn(missing_docs)]

pub mod error;
pub mod header;
pub mod import;
pub mod info;
pub mod params;
pub mod scanner;
pub mod signals;
pub mod source;
pub mod width;

pub use error::HdlError;
pub use header::{extract_module_name, extract_module_ports};
pub use import::{default_scoreboard_fields, import_fields, suggest_interface};
pub use info::{analyze_dut, apply_dut_analysis, dut_ports, extract_module_info, ModuleInfo};
pub use params::extract_parameters;
pub use signals::{extract_signals, SignalInfo, WidthSource};
pub use source::{FsSource, MemorySource, SourceProvider};
pub use width::{eval_expr, resolve_width};
