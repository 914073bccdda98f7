//! Combined module facts and the DUT analysis entry points.

use crate::error::HdlError;
use crate::header::{extract_module_name, extract_module_ports};
use crate::params::extract_parameters;
use crate::signals::{extract_signals, SignalInfo};
use crate::source::SourceProvider;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;
use uvmgen_model::{DutInfo, TextMap};

/// Everything the introspector recovers from one source file.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ModuleInfo {
    /// First declared module, empty if none.
    pub module_name: String,
    /// Parameter values as raw expression text.
    pub parameters: TextMap,
    /// Port declarations.
    pub signals: Vec<SignalInfo>,
}

impl ModuleInfo {
    /// Converts to the `dut_info` record stored in the project unit.
    pub fn to_dut_info(&self) -> DutInfo {
        DutInfo {
            parameters: self.parameters.clone(),
            signals: self.signals.iter().map(SignalInfo::to_dut_signal).collect(),
        }
    }
}

/// Extracts module name, parameters and signals from source text.
pub fn extract_module_info(text: &str) -> ModuleInfo {
    let parameters = extract_parameters(text);
    let signals = extract_signals(text, &parameters);
    ModuleInfo {
        module_name: extract_module_name(text),
        parameters,
        signals,
    }
}

/// The explicit "analyze DUT" action.
///
/// Unlike the implicit lookups used while rendering, failures are reported:
/// an unreadable file is [`HdlError::Read`] and a file without a module
/// header is [`HdlError::NoModule`].
pub fn analyze_dut(path: &Path, provider: &dyn SourceProvider) -> Result<ModuleInfo, HdlError> {
    if path.as_os_str().is_empty() {
        return Err(HdlError::NoPath);
    }
    let text = provider.read(path).map_err(|source| HdlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let info = extract_module_info(&text);
    if info.module_name.is_empty() {
        return Err(HdlError::NoModule {
            path: path.to_path_buf(),
        });
    }
    tracing::info!(
        module = %info.module_name,
        parameters = info.parameters.len(),
        signals = info.signals.len(),
        "analyzed DUT"
    );
    Ok(info)
}

/// Stores an analysis result into a raw project record.
///
/// Sets `module_name` and `dut_info`; other fields are left untouched. A
/// non-object value is replaced by a fresh record.
pub fn apply_dut_analysis(project: &mut Value, info: &ModuleInfo) {
    if !project.is_object() {
        *project = Value::Object(Map::new());
    }
    let parameters: Map<String, Value> = info
        .parameters
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let signals: Vec<Value> = info
        .signals
        .iter()
        .map(|s| {
            json!({
                "direction": s.direction,
                "name": s.name,
                "width": s.width,
                "raw": s.raw,
            })
        })
        .collect();
    if let Value::Object(record) = project {
        record.insert("module_name".to_string(), Value::String(info.module_name.clone()));
        record.insert(
            "dut_info".to_string(),
            json!({ "parameters": parameters, "signals": signals }),
        );
    }
}

/// Best-effort port lookup used while rendering the top module.
///
/// Any failure (blank path or module, unreadable file, header not found)
/// yields an empty list.
pub fn dut_ports(provider: &dyn SourceProvider, path: &str, module_name: &str) -> Vec<String> {
    let path = path.trim();
    let module_name = module_name.trim();
    if path.is_empty() || module_name.is_empty() {
        return Vec::new();
    }
    match provider.read(Path::new(path)) {
        Ok(text) => extract_module_ports(&text, module_name),
        Err(e) => {
            tracing::debug!(path, error = %e, "DUT source unavailable; no ports detected");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::WidthSource;
    use crate::source::MemorySource;
    use uvmgen_model::ProjectUnit;

    const FIFO: &str = "\
// simple fifo
module fifo #(
  parameter WIDTH = 16,
  localparam DEPTH = 8
) (
  input  logic             clk,
  input  logic             rst_n,
  input  logic [WIDTH-1:0] din,
  output logic [WIDTH-1:0] dout,
  output logic             full
);
endmodule
";

    #[test]
    fn module_info_from_text() {
        let info = extract_module_info(FIFO);
        assert_eq!(info.module_name, "fifo");
        assert_eq!(info.parameters["WIDTH"], "16");
        assert_eq!(info.parameters["DEPTH"], "8");
        let names: Vec<_> = info.signals.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["clk", "rst_n", "din", "dout", "full"]);
        assert_eq!(info.signals[2].width, "16");
        assert_eq!(info.signals[2].width_source, WidthSource::Parameter);
    }

    #[test]
    fn analyze_reads_through_provider() {
        let src = MemorySource::new().with_file("rtl/fifo.sv", FIFO);
        let info = analyze_dut(Path::new("rtl/fifo.sv"), &src).unwrap();
        assert_eq!(info.module_name, "fifo");
    }

    #[test]
    fn analyze_missing_file_is_read_error() {
        let err = analyze_dut(Path::new("nope.sv"), &MemorySource::new()).unwrap_err();
        assert!(matches!(err, HdlError::Read { .. }));
    }

    #[test]
    fn analyze_without_module_fails() {
        let src = MemorySource::new().with_file("pkg.sv", "package p; endpackage");
        let err = analyze_dut(Path::new("pkg.sv"), &src).unwrap_err();
        assert!(matches!(err, HdlError::NoModule { .. }));
    }

    #[test]
    fn analyze_blank_path() {
        let err = analyze_dut(Path::new(""), &MemorySource::new()).unwrap_err();
        assert!(matches!(err, HdlError::NoPath));
    }

    #[test]
    fn apply_keeps_other_fields() {
        let mut project = json!({"project_name": "demo", "dut_path": "rtl/fifo.sv"});
        apply_dut_analysis(&mut project, &extract_module_info(FIFO));
        assert_eq!(project["project_name"], "demo");
        assert_eq!(project["module_name"], "fifo");
        assert_eq!(project["dut_info"]["parameters"]["WIDTH"], "16");
        assert_eq!(project["dut_info"]["signals"][0]["name"], "clk");

        let unit: ProjectUnit = serde_json::from_value(project).unwrap();
        assert_eq!(unit.dut_info, extract_module_info(FIFO).to_dut_info());
    }

    #[test]
    fn apply_replaces_non_object() {
        let mut project = Value::Null;
        apply_dut_analysis(&mut project, &extract_module_info(FIFO));
        assert_eq!(project["module_name"], "fifo");
    }

    #[test]
    fn dut_ports_best_effort() {
        let src = MemorySource::new().with_file("fifo.sv", FIFO);
        assert_eq!(
            dut_ports(&src, "fifo.sv", "fifo"),
            vec!["clk", "rst_n", "din", "dout", "full"]
        );
        assert!(dut_ports(&src, "missing.sv", "fifo").is_empty());
        assert!(dut_ports(&src, "fifo.sv", "other").is_empty());
        assert!(dut_ports(&src, "", "fifo").is_empty());
    }
}
