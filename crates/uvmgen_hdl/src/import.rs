//! Helpers that derive one unit's starting contents from another.
//!
//! These back the "Import from DUT" and "Import from Interface" actions. They
//! only suggest values; nothing is stored until the caller saves the result.

use uvmgen_model::{InterfaceUnit, ProjectUnit, SignalDecl, TransactionField, TransactionUnit};

fn is_input(direction: &str) -> bool {
    direction.trim().eq_ignore_ascii_case("input")
}

/// First candidate containing one of `needles` (checked in needle order),
/// case-insensitively.
fn guess_signal<'a>(candidates: &[&'a str], needles: &[&str]) -> Option<&'a str> {
    needles.iter().find_map(|needle| {
        candidates
            .iter()
            .find(|c| c.to_ascii_lowercase().contains(needle))
            .copied()
    })
}

/// Builds an interface from the project's last DUT analysis.
///
/// Signals are copied in order. The clock is the first input whose name
/// contains `clk`, then `clock`; the reset likewise with `rst`, then
/// `reset`. Either falls back to the first input. The name is
/// `<module>_if`, or `my_if` when no module is known.
pub fn suggest_interface(project: &ProjectUnit) -> InterfaceUnit {
    let signals: Vec<SignalDecl> = project
        .dut_info
        .signals
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| SignalDecl {
            direction: if s.direction.trim().is_empty() {
                "input".to_string()
            } else {
                s.direction.trim().to_ascii_lowercase()
            },
            name: s.name.trim().to_string(),
            width: if s.width.trim().is_empty() {
                "1".to_string()
            } else {
                s.width.trim().to_string()
            },
        })
        .collect();

    let inputs: Vec<&str> = signals
        .iter()
        .filter(|s| is_input(&s.direction))
        .map(|s| s.name.as_str())
        .collect();
    let first = inputs.first().copied().unwrap_or_default();
    let clock = guess_signal(&inputs, &["clk", "clock"]).unwrap_or(first);
    let reset = guess_signal(&inputs, &["rst", "reset"]).unwrap_or(first);

    let module = project.module_name.trim();
    let name = if module.is_empty() {
        "my_if".to_string()
    } else {
        format!("{module}_if")
    };

    InterfaceUnit {
        name,
        clock: clock.to_string(),
        reset: reset.to_string(),
        signals,
        modports: Vec::new(),
    }
}

/// One transaction field per interface signal.
///
/// Inputs become `rand`. Width 1 maps to `bit`, integral widths above 1 to
/// `bit [W-1:0]`, anything else to `bit <width text>`. Defaults are `0`.
pub fn import_fields(interface: &InterfaceUnit) -> Vec<TransactionField> {
    interface
        .signals
        .iter()
        .map(|sig| {
            let width = sig.width.trim();
            let ty = match width.parse::<i64>() {
                Ok(1) => "bit".to_string(),
                Ok(w) if w > 1 => format!("bit [{}:0]", w - 1),
                _ => format!("bit {width}"),
            };
            TransactionField {
                rand: is_input(&sig.direction),
                ty,
                name: sig.name.clone(),
                default: "0".to_string(),
            }
        })
        .collect()
}

/// Default scoreboard field selection: every non-`rand` field, in order.
pub fn default_scoreboard_fields(transaction: &TransactionUnit) -> Vec<String> {
    transaction
        .fields
        .iter()
        .filter(|f| !f.rand && !f.name.trim().is_empty())
        .map(|f| f.name.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvmgen_model::{DutInfo, DutSignal};

    fn dut(signals: &[(&str, &str, &str)]) -> ProjectUnit {
        ProjectUnit {
            module_name: "fifo".into(),
            dut_info: DutInfo {
                signals: signals
                    .iter()
                    .map(|(d, n, w)| DutSignal {
                        direction: d.to_string(),
                        name: n.to_string(),
                        width: w.to_string(),
                        raw: String::new(),
                    })
                    .collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn clock_and_reset_guessed() {
        let intf = suggest_interface(&dut(&[
            ("input", "din", "8"),
            ("input", "sys_clock", "1"),
            ("input", "aclk", "1"),
            ("input", "areset_n", "1"),
            ("output", "rst_done", "1"),
        ]));
        assert_eq!(intf.name, "fifo_if");
        assert_eq!(intf.clock, "aclk");
        assert_eq!(intf.reset, "areset_n");
        assert_eq!(intf.signals.len(), 5);
    }

    #[test]
    fn fallback_to_first_input() {
        let intf = suggest_interface(&dut(&[("output", "q", "1"), ("input", "a", "1")]));
        assert_eq!(intf.clock, "a");
        assert_eq!(intf.reset, "a");
    }

    #[test]
    fn no_inputs_no_guess() {
        let mut project = dut(&[("output", "q", "1")]);
        project.module_name.clear();
        let intf = suggest_interface(&project);
        assert_eq!(intf.name, "my_if");
        assert_eq!(intf.clock, "");
        assert_eq!(intf.reset, "");
    }

    #[test]
    fn fields_from_signals() {
        let intf = suggest_interface(&dut(&[
            ("input", "clk", "1"),
            ("input", "data", "8"),
            ("output", "status", "[N-1:0]"),
        ]));
        let fields = import_fields(&intf);
        let view: Vec<_> = fields
            .iter()
            .map(|f| (f.rand, f.ty.as_str(), f.name.as_str(), f.default.as_str()))
            .collect();
        assert_eq!(
            view,
            vec![
                (true, "bit", "clk", "0"),
                (true, "bit [7:0]", "data", "0"),
                (false, "bit [N-1:0]", "status", "0"),
            ]
        );
    }

    #[test]
    fn scoreboard_fields_are_outputs() {
        let txn = TransactionUnit {
            fields: import_fields(&suggest_interface(&dut(&[
                ("input", "a", "1"),
                ("output", "y", "4"),
                ("output", "z", "1"),
            ]))),
            ..Default::default()
        };
        assert_eq!(default_scoreboard_fields(&txn), vec!["y", "z"]);
    }
}
