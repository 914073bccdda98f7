//! Port declarations with direction and width.

use crate::scanner::{matching_close, span_text, tokenize_flat, Token, TokenKind};
use crate::width::resolve_width;
use serde::{Deserialize, Serialize};
use uvmgen_model::{DutSignal, TextMap};

/// Words that may sit between a direction and the port name.
const QUALIFIERS: &[&str] = &[
    "logic", "reg", "wire", "var", "bit", "tri", "wand", "wor", "uwire", "signed", "unsigned",
    "integer", "int", "byte", "shortint", "longint",
];

const DIRECTIONS: &[&str] = &["input", "output", "inout"];

/// Where a signal's width came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthSource {
    /// The range uses only literals (or the signal is scalar).
    Literal,
    /// The range mentions at least one known parameter.
    Parameter,
}

/// One extracted port declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    /// `input`, `output` or `inout`, lowercased.
    pub direction: String,
    /// Port name.
    pub name: String,
    /// Resolved width, or `raw` when unresolvable.
    pub width: String,
    /// The declared range text, `1` for scalars.
    pub raw: String,
    /// Whether the width depends on a parameter.
    pub width_source: WidthSource,
}

impl SignalInfo {
    /// Converts to the record stored in the project unit.
    pub fn to_dut_signal(&self) -> DutSignal {
        DutSignal {
            direction: self.direction.clone(),
            name: self.name.clone(),
            width: self.width.clone(),
            raw: self.raw.clone(),
        }
    }
}

fn is_keyword(tok: &Token<'_>) -> bool {
    DIRECTIONS
        .iter()
        .chain(QUALIFIERS)
        .any(|w| tok.is_word(w))
}

/// Collects `input` / `output` / `inout` declarations from `text`.
///
/// Both ANSI headers (`input logic [7:0] a, b`) and body declarations
/// (`output reg y;`) are recognised. Names after a comma inherit the
/// preceding direction and range. A user-defined type name before the port
/// name is skipped. Duplicate names keep the first declaration.
pub fn extract_signals(text: &str, parameters: &TextMap) -> Vec<SignalInfo> {
    let tokens = tokenize_flat(text);
    let mut signals: Vec<SignalInfo> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let Some(direction) = DIRECTIONS.iter().find(|d| tokens[i].is_word(d)) else {
            i += 1;
            continue;
        };
        let mut j = i + 1;
        while j < tokens.len() && QUALIFIERS.iter().any(|q| tokens[j].is_word(q)) {
            j += 1;
        }

        let range_start = j;
        while j < tokens.len() && tokens[j].is_punct("[") {
            match matching_close(&tokens, j) {
                Some(close) => j = close + 1,
                None => break,
            }
        }
        let raw = if j > range_start {
            span_text(text, &tokens[range_start..j]).to_string()
        } else {
            "1".to_string()
        };
        let width = resolve_width(&raw, parameters);
        let width_source = width_source(&raw, parameters);

        loop {
            let Some(mut name_idx) = port_name_at(&tokens, j) else {
                break;
            };
            // `input my_type_t data`: the first identifier was a type
            if port_name_at(&tokens, name_idx + 1).is_some() {
                name_idx += 1;
            }
            let name = tokens[name_idx].text;
            if !signals.iter().any(|s| s.name == name) {
                signals.push(SignalInfo {
                    direction: (*direction).to_string(),
                    name: name.to_string(),
                    width: width.clone(),
                    raw: raw.clone(),
                    width_source,
                });
            }
            j = skip_unpacked(&tokens, name_idx + 1);
            if tokens.get(j).is_some_and(|t| t.is_punct(",")) {
                j += 1;
            } else {
                break;
            }
        }
        i = j.max(i + 1);
    }
    signals
}

fn port_name_at(tokens: &[Token<'_>], idx: usize) -> Option<usize> {
    let tok = tokens.get(idx)?;
    (tok.kind == TokenKind::Ident && !is_keyword(tok) && !tok.text.starts_with('$')).then_some(idx)
}

fn skip_unpacked(tokens: &[Token<'_>], mut j: usize) -> usize {
    while j < tokens.len() && tokens[j].is_punct("[") {
        match matching_close(tokens, j) {
            Some(close) => j = close + 1,
            None => break,
        }
    }
    j
}

/// Classifies a declared range by whether it mentions a known parameter.
pub fn width_source(raw: &str, parameters: &TextMap) -> WidthSource {
    let mentions = tokenize_flat(raw)
        .iter()
        .any(|t| t.kind == TokenKind::Ident && parameters.contains_key(t.text));
    if mentions {
        WidthSource::Parameter
    } else {
        WidthSource::Literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(signals: &[SignalInfo]) -> Vec<(&str, &str, &str)> {
        signals
            .iter()
            .map(|s| (s.direction.as_str(), s.name.as_str(), s.width.as_str()))
            .collect()
    }

    #[test]
    fn ansi_header_signals() {
        let src = "module alu(input logic clk, input logic [7:0] a, b, output reg [15:0] y);";
        let sigs = extract_signals(src, &TextMap::new());
        assert_eq!(
            summary(&sigs),
            vec![
                ("input", "clk", "1"),
                ("input", "a", "8"),
                ("input", "b", "8"),
                ("output", "y", "16")
            ]
        );
        assert_eq!(sigs[0].raw, "1");
        assert_eq!(sigs[1].raw, "[7:0]");
    }

    #[test]
    fn parameterized_width() {
        let params = TextMap::from([("WIDTH".to_string(), "32".to_string())]);
        let src = "module m #(parameter WIDTH = 32) (input [WIDTH-1:0] data, inout wire sda);";
        let sigs = extract_signals(src, &params);
        assert_eq!(sigs[0].width, "32");
        assert_eq!(sigs[0].width_source, WidthSource::Parameter);
        assert_eq!(sigs[1].width, "1");
        assert_eq!(sigs[1].width_source, WidthSource::Literal);
    }

    #[test]
    fn unresolved_width_keeps_raw() {
        let sigs = extract_signals("input [N-1:0] d;", &TextMap::new());
        assert_eq!(sigs[0].width, "[N-1:0]");
        assert_eq!(sigs[0].width_source, WidthSource::Literal);
    }

    #[test]
    fn macro_width_falls_back_to_text() {
        let src = "module m(input [`W-1:0] a, input b);\nendmodule\n";
        let sigs = extract_signals(src, &TextMap::new());
        assert_eq!(summary(&sigs), vec![("input", "a", "[`W-1:0]"), ("input", "b", "1")]);
        assert_eq!(sigs[0].raw, "[`W-1:0]");
    }

    #[test]
    fn body_declarations() {
        let src = "module old(a, b, y);\n  input a, b;\n  output [3:0] y;\nendmodule";
        let sigs = extract_signals(src, &TextMap::new());
        assert_eq!(
            summary(&sigs),
            vec![("input", "a", "1"), ("input", "b", "1"), ("output", "y", "4")]
        );
    }

    #[test]
    fn direction_is_lowercased() {
        let sigs = extract_signals("INPUT Clk;", &TextMap::new());
        assert_eq!(summary(&sigs), vec![("input", "Clk", "1")]);
    }

    #[test]
    fn user_type_is_skipped() {
        let sigs = extract_signals("input pkt_t req, output state_e st", &TextMap::new());
        assert_eq!(summary(&sigs), vec![("input", "req", "1"), ("output", "st", "1")]);
    }

    #[test]
    fn duplicates_keep_first() {
        let src = "module m(input [7:0] a); input a; endmodule";
        let sigs = extract_signals(src, &TextMap::new());
        assert_eq!(summary(&sigs), vec![("input", "a", "8")]);
    }

    #[test]
    fn unpacked_dimension_after_name() {
        let sigs = extract_signals("input logic [7:0] mem [4], input en", &TextMap::new());
        assert_eq!(summary(&sigs), vec![("input", "mem", "8"), ("input", "en", "1")]);
    }

    #[test]
    fn to_dut_signal_copies_fields() {
        let sigs = extract_signals("output [1:0] st;", &TextMap::new());
        let dut = sigs[0].to_dut_signal();
        assert_eq!(dut.direction, "output");
        assert_eq!(dut.name, "st");
        assert_eq!(dut.width, "2");
        assert_eq!(dut.raw, "[1:0]");
    }
}
