//! Module header recognition: module name and port list.

use crate::scanner::{matching_close, split_top_level, tokenize_flat, Token, TokenKind};
use uvmgen_common::is_identifier;

/// Returns the name of the first `module` declared in `text`, or an empty
/// string when there is none. Commented-out modules are ignored.
pub fn extract_module_name(text: &str) -> String {
    let tokens = tokenize_flat(text);
    tokens
        .windows(2)
        .find(|w| w[0].text == "module" && w[1].kind == TokenKind::Ident)
        .map(|w| w[1].text.to_string())
        .unwrap_or_default()
}

/// Returns the port names of module `module_name`, in header order.
///
/// The header is `module NAME [#(...)] (...);`. The port list is split on
/// top-level commas; default values (`= ...`) and unpacked dimensions are
/// dropped and the last remaining token is the port name. Only identifiers
/// are kept and duplicates are removed (first occurrence wins). Returns an
/// empty list when the module or its header cannot be found.
pub fn extract_module_ports(text: &str, module_name: &str) -> Vec<String> {
    if module_name.is_empty() {
        return Vec::new();
    }
    let tokens = tokenize_flat(text);
    let Some(name_idx) = tokens
        .windows(2)
        .position(|w| w[0].text == "module" && w[1].text == module_name)
        .map(|i| i + 1)
    else {
        return Vec::new();
    };

    let mut open = name_idx + 1;
    if tokens.get(open).is_some_and(|t| t.is_punct("#")) {
        let Some(close) = tokens
            .get(open + 1)
            .filter(|t| t.is_punct("("))
            .and_then(|_| matching_close(&tokens, open + 1))
        else {
            return Vec::new();
        };
        open = close + 1;
    }
    if !tokens.get(open).is_some_and(|t| t.is_punct("(")) {
        return Vec::new();
    }
    let Some(close) = matching_close(&tokens, open) else {
        return Vec::new();
    };
    if !tokens.get(close + 1).is_some_and(|t| t.is_punct(";")) {
        return Vec::new();
    }

    let mut ports: Vec<String> = Vec::new();
    for part in split_top_level(&tokens[open + 1..close], ",") {
        let decl = split_top_level(part, "=")[0];
        let Some(name) = last_plain_token(decl) else {
            continue;
        };
        if is_identifier(name) && !ports.iter().any(|p| p == name) {
            ports.push(name.to_string());
        }
    }
    ports
}

/// The last token of `decl` that sits outside any bracket group.
fn last_plain_token<'a>(decl: &[Token<'a>]) -> Option<&'a str> {
    let mut depth = 0i32;
    let mut last = None;
    for tok in decl {
        if tok.kind == TokenKind::Punct {
            match tok.text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth -= 1,
                _ if depth == 0 => last = Some(tok.text),
                _ => {}
            }
        } else if depth == 0 {
            last = Some(tok.text);
        }
    }
    last
}
