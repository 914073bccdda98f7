//! `parameter` / `localparam` extraction.

use crate::scanner::{matching_close, span_text, tokenize, Token, TokenKind};
use uvmgen_model::TextMap;

/// Collects every `parameter` and `localparam` declaration in `text`.
///
/// Keywords match case-insensitively. The name is the last identifier before
/// `=` (so types and ranges are skipped), and the value is the raw right-hand
/// side up to the next top-level `,`, `;`, line break or unbalanced `)`.
/// Comma-separated continuations (`parameter A = 1, B = 2`) are read too.
/// A later declaration of the same name replaces the earlier value.
pub fn extract_parameters(text: &str) -> TextMap {
    let tokens = tokenize(text);
    let mut params = TextMap::new();
    let mut i = 0;
    while i < tokens.len() {
        if is_param_keyword(&tokens[i]) {
            i = read_declarations(text, &tokens, i + 1, &mut params);
        } else {
            i += 1;
        }
    }
    params
}

fn is_param_keyword(tok: &Token<'_>) -> bool {
    tok.is_word("parameter") || tok.is_word("localparam")
}

fn next_significant(tokens: &[Token<'_>], mut i: usize) -> Option<usize> {
    while i < tokens.len() && tokens[i].kind == TokenKind::Newline {
        i += 1;
    }
    (i < tokens.len()).then_some(i)
}

/// Reads one or more declarations starting after the keyword; returns the
/// index to resume scanning from.
fn read_declarations(text: &str, tokens: &[Token<'_>], mut i: usize, params: &mut TextMap) -> usize {
    loop {
        let mut name = None;
        while i < tokens.len() && !tokens[i].is_punct("=") {
            let tok = &tokens[i];
            if tok.is_punct(";") || tok.is_punct(")") || tok.is_punct(",") {
                return i;
            }
            if tok.is_punct("[") {
                if let Some(close) = matching_close(tokens, i) {
                    i = close + 1;
                    continue;
                }
            }
            if tok.kind == TokenKind::Ident {
                name = Some(tok.text);
            }
            i += 1;
        }
        let Some(name) = name else {
            return i + 1;
        };
        if i >= tokens.len() {
            return i;
        }

        i += 1;
        let start = i;
        let mut depth = 0usize;
        while i < tokens.len() {
            let tok = &tokens[i];
            match (tok.kind, tok.text) {
                (TokenKind::Newline, _) if depth == 0 => break,
                (TokenKind::Punct, "(" | "[" | "{") => depth += 1,
                (TokenKind::Punct, ")" | "]" | "}") => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                (TokenKind::Punct, "," | ";") if depth == 0 => break,
                _ => {}
            }
            i += 1;
        }
        let value: Vec<Token<'_>> = tokens[start..i]
            .iter()
            .filter(|t| t.kind != TokenKind::Newline)
            .copied()
            .collect();
        if !value.is_empty() {
            params.insert(name.to_string(), span_text(text, &value).trim().to_string());
        }

        if i < tokens.len() && tokens[i].is_punct(",") {
            if let Some(j) = next_significant(tokens, i + 1) {
                let continues = tokens[j].kind == TokenKind::Ident
                    && !is_param_keyword(&tokens[j])
                    && next_significant(tokens, j + 1).is_some_and(|k| tokens[k].is_punct("="));
                if continues {
                    i = j;
                    continue;
                }
            }
        }
        return i;
    }
}
