//! Bit-width resolution for declared ranges.
//!
//! Ranges are evaluated with integer (Verilog) semantics: `/` truncates,
//! `%`, `**`, `<<`, `>>`, the bitwise operators and `$clog2` are supported.
//! Identifiers resolve through the parameter table, whose values may
//! themselves reference other parameters.

use crate::scanner::{tokenize_flat, Token, TokenKind};
use uvmgen_model::TextMap;

/// Maximum parameter indirection depth before giving up.
const MAX_DEPTH: usize = 16;

/// Resolves a declared range to its bit width.
///
/// `"1"` stays `"1"`. For `[MSB:LSB]` the width `|MSB - LSB| + 1` is
/// computed after substituting known parameters, so ascending ranges such
/// as `[0:7]` count the same bits as `[7:0]`. Anything that cannot be
/// evaluated (unknown identifier, division by zero, not a range) returns
/// `raw` unchanged, so the function is idempotent on unresolvable input.
pub fn resolve_width(raw: &str, parameters: &TextMap) -> String {
    if raw.trim() == "1" {
        return "1".to_string();
    }
    range_width(raw, parameters).map_or_else(|| raw.to_string(), |w| w.to_string())
}

fn range_width(raw: &str, parameters: &TextMap) -> Option<i64> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (msb, lsb) = split_range(inner)?;
    let msb = eval_expr(msb, parameters)?;
    let lsb = eval_expr(lsb, parameters)?;
    msb.checked_sub(lsb)?.checked_abs()?.checked_add(1)
}

/// Splits `MSB:LSB` at the single top-level colon.
fn split_range(inner: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    let mut colon = None;
    for (i, c) in inner.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ':' if depth == 0 => {
                if colon.is_some() {
                    return None;
                }
                colon = Some(i);
            }
            _ => {}
        }
    }
    let at = colon?;
    Some((&inner[..at], &inner[at + 1..]))
}

/// Evaluates a constant integer expression, resolving identifiers through
/// `parameters`. Returns `None` on any failure.
pub fn eval_expr(expr: &str, parameters: &TextMap) -> Option<i64> {
    eval_at_depth(expr, parameters, 0)
}

fn eval_at_depth(expr: &str, parameters: &TextMap, depth: usize) -> Option<i64> {
    if depth > MAX_DEPTH {
        return None;
    }
    let tokens = tokenize_flat(expr);
    if tokens.is_empty() {
        return None;
    }
    let mut parser = ExprParser {
        tokens: &tokens,
        pos: 0,
        parameters,
        depth,
    };
    let value = parser.parse_binary(0)?;
    if parser.pos != tokens.len() {
        return None;
    }
    Some(value)
}

/// Binary operators by precedence, lowest first.
const PRECEDENCE: &[&[&str]] = &[
    &["|"],
    &["^"],
    &["&"],
    &["<<", ">>"],
    &["+", "-"],
    &["*", "/", "%"],
    &["**"],
];

struct ExprParser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    parameters: &'t TextMap,
    depth: usize,
}

impl<'a> ExprParser<'_, 'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_punct(p)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_binary(&mut self, level: usize) -> Option<i64> {
        if level >= PRECEDENCE.len() {
            return self.parse_unary();
        }
        let mut lhs = self.parse_binary(level + 1)?;
        loop {
            let op = match self.peek() {
                Some(t)
                    if t.kind == TokenKind::Punct
                        && PRECEDENCE[level].iter().any(|op| *op == t.text) =>
                {
                    t.text
                }
                _ => return Some(lhs),
            };
            self.pos += 1;
            if op == "**" {
                // right associative
                let rhs = self.parse_binary(level)?;
                return apply(op, lhs, rhs);
            }
            let rhs = self.parse_binary(level + 1)?;
            lhs = apply(op, lhs, rhs)?;
        }
    }

    fn parse_unary(&mut self) -> Option<i64> {
        if self.eat_punct("-") {
            return self.parse_unary()?.checked_neg();
        }
        if self.eat_punct("+") {
            return self.parse_unary();
        }
        if self.eat_punct("~") {
            return Some(!self.parse_unary()?);
        }
        if self.eat_punct("!") {
            return Some(i64::from(self.parse_unary()? == 0));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<i64> {
        let tok = self.peek()?;
        self.pos += 1;
        match tok.kind {
            TokenKind::Number => parse_literal(tok.text),
            TokenKind::Ident if tok.text == "$clog2" => {
                if !self.eat_punct("(") {
                    return None;
                }
                let arg = self.parse_binary(0)?;
                if !self.eat_punct(")") {
                    return None;
                }
                Some(clog2(arg))
            }
            TokenKind::Ident => {
                let value = self.parameters.get(tok.text)?;
                eval_at_depth(value, self.parameters, self.depth + 1)
            }
            TokenKind::Punct if tok.text == "(" => {
                let inner = self.parse_binary(0)?;
                if !self.eat_punct(")") {
                    return None;
                }
                Some(inner)
            }
            _ => None,
        }
    }
}

fn apply(op: &str, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        "+" => lhs.checked_add(rhs),
        "-" => lhs.checked_sub(rhs),
        "*" => lhs.checked_mul(rhs),
        "/" => lhs.checked_div(rhs),
        "%" => lhs.checked_rem(rhs),
        "**" => u32::try_from(rhs).ok().and_then(|e| lhs.checked_pow(e)),
        "<<" => u32::try_from(rhs).ok().and_then(|s| lhs.checked_shl(s)),
        ">>" => u32::try_from(rhs).ok().and_then(|s| lhs.checked_shr(s)),
        "&" => Some(lhs & rhs),
        "|" => Some(lhs | rhs),
        "^" => Some(lhs ^ rhs),
        _ => None,
    }
}

/// Parses a decimal or based literal (`42`, `8'hFF`, `'b101`, `1_000`).
/// `x`/`z` digits read as zero.
fn parse_literal(text: &str) -> Option<i64> {
    let text = text.replace('_', "");
    let Some(tick) = text.find('\'') else {
        return text.parse().ok();
    };
    let after = text[tick + 1..].trim_start_matches(['s', 'S']);
    let mut chars = after.chars();
    let radix = match chars.next()? {
        'b' | 'B' => 2,
        'o' | 'O' => 8,
        'd' | 'D' => 10,
        'h' | 'H' => 16,
        _ => return None,
    };
    let digits: String = chars
        .map(|c| match c {
            'x' | 'X' | 'z' | 'Z' | '?' => '0',
            other => other,
        })
        .collect();
    i64::from_str_radix(&digits, radix).ok()
}

/// `$clog2` semantics: `clog2(0) = clog2(1) = 0`, `clog2(5) = 3`.
fn clog2(n: i64) -> i64 {
    if n <= 1 {
        return 0;
    }
    let mut result = 0;
    let mut val = n - 1;
    while val > 0 {
        result += 1;
        val >>= 1;
    }
    result
}
