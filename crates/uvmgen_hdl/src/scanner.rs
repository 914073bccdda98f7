//! A small tokenizer for the subset of SystemVerilog the introspector reads.
//!
//! Grammar recognised (everything else becomes single-character
//! [`TokenKind::Punct`]):
//!
//! ```text
//! ident   = [A-Za-z_$][A-Za-z0-9_$]*
//! number  = [0-9'] [0-9A-Za-z_'?]*         (covers 8'hFF, 'b1, 1_000)
//! string  = '"' ... '"'                    (C-style escapes skipped)
//! macro   = '`' [A-Za-z0-9_$]*             (a use such as `WIDTH)
//! punct2  = "**" | "<<" | ">>"
//! newline = '\n'                           (kept, parameter values end there)
//! ```
//!
//! Line and block comments are skipped. A backtick that starts a line is a
//! compiler directive (`` `define``, `` `include``, `` `ifdef``) and is
//! skipped to end of line; anywhere else it begins a [`TokenKind::Macro`].

/// The kind of a scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword; includes system names such as `$clog2`.
    Ident,
    /// Numeric literal, sized or unsized.
    Number,
    /// Double-quoted string literal.
    Str,
    /// A text macro use such as `` `WIDTH``, never evaluated.
    Macro,
    /// Operator or punctuation.
    Punct,
    /// A line break.
    Newline,
}

/// A token borrowing its text from the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token classification.
    pub kind: TokenKind,
    /// The exact source text.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token<'_> {
    /// Returns `true` if this is the punctuation `p`.
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    /// Returns `true` if this is an identifier equal to `word` ignoring case.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text.eq_ignore_ascii_case(word)
    }
}

/// Tokenizes `source`, skipping whitespace (except newlines) and comments.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner {
        source,
        bytes: source.as_bytes(),
        pos: 0,
    };
    scanner.scan_all()
}

/// Tokenizes `source` and drops newline tokens.
pub fn tokenize_flat(source: &str) -> Vec<Token<'_>> {
    tokenize(source)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Newline)
        .collect()
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn scan_all(&mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_blanks_and_comments();
            if self.pos >= self.bytes.len() {
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn skip_to_line_end(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    /// Only blanks precede `pos` on its line.
    fn at_line_start(&self) -> bool {
        self.bytes[..self.pos]
            .iter()
            .rev()
            .take_while(|b| **b != b'\n')
            .all(|b| b.is_ascii_whitespace())
    }

    fn skip_blanks_and_comments(&mut self) {
        loop {
            while self.pos < self.bytes.len()
                && self.bytes[self.pos] != b'\n'
                && self.bytes[self.pos].is_ascii_whitespace()
            {
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() {
                return;
            }
            match (self.peek(), self.peek_at(1)) {
                (b'/', b'/') => self.skip_to_line_end(),
                (b'`', _) if self.at_line_start() => self.skip_to_line_end(),
                (b'/', b'*') => {
                    self.pos += 2;
                    while self.pos < self.bytes.len()
                        && !(self.peek() == b'*' && self.peek_at(1) == b'/')
                    {
                        self.pos += 1;
                    }
                    // unterminated comments run to end of input
                    self.pos = (self.pos + 2).min(self.bytes.len());
                }
                _ => return,
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.source[start..self.pos],
            start,
            end: self.pos,
        }
    }

    fn next_token(&mut self) -> Token<'a> {
        let start = self.pos;
        let b = self.peek();

        if b == b'\n' {
            self.pos += 1;
            return self.token(TokenKind::Newline, start);
        }

        if b.is_ascii_alphabetic() || b == b'_' || b == b'$' {
            while self.peek().is_ascii_alphanumeric() || matches!(self.peek(), b'_' | b'$') {
                self.pos += 1;
            }
            return self.token(TokenKind::Ident, start);
        }

        if b == b'`' {
            self.pos += 1;
            while self.peek().is_ascii_alphanumeric() || matches!(self.peek(), b'_' | b'$') {
                self.pos += 1;
            }
            return self.token(TokenKind::Macro, start);
        }

        if b.is_ascii_digit() || (b == b'\'' && self.peek_at(1).is_ascii_alphabetic()) {
            self.pos += 1;
            while self.peek().is_ascii_alphanumeric() || matches!(self.peek(), b'_' | b'\'' | b'?')
            {
                self.pos += 1;
            }
            return self.token(TokenKind::Number, start);
        }

        if b == b'"' {
            self.pos += 1;
            while self.pos < self.bytes.len() && self.peek() != b'"' && self.peek() != b'\n' {
                if self.peek() == b'\\' {
                    self.pos += 1;
                }
                self.pos = (self.pos + 1).min(self.bytes.len());
            }
            if self.peek() == b'"' {
                self.pos += 1;
            }
            return self.token(TokenKind::Str, start);
        }

        let pair = (b, self.peek_at(1));
        if matches!(pair, (b'*', b'*') | (b'<', b'<') | (b'>', b'>')) {
            self.pos += 2;
            return self.token(TokenKind::Punct, start);
        }

        // one UTF-8 character, so slicing stays on a char boundary
        let width = self.source[start..].chars().next().map_or(1, char::len_utf8);
        self.pos += width;
        self.token(TokenKind::Punct, start)
    }
}

/// Given the index of an opening bracket token, returns the index of its
/// matching closer. Nested `()`, `[]` and `{}` are tracked together.
pub fn matching_close(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(open) {
        if tok.kind != TokenKind::Punct {
            continue;
        }
        match tok.text {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a token slice on commas that are not nested inside brackets.
pub fn split_top_level<'t, 'a>(tokens: &'t [Token<'a>], sep: &str) -> Vec<&'t [Token<'a>]> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut begin = 0;
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind != TokenKind::Punct {
            continue;
        }
        match tok.text {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth -= 1,
            t if t == sep && depth == 0 => {
                parts.push(&tokens[begin..i]);
                begin = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[begin..]);
    parts
}

/// The source text spanned by a non-empty token slice.
pub fn span_text<'a>(source: &'a str, tokens: &[Token<'_>]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => &source[first.start..last.end],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn idents_numbers_punct() {
        assert_eq!(
            kinds("a_1 = 8'hFF + $clog2(W);"),
            vec![
                (TokenKind::Ident, "a_1"),
                (TokenKind::Punct, "="),
                (TokenKind::Number, "8'hFF"),
                (TokenKind::Punct, "+"),
                (TokenKind::Ident, "$clog2"),
                (TokenKind::Punct, "("),
                (TokenKind::Ident, "W"),
                (TokenKind::Punct, ")"),
                (TokenKind::Punct, ";"),
            ]
        );
    }

    #[test]
    fn comments_are_skipped_newlines_kept() {
        let toks = kinds("a // line\n/* block\n more */ b");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Ident, "a"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Ident, "b"),
            ]
        );
    }

    #[test]
    fn directives_are_skipped() {
        let toks = kinds("`timescale 1ns/1ps\nmodule");
        assert_eq!(
            toks,
            vec![(TokenKind::Newline, "\n"), (TokenKind::Ident, "module")]
        );
    }

    #[test]
    fn indented_directive_is_skipped() {
        let toks = kinds("  `ifdef SIM\nwire a;");
        assert_eq!(toks[0], (TokenKind::Newline, "\n"));
        assert_eq!(toks[1], (TokenKind::Ident, "wire"));
    }

    #[test]
    fn macro_use_mid_line_is_a_token() {
        let toks = kinds("[`W-1:0] a)");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Punct, "["),
                (TokenKind::Macro, "`W"),
                (TokenKind::Punct, "-"),
                (TokenKind::Number, "1"),
                (TokenKind::Punct, ":"),
                (TokenKind::Number, "0"),
                (TokenKind::Punct, "]"),
                (TokenKind::Ident, "a"),
                (TokenKind::Punct, ")"),
            ]
        );
    }

    #[test]
    fn two_char_operators() {
        let toks = kinds("2**3<<1>>a");
        let texts: Vec<_> = toks.iter().map(|(_, t)| *t).collect();
        assert_eq!(texts, vec!["2", "**", "3", "<<", "1", ">>", "a"]);
    }

    #[test]
    fn strings_and_unterminated_comment() {
        let toks = kinds("\"a\\\"b\" /* open");
        assert_eq!(toks, vec![(TokenKind::Str, "\"a\\\"b\"")]);
    }

    #[test]
    fn non_ascii_does_not_panic() {
        let toks = kinds("a é b");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[1], (TokenKind::Punct, "é"));
    }

    #[test]
    fn matching_close_nested() {
        let toks = tokenize_flat("( a [ 1 ] ( b ) ) c");
        assert_eq!(matching_close(&toks, 0), Some(8));
        assert_eq!(matching_close(&toks, 2), Some(4));
    }

    #[test]
    fn split_respects_nesting() {
        let src = "a, f(b, c), [1,2] d";
        let toks = tokenize_flat(src);
        let parts = split_top_level(&toks, ",");
        let texts: Vec<_> = parts.iter().map(|p| span_text(src, p)).collect();
        assert_eq!(texts, vec!["a", "f(b, c)", "[1,2] d"]);
    }
}
