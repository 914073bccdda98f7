//! Text output for diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::fmt::Write;

/// Turns diagnostics into printable text.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic, newline-terminated.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders `diags` in order, followed by a one-line tally when there is
    /// more than one.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        let mut out: String = diags.iter().map(|d| self.render(d)).collect();
        if diags.len() > 1 {
            out.push_str(&tally(diags));
        }
        out
    }
}

/// `"2 warnings, 1 error emitted\n"`, counting only warnings and errors.
pub fn tally(diags: &[Diagnostic]) -> String {
    let count = |sev: Severity| diags.iter().filter(|d| d.severity == sev).count();
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("1 {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    let parts: Vec<String> = [(Severity::Warning, "warning"), (Severity::Error, "error")]
        .into_iter()
        .map(|(sev, word)| (count(sev), word))
        .filter(|(n, _)| *n > 0)
        .map(|(n, word)| plural(n, word))
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("{} emitted\n", parts.join(", "))
    }
}

/// Rustc-style terminal output.
///
/// ```text
/// warning[W201]: Ignored override with unsafe path: '../evil'
///   --> ../evil
///    = help: override paths must be relative to the output root
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    /// Emit ANSI colors on the header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer, colored or plain.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        let ansi = match diag.severity {
            _ if !self.color => return head,
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
            Severity::Help => "1;32",
        };
        format!("\x1b[{ansi}m{head}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}: {}", self.header(diag), diag.message);
        if let Some(subject) = &diag.subject {
            let _ = writeln!(out, "  --> {subject}");
        }
        for (label, lines) in [(Severity::Note, &diag.notes), (Severity::Help, &diag.help)] {
            for line in lines {
                let _ = writeln!(out, "   = {label}: {line}");
            }
        }
        out
    }
}
