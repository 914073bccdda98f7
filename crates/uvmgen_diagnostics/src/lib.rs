//! Structured warnings and errors reported by the generator.
//!
//! A [`Diagnostic`] carries a severity, a stable code, a message, and an
//! optional subject (the unit key or file path it is about). The thread-safe
//! [`DiagnosticSink`] collects them across the stages of one call and
//! [`TerminalRenderer`] formats them for the CLI.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode, ParseCodeError, Stage};
pub use diagnostic::{Degraded, Diagnostic};
pub use renderer::{tally, DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
