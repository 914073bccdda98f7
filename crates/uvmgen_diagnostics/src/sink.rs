//! Collects the diagnostics of one generation call.

use crate::code::Stage;
use crate::diagnostic::{Degraded, Diagnostic};
use std::sync::{Mutex, MutexGuard};

/// Accumulates diagnostics in emission order.
///
/// Shared by reference (or through an `Arc`) between the stages of one
/// call; each stage emits into it and the caller finishes it into a
/// [`Degraded`] value.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        tracing::trace!(code = %diag.code, "diagnostic emitted");
        self.lock().push(diag);
    }

    /// Records every diagnostic in `diags`, in order.
    pub fn extend(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        self.lock().extend(diags);
    }

    /// Returns `true` if any recorded diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|d| d.severity.is_error())
    }

    /// Number of diagnostics raised by `stage`.
    pub fn count(&self, stage: Stage) -> usize {
        self.lock().iter().filter(|d| d.code.stage() == stage).count()
    }

    /// Total number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Pairs `value` with everything recorded, consuming the sink.
    pub fn finish<T>(self, value: T) -> Degraded<T> {
        let warnings = self
            .diagnostics
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Degraded::new(value, warnings)
    }

    /// Pairs `value` with everything recorded so far and empties the sink.
    pub fn drain_into<T>(&self, value: T) -> Degraded<T> {
        Degraded::new(value, std::mem::take(&mut *self.lock()))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
