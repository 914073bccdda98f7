//! Generation on a background thread.

use crate::error::GenerateError;
use crate::project::{generate_project, GenerationResult};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use uvmgen_hdl::SourceProvider;
use uvmgen_model::Snapshot;

/// A running [`generate_project`] call.
///
/// The job owns its snapshot, so the caller may keep editing the document
/// store meanwhile. Dropping the handle discards the outcome; the write
/// itself still runs to completion. Only one job should target a given
/// output root at a time.
#[derive(Debug)]
pub struct GenerationJob {
    handle: JoinHandle<Result<GenerationResult, GenerateError>>,
}

impl GenerationJob {
    /// Starts generating `snapshot` on a new thread.
    pub fn spawn(snapshot: Snapshot, source: Arc<dyn SourceProvider>) -> Self {
        let handle = thread::spawn(move || {
            tracing::debug!("generation job started");
            generate_project(&snapshot, source.as_ref())
        });
        Self { handle }
    }

    /// Returns `true` once the job has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the job and returns its outcome.
    pub fn join(self) -> Result<GenerationResult, GenerateError> {
        self.handle.join().map_err(|_| GenerateError::JobPanicked)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use uvmgen_hdl::MemorySource;

    #[test]
    fn background_generation_writes_files() {
        let dir = TempDir::new().unwrap();
        let snap = Snapshot::from_value(json!({
            "project": {"project_name": "bg", "output_dir": dir.path().to_string_lossy()},
            "interface": {}, "transaction": {}, "agent": {},
            "environment": {}, "test": {}, "top": {}
        }))
        .unwrap();
        let job = GenerationJob::spawn(snap, Arc::new(MemorySource::new()));
        let result = job.join().unwrap();
        assert!(result.output_root.join("src/top.sv").is_file());
    }

    #[test]
    fn validation_error_is_returned() {
        let snap = Snapshot::from_value(json!({})).unwrap();
        let job = GenerationJob::spawn(snap, Arc::new(MemorySource::new()));
        assert!(matches!(job.join(), Err(GenerateError::Validation(_))));
    }
}
