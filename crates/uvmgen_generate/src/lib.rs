//! File-set assembly, overrides, pre-flight validation and disk generation.
//!
//! [`generate_files`] and [`render_preview`] are pure: they turn a snapshot
//! into a [`FileSet`]. [`generate_project`] validates first, then writes
//! every file atomically under `<output_dir>/<project name>`.
//! [`GenerationJob`] runs the latter on a background thread.

#![warn(missing_docs)]

pub mod error;
pub mod files;
pub mod job;
pub mod overrides;
pub mod preview;
pub mod project;
pub mod validate;
pub mod write;

pub use error::GenerateError;
pub use files::{generate_files, FileSet, FILELIST_FILE, MANIFEST_FILE, README_FILE};
pub use job::GenerationJob;
pub use overrides::apply_overrides;
pub use preview::{render_preview, Preview};
pub use project::{generate_project, output_root, GenerationResult};
pub use validate::{validate_state, validation_diagnostics};
pub use write::atomic_write;
