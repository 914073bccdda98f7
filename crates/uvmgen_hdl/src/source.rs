//! Access to HDL source text.
//!
//! Renderers that look at the DUT take a `&dyn SourceProvider` instead of
//! touching the file system, so they stay pure under test.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Reads HDL source files.
pub trait SourceProvider: Send + Sync {
    /// Returns the text of `path`.
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local file system. Invalid UTF-8 is replaced, not fatal.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl SourceProvider for FsSource {
    fn read(&self, path: &Path) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// An in-memory set of files.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    /// Creates an empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Adds (or replaces) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl SourceProvider for MemorySource {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}
