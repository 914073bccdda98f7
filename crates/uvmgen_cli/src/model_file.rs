//! Locating, loading and saving the project model file.

use std::path::{Path, PathBuf};

use uvmgen_model::{load_snapshot, save_snapshot, DocumentStore, MemoryStore, ModelError, Snapshot};

use crate::GlobalArgs;

/// Default model file names, in lookup order.
pub const DEFAULT_MODEL_FILES: [&str; 2] = ["uvmgen.json", "uvmgen.toml"];

/// The model path: `--model` if given, else the first default file that
/// exists in `dir`, else `dir/uvmgen.json`.
pub fn resolve_model_path(explicit: Option<&str>, dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    DEFAULT_MODEL_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .unwrap_or_else(|| dir.join(DEFAULT_MODEL_FILES[0]))
}

/// A model file loaded into an in-memory document store.
pub struct ModelFile {
    path: PathBuf,
    store: MemoryStore,
}

impl ModelFile {
    /// Loads the model selected by the global flags.
    pub fn open(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let path = resolve_model_path(global.model.as_deref(), &std::env::current_dir()?);
        Self::open_path(&path)
    }

    /// Loads the model at `path`.
    pub fn open_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.is_file() {
            return Err(format!(
                "no project model at '{}' (run `uvmgen init` first)",
                path.display()
            )
            .into());
        }
        let snapshot = load_snapshot(path)?;
        tracing::debug!(path = %path.display(), units = snapshot.len(), "loaded model");
        Ok(Self {
            path: path.to_path_buf(),
            store: MemoryStore::with_snapshot(snapshot),
        })
    }

    /// The file this model was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The store holding the model.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// A copy of the current model.
    pub fn snapshot(&self) -> Snapshot {
        self.store.get_all()
    }

    /// Writes the current model back to its file.
    pub fn save(&self) -> Result<(), ModelError> {
        save_snapshot(&self.path, &self.store.get_all())
    }
}
