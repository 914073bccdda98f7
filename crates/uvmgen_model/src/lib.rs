//! The project model: raw snapshots, typed unit records, and the document
//! store the forms write through.
//!
//! [`Snapshot`] is the immutable key/value copy the engine consumes.
//! [`ProjectModel::from_snapshot`] turns it into typed records exactly once,
//! folding legacy field spellings into canonical ones. [`loader`] reads and
//! writes snapshot files for the command-line front end.

#![warn(missing_docs)]

pub mod de;
pub mod error;
pub mod loader;
pub mod model;
pub mod snapshot;
pub mod store;
pub mod types;

pub use de::TextMap;
pub use error::ModelError;
pub use loader::{load_snapshot, load_snapshot_from_str, save_snapshot, SnapshotFormat};
pub use model::{OverrideEntry, ProjectModel};
pub use snapshot::{keys, Snapshot};
pub use store::{DocumentStore, Listener, MemoryStore, SubscriptionId};
pub use types::{
    AgentKind, AgentUnit, CompareMode, Components, Constraint, DutInfo, DutSignal,
    EnvironmentUnit, InterfaceUnit, Modport, ProjectUnit, ScoreboardUnit, SequenceStep,
    SequenceUnit, SignalDecl, TestUnit, TopUnit, TransactionField, TransactionUnit,
    AGENT_COMPONENTS,
};
