//! The raw project snapshot: unit key to JSON value, in authored order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known top-level snapshot keys.
pub mod keys {
    /// Project basics and DUT analysis.
    pub const PROJECT: &str = "project";
    /// Interface unit.
    pub const INTERFACE: &str = "interface";
    /// Transaction unit.
    pub const TRANSACTION: &str = "transaction";
    /// Agent unit.
    pub const AGENT: &str = "agent";
    /// Legacy top-level agent custom code, folded into the agent record.
    pub const AGENT_CODE: &str = "agent_code";
    /// Scoreboard unit.
    pub const SCOREBOARD: &str = "scoreboard";
    /// Environment unit.
    pub const ENVIRONMENT: &str = "environment";
    /// Sequence unit.
    pub const SEQUENCE: &str = "sequence";
    /// Test unit.
    pub const TEST: &str = "test";
    /// Top module unit.
    pub const TOP: &str = "top";
    /// Relative path to override text.
    pub const CUSTOM_FILES: &str = "custom_files";
    /// Whether overrides are applied.
    pub const CUSTOM_FILES_ENABLED: &str = "custom_files_enabled";
}

/// An immutable point-in-time copy of the project model.
///
/// Cloning is a deep copy; the engine reads one snapshot per call and never
/// writes back to it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Builds a snapshot from a JSON value, if it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present (a `null` value counts).
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Iterates over the keys in authored order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the snapshot holds no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
