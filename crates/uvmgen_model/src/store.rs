//! The document store contract and an in-process implementation.
//!
//! Forms write through [`DocumentStore::set`]; the engine only ever reads a
//! copy with [`DocumentStore::get_all`].

use crate::snapshot::Snapshot;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// A change callback: `(key, value, snapshot after the change)`.
///
/// `key` and `value` are `None` when the whole store was cleared.
pub type Listener = dyn Fn(Option<&str>, Option<&Value>, &Snapshot) + Send + Sync;

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Key/value access to the project model with change notification.
pub trait DocumentStore {
    /// Returns a copy of the value under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Returns a copy of the whole model.
    fn get_all(&self) -> Snapshot;

    /// Stores `value` under `key` and notifies listeners.
    fn set(&self, key: &str, value: Value);

    /// Registers a listener for every change.
    fn subscribe(&self, listener: Arc<Listener>) -> SubscriptionId;

    /// Registers a listener for changes to `key` only.
    fn subscribe_key(&self, key: &str, listener: Arc<Listener>) -> SubscriptionId;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Returns the value under `key`, or `default` when absent.
    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }
}

struct Subscription {
    id: SubscriptionId,
    key: Option<String>,
    listener: Arc<Listener>,
}

/// A [`DocumentStore`] holding the model in memory.
///
/// Listeners run after the write lock is released, so a listener may read
/// the store. A panicking listener is contained and does not affect the
/// store or the remaining listeners.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Snapshot>,
    subscriptions: Mutex<Vec<Subscription>>,
    next_id: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
            ..Self::default()
        }
    }

    /// Removes every key and notifies global listeners with no key.
    pub fn clear(&self) {
        let after = {
            let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
            *data = Snapshot::new();
            data.clone()
        };
        self.notify(None, None, &after);
    }

    fn add(&self, key: Option<String>, listener: Arc<Listener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Subscription { id, key, listener });
        id
    }

    fn notify(&self, key: Option<&str>, value: Option<&Value>, snapshot: &Snapshot) {
        let targets: Vec<Arc<Listener>> = self
            .subscriptions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|s| match (&s.key, key) {
                (None, _) => true,
                (Some(wanted), Some(changed)) => wanted == changed,
                (Some(_), None) => false,
            })
            .map(|s| Arc::clone(&s.listener))
            .collect();
        for listener in targets {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(key, value, snapshot)));
            if outcome.is_err() {
                tracing::warn!(key = key.unwrap_or("<all>"), "store listener panicked");
            }
        }
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.data
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn get_all(&self) -> Snapshot {
        self.data.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, key: &str, value: Value) {
        let after = {
            let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
            data.insert(key, value.clone());
            data.clone()
        };
        self.notify(Some(key), Some(&value), &after);
    }

    fn subscribe(&self, listener: Arc<Listener>) -> SubscriptionId {
        self.add(None, listener)
    }

    fn subscribe_key(&self, key: &str, listener: Arc<Listener>) -> SubscriptionId {
        self.add(Some(key.to_string()), listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|s| s.id != id);
    }
}
