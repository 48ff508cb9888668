//! Synchronous durable key-value storage contracts and adapters.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for small durable values (JSON stored as text per key).
///
/// The contract mirrors a same-origin browser store: reads and writes complete synchronously and
/// a read of a missing key is `None`, never an error.
pub trait DurableStore {
    /// Loads the raw string stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `raw` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or rejects the write.
    fn set(&self, key: &str, raw: &str) -> Result<(), String>;

    /// Removes `key` from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or rejects the delete.
    fn remove(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op durable store for unsupported targets and baseline tests.
pub struct NoopDurableStore;

impl DurableStore for NoopDurableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _raw: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory durable store keyed by string.
///
/// Clones share the same backing map, so a test can hand one clone to the runtime and inspect
/// writes through another.
pub struct MemoryDurableStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryDurableStore {
    /// Creates a store pre-populated with `key` → `raw`.
    pub fn with_entry(key: &str, raw: &str) -> Self {
        let store = Self::default();
        store
            .inner
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        store
    }

    /// Makes every subsequent `set` fail, simulating an exhausted storage quota.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl DurableStore for MemoryDurableStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, raw: &str) -> Result<(), String> {
        if self.reject_writes.get() {
            return Err(format!("quota exceeded while writing `{key}`"));
        }
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed value through a [`DurableStore`] implementation.
///
/// # Errors
///
/// Returns an error when the stored text is not valid JSON for `T`.
pub fn load_json_with<S: DurableStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get(key) else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`DurableStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_json_with<S: DurableStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct DockThing {
        pinned: bool,
    }

    #[test]
    fn memory_store_round_trip_and_remove() {
        let store = MemoryDurableStore::default();
        let store_obj: &dyn DurableStore = &store;

        store_obj.set("dock.key", "{\"k\":1}").expect("set");
        assert_eq!(store_obj.get("dock.key"), Some("{\"k\":1}".to_string()));
        store_obj.remove("dock.key").expect("remove");
        assert_eq!(store_obj.get("dock.key"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryDurableStore::default();
        let other = store.clone();
        store.set("k", "v").expect("set");
        assert_eq!(other.get("k"), Some("v".to_string()));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn rejected_writes_leave_previous_value() {
        let store = MemoryDurableStore::with_entry("k", "old");
        store.set_reject_writes(true);
        assert!(store.set("k", "new").is_err());
        assert_eq!(store.get("k"), Some("old".to_string()));
    }

    #[test]
    fn typed_helpers_round_trip_and_report_bad_json() {
        let store = MemoryDurableStore::default();
        save_json_with(&store, "dock", &DockThing { pinned: true }).expect("save typed");

        let loaded: Option<DockThing> = load_json_with(&store, "dock").expect("load typed");
        assert_eq!(loaded, Some(DockThing { pinned: true }));

        store.set("dock", "not json").expect("set");
        assert!(load_json_with::<_, DockThing>(&store, "dock").is_err());
        assert_eq!(
            load_json_with::<_, DockThing>(&store, "missing").expect("missing"),
            None
        );
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopDurableStore;
        let store_obj: &dyn DurableStore = &store;
        assert_eq!(store_obj.get("k"), None);
        store_obj.set("k", "{}").expect("set");
        store_obj.remove("k").expect("remove");
    }
}
