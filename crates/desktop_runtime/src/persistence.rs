//! Window-layout persistence against the host durable store.

use std::collections::HashSet;

use leptos::logging;
use platform_host::DurableStore;
use thiserror::Error;

use crate::model::{PersistedWindow, WindowRegistry, WindowState};

/// Durable-store key holding the serialized window list.
pub const WINDOW_STATE_KEY: &str = "desktop.window-state.v1";

/// Largest z-index kept verbatim from a snapshot; the CSS `z-index` range.
const MAX_RESTORED_Z_INDEX: i64 = i32::MAX as i64;

/// Whether the persisted snapshot has been read yet.
///
/// Writes are only allowed once `Loaded`, so the initial default layout never overwrites a
/// snapshot that has not been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HydrationState {
    #[default]
    NotLoaded,
    Loaded,
}

impl HydrationState {
    pub fn allows_writes(self) -> bool {
        matches!(self, Self::Loaded)
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("window snapshot is not a list of window records: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("window snapshot could not be serialized: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("durable store rejected the write: {0}")]
    Store(String),
}

/// Reads the persisted window list.
///
/// Returns `Ok(None)` when nothing has been stored yet.
///
/// # Errors
///
/// Returns [`PersistenceError::Parse`] when the stored text is not a JSON list of window records.
pub fn load_window_snapshot(
    store: &dyn DurableStore,
) -> Result<Option<Vec<PersistedWindow>>, PersistenceError> {
    let Some(raw) = store.get(WINDOW_STATE_KEY) else {
        return Ok(None);
    };
    serde_json::from_str::<Vec<PersistedWindow>>(&raw)
        .map(Some)
        .map_err(PersistenceError::Parse)
}

/// Writes the registry's window list. Menu items are not persisted.
///
/// # Errors
///
/// Returns an error when serialization fails or the store rejects the write.
pub fn persist_window_snapshot(
    store: &dyn DurableStore,
    registry: &WindowRegistry,
) -> Result<(), PersistenceError> {
    let records: Vec<PersistedWindow> = registry
        .windows()
        .iter()
        .map(PersistedWindow::from)
        .collect();
    let raw = serde_json::to_string(&records).map_err(PersistenceError::Serialize)?;
    store.set(WINDOW_STATE_KEY, &raw).map_err(PersistenceError::Store)
}

/// Turns persisted records back into windows that satisfy the registry invariants.
///
/// Later records reusing an id are dropped. If the snapshot carries repeated z-index values, or
/// any value outside `1..=i32::MAX`, the whole stack is re-ranked `1..=n`, keeping relative order
/// (ties broken by list position).
pub fn restore_windows(records: Vec<PersistedWindow>) -> Vec<WindowState> {
    let mut seen = HashSet::new();
    let mut windows: Vec<WindowState> = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if !seen.insert(record.id.clone()) {
            logging::warn!("dropping duplicate window `{}` from snapshot", record.id);
            continue;
        }
        windows.push(record.into_window(index));
    }

    let distinct: HashSet<i64> = windows.iter().map(|w| w.z_index).collect();
    let out_of_range = windows
        .iter()
        .any(|w| !(1..=MAX_RESTORED_Z_INDEX).contains(&w.z_index));
    if distinct.len() != windows.len() || out_of_range {
        let mut order: Vec<usize> = (0..windows.len()).collect();
        order.sort_by_key(|&i| (windows[i].z_index, i));
        for (rank, i) in order.into_iter().enumerate() {
            windows[i].z_index = rank as i64 + 1;
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryDurableStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{Point, Size, WindowConfig};
    use crate::reducer::{reduce_windows, WindowAction};

    fn record(value: serde_json::Value) -> PersistedWindow {
        serde_json::from_value(value).expect("record")
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryDurableStore::default();
        assert!(load_window_snapshot(&store).expect("load").is_none());
    }

    #[test]
    fn non_list_snapshot_is_a_parse_error() {
        let store = MemoryDurableStore::with_entry(WINDOW_STATE_KEY, "{\"id\":\"notes\"}");
        assert!(matches!(
            load_window_snapshot(&store),
            Err(PersistenceError::Parse(_))
        ));

        let store = MemoryDurableStore::with_entry(WINDOW_STATE_KEY, "not json at all");
        assert!(load_window_snapshot(&store).is_err());
    }

    #[test]
    fn persist_writes_records_without_menu_items() {
        let store = MemoryDurableStore::default();
        let mut registry = WindowRegistry::default();
        reduce_windows(
            &mut registry,
            WindowAction::OpenWindow(
                WindowConfig::new("notes", "Notes", "note").with_menu_items(Vec::new()),
            ),
        );

        persist_window_snapshot(&store, &registry).expect("persist");

        let raw = store.get(WINDOW_STATE_KEY).expect("stored");
        assert!(raw.contains("\"notes\""));
        assert!(!raw.contains("menu"));
        let loaded = load_window_snapshot(&store).expect("load").expect("some");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].z_index, Some(1));
    }

    #[test]
    fn rejected_write_surfaces_store_error() {
        let store = MemoryDurableStore::default();
        store.set_reject_writes(true);
        assert!(matches!(
            persist_window_snapshot(&store, &WindowRegistry::default()),
            Err(PersistenceError::Store(_))
        ));
    }

    #[test]
    fn restore_drops_duplicate_ids_keeping_first() {
        let windows = restore_windows(vec![
            record(json!({ "id": "notes", "title": "First", "zIndex": 1 })),
            record(json!({ "id": "notes", "title": "Second", "zIndex": 2 })),
        ]);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].title, "First");
    }

    #[test]
    fn restore_reranks_colliding_z_indices() {
        let windows = restore_windows(vec![
            record(json!({ "id": "a", "zIndex": 7 })),
            record(json!({ "id": "b", "zIndex": 7 })),
            record(json!({ "id": "c", "zIndex": 2 })),
        ]);

        let ranks: Vec<(&str, i64)> = windows
            .iter()
            .map(|w| (w.id.as_str(), w.z_index))
            .collect();
        assert_eq!(ranks, vec![("a", 2), ("b", 3), ("c", 1)]);
    }

    #[test]
    fn restore_keeps_distinct_z_indices_verbatim() {
        let windows = restore_windows(vec![
            record(json!({
                "id": "a",
                "zIndex": 12,
                "position": { "x": 5, "y": 6 },
                "size": { "width": 300, "height": 200 },
            })),
            record(json!({ "id": "b", "zIndex": 4 })),
        ]);

        assert_eq!(windows[0].z_index, 12);
        assert_eq!(windows[0].position, Point::new(5, 6));
        assert_eq!(windows[0].size, Size::new(300, 200));
        assert_eq!(windows[1].z_index, 4);
    }

    #[test]
    fn restore_reranks_extreme_z_indices() {
        let windows = restore_windows(vec![
            record(json!({ "id": "top", "zIndex": i64::MAX })),
            record(json!({ "id": "low", "zIndex": -40 })),
            record(json!({ "id": "mid", "zIndex": 3 })),
        ]);

        let ranks: Vec<(&str, i64)> = windows
            .iter()
            .map(|w| (w.id.as_str(), w.z_index))
            .collect();
        assert_eq!(ranks, vec![("top", 3), ("low", 1), ("mid", 2)]);
    }

    #[test]
    fn hydration_state_gates_writes() {
        assert!(!HydrationState::default().allows_writes());
        assert!(HydrationState::Loaded.allows_writes());
    }
}
