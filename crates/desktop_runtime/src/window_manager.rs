//! The owned window store: the only write path into the window registry.

use std::rc::Rc;

use leptos::logging;
use platform_host::DurableStore;

use crate::model::{Point, Size, WindowConfig, WindowRegistry, WindowState};
use crate::persistence::{self, HydrationState};
use crate::reducer::{reduce_windows, RuntimeEffect, WindowAction};

/// Owns the window registry and its durable snapshot.
///
/// All mutation goes through the operation methods (or [`WindowManager::dispatch`]); callers only
/// ever see shared references or clones. Operations never fail: unknown ids are ignored and
/// storage problems are logged and dropped.
pub struct WindowManager {
    registry: WindowRegistry,
    store: Rc<dyn DurableStore>,
    hydration: HydrationState,
}

impl WindowManager {
    /// Builds the initial window set from `initial`, focusing the last entry.
    ///
    /// Nothing is written to `store` until [`WindowManager::hydrate`] has run.
    ///
    /// Configs are opened in order, so a repeated id updates the earlier window instead of adding
    /// a second one.
    pub fn new(initial: Vec<WindowConfig>, store: Rc<dyn DurableStore>) -> Self {
        let mut registry = WindowRegistry::default();
        for config in initial {
            reduce_windows(&mut registry, WindowAction::OpenWindow(config));
        }
        Self {
            registry,
            store,
            hydration: HydrationState::NotLoaded,
        }
    }

    /// [`WindowManager::new`] followed by [`WindowManager::hydrate`].
    pub fn boot(initial: Vec<WindowConfig>, store: Rc<dyn DurableStore>) -> Self {
        let mut manager = Self::new(initial, store);
        manager.hydrate();
        manager
    }

    /// Replaces the window set with the persisted snapshot, if one parses, and opens the write
    /// gate.
    ///
    /// A missing or unparseable snapshot keeps the initial windows. Runs at most once.
    pub fn hydrate(&mut self) {
        if self.hydration.allows_writes() {
            return;
        }
        match persistence::load_window_snapshot(self.store.as_ref()) {
            Ok(Some(windows)) => {
                reduce_windows(&mut self.registry, WindowAction::HydrateSnapshot { windows });
            }
            Ok(None) => {}
            Err(err) => logging::warn!("discarding window snapshot: {err}"),
        }
        self.hydration = HydrationState::Loaded;
        self.persist();
    }

    pub fn hydration(&self) -> HydrationState {
        self.hydration
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn windows(&self) -> &[WindowState] {
        self.registry.windows()
    }

    pub fn focused_window_id(&self) -> Option<&str> {
        self.registry.focused_window_id()
    }

    pub fn get_window(&self, id: &str) -> Option<&WindowState> {
        self.registry.window(id)
    }

    pub fn get_focused_window(&self) -> Option<&WindowState> {
        self.registry.focused_window()
    }

    /// Applies one action and runs its effects.
    pub fn dispatch(&mut self, action: WindowAction) {
        for effect in reduce_windows(&mut self.registry, action) {
            match effect {
                RuntimeEffect::PersistLayout => self.persist(),
            }
        }
    }

    pub fn open_window(&mut self, config: WindowConfig) {
        self.dispatch(WindowAction::OpenWindow(config));
    }

    pub fn close_window(&mut self, id: &str) {
        self.dispatch(WindowAction::CloseWindow {
            window_id: id.to_string(),
        });
    }

    pub fn minimize_window(&mut self, id: &str) {
        self.dispatch(WindowAction::MinimizeWindow {
            window_id: id.to_string(),
        });
    }

    pub fn maximize_window(&mut self, id: &str) {
        self.dispatch(WindowAction::MaximizeWindow {
            window_id: id.to_string(),
        });
    }

    pub fn restore_window(&mut self, id: &str) {
        self.dispatch(WindowAction::RestoreWindow {
            window_id: id.to_string(),
        });
    }

    pub fn focus_window(&mut self, id: &str) {
        self.dispatch(WindowAction::FocusWindow {
            window_id: id.to_string(),
        });
    }

    pub fn clear_focus(&mut self) {
        self.dispatch(WindowAction::ClearFocus);
    }

    pub fn move_window(&mut self, id: &str, position: Point) {
        self.dispatch(WindowAction::MoveWindow {
            window_id: id.to_string(),
            position,
        });
    }

    pub fn resize_window(&mut self, id: &str, size: Size) {
        self.dispatch(WindowAction::ResizeWindow {
            window_id: id.to_string(),
            size,
        });
    }

    fn persist(&self) {
        if !self.hydration.allows_writes() {
            return;
        }
        if let Err(err) = persistence::persist_window_snapshot(self.store.as_ref(), &self.registry)
        {
            logging::warn!("persist window layout failed: {err}");
        }
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("registry", &self.registry)
            .field("hydration", &self.hydration)
            .finish_non_exhaustive()
    }
}
