//! Reducer actions, side-effect intents, and transition logic for the window registry.

use crate::model::{PersistedWindow, Point, Size, WindowConfig, WindowRegistry};
use crate::persistence::restore_windows;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_windows`] to mutate a [`WindowRegistry`].
pub enum WindowAction {
    /// Open a window, or refresh and raise it when the id is already present.
    OpenWindow(WindowConfig),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: String,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: String,
    },
    /// Toggle the maximized display flag.
    MaximizeWindow {
        /// Window to toggle.
        window_id: String,
    },
    /// Un-minimize, raise, and focus a window.
    RestoreWindow {
        /// Window to restore.
        window_id: String,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: String,
    },
    /// Drop focus without touching the stack.
    ClearFocus,
    /// Overwrite a window's top-left.
    MoveWindow {
        /// Window being moved.
        window_id: String,
        /// New top-left in viewport coordinates.
        position: Point,
    },
    /// Set a window's size, lifted to its minimum size.
    ResizeWindow {
        /// Window being resized.
        window_id: String,
        /// Requested size.
        size: Size,
    },
    /// Replace the whole window set with a persisted snapshot.
    HydrateSnapshot {
        /// Records read from the durable store.
        windows: Vec<PersistedWindow>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_windows`] for the owning store to execute.
pub enum RuntimeEffect {
    /// The window list changed and the layout snapshot should be written.
    PersistLayout,
}

/// Applies a [`WindowAction`] to the registry and collects resulting side effects.
///
/// Every action is total: ids that are not present leave the window list untouched and emit no
/// effects. Focus-only changes never request persistence.
pub fn reduce_windows(registry: &mut WindowRegistry, action: WindowAction) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        WindowAction::OpenWindow(config) => {
            let next_z = next_z_index(registry);
            let window_id = config.id.clone();
            if let Some(window) = registry.window_mut(&window_id) {
                window.title = config.title;
                window.icon = config.icon;
                window.color = config.color;
                window.is_minimized = false;
                window.z_index = next_z;
            } else {
                let index = registry.windows.len();
                registry.windows.push(config.into_window(index, next_z));
            }
            registry.focused_window_id = Some(window_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::CloseWindow { window_id } => {
            let before_len = registry.windows.len();
            registry.windows.retain(|w| w.id != window_id);
            if registry.windows.len() != before_len {
                effects.push(RuntimeEffect::PersistLayout);
            }
            recompute_focus(registry);
        }
        WindowAction::MinimizeWindow { window_id } => {
            if let Some(window) = registry.window_mut(&window_id) {
                window.is_minimized = true;
                effects.push(RuntimeEffect::PersistLayout);
            }
            recompute_focus(registry);
        }
        WindowAction::MaximizeWindow { window_id } => {
            if let Some(window) = registry.window_mut(&window_id) {
                window.is_maximized = !window.is_maximized;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::RestoreWindow { window_id } => {
            let next_z = next_z_index(registry);
            if let Some(window) = registry.window_mut(&window_id) {
                window.is_minimized = false;
                window.z_index = next_z;
                registry.focused_window_id = Some(window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::FocusWindow { window_id } => {
            if raise_and_focus(registry, &window_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::ClearFocus => {
            registry.focused_window_id = None;
        }
        WindowAction::MoveWindow {
            window_id,
            position,
        } => {
            if let Some(window) = registry.window_mut(&window_id) {
                window.position = position;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::ResizeWindow { window_id, size } => {
            if let Some(window) = registry.window_mut(&window_id) {
                window.size = size.at_least(window.min_size);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::HydrateSnapshot { windows } => {
            registry.windows = restore_windows(windows);
            recompute_focus(registry);
        }
    }

    effects
}

fn next_z_index(registry: &WindowRegistry) -> i64 {
    registry.max_z_index().saturating_add(1)
}

/// Raises `window_id` above every other window and focuses it.
///
/// A window that already holds the top z-index keeps its value; only the focus pointer moves.
/// Minimized and unknown windows are left alone. Returns `true` when the stack changed.
fn raise_and_focus(registry: &mut WindowRegistry, window_id: &str) -> bool {
    let max_z = registry.max_z_index();
    let Some(window) = registry.window_mut(window_id) else {
        return false;
    };
    if window.is_minimized {
        return false;
    }

    let raised = if window.z_index == max_z {
        false
    } else {
        window.z_index = max_z.saturating_add(1);
        true
    };
    if registry.focused_window_id.as_deref() != Some(window_id) {
        registry.focused_window_id = Some(window_id.to_string());
    }
    raised
}

/// Focuses the non-minimized window with the highest z-index, or nothing.
pub(crate) fn recompute_focus(registry: &mut WindowRegistry) {
    registry.focused_window_id = registry
        .visible_windows()
        .max_by_key(|w| w.z_index)
        .map(|w| w.id.clone());
}
