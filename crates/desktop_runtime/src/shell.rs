//! Shell-level input policy: keyboard shortcuts, desktop clicks, and dock activation.
//!
//! None of this touches an in-progress pointer gesture; Escape closes the focused window even
//! mid-drag, and the drag keeps running until pointer-up.

use crate::apps::AppDefinition;
use crate::window_manager::WindowManager;

pub const CLOSE_FOCUSED_KEY: &str = "Escape";

/// Handles a key-down that reached the shell. Returns `true` when the key was consumed.
pub fn handle_shell_key(manager: &mut WindowManager, key: &str) -> bool {
    if key != CLOSE_FOCUSED_KEY {
        return false;
    }
    let Some(window_id) = manager.focused_window_id().map(str::to_string) else {
        return false;
    };
    manager.close_window(&window_id);
    true
}

/// A click on empty desktop drops focus.
pub fn handle_desktop_click(manager: &mut WindowManager) {
    manager.clear_focus();
}

/// Dock activation: opens the app, or brings back its existing window.
pub fn activate_dock_entry(manager: &mut WindowManager, app: &AppDefinition) {
    let minimized = manager.get_window(app.id).map(|w| w.is_minimized);
    match minimized {
        Some(true) => manager.restore_window(app.id),
        Some(false) => manager.focus_window(app.id),
        None => manager.open_window(app.window_config()),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use platform_host::NoopDurableStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::apps::app_definition;
    use crate::interaction::PointerInteractionController;
    use crate::model::{PointerPosition, WindowConfig};
    use crate::viewport::ViewportMetrics;

    fn manager() -> WindowManager {
        WindowManager::boot(
            vec![
                WindowConfig::new("apps", "Apps", "laptop"),
                WindowConfig::new("notes", "Notes", "note"),
            ],
            Rc::new(NoopDurableStore),
        )
    }

    #[test]
    fn escape_closes_focused_window_only() {
        let mut manager = manager();
        assert!(!handle_shell_key(&mut manager, "Enter"));
        assert_eq!(manager.windows().len(), 2);

        assert!(handle_shell_key(&mut manager, "Escape"));
        assert_eq!(manager.get_window("notes"), None);
        assert_eq!(manager.focused_window_id(), Some("apps"));

        manager.clear_focus();
        assert!(!handle_shell_key(&mut manager, "Escape"));
        assert_eq!(manager.windows().len(), 1);
    }

    #[test]
    fn escape_does_not_cancel_a_running_gesture() {
        let mut manager = manager();
        let mut controller = PointerInteractionController::new();
        let viewport = ViewportMetrics::new(1280, 800);
        controller.begin_drag(&mut manager, "apps", PointerPosition::new(60, 60), viewport);

        handle_shell_key(&mut manager, "Escape");

        assert!(controller.is_active());
        assert_eq!(manager.get_window("apps"), None);
    }

    #[test]
    fn desktop_click_clears_focus_and_keeps_stack() {
        let mut manager = manager();
        let before = manager.windows().to_vec();
        handle_desktop_click(&mut manager);
        assert_eq!(manager.focused_window_id(), None);
        assert_eq!(manager.windows(), before.as_slice());
    }

    #[test]
    fn dock_activation_opens_restores_or_focuses() {
        let mut manager = manager();
        let weather = app_definition("weather").expect("weather");

        activate_dock_entry(&mut manager, weather);
        assert_eq!(manager.focused_window_id(), Some("weather"));
        assert_eq!(manager.windows().len(), 3);

        manager.minimize_window("weather");
        activate_dock_entry(&mut manager, weather);
        assert!(!manager.get_window("weather").expect("weather").is_minimized);
        assert_eq!(manager.focused_window_id(), Some("weather"));

        let apps = app_definition("apps").expect("apps");
        activate_dock_entry(&mut manager, apps);
        assert_eq!(manager.focused_window_id(), Some("apps"));
        assert_eq!(manager.windows().len(), 3);
    }
}
