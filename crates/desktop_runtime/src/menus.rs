//! Menu bar contents and the window commands menu entries trigger.

use crate::model::{MenuCommand, MenuEntry, MenuItem, WindowState};
use crate::window_manager::WindowManager;

/// File / Edit / Window menus shown for windows that bring no menus of their own.
pub fn default_menu_bar() -> Vec<MenuItem> {
    vec![
        MenuItem {
            label: "File".to_string(),
            items: vec![
                MenuEntry::inert("New"),
                MenuEntry::inert("Open..."),
                MenuEntry::Divider,
                MenuEntry::command("Close", MenuCommand::CloseFocused),
            ],
        },
        MenuItem {
            label: "Edit".to_string(),
            items: vec![
                MenuEntry::inert("Undo"),
                MenuEntry::inert("Redo"),
                MenuEntry::Divider,
                MenuEntry::inert("Cut"),
                MenuEntry::inert("Copy"),
                MenuEntry::inert("Paste"),
            ],
        },
        MenuItem {
            label: "Window".to_string(),
            items: vec![
                MenuEntry::command("Minimize", MenuCommand::MinimizeFocused),
                MenuEntry::command("Zoom", MenuCommand::ZoomFocused),
            ],
        },
    ]
}

/// Menus for `window`: its own when it declares any, otherwise the defaults.
pub fn menu_bar_for(window: &WindowState) -> Vec<MenuItem> {
    window.menu_items.clone().unwrap_or_else(default_menu_bar)
}

/// Runs `command` against the focused window. Does nothing without focus.
pub fn apply_menu_command(manager: &mut WindowManager, command: MenuCommand) {
    let Some(window_id) = manager.focused_window_id().map(str::to_string) else {
        return;
    };
    match command {
        MenuCommand::CloseFocused => manager.close_window(&window_id),
        MenuCommand::MinimizeFocused => manager.minimize_window(&window_id),
        MenuCommand::ZoomFocused => manager.maximize_window(&window_id),
    }
}
