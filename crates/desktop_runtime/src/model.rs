use serde::{Deserialize, Serialize};

/// Size given to windows opened without `default_size`.
pub const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 400,
    height: 300,
};
/// Minimum size given to windows opened without `min_size`.
pub const DEFAULT_MIN_SIZE: Size = Size {
    width: 200,
    height: 150,
};
/// Top-left of the first staggered window.
pub const STAGGER_ORIGIN: i32 = 50;
/// Offset between consecutive staggered windows.
pub const STAGGER_STEP: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Default top-left for the `index`-th window in insertion order.
    pub const fn staggered(index: usize) -> Self {
        let offset = STAGGER_ORIGIN + index as i32 * STAGGER_STEP;
        Self {
            x: offset,
            y: offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Elementwise maximum with `min`.
    pub fn at_least(self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }

    pub fn fits_within(self, min: Size) -> bool {
        self.width >= min.width && self.height >= min.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Commands a menu entry can trigger against the focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    CloseFocused,
    MinimizeFocused,
    ZoomFocused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuEntry {
    Action {
        label: String,
        command: Option<MenuCommand>,
    },
    Divider,
}

impl MenuEntry {
    /// An entry that renders but does nothing when chosen.
    pub fn inert(label: &str) -> Self {
        Self::Action {
            label: label.to_string(),
            command: None,
        }
    }

    pub fn command(label: &str, command: MenuCommand) -> Self {
        Self::Action {
            label: label.to_string(),
            command: Some(command),
        }
    }
}

/// A top-level menu bar entry with its dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub items: Vec<MenuEntry>,
}

/// One open window.
///
/// `position` and `size` are left untouched while the window is maximized; restoring relies on
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: Option<String>,
    pub position: Point,
    pub size: Size,
    pub min_size: Size,
    pub z_index: i64,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub menu_items: Option<Vec<MenuItem>>,
}

/// Creation and refresh input for [`crate::WindowManager::open_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub default_position: Option<Point>,
    pub default_size: Option<Size>,
    pub min_size: Option<Size>,
    pub color: Option<String>,
    pub menu_items: Option<Vec<MenuItem>>,
}

impl WindowConfig {
    pub fn new(id: impl Into<String>, title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
            default_position: None,
            default_size: None,
            min_size: None,
            color: None,
            menu_items: None,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.default_position = Some(position);
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.default_size = Some(size);
        self
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_menu_items(mut self, menu_items: Vec<MenuItem>) -> Self {
        self.menu_items = Some(menu_items);
        self
    }

    /// Builds a fresh window for this config. `index` is the insertion slot used for the
    /// staggered default position.
    pub(crate) fn into_window(self, index: usize, z_index: i64) -> WindowState {
        let min_size = self.min_size.unwrap_or(DEFAULT_MIN_SIZE);
        WindowState {
            position: self
                .default_position
                .unwrap_or_else(|| Point::staggered(index)),
            size: self.default_size.unwrap_or(DEFAULT_WINDOW_SIZE).at_least(min_size),
            min_size,
            z_index,
            is_minimized: false,
            is_maximized: false,
            id: self.id,
            title: self.title,
            icon: self.icon,
            color: self.color,
            menu_items: self.menu_items,
        }
    }
}

/// The set of open windows and the focus pointer.
///
/// Only the reducer writes to this; everything else reads snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowRegistry {
    pub(crate) windows: Vec<WindowState>,
    pub(crate) focused_window_id: Option<String>,
}

impl WindowRegistry {
    pub fn windows(&self) -> &[WindowState] {
        &self.windows
    }

    pub fn focused_window_id(&self) -> Option<&str> {
        self.focused_window_id.as_deref()
    }

    pub fn window(&self, id: &str) -> Option<&WindowState> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn focused_window(&self) -> Option<&WindowState> {
        self.focused_window_id
            .as_deref()
            .and_then(|id| self.window(id))
    }

    /// Highest z-index in the registry, or 0 when empty.
    pub fn max_z_index(&self) -> i64 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Non-minimized windows in insertion order.
    pub fn visible_windows(&self) -> impl Iterator<Item = &WindowState> {
        self.windows.iter().filter(|w| !w.is_minimized)
    }

    /// Windows sorted bottom-to-top by z-index, the order a shell paints them in.
    pub fn stacking_order(&self) -> Vec<&WindowState> {
        let mut ordered: Vec<&WindowState> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }

    pub(crate) fn window_mut(&mut self, id: &str) -> Option<&mut WindowState> {
        self.windows.iter_mut().find(|w| w.id == id)
    }
}

/// The persisted form of one window. Menu items are display-only and never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub min_size: Option<Size>,
    #[serde(default)]
    pub z_index: Option<i64>,
    #[serde(default)]
    pub is_minimized: Option<bool>,
    #[serde(default)]
    pub is_maximized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&WindowState> for PersistedWindow {
    fn from(window: &WindowState) -> Self {
        Self {
            id: window.id.clone(),
            title: window.title.clone(),
            icon: window.icon.clone(),
            position: Some(window.position),
            size: Some(window.size),
            min_size: Some(window.min_size),
            z_index: Some(window.z_index),
            is_minimized: Some(window.is_minimized),
            is_maximized: Some(window.is_maximized),
            color: window.color.clone(),
        }
    }
}

impl PersistedWindow {
    /// Rebuilds a window from this record, filling absent fields with creation defaults for the
    /// record's position in the snapshot.
    pub fn into_window(self, index: usize) -> WindowState {
        let min_size = self.min_size.unwrap_or(DEFAULT_MIN_SIZE);
        WindowState {
            position: self.position.unwrap_or_else(|| Point::staggered(index)),
            size: self.size.unwrap_or(DEFAULT_WINDOW_SIZE).at_least(min_size),
            min_size,
            z_index: self.z_index.unwrap_or(index as i64 + 1),
            is_minimized: self.is_minimized.unwrap_or(false),
            is_maximized: self.is_maximized.unwrap_or(false),
            id: self.id,
            title: self.title,
            icon: self.icon,
            color: self.color,
            menu_items: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn persisted_window_uses_camel_case_wire_names() {
        let window = WindowConfig::new("notes", "Notes", "note")
            .with_color("yellow")
            .into_window(0, 3);
        let value = serde_json::to_value(PersistedWindow::from(&window)).expect("serialize");

        assert_eq!(
            value,
            json!({
                "id": "notes",
                "title": "Notes",
                "icon": "note",
                "position": { "x": 50, "y": 50 },
                "size": { "width": 400, "height": 300 },
                "minSize": { "width": 200, "height": 150 },
                "zIndex": 3,
                "isMinimized": false,
                "isMaximized": false,
                "color": "yellow",
            })
        );
    }

    #[test]
    fn sparse_record_takes_creation_defaults_for_its_slot() {
        let record: PersistedWindow =
            serde_json::from_value(json!({ "id": "files" })).expect("deserialize");
        let window = record.into_window(2);

        assert_eq!(window.position, Point::new(110, 110));
        assert_eq!(window.size, DEFAULT_WINDOW_SIZE);
        assert_eq!(window.min_size, DEFAULT_MIN_SIZE);
        assert_eq!(window.z_index, 3);
        assert!(!window.is_minimized);
        assert!(!window.is_maximized);
        assert_eq!(window.menu_items, None);
    }

    #[test]
    fn restored_size_is_lifted_to_min_size() {
        let record: PersistedWindow = serde_json::from_value(json!({
            "id": "calc",
            "size": { "width": 10, "height": 500 },
            "minSize": { "width": 120, "height": 90 },
        }))
        .expect("deserialize");

        assert_eq!(record.into_window(0).size, Size::new(120, 500));
    }

    #[test]
    fn stacking_order_sorts_by_z_index() {
        let registry = WindowRegistry {
            windows: vec![
                WindowConfig::new("a", "A", "a").into_window(0, 5),
                WindowConfig::new("b", "B", "b").into_window(1, 2),
            ],
            focused_window_id: None,
        };
        let ids: Vec<&str> = registry
            .stacking_order()
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(registry.max_z_index(), 5);
    }
}
