//! Built-in app catalog and the persisted set of installed apps.

use leptos::logging;
use platform_host::{load_json_with, save_json_with, DurableStore};

use crate::model::{Point, Size, WindowConfig};

/// Durable-store key holding the installed app ids.
pub const INSTALLED_APPS_KEY: &str = "desktop.installed-apps.v1";
/// The app manager. Always installed.
pub const APPS_APP_ID: &str = "apps";

const REQUIRED_APP_IDS: [&str; 1] = [APPS_APP_ID];
const DEFAULT_INSTALLED_APP_IDS: [&str; 2] = [APPS_APP_ID, "notes"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub default_position: Option<Point>,
    pub default_size: Option<Size>,
}

impl AppDefinition {
    /// The config a dock or launcher passes to `open_window` for this app.
    pub fn window_config(&self) -> WindowConfig {
        let mut config =
            WindowConfig::new(self.id, self.title, self.icon).with_color(self.color);
        config.default_position = self.default_position;
        config.default_size = self.default_size;
        config
    }
}

const fn app(
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    color: &'static str,
    description: &'static str,
    position: (i32, i32),
    size: (i32, i32),
) -> AppDefinition {
    AppDefinition {
        id,
        title,
        icon,
        color,
        description,
        default_position: Some(Point::new(position.0, position.1)),
        default_size: Some(Size::new(size.0, size.1)),
    }
}

const APP_CATALOG: [AppDefinition; 10] = [
    app(
        APPS_APP_ID,
        "Apps",
        "pixelarticons:device-laptop",
        "var(--pastel-pink)",
        "Manage your apps",
        (60, 60),
        (360, 400),
    ),
    app(
        "notes",
        "Notes",
        "pixelarticons:note",
        "var(--pastel-yellow)",
        "Write and save notes",
        (480, 100),
        (640, 480),
    ),
    app(
        "files",
        "Files",
        "pixelarticons:folder",
        "var(--pastel-mint)",
        "Browse your files",
        (120, 380),
        (360, 220),
    ),
    app(
        "about",
        "About",
        "pixelarticons:heart",
        "var(--pastel-lavender)",
        "About this system",
        (520, 380),
        (280, 200),
    ),
    app(
        "calculator",
        "Calculator",
        "pixelarticons:calculator",
        "var(--pastel-blue)",
        "Simple calculator",
        (200, 150),
        (240, 320),
    ),
    app(
        "weather",
        "Weather",
        "pixelarticons:cloud-sun",
        "var(--pastel-peach)",
        "Check the weather",
        (300, 200),
        (450, 600),
    ),
    app(
        "calendar",
        "Calendar",
        "pixelarticons:calendar",
        "var(--pastel-mint)",
        "View your calendar",
        (400, 120),
        (320, 280),
    ),
    app(
        "music",
        "Music",
        "pixelarticons:music",
        "var(--pastel-lavender)",
        "Listen to music",
        (250, 180),
        (500, 400),
    ),
    app(
        "settings",
        "Settings",
        "pixelarticons:sliders",
        "var(--pastel-yellow)",
        "System preferences",
        (180, 140),
        (340, 280),
    ),
    app(
        "stickers",
        "Stickers",
        "pixelarticons:paint-bucket",
        "var(--pastel-pink)",
        "Paint by stickers",
        (100, 80),
        (600, 400),
    ),
];

pub fn builtin_apps() -> &'static [AppDefinition] {
    &APP_CATALOG
}

pub fn app_definition(app_id: &str) -> Option<&'static AppDefinition> {
    builtin_apps().iter().find(|entry| entry.id == app_id)
}

/// Installed app ids in install order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApps {
    ids: Vec<String>,
}

impl Default for InstalledApps {
    fn default() -> Self {
        Self {
            ids: DEFAULT_INSTALLED_APP_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

impl InstalledApps {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_installed(&self, app_id: &str) -> bool {
        self.ids.iter().any(|id| id == app_id)
    }

    /// Installed catalog entries, in install order.
    pub fn definitions(&self) -> Vec<&'static AppDefinition> {
        self.ids.iter().filter_map(|id| app_definition(id)).collect()
    }

    /// Returns `true` when the set changed.
    pub fn install(&mut self, app_id: &str) -> bool {
        if self.is_installed(app_id) || app_definition(app_id).is_none() {
            return false;
        }
        self.ids.push(app_id.to_string());
        true
    }

    /// Returns `true` when the set changed. Required apps are never removed.
    pub fn uninstall(&mut self, app_id: &str) -> bool {
        if REQUIRED_APP_IDS.contains(&app_id) {
            return false;
        }
        let before = self.ids.len();
        self.ids.retain(|id| id != app_id);
        self.ids.len() != before
    }

    /// Loads the persisted set, or the defaults when nothing usable is stored.
    ///
    /// Unknown ids are dropped, duplicates collapse, and required apps are always present and
    /// listed first.
    pub fn hydrate(store: &dyn DurableStore) -> Self {
        let stored = match load_json_with::<_, Vec<String>>(store, INSTALLED_APPS_KEY) {
            Ok(Some(ids)) => ids,
            Ok(None) => return Self::default(),
            Err(err) => {
                logging::warn!("discarding installed apps snapshot: {err}");
                return Self::default();
            }
        };

        let mut ids: Vec<String> = REQUIRED_APP_IDS.iter().map(|id| id.to_string()).collect();
        for id in stored {
            if app_definition(&id).is_some() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }

    /// Writes the set; failures are logged and dropped.
    pub fn persist(&self, store: &dyn DurableStore) {
        if let Err(err) = save_json_with(store, INSTALLED_APPS_KEY, &self.ids) {
            logging::warn!("persist installed apps failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryDurableStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = builtin_apps().iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), builtin_apps().len());
    }

    #[test]
    fn window_config_carries_catalog_geometry() {
        let config = app_definition("notes").expect("notes").window_config();
        assert_eq!(config.id, "notes");
        assert_eq!(config.default_position, Some(Point::new(480, 100)));
        assert_eq!(config.default_size, Some(Size::new(640, 480)));
        assert_eq!(config.color.as_deref(), Some("var(--pastel-yellow)"));
        assert_eq!(config.min_size, None);
    }

    #[test]
    fn install_and_uninstall_toggle_membership() {
        let mut installed = InstalledApps::default();
        assert!(installed.install("weather"));
        assert!(!installed.install("weather"));
        assert!(!installed.install("not-an-app"));
        assert!(installed.is_installed("weather"));

        assert!(installed.uninstall("weather"));
        assert!(!installed.is_installed("weather"));
        assert!(!installed.uninstall("weather"));
    }

    #[test]
    fn apps_manager_cannot_be_uninstalled() {
        let mut installed = InstalledApps::default();
        assert!(!installed.uninstall(APPS_APP_ID));
        assert!(installed.is_installed(APPS_APP_ID));
    }

    #[test]
    fn hydrate_filters_unknown_ids_and_keeps_required_apps() {
        let store = MemoryDurableStore::with_entry(
            INSTALLED_APPS_KEY,
            r#"["music","bogus","music","weather"]"#,
        );

        let installed = InstalledApps::hydrate(&store);
        assert_eq!(installed.ids(), &["apps", "music", "weather"]);
    }

    #[test]
    fn hydrate_falls_back_to_defaults() {
        let empty = MemoryDurableStore::default();
        assert_eq!(InstalledApps::hydrate(&empty), InstalledApps::default());

        let broken = MemoryDurableStore::with_entry(INSTALLED_APPS_KEY, "{\"apps\":true}");
        assert_eq!(InstalledApps::hydrate(&broken), InstalledApps::default());
    }

    #[test]
    fn persist_round_trips_through_hydrate() {
        let store = MemoryDurableStore::default();
        let mut installed = InstalledApps::default();
        installed.install("calendar");
        installed.persist(&store);

        assert_eq!(InstalledApps::hydrate(&store), installed);
        let titles: Vec<&str> = installed.definitions().iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Apps", "Notes", "Calendar"]);
    }
}
