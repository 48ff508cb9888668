pub mod apps;
pub mod interaction;
pub mod menus;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod shell;
pub mod viewport;
pub mod window_manager;

pub use apps::{app_definition, builtin_apps, AppDefinition, InstalledApps};
pub use interaction::{PointerGesture, PointerInteractionController};
pub use model::*;
pub use persistence::{
    load_window_snapshot, persist_window_snapshot, HydrationState, PersistenceError,
};
pub use reducer::{reduce_windows, RuntimeEffect, WindowAction};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use viewport::{LayoutMode, ViewportMetrics};
pub use window_manager::WindowManager;
