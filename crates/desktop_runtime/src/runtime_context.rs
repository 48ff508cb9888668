//! Runtime provider and context wiring for a desktop shell.
//!
//! This module owns the long-lived window manager, the pointer interaction controller, and the
//! document-level listeners that drive them. Rendering the dock, menu bar, and window frames is
//! left to the shell that consumes [`DesktopRuntimeContext`].

use std::rc::Rc;

use leptos::*;
use platform_host::DurableStore;
use platform_host_web::WebDurableStore;

use crate::{
    apps::{app_definition, InstalledApps},
    interaction::PointerInteractionController,
    menus,
    model::{MenuCommand, PointerPosition, WindowConfig, WindowRegistry},
    reducer::WindowAction,
    shell,
    viewport::{LayoutMode, ViewportMetrics},
    window_manager::WindowManager,
};

#[derive(Clone, Copy)]
/// Leptos context for reading window state and dispatching [`WindowAction`] values.
pub struct DesktopRuntimeContext {
    /// Durable store shared by the window manager and the installed-apps registry.
    pub store: StoredValue<Rc<dyn DurableStore>>,
    /// Sole owner of the window registry.
    pub manager: StoredValue<WindowManager>,
    /// Drag/resize gesture state.
    pub interaction: StoredValue<PointerInteractionController>,
    /// Reactive copy of the registry, refreshed after every mutation.
    pub state: RwSignal<WindowRegistry>,
    /// Desktop or mobile layout, tracked from viewport resizes.
    pub layout_mode: RwSignal<LayoutMode>,
    /// Apps currently shown in the dock.
    pub installed_apps: RwSignal<InstalledApps>,
    /// Window-manager dispatch callback.
    pub dispatch: Callback<WindowAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a window action through the runtime context callback.
    pub fn dispatch_action(&self, action: WindowAction) {
        self.dispatch.call(action);
    }

    /// Runs `f` against the window manager and publishes the resulting registry.
    pub fn update_manager(&self, f: impl FnOnce(&mut WindowManager)) {
        self.manager.update_value(f);
        self.publish();
    }

    /// Title-bar pointer-down. Returns `true` when a drag started.
    pub fn begin_window_drag(&self, window_id: &str, pointer: PointerPosition) -> bool {
        self.begin_gesture(|controller, manager, viewport| {
            controller.begin_drag(manager, window_id, pointer, viewport)
        })
    }

    /// Resize-handle pointer-down. Returns `true` when a resize started.
    pub fn begin_window_resize(&self, window_id: &str, pointer: PointerPosition) -> bool {
        self.begin_gesture(|controller, manager, viewport| {
            controller.begin_resize(manager, window_id, pointer, viewport)
        })
    }

    /// Runs a menu-bar command against the focused window.
    pub fn run_menu_command(&self, command: MenuCommand) {
        self.update_manager(|manager| menus::apply_menu_command(manager, command));
    }

    /// Dock click for `app_id`. Unknown ids are ignored.
    pub fn activate_app(&self, app_id: &str) {
        if let Some(app) = app_definition(app_id) {
            self.update_manager(|manager| shell::activate_dock_entry(manager, app));
        }
    }

    /// Click on empty desktop space.
    pub fn click_desktop(&self) {
        self.update_manager(shell::handle_desktop_click);
    }

    /// Marks `app_id` installed and persists the set.
    pub fn install_app(&self, app_id: &str) {
        let store = self.store.get_value();
        self.installed_apps.update(|apps| {
            if apps.install(app_id) {
                apps.persist(store.as_ref());
            }
        });
    }

    /// Removes `app_id` from the dock and persists the set.
    pub fn uninstall_app(&self, app_id: &str) {
        let store = self.store.get_value();
        self.installed_apps.update(|apps| {
            if apps.uninstall(app_id) {
                apps.persist(store.as_ref());
            }
        });
    }

    fn begin_gesture(
        &self,
        start: impl FnOnce(
            &mut PointerInteractionController,
            &mut WindowManager,
            ViewportMetrics,
        ) -> bool,
    ) -> bool {
        let viewport = ViewportMetrics::from_host();
        let mut started = false;
        self.interaction.update_value(|controller| {
            self.manager.update_value(|manager| {
                started = start(controller, manager, viewport);
            });
        });
        if started {
            self.publish();
        }
        started
    }

    fn pointer_move(&self, pointer: PointerPosition) {
        if !self.interaction.with_value(|c| c.is_active()) {
            return;
        }
        let viewport = ViewportMetrics::from_host();
        self.interaction.update_value(|controller| {
            self.manager
                .update_value(|manager| controller.pointer_move(manager, pointer, viewport));
        });
        self.publish();
    }

    fn pointer_up(&self) {
        self.interaction.update_value(|controller| controller.pointer_up());
    }

    fn publish(&self) {
        publish_registry(self.manager, self.state);
    }
}

fn publish_registry(manager: StoredValue<WindowManager>, state: RwSignal<WindowRegistry>) {
    let registry = manager.with_value(|m| m.registry().clone());
    if state.get_untracked() != registry {
        state.set(registry);
    }
}

fn pointer_from_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition::new(ev.client_x(), ev.client_y())
}

fn install_boot_hydration(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        runtime.update_manager(|manager| manager.hydrate());
        let store = runtime.store.get_value();
        runtime
            .installed_apps
            .set(InstalledApps::hydrate(store.as_ref()));
    });
}

fn install_document_listeners(runtime: DesktopRuntimeContext) {
    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        runtime.pointer_move(pointer_from_event(&ev));
    });
    let up_listener = window_event_listener(ev::pointerup, move |_| runtime.pointer_up());
    let key_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let mut consumed = false;
        runtime.update_manager(|manager| consumed = shell::handle_shell_key(manager, &ev.key()));
        if consumed {
            ev.prevent_default();
        }
    });
    let resize_listener = window_event_listener(ev::resize, move |_| {
        let mode = ViewportMetrics::from_host().layout_mode();
        if runtime.layout_mode.get_untracked() != mode {
            runtime.layout_mode.set(mode);
        }
    });

    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
        key_listener.remove();
        resize_listener.remove();
    });
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and hydrates persisted state.
pub fn DesktopProvider(
    /// Windows shown on first run, before anything has been persisted.
    #[prop(optional)]
    initial_windows: Vec<WindowConfig>,
    children: Children,
) -> impl IntoView {
    let durable: Rc<dyn DurableStore> = Rc::new(WebDurableStore);
    let manager = store_value(WindowManager::new(initial_windows, durable.clone()));
    let store = store_value(durable);
    let interaction = store_value(PointerInteractionController::new());
    let state = create_rw_signal(manager.with_value(|m| m.registry().clone()));
    let layout_mode = create_rw_signal(ViewportMetrics::from_host().layout_mode());
    let installed_apps = create_rw_signal(InstalledApps::default());

    let dispatch = Callback::new(move |action: WindowAction| {
        manager.update_value(|m| m.dispatch(action));
        publish_registry(manager, state);
    });

    let runtime = DesktopRuntimeContext {
        store,
        manager,
        interaction,
        state,
        layout_mode,
        installed_apps,
        dispatch,
    };

    provide_context(runtime);

    install_boot_hydration(runtime);
    install_document_listeners(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
