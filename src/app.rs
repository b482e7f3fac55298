//! LandDesk Frontend App
//!
//! Mounts the page controller named by the server-rendered shell. The shell
//! sets `data-page` and `data-role` on `<body>`; everything else about the
//! page (CSRF token, session) is already in the DOM when we boot.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{
    ClientManager, InstallmentTable, LandTasksPanel, LocationManager, TaskBoard, ToastStack,
};
use crate::context::{AppContext, Toast};
use crate::status::Role;
use crate::store::{AppState, AppStateStoreFields};

fn body_attr(name: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .body()?
        .get_attribute(name)
}

/// Which controller to mount, from `<body data-page="…">`.
fn page_id() -> String {
    body_attr("data-page").unwrap_or_else(|| "tasks".to_string())
}

/// Viewer role, from `<body data-role="…">`. Anything unknown is staff.
fn page_role() -> Role {
    Role::from_attr(&body_attr("data-role").unwrap_or_default())
}

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());
    let role = page_role();
    let page = page_id();

    provide_context(AppContext::new(
        (reload_trigger, set_reload_trigger),
        (toasts, set_toasts),
        role,
    ));
    let store = Store::new(AppState::new());
    provide_context(store);

    // Reference data for the mounted page's selects.
    let catalogs = page.clone();
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        let page = catalogs.clone();
        web_sys::console::log_1(&format!("[App] Loading reference data for {page}").into());

        if matches!(page.as_str(), "tasks" | "land-tasks") {
            spawn_local(async move {
                match api::list_employees().await {
                    Ok(loaded) => *store.employees().write() = loaded,
                    Err(e) => {
                        web_sys::console::error_1(&format!("[App] Employees failed: {e}").into())
                    }
                }
            });
            spawn_local(async move {
                match api::list_lands().await {
                    Ok(loaded) => *store.lands().write() = loaded,
                    Err(e) => {
                        web_sys::console::error_1(&format!("[App] Lands failed: {e}").into())
                    }
                }
            });
            spawn_local(async move {
                match api::list_task_kinds().await {
                    Ok(loaded) => *store.task_kinds().write() = loaded,
                    Err(e) => {
                        web_sys::console::error_1(&format!("[App] Task catalog failed: {e}").into())
                    }
                }
            });
        }
        if page == "installments" {
            spawn_local(async move {
                match api::list_clients().await {
                    Ok(loaded) => *store.clients().write() = loaded,
                    Err(e) => {
                        web_sys::console::error_1(&format!("[App] Clients failed: {e}").into())
                    }
                }
            });
        }
        if page == "clients" {
            spawn_local(async move {
                match api::list_lands().await {
                    Ok(loaded) => *store.lands().write() = loaded,
                    Err(e) => {
                        web_sys::console::error_1(&format!("[App] Lands failed: {e}").into())
                    }
                }
            });
        }
    });

    view! {
        <div class="app-shell">
            <ToastStack />
            {match page.as_str() {
                "tasks" => view! { <TaskBoard /> }.into_any(),
                "land-tasks" => view! { <LandTasksPanel /> }.into_any(),
                "installments" => view! { <InstallmentTable /> }.into_any(),
                "clients" => view! { <ClientManager /> }.into_any(),
                "locations" => view! { <LocationManager /> }.into_any(),
                other => view! {
                    <div class="unknown-page">
                        {format!("No controller for page \"{other}\"")}
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
