//! Add Task Form Component
//!
//! Assigns a catalog task on the selected land to one or more employees.
//! Picked employees collect into a chip row; submitting posts them all in
//! one request.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AddTaskForm(#[prop(into)] land_id: Signal<Option<u32>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (task_kind, set_task_kind) = signal(String::new());
    let (picked, set_picked) = signal(Vec::<u32>::new());
    let (error, set_error) = signal(Option::<String>::None);

    let pick_employee = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        if let Ok(id) = value.parse::<u32>() {
            set_picked.update(|list| {
                if !list.contains(&id) {
                    list.push(id);
                }
            });
            set_error.set(None);
        }
        // Snap back to the placeholder so the same name can be re-picked.
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                select.set_value("");
            }
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(land) = land_id.get() else {
            set_error.set(Some("Choose a land first".to_string()));
            return;
        };
        let Ok(kind) = task_kind.get().parse::<u32>() else {
            set_error.set(Some("Choose a task".to_string()));
            return;
        };
        let employees = picked.get();
        if employees.is_empty() {
            set_error.set(Some("Pick at least one employee".to_string()));
            return;
        }
        spawn_local(async move {
            match api::add_task(land, kind, &employees).await {
                Ok(message) => {
                    set_task_kind.set(String::new());
                    set_picked.set(Vec::new());
                    ctx.notify_success(message);
                    ctx.reload();
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    // Chip labels need the employee names.
    let picked_employees = Memo::new(move |_| {
        let catalog = store.employees().get();
        picked
            .get()
            .into_iter()
            .filter_map(|id| catalog.iter().find(|e| e.id == id).cloned())
            .collect::<Vec<_>>()
    });

    view! {
        <form class="add-task-form" on:submit=submit>
            <div class="add-task-row">
                <select
                    class="task-kind-select"
                    disabled=move || land_id.get().is_none()
                    prop:value=move || task_kind.get()
                    on:change=move |ev| {
                        set_task_kind.set(event_target_value(&ev));
                        set_error.set(None);
                    }
                >
                    <option value="">"Choose a task…"</option>
                    <For
                        each=move || store.task_kinds().get()
                        key=|kind| kind.id
                        children=move |kind| {
                            view! { <option value=kind.id.to_string()>{kind.name.clone()}</option> }
                        }
                    />
                </select>

                <select
                    class="employee-select"
                    disabled=move || land_id.get().is_none()
                    on:change=pick_employee
                >
                    <option value="">"Add employee…"</option>
                    <For
                        each=move || store.employees().get()
                        key=|employee| employee.id
                        children=move |employee| {
                            view! {
                                <option value=employee.id.to_string()>{employee.name.clone()}</option>
                            }
                        }
                    />
                </select>

                <button type="submit" disabled=move || land_id.get().is_none()>
                    "Assign"
                </button>
            </div>

            <div class="picked-employees">
                <For
                    each=move || picked_employees.get()
                    key=|employee| employee.id
                    children=move |employee| {
                        let id = employee.id;
                        view! {
                            <span class="employee-chip">
                                {employee.name.clone()}
                                <button
                                    type="button"
                                    class="chip-remove"
                                    on:click=move |_| {
                                        set_picked.update(|list| list.retain(|e| *e != id))
                                    }
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    }
                />
            </div>

            {move || error.get().map(|message| view! {
                <div class="field-error">{message}</div>
            })}
        </form>
    }
}
