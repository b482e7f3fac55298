//! Land Tasks Panel
//!
//! Tasks scoped to one land parcel: pick a land, see its tasks, assign new
//! ones, and run the review transitions. The task list is small enough to
//! filter without paging. Switching lands quickly is safe; stale fetches
//! are discarded by a generation counter.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::{apply_filters, FilterState, SEARCH_KEY};

use crate::api;
use crate::components::{AddTaskForm, ReassignDialog, ReviewDialog, SearchBox, TaskRow};
use crate::context::AppContext;
use crate::models::AssignedTask;
use crate::status::{reassign_note, reject_note, Review, TaskStatus};
use crate::store::{
    store_remove_task, store_set_task_employee, store_set_task_status, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn LandTasksPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let role = ctx.role;

    let (selected_land, set_selected_land) = signal(Option::<u32>::None);
    let (filters, set_filters) = signal(FilterState::new());
    let (loading, set_loading) = signal(false);
    let (reviewing, set_reviewing) = signal(Option::<AssignedTask>::None);
    let (reassigning, set_reassigning) = signal(Option::<AssignedTask>::None);

    let load_seq = StoredValue::new(0u32);

    // Reload tasks when the land changes or a mutation asks for a refresh.
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let land = selected_land.get();
        let mine = load_seq.with_value(|v| v + 1);
        load_seq.set_value(mine);

        let Some(land_id) = land else {
            *store.tasks().write() = Vec::new();
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::land_tasks(land_id).await {
                Ok(rows) => {
                    if load_seq.get_value() == mine {
                        web_sys::console::log_1(
                            &format!("[LandTasks] Loaded {} tasks for land {land_id}", rows.len())
                                .into(),
                        );
                        *store.tasks().write() = rows;
                    } else {
                        web_sys::console::log_1(&"[LandTasks] Discarded stale task list".into());
                    }
                }
                Err(e) => {
                    if load_seq.get_value() == mine {
                        web_sys::console::error_1(&format!("[LandTasks] Load failed: {e}").into());
                        ctx.notify_error(format!("Could not load tasks: {e}"));
                    }
                }
            }
            if load_seq.get_value() == mine {
                set_loading.set(false);
            }
        });
    });

    let filtered = Memo::new(move |_| {
        let rows = store.tasks().get();
        apply_filters(&rows, &filters.get())
    });

    let on_review_decide = move |(review, note): (Review, String)| {
        let Some(task) = reviewing.get_untracked() else {
            return;
        };
        set_reviewing.set(None);
        let id = task.id;
        spawn_local(async move {
            let result = match review {
                Review::Approve => api::approve_completion(id, &note).await,
                Review::Reject => api::reject_completion(id, &note).await,
            };
            match result {
                Ok(message) => {
                    match review {
                        Review::Approve => store_set_task_status(
                            &store,
                            id,
                            TaskStatus::Complete,
                            (!note.is_empty()).then(|| note.clone()),
                        ),
                        Review::Reject => store_set_task_status(
                            &store,
                            id,
                            TaskStatus::InProgress,
                            Some(reject_note(&note)),
                        ),
                    }
                    ctx.notify_success(message);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let on_reassign_submit = move |(employee_id, note): (u32, String)| {
        let Some(task) = reassigning.get_untracked() else {
            return;
        };
        set_reassigning.set(None);
        let employee = store
            .employees()
            .get_untracked()
            .into_iter()
            .find(|e| e.id == employee_id);
        spawn_local(async move {
            match api::reassign_task(task.id, employee_id, &note).await {
                Ok(message) => {
                    store_set_task_status(
                        &store,
                        task.id,
                        TaskStatus::InProgress,
                        Some(reassign_note(&note)),
                    );
                    if let Some(employee) = employee {
                        store_set_task_employee(&store, task.id, employee.id, employee.name);
                    }
                    ctx.notify_success(message);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let on_mark_complete = move |id: u32| {
        spawn_local(async move {
            match api::complete_task(id).await {
                Ok(message) => {
                    store_set_task_status(&store, id, TaskStatus::Complete, None);
                    ctx.notify_success(message);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let on_delete = move |id: u32| {
        spawn_local(async move {
            match api::delete_task(id).await {
                Ok(message) => {
                    store_remove_task(&store, id);
                    ctx.notify_success(message);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let search_value = Signal::derive(move || {
        filters
            .get()
            .get(SEARCH_KEY)
            .unwrap_or_default()
            .to_string()
    });

    view! {
        <section class="land-tasks">
            <header class="board-header">
                <h2>"Land Tasks"</h2>
                <select
                    class="land-select"
                    prop:value=move || {
                        selected_land.get().map(|id| id.to_string()).unwrap_or_default()
                    }
                    on:change=move |ev| {
                        set_selected_land.set(event_target_value(&ev).parse().ok());
                        set_filters.update(|f| f.clear());
                    }
                >
                    <option value="">"Choose a land…"</option>
                    <For
                        each=move || store.lands().get()
                        key=|land| land.id
                        children=move |land| {
                            view! { <option value=land.id.to_string()>{land.label()}</option> }
                        }
                    />
                </select>
            </header>

            <AddTaskForm land_id=selected_land />

            <div class="filter-bar">
                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("status").unwrap_or_default().to_string()
                    on:change=move |ev| {
                        set_filters.update(|f| f.set("status", event_target_value(&ev)))
                    }
                >
                    <option value="">"All Statuses"</option>
                    {TaskStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>
                <SearchBox
                    value=search_value
                    on_commit=move |text: String| {
                        set_filters.update(|f| f.set(SEARCH_KEY, text))
                    }
                    placeholder="Search task or employee…"
                />
                <span class="result-count">
                    {move || format!("{} tasks", filtered.get().len())}
                </span>
            </div>

            <Show when=move || loading.get()>
                <div class="loading">"Loading…"</div>
            </Show>

            <Show when=move || selected_land.get().is_none()>
                <div class="placeholder">"Choose a land to see its tasks"</div>
            </Show>

            <Show when=move || selected_land.get().is_some()>
                <table class="record-table">
                    <thead>
                        <tr>
                            <th>"Task"</th>
                            <th>"Employee"</th>
                            <th>"Land"</th>
                            <th>"Status"</th>
                            <th>"Assigned"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || filtered.get().is_empty() && !loading.get()>
                            <tr class="placeholder-row">
                                <td colspan="6">"No tasks on this land yet"</td>
                            </tr>
                        </Show>
                        <For
                            each=move || filtered.get()
                            key=|task| (task.id, task.status)
                            children=move |task| {
                                view! {
                                    <TaskRow
                                        task=task
                                        role=role
                                        on_review=move |t| set_reviewing.set(Some(t))
                                        on_reassign=move |t| set_reassigning.set(Some(t))
                                        on_mark_complete=on_mark_complete
                                        on_delete=on_delete
                                    />
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            {move || reviewing.get().map(|task| view! {
                <ReviewDialog
                    task=task
                    on_close=move |_| set_reviewing.set(None)
                    on_decide=on_review_decide
                />
            })}

            {move || reassigning.get().map(|task| view! {
                <ReassignDialog
                    task=task
                    employees=Signal::derive(move || store.employees().get())
                    on_close=move |_| set_reassigning.set(None)
                    on_submit=on_reassign_submit
                />
            })}
        </section>
    }
}
