//! Task Board Component
//!
//! The admin view over all assigned tasks. Loads one bulk snapshot and
//! filters/paginates it locally; when the snapshot fetch fails the board
//! degrades to per-page server requests with the same filter parameters.
//! Every async reply is checked against a generation counter so a stale
//! response can never paint over a newer one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::{apply_filters, paginate, FilterState, Page, PageCursor, SEARCH_KEY};

use crate::api;
use crate::components::{Pagination, ReassignDialog, ReviewDialog, SearchBox, TaskRow};
use crate::context::AppContext;
use crate::csv;
use crate::format::{browser_today, format_date};
use crate::models::AssignedTask;
use crate::status::{reassign_note, reject_note, Review, TaskStatus};
use crate::store::{
    store_remove_task, store_set_task_employee, store_set_task_status, use_app_store,
    AppStateStoreFields,
};

const PAGE_SIZE: usize = 10;

/// Column headers shared by the table and its CSV export.
pub fn board_columns() -> Vec<String> {
    ["Task", "Employee", "Land", "Status", "Assigned", "Completed", "Notes"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// One CSV row, formatted exactly as the table cells render it.
pub fn board_row(task: &AssignedTask) -> Vec<String> {
    vec![
        task.task.clone(),
        task.employee.clone(),
        task.land.clone(),
        task.status.label().to_string(),
        format_date(&task.assigned_date),
        task.completed_date
            .as_deref()
            .map(format_date)
            .unwrap_or_default(),
        task.admin_notes.clone().unwrap_or_default(),
    ]
}

#[component]
pub fn TaskBoard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let role = ctx.role;

    let (filters, set_filters) = signal(FilterState::new());
    let (cursor, set_cursor) = signal(PageCursor::new(PAGE_SIZE));
    let (loading, set_loading) = signal(false);
    // Fallback mode: snapshot unavailable, pages come from the server.
    let (remote, set_remote) = signal(false);
    let (remote_page, set_remote_page) = signal(Page::<AssignedTask> {
        items: Vec::new(),
        page: 1,
        total_pages: 0,
        total: 0,
    });
    let (reviewing, set_reviewing) = signal(Option::<AssignedTask>::None);
    let (reassigning, set_reassigning) = signal(Option::<AssignedTask>::None);

    let snapshot_seq = StoredValue::new(0u32);
    let page_seq = StoredValue::new(0u32);

    // Bulk snapshot load, on mount and after every reload().
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let mine = snapshot_seq.with_value(|v| v + 1);
        snapshot_seq.set_value(mine);
        set_loading.set(true);
        spawn_local(async move {
            match api::assigned_snapshot().await {
                Ok(rows) => {
                    if snapshot_seq.get_value() == mine {
                        web_sys::console::log_1(
                            &format!("[TaskBoard] Loaded {} tasks", rows.len()).into(),
                        );
                        *store.tasks().write() = rows;
                        set_remote.set(false);
                    } else {
                        web_sys::console::log_1(&"[TaskBoard] Discarded stale snapshot".into());
                    }
                }
                Err(e) => {
                    if snapshot_seq.get_value() == mine {
                        web_sys::console::error_1(
                            &format!("[TaskBoard] Snapshot failed, using server paging: {e}")
                                .into(),
                        );
                        ctx.notify_error(format!("Could not load all tasks: {e}"));
                        set_remote.set(true);
                    }
                }
            }
            if snapshot_seq.get_value() == mine {
                set_loading.set(false);
            }
        });
    });

    // Server-side page fetch, only in fallback mode.
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if !remote.get() {
            return;
        }
        let filters_now = filters.get();
        let cursor_now = cursor.get();
        let mine = page_seq.with_value(|v| v + 1);
        page_seq.set_value(mine);
        set_loading.set(true);
        spawn_local(async move {
            match api::assigned_page(&filters_now, cursor_now.page, cursor_now.page_size).await {
                Ok((records, total)) => {
                    if page_seq.get_value() == mine {
                        let total = total as usize;
                        set_remote_page.set(Page {
                            items: records,
                            page: cursor_now.page,
                            total_pages: cursor_now.total_pages(total),
                            total,
                        });
                    } else {
                        web_sys::console::log_1(&"[TaskBoard] Discarded stale page".into());
                    }
                }
                Err(e) => {
                    if page_seq.get_value() == mine {
                        web_sys::console::error_1(&format!("[TaskBoard] Page fetch: {e}").into());
                        ctx.notify_error(e);
                    }
                }
            }
            if page_seq.get_value() == mine {
                set_loading.set(false);
            }
        });
    });

    // The page actually rendered, from either source.
    let visible = Memo::new(move |_| {
        if remote.get() {
            remote_page.get()
        } else {
            let rows = store.tasks().get();
            let filtered = apply_filters(&rows, &filters.get());
            let c = cursor.get();
            paginate(&filtered, c.page, c.page_size)
        }
    });

    let set_filter = move |key: &'static str, value: String| {
        set_filters.update(|f| f.set(key, value));
        // Local paging clamps by itself; the server cannot, so start over.
        if remote.get_untracked() {
            set_cursor.update(|c| c.page = 1);
        }
    };

    let clear_filters = move |_| {
        set_filters.update(|f| f.clear());
        set_cursor.update(|c| c.page = 1);
    };

    let select_page = move |page: usize| {
        set_cursor.update(|c| c.page = page);
    };

    let export_csv = move |_| {
        let rows = visible.get_untracked().items;
        let data: Vec<Vec<String>> = rows.iter().map(board_row).collect();
        let filename = format!("assigned-tasks-{}.csv", browser_today().format("%Y-%m-%d"));
        csv::download(&filename, &csv::to_csv(&board_columns(), &data));
    };

    // Review dialog outcome. Approval completes the task; rejection sends it
    // back with a tagged note.
    let on_review_decide = move |(review, note): (Review, String)| {
        let Some(task) = reviewing.get_untracked() else {
            return;
        };
        set_reviewing.set(None);
        let id = task.id;
        spawn_local(async move {
            let result = match review {
                Review::Approve => api::approve_assigned(id, &note).await,
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
                    if remote.get_untracked() {
                        ctx.reload();
                    }
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
            match api::reassign_assigned(task.id, employee_id, &note).await {
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
                    if remote.get_untracked() {
                        ctx.reload();
                    }
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let on_mark_complete = move |id: u32| {
        spawn_local(async move {
            match api::complete_assigned(id).await {
                Ok(message) => {
                    store_set_task_status(&store, id, TaskStatus::Complete, None);
                    ctx.notify_success(message);
                    if remote.get_untracked() {
                        ctx.reload();
                    }
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let on_delete = move |id: u32| {
        spawn_local(async move {
            match api::delete_assigned(id).await {
                Ok(message) => {
                    store_remove_task(&store, id);
                    ctx.notify_success(message);
                    if remote.get_untracked() {
                        ctx.reload();
                    }
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
        <section class="task-board">
            <header class="board-header">
                <h2>"Assigned Tasks"</h2>
                <span class="result-count">
                    {move || format!("{} results", visible.get().total)}
                </span>
            </header>

            <div class="filter-bar">
                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("status").unwrap_or_default().to_string()
                    on:change=move |ev| set_filter("status", event_target_value(&ev))
                >
                    <option value="">"All Statuses"</option>
                    {TaskStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>

                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("task").unwrap_or_default().to_string()
                    on:change=move |ev| set_filter("task", event_target_value(&ev))
                >
                    <option value="">"All Tasks"</option>
                    <For
                        each=move || store.task_kinds().get()
                        key=|kind| kind.id
                        children=move |kind| {
                            view! { <option value=kind.id.to_string()>{kind.name.clone()}</option> }
                        }
                    />
                </select>

                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("employee").unwrap_or_default().to_string()
                    on:change=move |ev| set_filter("employee", event_target_value(&ev))
                >
                    <option value="">"All Employees"</option>
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

                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("land").unwrap_or_default().to_string()
                    on:change=move |ev| set_filter("land", event_target_value(&ev))
                >
                    <option value="">"All Lands"</option>
                    <For
                        each=move || store.lands().get()
                        key=|land| land.id
                        children=move |land| {
                            view! { <option value=land.id.to_string()>{land.label()}</option> }
                        }
                    />
                </select>

                <SearchBox
                    value=search_value
                    on_commit=move |text: String| set_filter(SEARCH_KEY, text)
                    placeholder="Search task, employee, land…"
                />

                <button class="btn btn-plain" on:click=clear_filters>"Clear Filters"</button>
                <button class="btn btn-plain" on:click=export_csv>"Export CSV"</button>
            </div>

            <Show when=move || loading.get()>
                <div class="loading">"Loading…"</div>
            </Show>

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
                    <Show when=move || visible.get().items.is_empty() && !loading.get()>
                        <tr class="placeholder-row">
                            <td colspan="6">"No tasks match the current filters"</td>
                        </tr>
                    </Show>
                    <For
                        each=move || visible.get().items
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

            <Pagination
                current=Signal::derive(move || visible.get().page)
                total_pages=Signal::derive(move || visible.get().total_pages)
                on_select=select_page
            />

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

#[cfg(test)]
mod tests {
    use super::{board_columns, board_row};
    use crate::csv::to_csv;
    use crate::models::AssignedTask;
    use crate::status::TaskStatus;

    fn make_task() -> AssignedTask {
        AssignedTask {
            id: 42,
            task_id: 3,
            task: "Boundary marking".into(),
            employee_id: 7,
            employee: "Asha Pawar".into(),
            land_id: 21,
            land: "Survey 128/2 \u{b7} Kharadi".into(),
            status: TaskStatus::PendingApproval,
            assigned_date: "2024-03-05".into(),
            completed_date: None,
            admin_notes: Some("recheck west edge, then approve".into()),
        }
    }

    #[test]
    fn export_rows_match_the_header_width() {
        assert_eq!(board_row(&make_task()).len(), board_columns().len());
    }

    #[test]
    fn export_uses_display_formatting() {
        let row = board_row(&make_task());
        assert_eq!(row[3], "Pending Approval");
        assert_eq!(row[4], "05 Mar 2024");
        assert_eq!(row[5], "");
    }

    #[test]
    fn notes_with_commas_stay_one_field() {
        let rows = vec![board_row(&make_task())];
        let text = to_csv(&board_columns(), &rows);
        assert!(text.contains("\"recheck west edge, then approve\""));
        assert_eq!(text.lines().count(), 2);
    }
}
