//! Task Row Component
//!
//! One table row of an assigned task, with the action buttons its status
//! and the viewer's role allow. Shared by the admin board and the land
//! panel; the parents decide what the callbacks actually do.

use leptos::prelude::*;

use crate::components::{ConfirmButton, StatusBadge};
use crate::format::format_date;
use crate::models::AssignedTask;
use crate::status::{actions_for, Role, TaskAction};

#[component]
pub fn TaskRow(
    task: AssignedTask,
    role: Role,
    #[prop(into)] on_review: Callback<AssignedTask>,
    #[prop(into)] on_reassign: Callback<AssignedTask>,
    #[prop(into)] on_mark_complete: Callback<u32>,
    #[prop(into)] on_delete: Callback<u32>,
) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let id = task.id;
    let actions = actions_for(task.status, role);

    let detail = task.clone();
    let buttons = actions
        .into_iter()
        .map(|action| {
            let task = task.clone();
            match action {
                TaskAction::View => view! {
                    <button
                        class="btn btn-plain"
                        on:click=move |_| set_expanded.update(|v| *v = !*v)
                    >
                        {move || if expanded.get() { "Hide" } else { "View" }}
                    </button>
                }
                .into_any(),
                TaskAction::Approve => view! {
                    <button class="btn btn-approve" on:click=move |_| on_review.run(task.clone())>
                        "Approve"
                    </button>
                }
                .into_any(),
                TaskAction::Reassign => view! {
                    <button class="btn btn-plain" on:click=move |_| on_reassign.run(task.clone())>
                        "Reassign"
                    </button>
                }
                .into_any(),
                TaskAction::MarkComplete => view! {
                    <ConfirmButton
                        button_class="btn btn-complete"
                        label="Mark Complete"
                        prompt="Mark complete?"
                        on_confirm=move |_| on_mark_complete.run(id)
                    />
                }
                .into_any(),
                TaskAction::Delete => view! {
                    <ConfirmButton
                        button_class="btn btn-danger"
                        label="Delete"
                        prompt="Delete?"
                        on_confirm=move |_| on_delete.run(id)
                    />
                }
                .into_any(),
            }
        })
        .collect_view();

    view! {
        <tr class="task-row">
            <td>{task.task.clone()}</td>
            <td>{task.employee.clone()}</td>
            <td>{task.land.clone()}</td>
            <td><StatusBadge status=task.status /></td>
            <td>{format_date(&task.assigned_date)}</td>
            <td class="row-actions">{buttons}</td>
        </tr>
        <Show when=move || expanded.get()>
            <tr class="task-detail-row">
                <td colspan="6">
                    <div class="task-detail">
                        <div>
                            <strong>"Completed: "</strong>
                            {detail
                                .completed_date
                                .clone()
                                .map(|d| format_date(&d))
                                .unwrap_or_else(|| "—".to_string())}
                        </div>
                        <div>
                            <strong>"Notes: "</strong>
                            {detail
                                .admin_notes
                                .clone()
                                .filter(|n| !n.is_empty())
                                .unwrap_or_else(|| "No notes yet".to_string())}
                        </div>
                    </div>
                </td>
            </tr>
        </Show>
    }
}
