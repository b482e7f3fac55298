//! Review and Reassign Dialogs
//!
//! Modal dialogs for the two admin decisions that carry a note. The review
//! dialog resolves a task awaiting approval either way; rejection requires
//! a note, approval does not. The reassign dialog picks a new employee and
//! always requires a note.

use leptos::prelude::*;

use crate::models::{AssignedTask, Employee};
use crate::status::Review;

#[component]
pub fn ReviewDialog(
    task: AssignedTask,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_decide: Callback<(Review, String)>,
) -> impl IntoView {
    let (note, set_note) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);

    let summary = format!("{} — {} ({})", task.task, task.employee, task.land);

    let decide = move |review: Review| {
        let text = note.get().trim().to_string();
        if review == Review::Reject && text.is_empty() {
            set_error.set(Some("A note is required to reject".to_string()));
            return;
        }
        on_decide.run((review, text));
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal review-modal" on:click=|ev| ev.stop_propagation()>
                <h3>"Review Completion"</h3>
                <p class="modal-summary">{summary}</p>
                <label class="modal-label">"Admin notes"</label>
                <textarea
                    class="modal-note"
                    placeholder="Optional for approval, required for rejection"
                    prop:value=move || note.get()
                    on:input=move |ev| {
                        set_note.set(event_target_value(&ev));
                        set_error.set(None);
                    }
                ></textarea>
                {move || error.get().map(|message| view! {
                    <div class="field-error">{message}</div>
                })}
                <div class="modal-actions">
                    <button class="btn btn-approve" on:click=move |_| decide(Review::Approve)>
                        "Approve"
                    </button>
                    <button class="btn btn-reject" on:click=move |_| decide(Review::Reject)>
                        "Reject"
                    </button>
                    <button class="btn btn-plain" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ReassignDialog(
    task: AssignedTask,
    #[prop(into)] employees: Signal<Vec<Employee>>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_submit: Callback<(u32, String)>,
) -> impl IntoView {
    let (selected, set_selected) = signal(String::new());
    let (note, set_note) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);

    let summary = format!("{} — currently {}", task.task, task.employee);
    let current_employee = task.employee_id;

    let submit = move |_| {
        let Ok(employee_id) = selected.get().parse::<u32>() else {
            set_error.set(Some("Choose an employee".to_string()));
            return;
        };
        let text = note.get().trim().to_string();
        if text.is_empty() {
            set_error.set(Some("A note is required to reassign".to_string()));
            return;
        }
        on_submit.run((employee_id, text));
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal reassign-modal" on:click=|ev| ev.stop_propagation()>
                <h3>"Reassign Task"</h3>
                <p class="modal-summary">{summary}</p>
                <label class="modal-label">"New employee"</label>
                <select
                    class="modal-select"
                    prop:value=move || selected.get()
                    on:change=move |ev| {
                        set_selected.set(event_target_value(&ev));
                        set_error.set(None);
                    }
                >
                    <option value="">"Choose an employee…"</option>
                    <For
                        each=move || {
                            employees
                                .get()
                                .into_iter()
                                .filter(|e| e.id != current_employee)
                                .collect::<Vec<_>>()
                        }
                        key=|employee| employee.id
                        children=move |employee| {
                            view! {
                                <option value=employee.id.to_string()>{employee.name.clone()}</option>
                            }
                        }
                    />
                </select>
                <label class="modal-label">"Admin notes"</label>
                <textarea
                    class="modal-note"
                    placeholder="Why is this task changing hands?"
                    prop:value=move || note.get()
                    on:input=move |ev| {
                        set_note.set(event_target_value(&ev));
                        set_error.set(None);
                    }
                ></textarea>
                {move || error.get().map(|message| view! {
                    <div class="field-error">{message}</div>
                })}
                <div class="modal-actions">
                    <button class="btn btn-primary" on:click=submit>
                        "Reassign"
                    </button>
                    <button class="btn btn-plain" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                </div>
            </div>
        </div>
    }
}
