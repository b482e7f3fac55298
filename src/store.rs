//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{AssignedTask, Client, Employee, Installment, Land, TaskKind};
use crate::status::{InstallmentStatus, TaskStatus};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Task rows for the mounted page (board or land panel)
    pub tasks: Vec<AssignedTask>,
    /// Installment rows
    pub installments: Vec<Installment>,
    /// Client rows
    pub clients: Vec<Client>,
    /// Employee catalog for selects
    pub employees: Vec<Employee>,
    /// Land catalog for selects
    pub lands: Vec<Land>,
    /// Task catalog for the assignment form
    pub task_kinds: Vec<TaskKind>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Set a task's status, optionally appending a note to its admin notes.
pub fn store_set_task_status(store: &AppStore, id: u32, status: TaskStatus, note: Option<String>) {
    if let Some(task) = store.tasks().write().iter_mut().find(|t| t.id == id) {
        task.status = status;
        if let Some(note) = note.filter(|n| !n.is_empty()) {
            task.admin_notes = Some(match task.admin_notes.take() {
                Some(existing) => format!("{existing}\n{note}"),
                None => note,
            });
        }
    }
}

/// Point a task at a different employee.
pub fn store_set_task_employee(store: &AppStore, id: u32, employee_id: u32, employee: String) {
    if let Some(task) = store.tasks().write().iter_mut().find(|t| t.id == id) {
        task.employee_id = employee_id;
        task.employee = employee;
    }
}

/// Remove a task from the store by ID
pub fn store_remove_task(store: &AppStore, id: u32) {
    store.tasks().write().retain(|t| t.id != id);
}

/// Flag an installment paid as of `paid_date`.
pub fn store_mark_installment_paid(store: &AppStore, id: u32, paid_date: String) {
    if let Some(row) = store.installments().write().iter_mut().find(|i| i.id == id) {
        row.status = InstallmentStatus::Paid;
        row.paid_date = Some(paid_date);
    }
}

/// Remove a client from the store by ID
pub fn store_remove_client(store: &AppStore, id: u32) {
    store.clients().write().retain(|c| c.id != id);
}
