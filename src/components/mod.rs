//! UI Components
//!
//! Page controllers and the shared widgets they are built from.

mod add_task_form;
mod client_form;
mod client_manager;
mod confirm_button;
mod installment_table;
mod land_tasks;
mod location_manager;
mod location_select;
mod note_dialog;
mod pagination;
mod payment_dialog;
mod search_box;
mod status_badge;
mod task_board;
mod task_row;
mod toast_stack;

pub use add_task_form::AddTaskForm;
pub use client_form::ClientFormDialog;
pub use client_manager::ClientManager;
pub use confirm_button::ConfirmButton;
pub use installment_table::InstallmentTable;
pub use land_tasks::LandTasksPanel;
pub use location_manager::LocationManager;
pub use location_select::CascadingLocationSelect;
pub use note_dialog::{ReassignDialog, ReviewDialog};
pub use pagination::Pagination;
pub use payment_dialog::PaymentDialog;
pub use search_box::SearchBox;
pub use status_badge::{PaymentBadge, StatusBadge};
pub use task_board::TaskBoard;
pub use task_row::TaskRow;
pub use toast_stack::ToastStack;
