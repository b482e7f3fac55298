//! Status Badge Components
//!
//! Colored pills for task and installment statuses.

use leptos::prelude::*;

use crate::status::{InstallmentStatus, TaskStatus};

#[component]
pub fn StatusBadge(status: TaskStatus) -> impl IntoView {
    view! { <span class=status.badge_class()>{status.label()}</span> }
}

#[component]
pub fn PaymentBadge(status: InstallmentStatus) -> impl IntoView {
    view! { <span class=status.badge_class()>{status.label()}</span> }
}
