//! Task Lifecycle Endpoints
//!
//! Per-land task listing, assignment, and the review transitions.

use super::{get_list, post_action};
use crate::models::AssignedTask;

pub async fn land_tasks(land_id: u32) -> Result<Vec<AssignedTask>, String> {
    get_list(&format!("/api/land/{land_id}/tasks/")).await
}

/// Assign a catalog task on a land to one or more employees.
pub async fn add_task(land_id: u32, task_id: u32, employee_ids: &[u32]) -> Result<String, String> {
    let mut fields = vec![
        ("land", land_id.to_string()),
        ("task", task_id.to_string()),
    ];
    for id in employee_ids {
        fields.push(("employees", id.to_string()));
    }
    post_action("/api/tasks/add/", &fields).await
}

pub async fn approve_completion(id: u32, notes: &str) -> Result<String, String> {
    post_action(
        &format!("/api/tasks/{id}/approve-completion/"),
        &[("admin_notes", notes.to_string())],
    )
    .await
}

pub async fn reject_completion(id: u32, notes: &str) -> Result<String, String> {
    post_action(
        &format!("/api/tasks/{id}/reject-completion/"),
        &[("admin_notes", notes.to_string())],
    )
    .await
}

pub async fn reassign_task(id: u32, employee_id: u32, notes: &str) -> Result<String, String> {
    post_action(
        &format!("/api/tasks/{id}/reassign/"),
        &[
            ("employee", employee_id.to_string()),
            ("admin_notes", notes.to_string()),
        ],
    )
    .await
}

pub async fn complete_task(id: u32) -> Result<String, String> {
    post_action(&format!("/api/tasks/{id}/mark-complete/"), &[]).await
}

pub async fn delete_task(id: u32) -> Result<String, String> {
    post_action(&format!("/api/tasks/{id}/delete/"), &[]).await
}
