//! Assigned Task Board Endpoints
//!
//! The admin board loads one bulk snapshot and filters it locally. When the
//! snapshot cannot be fetched the board falls back to per-page server
//! requests, which is what the filter parameters here are for.

use listing_core::FilterState;

use super::{encode_query, get_list, get_page, post_action};
use crate::models::AssignedTask;

/// Page size for the bulk snapshot request. Large enough that a single
/// page covers the whole working set.
pub const SNAPSHOT_PAGE_SIZE: usize = 500;

/// Fetch the full working set in one request.
pub async fn assigned_snapshot() -> Result<Vec<AssignedTask>, String> {
    let query = encode_query(&[
        ("page", "1".to_string()),
        ("page_size", SNAPSHOT_PAGE_SIZE.to_string()),
    ]);
    get_list(&format!("/api/admin/assigned-tasks/?{query}")).await
}

/// Fetch one server-side page honoring the active filters. Used only in
/// fallback mode.
pub async fn assigned_page(
    filters: &FilterState,
    page: usize,
    page_size: usize,
) -> Result<(Vec<AssignedTask>, u64), String> {
    let mut pairs = vec![
        ("page", page.to_string()),
        ("page_size", page_size.to_string()),
    ];
    for (key, value) in filters.active() {
        pairs.push((key, value.to_string()));
    }
    let query = encode_query(&pairs);
    let (records, count) = get_page(&format!("/api/admin/assigned-tasks/?{query}")).await?;
    let total = count.unwrap_or(records.len() as u64);
    Ok((records, total))
}

pub async fn approve_assigned(id: u32, notes: &str) -> Result<String, String> {
    post_action(
        &format!("/api/admin/assigned-tasks/{id}/approve/"),
        &[("admin_notes", notes.to_string())],
    )
    .await
}

pub async fn reassign_assigned(id: u32, employee_id: u32, notes: &str) -> Result<String, String> {
    post_action(
        &format!("/api/admin/assigned-tasks/{id}/reassign/"),
        &[
            ("employee", employee_id.to_string()),
            ("admin_notes", notes.to_string()),
        ],
    )
    .await
}

pub async fn complete_assigned(id: u32) -> Result<String, String> {
    post_action(&format!("/api/admin/assigned-tasks/{id}/mark-complete/"), &[]).await
}

pub async fn delete_assigned(id: u32) -> Result<String, String> {
    post_action(&format!("/api/admin/assigned-tasks/{id}/delete/"), &[]).await
}
