//! Task Status Domain
//!
//! The task lifecycle, the per-role action sets, and the note tagging used
//! when a reviewed task lands back in progress.

use serde::{Deserialize, Serialize};

/// Lifecycle of an assigned task.
///
/// `pending -> in_progress -> pending_approval -> complete`, with rejection
/// and reassignment folding a task back to `in_progress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    PendingApproval,
    Complete,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::PendingApproval,
        TaskStatus::Complete,
    ];

    /// Wire value, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::PendingApproval => "pending_approval",
            TaskStatus::Complete => "complete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::PendingApproval => "Pending Approval",
            TaskStatus::Complete => "Complete",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "badge badge-pending",
            TaskStatus::InProgress => "badge badge-progress",
            TaskStatus::PendingApproval => "badge badge-review",
            TaskStatus::Complete => "badge badge-complete",
        }
    }

    /// Staff submitting their work for review.
    pub fn after_submission(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending | TaskStatus::InProgress => Some(TaskStatus::PendingApproval),
            _ => None,
        }
    }

    /// Admin review outcome for a task awaiting approval.
    pub fn after_review(self, review: Review) -> Option<TaskStatus> {
        match (self, review) {
            (TaskStatus::PendingApproval, Review::Approve) => Some(TaskStatus::Complete),
            (TaskStatus::PendingApproval, Review::Reject) => Some(TaskStatus::InProgress),
            _ => None,
        }
    }

    /// Handing a task under review to a different employee.
    pub fn after_reassign(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::PendingApproval => Some(TaskStatus::InProgress),
            _ => None,
        }
    }

    /// Admin shortcut skipping the review step.
    pub fn after_mark_complete(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending | TaskStatus::InProgress => Some(TaskStatus::Complete),
            _ => None,
        }
    }

    pub fn deletable(self) -> bool {
        self != TaskStatus::Complete
    }
}

/// Lifecycle of a payment installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Pending,
    Paid,
    Overdue,
}

impl InstallmentStatus {
    pub const ALL: [InstallmentStatus; 3] = [
        InstallmentStatus::Pending,
        InstallmentStatus::Paid,
        InstallmentStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "pending",
            InstallmentStatus::Paid => "paid",
            InstallmentStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "Pending",
            InstallmentStatus::Paid => "Paid",
            InstallmentStatus::Overdue => "Overdue",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "badge badge-pending",
            InstallmentStatus::Paid => "badge badge-complete",
            InstallmentStatus::Overdue => "badge badge-overdue",
        }
    }
}

/// Viewer role, read from the server-rendered shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn from_attr(value: &str) -> Role {
        if value.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Staff
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// Outcome of the review dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Review {
    Approve,
    Reject,
}

/// Row-level action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    View,
    Approve,
    Reassign,
    MarkComplete,
    Delete,
}

impl TaskAction {
    pub fn label(&self) -> &'static str {
        match self {
            TaskAction::View => "View",
            TaskAction::Approve => "Approve",
            TaskAction::Reassign => "Reassign",
            TaskAction::MarkComplete => "Mark Complete",
            TaskAction::Delete => "Delete",
        }
    }
}

/// Buttons rendered for a task row, by status and viewer role.
///
/// Staff see the read-only subset. Rejection is not a row button; it lives
/// inside the review dialog opened by `Approve`.
pub fn actions_for(status: TaskStatus, role: Role) -> Vec<TaskAction> {
    use TaskAction::*;
    if !role.is_admin() {
        return vec![View];
    }
    match status {
        TaskStatus::Pending | TaskStatus::InProgress => vec![View, MarkComplete, Delete],
        TaskStatus::PendingApproval => vec![View, Approve, Reassign],
        TaskStatus::Complete => vec![View],
    }
}

/// Notes written back by a review or reassignment carry a prefix so the two
/// cases stay distinguishable once the task is `in_progress` again.
pub fn reject_note(note: &str) -> String {
    format!("Rejected: {note}")
}

pub fn reassign_note(note: &str) -> String {
    format!("Reassigned: {note}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_moves_open_work_to_review() {
        assert_eq!(
            TaskStatus::Pending.after_submission(),
            Some(TaskStatus::PendingApproval)
        );
        assert_eq!(
            TaskStatus::InProgress.after_submission(),
            Some(TaskStatus::PendingApproval)
        );
        assert_eq!(TaskStatus::PendingApproval.after_submission(), None);
        assert_eq!(TaskStatus::Complete.after_submission(), None);
    }

    #[test]
    fn review_only_applies_to_tasks_awaiting_approval() {
        assert_eq!(
            TaskStatus::PendingApproval.after_review(Review::Approve),
            Some(TaskStatus::Complete)
        );
        assert_eq!(
            TaskStatus::PendingApproval.after_review(Review::Reject),
            Some(TaskStatus::InProgress)
        );
        assert_eq!(TaskStatus::Pending.after_review(Review::Approve), None);
        assert_eq!(TaskStatus::Complete.after_review(Review::Reject), None);
    }

    #[test]
    fn reassignment_reopens_the_task() {
        assert_eq!(
            TaskStatus::PendingApproval.after_reassign(),
            Some(TaskStatus::InProgress)
        );
        assert_eq!(TaskStatus::InProgress.after_reassign(), None);
    }

    #[test]
    fn mark_complete_skips_review() {
        assert_eq!(
            TaskStatus::Pending.after_mark_complete(),
            Some(TaskStatus::Complete)
        );
        assert_eq!(
            TaskStatus::InProgress.after_mark_complete(),
            Some(TaskStatus::Complete)
        );
        assert_eq!(TaskStatus::PendingApproval.after_mark_complete(), None);
        assert_eq!(TaskStatus::Complete.after_mark_complete(), None);
    }

    #[test]
    fn completed_tasks_cannot_be_deleted() {
        assert!(TaskStatus::Pending.deletable());
        assert!(TaskStatus::PendingApproval.deletable());
        assert!(!TaskStatus::Complete.deletable());
    }

    #[test]
    fn admin_buttons_follow_the_status() {
        use TaskAction::*;
        assert_eq!(
            actions_for(TaskStatus::Pending, Role::Admin),
            vec![View, MarkComplete, Delete]
        );
        assert_eq!(
            actions_for(TaskStatus::InProgress, Role::Admin),
            vec![View, MarkComplete, Delete]
        );
        assert_eq!(
            actions_for(TaskStatus::PendingApproval, Role::Admin),
            vec![View, Approve, Reassign]
        );
        assert_eq!(actions_for(TaskStatus::Complete, Role::Admin), vec![View]);
    }

    #[test]
    fn staff_only_ever_view() {
        for status in TaskStatus::ALL {
            assert_eq!(actions_for(status, Role::Staff), vec![TaskAction::View]);
        }
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&TaskStatus::PendingApproval).unwrap();
        assert_eq!(json, r#""pending_approval""#);
        let back: TaskStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    #[test]
    fn review_notes_stay_distinguishable() {
        let rejected = reject_note("survey map missing");
        let reassigned = reassign_note("survey map missing");
        assert_ne!(rejected, reassigned);
        assert!(rejected.starts_with("Rejected: "));
        assert!(reassigned.starts_with("Reassigned: "));
    }

    #[test]
    fn unknown_role_attribute_defaults_to_staff() {
        assert_eq!(Role::from_attr("admin"), Role::Admin);
        assert_eq!(Role::from_attr("ADMIN"), Role::Admin);
        assert_eq!(Role::from_attr("staff"), Role::Staff);
        assert_eq!(Role::from_attr(""), Role::Staff);
    }
}
