//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

use crate::status::{InstallmentStatus, TaskStatus};
use listing_core::Filterable;

/// Employee data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Land parcel data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    pub id: u32,
    pub survey_no: String,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub area_sqft: Option<f64>,
}

impl Land {
    /// Display label used in selects and table cells.
    pub fn label(&self) -> String {
        match &self.village {
            Some(village) => format!("Survey {} \u{b7} {}", self.survey_no, village),
            None => format!("Survey {}", self.survey_no),
        }
    }
}

/// Task catalog entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskKind {
    pub id: u32,
    pub name: String,
}

/// Assigned task row as served by the task list endpoints.
///
/// Related names (task, employee, land) arrive denormalized so rows render
/// without extra lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedTask {
    pub id: u32,
    pub task_id: u32,
    pub task: String,
    pub employee_id: u32,
    pub employee: String,
    pub land_id: u32,
    pub land: String,
    pub status: TaskStatus,
    pub assigned_date: String,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl Filterable for AssignedTask {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "task" => Some(self.task_id.to_string()),
            "employee" => Some(self.employee_id.to_string()),
            "land" => Some(self.land_id.to_string()),
            _ => None,
        }
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.task, self.employee, self.land)
    }
}

/// Client data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub pan: String,
    pub aadhar: String,
    #[serde(default)]
    pub village_id: Option<u32>,
    #[serde(default)]
    pub village: Option<String>,
}

impl Filterable for Client {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "village" => self.village_id.map(|id| id.to_string()),
            _ => None,
        }
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.phone, self.pan)
    }
}

/// Installment row as served by the installment list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: u32,
    pub client_id: u32,
    pub client: String,
    pub land: String,
    pub label: String,
    pub amount: f64,
    #[serde(default)]
    pub percent: Option<f64>,
    pub due_date: String,
    #[serde(default)]
    pub paid_date: Option<String>,
    pub status: InstallmentStatus,
}

impl Filterable for Installment {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "client" => Some(self.client_id.to_string()),
            _ => None,
        }
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.client, self.land, self.label)
    }
}

/// Payment detail block fetched when a payment dialog opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub installment_id: u32,
    pub amount_due: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PaymentDetails {
    pub fn remaining(&self) -> f64 {
        (self.amount_due - self.amount_paid).max(0.0)
    }
}

/// District data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: u32,
    pub name: String,
}

/// Taluka data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taluka {
    pub id: u32,
    pub name: String,
    pub district_id: u32,
}

/// Village data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Village {
    pub id: u32,
    pub name: String,
    pub taluka_id: u32,
}

/// List endpoints reply either with a bare JSON array or with an envelope
/// (`success` plus a `data`/`results` array and an optional `count`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Envelope(ListEnvelope<T>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "default_true")]
    pub success: bool,
    // A path default keeps the derive from demanding `T: Default`.
    #[serde(default = "Vec::new", alias = "results")]
    pub data: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> ListPayload<T> {
    /// Records plus the server-side total when the envelope carried one.
    /// A `success: false` envelope yields no records.
    pub fn into_records(self) -> (Vec<T>, Option<u64>) {
        match self {
            ListPayload::Bare(records) => (records, None),
            ListPayload::Envelope(envelope) => {
                if envelope.success {
                    (envelope.data, envelope.count)
                } else {
                    (Vec::new(), None)
                }
            }
        }
    }
}

/// Mutation endpoints reply with a status flag and an optional message.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_parses_as_records() {
        let payload: ListPayload<Village> =
            serde_json::from_str(r#"[{"id": 1, "name": "Kharadi", "taluka_id": 4}]"#).unwrap();
        let (records, count) = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Kharadi");
        assert_eq!(count, None);
    }

    #[test]
    fn envelope_with_data_key_parses() {
        let payload: ListPayload<Village> = serde_json::from_str(
            r#"{"success": true, "data": [{"id": 2, "name": "Wagholi", "taluka_id": 4}], "count": 37}"#,
        )
        .unwrap();
        let (records, count) = payload.into_records();
        assert_eq!(records[0].id, 2);
        assert_eq!(count, Some(37));
    }

    #[test]
    fn envelope_accepts_results_alias() {
        let payload: ListPayload<Village> = serde_json::from_str(
            r#"{"results": [{"id": 3, "name": "Lohegaon", "taluka_id": 5}]}"#,
        )
        .unwrap();
        let (records, count) = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(count, None);
    }

    #[test]
    fn envelope_without_records_key_defaults_empty() {
        // AssignedTask has no Default impl.
        let payload: ListPayload<AssignedTask> =
            serde_json::from_str(r#"{"success": true, "count": 0}"#).unwrap();
        let (records, count) = payload.into_records();
        assert!(records.is_empty());
        assert_eq!(count, Some(0));
    }

    #[test]
    fn failed_envelope_yields_no_records() {
        let payload: ListPayload<Village> =
            serde_json::from_str(r#"{"success": false, "data": [{"id": 9, "name": "X", "taluka_id": 1}]}"#)
                .unwrap();
        let (records, _) = payload.into_records();
        assert!(records.is_empty());
    }

    #[test]
    fn task_row_exposes_filter_fields() {
        let task = AssignedTask {
            id: 11,
            task_id: 3,
            task: "Soil survey".into(),
            employee_id: 7,
            employee: "Asha Pawar".into(),
            land_id: 21,
            land: "Survey 128/2".into(),
            status: TaskStatus::Pending,
            assigned_date: "2024-03-01".into(),
            completed_date: None,
            admin_notes: None,
        };
        assert_eq!(task.field("status").as_deref(), Some("pending"));
        assert_eq!(task.field("employee").as_deref(), Some("7"));
        assert_eq!(task.field("planet"), None);
        assert!(task.search_text().contains("Asha"));
    }

    #[test]
    fn payment_remaining_never_goes_negative() {
        let details = PaymentDetails {
            installment_id: 1,
            amount_due: 1000.0,
            amount_paid: 1200.0,
            payment_mode: None,
            reference: None,
            notes: None,
        };
        assert_eq!(details.remaining(), 0.0);
    }
}
