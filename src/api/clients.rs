//! Client Endpoints
//!
//! Client CRUD plus the optional purchase block submitted with a new client.

use super::{get_list, post_action};
use crate::models::Client;

// ========================
// Form Payloads
// ========================

/// Fields of the client form, as typed. Assembled into one form body.
pub struct ClientPayload<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub pan: &'a str,
    pub aadhar: &'a str,
    pub village_id: Option<u32>,
    pub purchase: Option<PurchasePayload<'a>>,
}

/// Land purchase recorded together with the client: the land, the total
/// price, and the installment plan as (label, percent) rows.
pub struct PurchasePayload<'a> {
    pub land_id: u32,
    pub price: f64,
    pub plan: &'a [(String, f64)],
}

impl ClientPayload<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.trim().to_string()),
            ("phone", self.phone.trim().to_string()),
            ("email", self.email.trim().to_string()),
            ("pan", self.pan.trim().to_uppercase()),
            ("aadhar", self.aadhar.trim().replace(' ', "")),
        ];
        if let Some(village_id) = self.village_id {
            fields.push(("village", village_id.to_string()));
        }
        if let Some(purchase) = &self.purchase {
            fields.push(("land", purchase.land_id.to_string()));
            fields.push(("price", purchase.price.to_string()));
            for (label, percent) in purchase.plan {
                fields.push(("plan_label", label.clone()));
                fields.push(("plan_percent", percent.to_string()));
            }
        }
        fields
    }
}

// ========================
// Endpoints
// ========================

pub async fn list_clients() -> Result<Vec<Client>, String> {
    get_list("/api/clients/").await
}

pub async fn add_client(payload: &ClientPayload<'_>) -> Result<String, String> {
    post_action("/api/clients/add/", &payload.fields()).await
}

pub async fn edit_client(id: u32, payload: &ClientPayload<'_>) -> Result<String, String> {
    post_action(&format!("/api/clients/{id}/edit/"), &payload.fields()).await
}

pub async fn delete_client(id: u32) -> Result<String, String> {
    post_action(&format!("/api/clients/{id}/delete/"), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::encode_form;

    #[test]
    fn payload_normalizes_identity_fields() {
        let payload = ClientPayload {
            name: "Ravi Kumar",
            phone: " 9876543210 ",
            email: "",
            pan: "abcde1234f",
            aadhar: "1234 5678 9012",
            village_id: Some(12),
            purchase: None,
        };
        let fields = payload.fields();
        assert!(fields.contains(&("phone", "9876543210".to_string())));
        assert!(fields.contains(&("pan", "ABCDE1234F".to_string())));
        assert!(fields.contains(&("aadhar", "123456789012".to_string())));
        assert!(fields.contains(&("village", "12".to_string())));
    }

    #[test]
    fn purchase_plan_rows_become_repeated_fields() {
        let plan = vec![("Booking".to_string(), 20.0), ("Final".to_string(), 80.0)];
        let payload = ClientPayload {
            name: "A",
            phone: "9876543210",
            email: "",
            pan: "ABCDE1234F",
            aadhar: "123456789012",
            village_id: None,
            purchase: Some(PurchasePayload {
                land_id: 7,
                price: 1_500_000.0,
                plan: &plan,
            }),
        };
        let body = encode_form(&payload.fields());
        assert!(body.contains("land=7"));
        assert!(body.contains("plan_label=Booking&plan_percent=20"));
        assert!(body.contains("plan_label=Final&plan_percent=80"));
    }
}
