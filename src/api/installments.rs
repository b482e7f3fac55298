//! Installment Endpoints
//!
//! Listing, payment detail lookup, and the three payment mutations. The
//! older `pay` route settles in full; `process-payment` records partial
//! amounts with a mode and reference.

use super::{get_json, get_list, post_action};
use crate::models::{Installment, PaymentDetails};

pub async fn list_installments() -> Result<Vec<Installment>, String> {
    get_list("/api/installments/").await
}

pub async fn payment_details(id: u32) -> Result<PaymentDetails, String> {
    get_json(&format!("/installment/{id}/payment-details/")).await
}

/// Settle the installment in full.
pub async fn pay_installment(id: u32) -> Result<String, String> {
    post_action(&format!("/installment/{id}/pay/"), &[]).await
}

/// Flag as paid without recording payment details.
pub async fn mark_paid(id: u32) -> Result<String, String> {
    post_action(&format!("/api/installments/{id}/mark-paid/"), &[]).await
}

/// Record a payment with amount, mode, and reference.
pub async fn process_payment(
    id: u32,
    amount: &str,
    mode: &str,
    reference: &str,
) -> Result<String, String> {
    post_action(
        &format!("/api/installments/{id}/process-payment/"),
        &[
            ("amount", amount.trim().to_string()),
            ("payment_mode", mode.to_string()),
            ("reference", reference.trim().to_string()),
        ],
    )
    .await
}

/// Queue a payment reminder for the client.
pub async fn create_reminder(installment_id: u32, message: &str) -> Result<String, String> {
    post_action(
        "/api/reminders/create/",
        &[
            ("installment", installment_id.to_string()),
            ("message", message.to_string()),
        ],
    )
    .await
}
