//! Payment Dialog Component
//!
//! Opens over an installment row, fetches its payment details, and records
//! a payment with amount, mode, and reference. A failed detail fetch
//! degrades the dialog, not the page; the form stays open on a failed
//! submit so the user can retry.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::format::format_inr;
use crate::models::{Installment, PaymentDetails};
use crate::status::InstallmentStatus;

const PAYMENT_MODES: &[(&str, &str)] = &[
    ("cash", "Cash"),
    ("cheque", "Cheque"),
    ("upi", "UPI"),
    ("bank_transfer", "Bank Transfer"),
];

#[component]
pub fn PaymentDialog(
    installment: Installment,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_paid: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (details, set_details) = signal(Option::<PaymentDetails>::None);
    let (detail_error, set_detail_error) = signal(Option::<String>::None);
    let (amount, set_amount) = signal(String::new());
    let (mode, set_mode) = signal("cash".to_string());
    let (reference, set_reference) = signal(String::new());
    let (form_error, set_form_error) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(false);

    let id = installment.id;
    let settled = installment.status == InstallmentStatus::Paid;
    let summary = format!(
        "{} — {} · {}",
        installment.client, installment.land, installment.label
    );

    Effect::new(move |_| {
        spawn_local(async move {
            match api::payment_details(id).await {
                Ok(loaded) => {
                    // Prefill the remaining amount once.
                    if amount.get_untracked().is_empty() {
                        set_amount.set(loaded.remaining().to_string());
                    }
                    set_details.set(Some(loaded));
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("[PaymentDialog] Details failed: {e}").into(),
                    );
                    set_detail_error.set(Some(e));
                }
            }
        });
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let amount_text = amount.get();
        match amount_text.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => {}
            _ => {
                set_form_error.set(Some("Enter a positive amount".to_string()));
                return;
            }
        }
        let mode_now = mode.get();
        let reference_now = reference.get();
        set_busy.set(true);
        spawn_local(async move {
            match api::process_payment(id, &amount_text, &mode_now, &reference_now).await {
                Ok(message) => {
                    ctx.notify_success(message);
                    on_paid.run(());
                }
                Err(e) => {
                    set_form_error.set(Some(e.clone()));
                    ctx.notify_error(e);
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal payment-modal" on:click=|ev| ev.stop_propagation()>
                <h3>"Payment"</h3>
                <p class="modal-summary">{summary}</p>

                {move || detail_error.get().map(|message| view! {
                    <div class="field-error">
                        {format!("Could not load payment details: {message}")}
                    </div>
                })}

                {move || details.get().map(|d| view! {
                    <dl class="payment-summary">
                        <dt>"Due"</dt>
                        <dd>{format_inr(d.amount_due)}</dd>
                        <dt>"Paid so far"</dt>
                        <dd>{format_inr(d.amount_paid)}</dd>
                        <dt>"Remaining"</dt>
                        <dd>{format_inr(d.remaining())}</dd>
                    </dl>
                })}

                <Show when=move || !settled>
                    <form class="payment-form" on:submit=submit>
                        <label class="modal-label">"Amount"</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            prop:value=move || amount.get()
                            on:input=move |ev| {
                                set_amount.set(event_target_value(&ev));
                                set_form_error.set(None);
                            }
                        />
                        <label class="modal-label">"Mode"</label>
                        <select
                            prop:value=move || mode.get()
                            on:change=move |ev| set_mode.set(event_target_value(&ev))
                        >
                            {PAYMENT_MODES
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                        <label class="modal-label">"Reference"</label>
                        <input
                            type="text"
                            placeholder="Cheque no, UPI ref…"
                            prop:value=move || reference.get()
                            on:input=move |ev| set_reference.set(event_target_value(&ev))
                        />
                        {move || form_error.get().map(|message| view! {
                            <div class="field-error">{message}</div>
                        })}
                        <div class="modal-actions">
                            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                                {move || if busy.get() { "Saving…" } else { "Record Payment" }}
                            </button>
                            <button
                                type="button"
                                class="btn btn-plain"
                                on:click=move |_| on_close.run(())
                            >
                                "Close"
                            </button>
                        </div>
                    </form>
                </Show>

                <Show when=move || settled>
                    <div class="modal-actions">
                        <button class="btn btn-plain" on:click=move |_| on_close.run(())>
                            "Close"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
