//! Client Form Dialog
//!
//! Add/edit form for a client: identity fields with inline validation, an
//! optional village from the location cascade, and (for new clients) an
//! optional land purchase with an installment plan that must total 100%.
//! Nothing is sent until every check passes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ClientPayload, PurchasePayload};
use crate::components::CascadingLocationSelect;
use crate::context::AppContext;
use crate::models::{Client, Village};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::validate::{client_form_errors, plan_errors, FieldError};

#[component]
pub fn ClientFormDialog(
    client: Option<Client>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let editing = client.clone();
    let editing_id = editing.as_ref().map(|c| c.id);
    let current_village = editing.as_ref().and_then(|c| c.village.clone());

    let (name, set_name) = signal(editing.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let (phone, set_phone) = signal(editing.as_ref().map(|c| c.phone.clone()).unwrap_or_default());
    let (email, set_email) = signal(
        editing
            .as_ref()
            .and_then(|c| c.email.clone())
            .unwrap_or_default(),
    );
    let (pan, set_pan) = signal(editing.as_ref().map(|c| c.pan.clone()).unwrap_or_default());
    let (aadhar, set_aadhar) =
        signal(editing.as_ref().map(|c| c.aadhar.clone()).unwrap_or_default());
    let (village, set_village) = signal(Option::<Village>::None);

    // Purchase block, offered only when creating.
    let (with_purchase, set_with_purchase) = signal(false);
    let (land, set_land) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (plan_rows, set_plan_rows) = signal(Vec::<(u32, String, String)>::new());
    let row_seq = StoredValue::new(0u32);

    let (errors, set_errors) = signal(Vec::<FieldError>::new());
    let (busy, set_busy) = signal(false);

    let existing_village_id = editing.as_ref().and_then(|c| c.village_id);

    let error_for = move |field: &'static str| {
        errors
            .get()
            .into_iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    };

    let add_plan_row = move |_| {
        let id = row_seq.with_value(|v| v + 1);
        row_seq.set_value(id);
        set_plan_rows.update(|rows| rows.push((id, String::new(), String::new())));
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_now = name.get();
        let phone_now = phone.get();
        let email_now = email.get();
        let pan_now = pan.get();
        let aadhar_now = aadhar.get();

        let mut found = client_form_errors(&name_now, &phone_now, &pan_now, &aadhar_now);

        let mut purchase_data = Option::<(u32, f64, Vec<(String, f64)>)>::None;
        if with_purchase.get() {
            let rows: Vec<(String, String)> = plan_rows
                .get()
                .into_iter()
                .map(|(_, label, percent)| (label, percent))
                .collect();
            found.extend(plan_errors(&rows));
            let land_id = land.get().parse::<u32>().ok();
            if land_id.is_none() {
                found.push(FieldError {
                    field: "land",
                    message: "Choose a land".to_string(),
                });
            }
            let price_value = price.get().trim().parse::<f64>().ok().filter(|p| *p > 0.0);
            if price_value.is_none() {
                found.push(FieldError {
                    field: "price",
                    message: "Enter the total price".to_string(),
                });
            }
            if found.is_empty() {
                let plan: Vec<(String, f64)> = rows
                    .into_iter()
                    .map(|(label, percent)| {
                        let value = percent.trim().parse::<f64>().unwrap_or_default();
                        (label.trim().to_string(), value)
                    })
                    .collect();
                purchase_data = Some((land_id.unwrap_or_default(), price_value.unwrap_or_default(), plan));
            }
        }

        if !found.is_empty() {
            if let Some(first) = found.first() {
                ctx.notify_error(first.message.clone());
            }
            set_errors.set(found);
            return;
        }
        set_errors.set(Vec::new());

        let village_id = village.get().map(|v| v.id).or(existing_village_id);
        set_busy.set(true);
        spawn_local(async move {
            let purchase = purchase_data
                .as_ref()
                .map(|(land_id, price, plan)| PurchasePayload {
                    land_id: *land_id,
                    price: *price,
                    plan,
                });
            let payload = ClientPayload {
                name: &name_now,
                phone: &phone_now,
                email: &email_now,
                pan: &pan_now,
                aadhar: &aadhar_now,
                village_id,
                purchase,
            };
            let result = match editing_id {
                Some(id) => api::edit_client(id, &payload).await,
                None => api::add_client(&payload).await,
            };
            match result {
                Ok(message) => {
                    ctx.notify_success(message);
                    on_saved.run(());
                }
                Err(e) => ctx.notify_error(e),
            }
            set_busy.set(false);
        });
    };

    let title = if editing_id.is_some() {
        "Edit Client"
    } else {
        "Add Client"
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal client-modal" on:click=|ev| ev.stop_propagation()>
                <h3>{title}</h3>
                <form class="client-form" on:submit=submit>
                    <label class="modal-label">"Name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    {move || error_for("name").map(|m| view! { <span class="field-error">{m}</span> })}

                    <label class="modal-label">"Phone"</label>
                    <input
                        type="tel"
                        placeholder="10-digit mobile"
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                    />
                    {move || error_for("phone").map(|m| view! { <span class="field-error">{m}</span> })}

                    <label class="modal-label">"Email (optional)"</label>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />

                    <label class="modal-label">"PAN"</label>
                    <input
                        type="text"
                        placeholder="ABCDE1234F"
                        prop:value=move || pan.get()
                        on:input=move |ev| set_pan.set(event_target_value(&ev))
                    />
                    {move || error_for("pan").map(|m| view! { <span class="field-error">{m}</span> })}

                    <label class="modal-label">"Aadhar"</label>
                    <input
                        type="text"
                        placeholder="12 digits"
                        prop:value=move || aadhar.get()
                        on:input=move |ev| set_aadhar.set(event_target_value(&ev))
                    />
                    {move || error_for("aadhar").map(|m| view! { <span class="field-error">{m}</span> })}

                    <label class="modal-label">"Village"</label>
                    {current_village.map(|name| view! {
                        <span class="current-village">{format!("Current: {name}")}</span>
                    })}
                    <CascadingLocationSelect on_village=move |v| set_village.set(v) />

                    <Show when=move || editing_id.is_none()>
                        <label class="purchase-toggle">
                            <input
                                type="checkbox"
                                prop:checked=move || with_purchase.get()
                                on:change=move |ev| set_with_purchase.set(event_target_checked(&ev))
                            />
                            "Record a land purchase"
                        </label>
                    </Show>

                    <Show when=move || with_purchase.get() && editing_id.is_none()>
                        <div class="purchase-block">
                            <label class="modal-label">"Land"</label>
                            <select
                                prop:value=move || land.get()
                                on:change=move |ev| set_land.set(event_target_value(&ev))
                            >
                                <option value="">"Choose a land…"</option>
                                <For
                                    each=move || store.lands().get()
                                    key=|l| l.id
                                    children=move |l| {
                                        view! { <option value=l.id.to_string()>{l.label()}</option> }
                                    }
                                />
                            </select>
                            {move || error_for("land").map(|m| view! { <span class="field-error">{m}</span> })}

                            <label class="modal-label">"Total price"</label>
                            <input
                                type="text"
                                inputmode="decimal"
                                prop:value=move || price.get()
                                on:input=move |ev| set_price.set(event_target_value(&ev))
                            />
                            {move || error_for("price").map(|m| view! { <span class="field-error">{m}</span> })}

                            <label class="modal-label">"Installment plan"</label>
                            <For
                                each=move || plan_rows.get()
                                key=|row| row.0
                                children=move |(row_id, label, percent)| {
                                    view! {
                                        <div class="plan-row">
                                            <input
                                                type="text"
                                                placeholder="Label (e.g. Booking)"
                                                prop:value=label
                                                on:input=move |ev| {
                                                    let text = event_target_value(&ev);
                                                    set_plan_rows.update(|rows| {
                                                        if let Some(row) =
                                                            rows.iter_mut().find(|r| r.0 == row_id)
                                                        {
                                                            row.1 = text.clone();
                                                        }
                                                    });
                                                }
                                            />
                                            <input
                                                type="text"
                                                inputmode="decimal"
                                                placeholder="%"
                                                prop:value=percent
                                                on:input=move |ev| {
                                                    let text = event_target_value(&ev);
                                                    set_plan_rows.update(|rows| {
                                                        if let Some(row) =
                                                            rows.iter_mut().find(|r| r.0 == row_id)
                                                        {
                                                            row.2 = text.clone();
                                                        }
                                                    });
                                                }
                                            />
                                            <button
                                                type="button"
                                                class="btn btn-plain"
                                                on:click=move |_| {
                                                    set_plan_rows.update(|rows| {
                                                        rows.retain(|r| r.0 != row_id)
                                                    })
                                                }
                                            >
                                                "×"
                                            </button>
                                        </div>
                                    }
                                }
                            />
                            <button type="button" class="btn btn-plain" on:click=add_plan_row>
                                "+ Add installment"
                            </button>
                            {move || error_for("plan").map(|m| view! { <span class="field-error">{m}</span> })}
                        </div>
                    </Show>

                    <div class="modal-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving…" } else { "Save" }}
                        </button>
                        <button type="button" class="btn btn-plain" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
