//! Installment Table Component
//!
//! Payment schedule across all clients. Same snapshot/filter/paginate
//! pattern as the task board, plus overdue highlighting and the payment
//! actions. A failed snapshot leaves a retry banner instead of a table.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::{apply_filters, paginate, FilterState, PageCursor, SEARCH_KEY};

use crate::api;
use crate::components::{ConfirmButton, Pagination, PaymentBadge, PaymentDialog, SearchBox};
use crate::context::AppContext;
use crate::format::{browser_today, format_date, format_inr, is_past};
use crate::models::Installment;
use crate::status::InstallmentStatus;
use crate::store::{store_mark_installment_paid, use_app_store, AppStateStoreFields};

const PAGE_SIZE: usize = 10;

#[component]
pub fn InstallmentTable() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (filters, set_filters) = signal(FilterState::new());
    let (cursor, set_cursor) = signal(PageCursor::new(PAGE_SIZE));
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (paying, set_paying) = signal(Option::<Installment>::None);

    let load_seq = StoredValue::new(0u32);
    let today = browser_today();

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let mine = load_seq.with_value(|v| v + 1);
        load_seq.set_value(mine);
        set_loading.set(true);
        spawn_local(async move {
            match api::list_installments().await {
                Ok(rows) => {
                    if load_seq.get_value() == mine {
                        web_sys::console::log_1(
                            &format!("[Installments] Loaded {} rows", rows.len()).into(),
                        );
                        *store.installments().write() = rows;
                        set_load_error.set(None);
                    }
                }
                Err(e) => {
                    if load_seq.get_value() == mine {
                        web_sys::console::error_1(
                            &format!("[Installments] Load failed: {e}").into(),
                        );
                        set_load_error.set(Some(e));
                    }
                }
            }
            if load_seq.get_value() == mine {
                set_loading.set(false);
            }
        });
    });

    let visible = Memo::new(move |_| {
        let rows = store.installments().get();
        let filtered = apply_filters(&rows, &filters.get());
        let c = cursor.get();
        paginate(&filtered, c.page, c.page_size)
    });

    let on_mark_paid = move |id: u32| {
        spawn_local(async move {
            match api::mark_paid(id).await {
                Ok(message) => {
                    store_mark_installment_paid(
                        &store,
                        id,
                        browser_today().format("%Y-%m-%d").to_string(),
                    );
                    ctx.notify_success(message);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    // Full settlement; the server stamps amount and date, so refetch.
    let on_pay = move |id: u32| {
        spawn_local(async move {
            match api::pay_installment(id).await {
                Ok(message) => {
                    ctx.notify_success(message);
                    ctx.reload();
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let on_remind = move |id: u32| {
        spawn_local(async move {
            match api::create_reminder(id, "").await {
                Ok(message) => ctx.notify_success(message),
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let search_value = Signal::derive(move || {
        filters
            .get()
            .get(SEARCH_KEY)
            .unwrap_or_default()
            .to_string()
    });

    view! {
        <section class="installment-table">
            <header class="board-header">
                <h2>"Installments"</h2>
                <span class="result-count">
                    {move || format!("{} results", visible.get().total)}
                </span>
            </header>

            <div class="filter-bar">
                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("status").unwrap_or_default().to_string()
                    on:change=move |ev| {
                        set_filters.update(|f| f.set("status", event_target_value(&ev)))
                    }
                >
                    <option value="">"All Statuses"</option>
                    {InstallmentStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>

                <select
                    class="filter-select"
                    prop:value=move || filters.get().get("client").unwrap_or_default().to_string()
                    on:change=move |ev| {
                        set_filters.update(|f| f.set("client", event_target_value(&ev)))
                    }
                >
                    <option value="">"All Clients"</option>
                    <For
                        each=move || store.clients().get()
                        key=|client| client.id
                        children=move |client| {
                            view! {
                                <option value=client.id.to_string()>{client.name.clone()}</option>
                            }
                        }
                    />
                </select>

                <SearchBox
                    value=search_value
                    on_commit=move |text: String| {
                        set_filters.update(|f| f.set(SEARCH_KEY, text))
                    }
                    placeholder="Search client, land, installment…"
                />

                <button
                    class="btn btn-plain"
                    on:click=move |_| {
                        set_filters.update(|f| f.clear());
                        set_cursor.update(|c| c.page = 1);
                    }
                >
                    "Clear Filters"
                </button>
            </div>

            <Show when=move || loading.get()>
                <div class="loading">"Loading…"</div>
            </Show>

            {move || load_error.get().map(|message| view! {
                <div class="load-error">
                    <span>{format!("Could not load installments: {message}")}</span>
                    <button class="btn btn-plain" on:click=move |_| ctx.reload()>"Retry"</button>
                </div>
            })}

            <Show when=move || load_error.get().is_none()>
                <table class="record-table">
                    <thead>
                        <tr>
                            <th>"Client"</th>
                            <th>"Land"</th>
                            <th>"Installment"</th>
                            <th>"Amount"</th>
                            <th>"Due"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || visible.get().items.is_empty() && !loading.get()>
                            <tr class="placeholder-row">
                                <td colspan="7">"No installments match the current filters"</td>
                            </tr>
                        </Show>
                        <For
                            each=move || visible.get().items
                            key=|row| (row.id, row.status)
                            children=move |row| {
                                let id = row.id;
                                let overdue = row.status == InstallmentStatus::Overdue
                                    || (row.status == InstallmentStatus::Pending
                                        && is_past(&row.due_date, today));
                                let open_payment = {
                                    let row = row.clone();
                                    move |_| set_paying.set(Some(row.clone()))
                                };
                                let label = match row.percent {
                                    Some(percent) => format!("{} ({percent}%)", row.label),
                                    None => row.label.clone(),
                                };
                                let actionable = row.status != InstallmentStatus::Paid;
                                view! {
                                    <tr class="installment-row" class:overdue=overdue>
                                        <td>{row.client.clone()}</td>
                                        <td>{row.land.clone()}</td>
                                        <td>{label}</td>
                                        <td class="amount">{format_inr(row.amount)}</td>
                                        <td>{format_date(&row.due_date)}</td>
                                        <td><PaymentBadge status=row.status /></td>
                                        <td class="row-actions">
                                            <button class="btn btn-plain" on:click=open_payment>
                                                {if actionable { "Payment" } else { "Details" }}
                                            </button>
                                            <Show when=move || actionable>
                                                <ConfirmButton
                                                    button_class="btn btn-complete"
                                                    label="Mark Paid"
                                                    prompt="Mark paid?"
                                                    on_confirm=move |_| on_mark_paid(id)
                                                />
                                                <ConfirmButton
                                                    button_class="btn btn-primary"
                                                    label="Pay"
                                                    prompt="Settle in full?"
                                                    on_confirm=move |_| on_pay(id)
                                                />
                                                <button
                                                    class="btn btn-plain"
                                                    on:click=move |_| on_remind(id)
                                                >
                                                    "Remind"
                                                </button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <Pagination
                    current=Signal::derive(move || visible.get().page)
                    total_pages=Signal::derive(move || visible.get().total_pages)
                    on_select=move |page: usize| set_cursor.update(|c| c.page = page)
                />
            </Show>

            {move || paying.get().map(|installment| view! {
                <PaymentDialog
                    installment=installment
                    on_close=move |_| set_paying.set(None)
                    on_paid=move |_| {
                        set_paying.set(None);
                        ctx.reload();
                    }
                />
            })}
        </section>
    }
}
