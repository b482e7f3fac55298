//! Client Manager Page
//!
//! Client list with search and paging, plus the add/edit dialog. Adds and
//! edits reload the snapshot so server-derived fields stay authoritative;
//! deletes patch the list locally.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::{apply_filters, paginate, FilterState, PageCursor, SEARCH_KEY};

use crate::api;
use crate::components::{ClientFormDialog, ConfirmButton, Pagination, SearchBox};
use crate::context::AppContext;
use crate::models::Client;
use crate::store::{store_remove_client, use_app_store, AppStateStoreFields};

const PAGE_SIZE: usize = 10;

#[derive(Clone, PartialEq)]
enum ClientDialog {
    Add,
    Edit(Client),
}

#[component]
pub fn ClientManager() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (filters, set_filters) = signal(FilterState::new());
    let (cursor, set_cursor) = signal(PageCursor::new(PAGE_SIZE));
    let (loading, set_loading) = signal(false);
    let (dialog, set_dialog) = signal(Option::<ClientDialog>::None);

    let load_seq = StoredValue::new(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let mine = load_seq.with_value(|v| v + 1);
        load_seq.set_value(mine);
        set_loading.set(true);
        spawn_local(async move {
            match api::list_clients().await {
                Ok(rows) => {
                    if load_seq.get_value() == mine {
                        web_sys::console::log_1(
                            &format!("[Clients] Loaded {} clients", rows.len()).into(),
                        );
                        *store.clients().write() = rows;
                    }
                }
                Err(e) => {
                    if load_seq.get_value() == mine {
                        web_sys::console::error_1(&format!("[Clients] Load failed: {e}").into());
                        ctx.notify_error(format!("Could not load clients: {e}"));
                    }
                }
            }
            if load_seq.get_value() == mine {
                set_loading.set(false);
            }
        });
    });

    let visible = Memo::new(move |_| {
        let rows = store.clients().get();
        let filtered = apply_filters(&rows, &filters.get());
        let c = cursor.get();
        paginate(&filtered, c.page, c.page_size)
    });

    let on_delete = move |id: u32| {
        spawn_local(async move {
            match api::delete_client(id).await {
                Ok(message) => {
                    store_remove_client(&store, id);
                    ctx.notify_success(message);
                }
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
        <section class="client-manager">
            <header class="board-header">
                <h2>"Clients"</h2>
                <span class="result-count">
                    {move || format!("{} results", visible.get().total)}
                </span>
                <button
                    class="btn btn-primary"
                    on:click=move |_| set_dialog.set(Some(ClientDialog::Add))
                >
                    "+ Add Client"
                </button>
            </header>

            <div class="filter-bar">
                <SearchBox
                    value=search_value
                    on_commit=move |text: String| {
                        set_filters.update(|f| f.set(SEARCH_KEY, text))
                    }
                    placeholder="Search name, phone, PAN…"
                />
                <button
                    class="btn btn-plain"
                    on:click=move |_| {
                        set_filters.update(|f| f.clear());
                        set_cursor.update(|c| c.page = 1);
                    }
                >
                    "Clear"
                </button>
            </div>

            <Show when=move || loading.get()>
                <div class="loading">"Loading…"</div>
            </Show>

            <table class="record-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Phone"</th>
                        <th>"PAN"</th>
                        <th>"Village"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || visible.get().items.is_empty() && !loading.get()>
                        <tr class="placeholder-row">
                            <td colspan="5">"No clients match the current search"</td>
                        </tr>
                    </Show>
                    <For
                        each=move || visible.get().items
                        // Edited rows keep their id, so the key has to cover
                        // the fields the cells show.
                        key=|client| {
                            (
                                client.id,
                                client.name.clone(),
                                client.phone.clone(),
                                client.pan.clone(),
                                client.village.clone(),
                            )
                        }
                        children=move |client| {
                            let id = client.id;
                            let edit = {
                                let client = client.clone();
                                move |_| set_dialog.set(Some(ClientDialog::Edit(client.clone())))
                            };
                            view! {
                                <tr class="client-row">
                                    <td>{client.name.clone()}</td>
                                    <td>{client.phone.clone()}</td>
                                    <td>{client.pan.clone()}</td>
                                    <td>{client.village.clone().unwrap_or_else(|| "—".to_string())}</td>
                                    <td class="row-actions">
                                        <button class="btn btn-plain" on:click=edit>"Edit"</button>
                                        <ConfirmButton
                                            button_class="btn btn-danger"
                                            label="Delete"
                                            prompt="Delete?"
                                            on_confirm=move |_| on_delete(id)
                                        />
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

            {move || dialog.get().map(|mode| {
                let client = match mode {
                    ClientDialog::Add => None,
                    ClientDialog::Edit(client) => Some(client),
                };
                view! {
                    <ClientFormDialog
                        client=client
                        on_close=move |_| set_dialog.set(None)
                        on_saved=move |_| {
                            set_dialog.set(None);
                            ctx.reload();
                        }
                    />
                }
            })}
        </section>
    }
}
