//! Cascading Location Select
//!
//! District → taluka → village selects. Changing a level clears everything
//! below it; a sentinel option on the village level opens an inline
//! add-village modal, and the new village is appended and selected without
//! reloading the cascade. Stale fetches from rapid re-selection are
//! discarded by a generation counter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::models::{District, Taluka, Village};

/// Option value that opens the add-village modal instead of selecting.
const ADD_VILLAGE_SENTINEL: &str = "__add__";

#[component]
pub fn CascadingLocationSelect(
    #[prop(into)] on_village: Callback<Option<Village>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (districts, set_districts) = signal(Vec::<District>::new());
    let (talukas, set_talukas) = signal(Vec::<Taluka>::new());
    let (villages, set_villages) = signal(Vec::<Village>::new());
    let (selected_district, set_selected_district) = signal(Option::<u32>::None);
    let (selected_taluka, set_selected_taluka) = signal(Option::<u32>::None);
    let (selected_village, set_selected_village) = signal(Option::<u32>::None);
    let (adding, set_adding) = signal(false);

    let cascade_seq = StoredValue::new(0u32);

    // Districts load once on mount.
    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_districts().await {
                Ok(loaded) => set_districts.set(loaded),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("[LocationSelect] Districts failed: {e}").into(),
                    );
                    ctx.notify_error(format!("Could not load districts: {e}"));
                }
            }
        });
    });

    let on_district_change = move |ev: web_sys::Event| {
        let picked = event_target_value(&ev).parse::<u32>().ok();
        set_selected_district.set(picked);
        set_selected_taluka.set(None);
        set_selected_village.set(None);
        set_talukas.set(Vec::new());
        set_villages.set(Vec::new());
        on_village.run(None);

        let mine = cascade_seq.with_value(|v| v + 1);
        cascade_seq.set_value(mine);
        let Some(district_id) = picked else { return };
        spawn_local(async move {
            match api::list_talukas(district_id).await {
                Ok(loaded) => {
                    if cascade_seq.get_value() == mine {
                        set_talukas.set(loaded);
                    }
                }
                Err(e) => {
                    if cascade_seq.get_value() == mine {
                        web_sys::console::error_1(
                            &format!("[LocationSelect] Talukas failed: {e}").into(),
                        );
                        ctx.notify_error(format!("Could not load talukas: {e}"));
                    }
                }
            }
        });
    };

    let on_taluka_change = move |ev: web_sys::Event| {
        let picked = event_target_value(&ev).parse::<u32>().ok();
        set_selected_taluka.set(picked);
        set_selected_village.set(None);
        set_villages.set(Vec::new());
        on_village.run(None);

        let mine = cascade_seq.with_value(|v| v + 1);
        cascade_seq.set_value(mine);
        let Some(taluka_id) = picked else { return };
        spawn_local(async move {
            match api::list_villages(taluka_id).await {
                Ok(loaded) => {
                    if cascade_seq.get_value() == mine {
                        set_villages.set(loaded);
                    }
                }
                Err(e) => {
                    if cascade_seq.get_value() == mine {
                        web_sys::console::error_1(
                            &format!("[LocationSelect] Villages failed: {e}").into(),
                        );
                        ctx.notify_error(format!("Could not load villages: {e}"));
                    }
                }
            }
        });
    };

    let on_village_change = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        if raw == ADD_VILLAGE_SENTINEL {
            // Not a selection; open the modal and stay unselected.
            set_selected_village.set(None);
            set_adding.set(true);
            return;
        }
        let picked = raw.parse::<u32>().ok();
        set_selected_village.set(picked);
        let village = picked.and_then(|id| villages.get_untracked().into_iter().find(|v| v.id == id));
        on_village.run(village);
    };

    let on_added = move |village: Village| {
        set_adding.set(false);
        set_selected_village.set(Some(village.id));
        set_villages.update(|list| list.push(village.clone()));
        on_village.run(Some(village));
    };

    view! {
        <div class="location-cascade">
            <select
                class="location-select"
                prop:value=move || {
                    selected_district.get().map(|id| id.to_string()).unwrap_or_default()
                }
                on:change=on_district_change
            >
                <option value="">"District…"</option>
                <For
                    each=move || districts.get()
                    key=|d| d.id
                    children=move |d| {
                        view! { <option value=d.id.to_string()>{d.name.clone()}</option> }
                    }
                />
            </select>

            <select
                class="location-select"
                disabled=move || selected_district.get().is_none()
                prop:value=move || {
                    selected_taluka.get().map(|id| id.to_string()).unwrap_or_default()
                }
                on:change=on_taluka_change
            >
                <option value="">"Taluka…"</option>
                <For
                    each=move || talukas.get()
                    key=|t| t.id
                    children=move |t| {
                        view! { <option value=t.id.to_string()>{t.name.clone()}</option> }
                    }
                />
            </select>

            <select
                class="location-select"
                disabled=move || selected_taluka.get().is_none()
                prop:value=move || {
                    selected_village.get().map(|id| id.to_string()).unwrap_or_default()
                }
                on:change=on_village_change
            >
                <option value="">"Village…"</option>
                <For
                    each=move || villages.get()
                    key=|v| v.id
                    children=move |v| {
                        view! { <option value=v.id.to_string()>{v.name.clone()}</option> }
                    }
                />
                <option value=ADD_VILLAGE_SENTINEL>"+ Add new village…"</option>
            </select>

            {move || {
                adding.get().then(|| selected_taluka.get()).flatten().map(|taluka_id| view! {
                    <AddVillageModal
                        taluka_id=taluka_id
                        on_close=move |_| set_adding.set(false)
                        on_added=on_added
                    />
                })
            }}
        </div>
    }
}

#[component]
fn AddVillageModal(
    taluka_id: u32,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_added: Callback<Village>,
) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let village_name = name.get().trim().to_string();
        if village_name.is_empty() {
            set_error.set(Some("Village name is required".to_string()));
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::add_village(taluka_id, &village_name).await {
                Ok(village) => on_added.run(village),
                Err(e) => set_error.set(Some(e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal add-village-modal" on:click=|ev| ev.stop_propagation()>
                <h3>"Add Village"</h3>
                <form on:submit=submit>
                    <input
                        type="text"
                        placeholder="Village name"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            set_name.set(event_target_value(&ev));
                            set_error.set(None);
                        }
                    />
                    {move || error.get().map(|message| view! {
                        <div class="field-error">{message}</div>
                    })}
                    <div class="modal-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                            {move || if busy.get() { "Adding…" } else { "Add" }}
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
