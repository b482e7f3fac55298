//! Location Manager Page
//!
//! The standalone page for browsing the district/taluka/village hierarchy
//! and adding villages. All the real behavior lives in the cascade; this
//! page frames it and shows what is currently selected.

use leptos::prelude::*;

use crate::components::CascadingLocationSelect;
use crate::models::Village;

#[component]
pub fn LocationManager() -> impl IntoView {
    let (selected, set_selected) = signal(Option::<Village>::None);

    view! {
        <section class="location-manager">
            <header class="board-header">
                <h2>"Locations"</h2>
            </header>

            <CascadingLocationSelect on_village=move |village| set_selected.set(village) />

            {move || match selected.get() {
                Some(village) => view! {
                    <div class="selected-village">
                        <strong>{village.name.clone()}</strong>
                        <span class="village-meta">{format!(" (village #{})", village.id)}</span>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="placeholder">
                        "Pick a district and taluka to browse villages, or add a new one"
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}
