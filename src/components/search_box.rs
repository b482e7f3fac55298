//! Search Box Component
//!
//! Text input that commits its value after a typing pause, so each
//! keystroke does not re-filter (or re-fetch) the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

const DEBOUNCE_MS: u32 = 300;

/// Debounced search input.
///
/// `value` is the committed search term owned by the parent; `on_commit`
/// fires once typing settles. Each keystroke bumps a generation counter and
/// only the latest pending commit survives.
#[component]
pub fn SearchBox(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_commit: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let (draft, set_draft) = signal(value.get_untracked());
    let generation = StoredValue::new(0u32);

    // Follow external resets (e.g. a Clear Filters button). Bumping the
    // generation drops any commit still waiting on its timer.
    Effect::new(move |_| {
        let committed = value.get();
        if committed != draft.get_untracked() {
            generation.update_value(|g| *g += 1);
            set_draft.set(committed);
        }
    });

    view! {
        <input
            type="search"
            class="search-box"
            placeholder=placeholder
            prop:value=move || draft.get()
            on:input=move |ev| {
                let text = event_target_value(&ev);
                set_draft.set(text.clone());
                let mine = generation.with_value(|g| g + 1);
                generation.set_value(mine);
                spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(DEBOUNCE_MS).await;
                    if generation.get_value() == mine {
                        on_commit.run(text);
                    }
                });
            }
        />
    }
}
