//! Pagination Component
//!
//! Prev/Next plus a windowed page list (first, last, current ± 2) with
//! ellipsis gaps. Hidden entirely when there is a single page.

use leptos::prelude::*;
use listing_core::{page_window, PageLink};

#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] on_select: Callback<usize>,
) -> impl IntoView {
    view! {
        <Show when=move || multi_page(total_pages.get())>
            <nav class="pagination">
                <button
                    class="page-btn page-prev"
                    disabled=move || current.get() <= 1
                    on:click=move |_| on_select.run(current.get().saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                {move || {
                    let active = current.get();
                    page_window(total_pages.get(), active)
                        .into_iter()
                        .map(|link| match link {
                            PageLink::Page(n) => view! {
                                <button
                                    class=if n == active { "page-btn active" } else { "page-btn" }
                                    on:click=move |_| on_select.run(n)
                                >
                                    {n}
                                </button>
                            }
                            .into_any(),
                            PageLink::Gap => view! {
                                <span class="page-gap">"…"</span>
                            }
                            .into_any(),
                        })
                        .collect_view()
                }}
                <button
                    class="page-btn page-next"
                    disabled=move || current.get() >= total_pages.get()
                    on:click=move |_| {
                        let next = (current.get() + 1).min(total_pages.get());
                        on_select.run(next);
                    }
                >
                    "Next ›"
                </button>
            </nav>
        </Show>
    }
}

// A bare `>` comparison in attribute position reads as the tag close
// inside `view!`, so the predicate lives out here.
fn multi_page(total_pages: usize) -> bool {
    total_pages > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_renders_only_for_multiple_pages() {
        assert!(!multi_page(0));
        assert!(!multi_page(1));
        assert!(multi_page(2));
        assert!(multi_page(40));
    }
}
