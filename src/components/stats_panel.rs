//! Stats Panel Component
//!
//! Server total plus a per-category breakdown, refreshed whenever the grid
//! reloads. The server groups by bare sub-category key, which repeats across
//! wardrobe categories, so the breakdown is counted from the loaded items
//! where the full category is known.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::{use_wardrobe_store, WardrobeStateStoreFields};
use crate::wardrobe::{category_breakdown, ListSource};

#[component]
pub fn StatsPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_wardrobe_store();

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if !ctx.is_authenticated() {
            store.stats().set(None);
            return;
        }
        spawn_local(async move {
            match ctx.api().stats().await {
                Ok(stats) => store.stats().set(Some(stats)),
                // The grid reports real failures
                Err(e) => log::warn!("[STATS] Failed to load stats: {}", e),
            }
        });
    });

    let rows = Memo::new(move |_| store.list().with(|list| category_breakdown(&list.items)));
    let heading = move || {
        if store.source().with(|s| *s == ListSource::All) {
            "By category"
        } else {
            "By category (current results)"
        }
    };

    view! {
        {move || store.stats().get().map(|stats| view! {
            <aside class="stats-panel">
                <div class="stats-total">
                    <span class="stats-number">{stats.total_items}</span>
                    <span class="stats-label">"items"</span>
                </div>
                <h4 class="stats-heading">{heading}</h4>
                <ul class="stats-breakdown">
                    {move || rows.get().into_iter().map(|(category, count)| view! {
                        <li>
                            <span class="stats-category">{category}</span>
                            <span class="stats-count">{count}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </aside>
        })}
    }
}
