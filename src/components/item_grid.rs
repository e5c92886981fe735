//! Item Grid Component
//!
//! Search bar, category chips, load status and the card grid. Typing filters
//! the cached list; Enter asks the server's `/search`, and picking a
//! sub-category asks `/items/category/{key}`.

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::categories::{ItemCategory, WardrobeCategory};
use crate::components::item_card::ItemCard;
use crate::context::AppContext;
use crate::store::{store_select_wardrobe, store_visible_items, use_wardrobe_store, WardrobeStateStoreFields};
use crate::wardrobe::{load_items, ListPhase, ListSource, SelectionTracker};

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[component]
fn SearchBar() -> impl IntoView {
    let store = use_wardrobe_store();

    let search_server = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let source = ListSource::search(&store.query().get_untracked());
        log::debug!("[LIST] Server search: {:?}", source);
        store.source().set(source);
    };

    // Editing the query leaves server-search mode
    let leave_search = move || {
        if store.source().with_untracked(|s| matches!(s, ListSource::Search(_))) {
            store.source().set(ListSource::All);
        }
    };

    view! {
        <form class="search-bar" on:submit=search_server>
            <input
                type="search"
                placeholder="Filter by name, category or notes, Enter to search the server..."
                prop:value=move || store.query().get()
                on:input=move |ev| {
                    store.query().set(event_target_value(&ev));
                    leave_search();
                }
            />
            <Show when=move || !store.query().with(|q| q.is_empty())>
                <button
                    type="button"
                    class="clear-btn"
                    title="Clear search"
                    on:click=move |_| {
                        store.query().set(String::new());
                        leave_search();
                    }
                >
                    "×"
                </button>
            </Show>
        </form>
    }
}

/// "All" plus one chip per wardrobe category
#[component]
fn CategoryChips() -> impl IntoView {
    let store = use_wardrobe_store();
    let chip = move |wardrobe: Option<WardrobeCategory>, label: &'static str| {
        view! {
            <button
                class=move || if store.wardrobe().get() == wardrobe { "type-btn small active" } else { "type-btn small" }
                on:click=move |_| store_select_wardrobe(&store, wardrobe)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="type-selector-row category-chips">
            {chip(None, "All")}
            {WardrobeCategory::ALL.iter().map(|&c| chip(Some(c), c.label())).collect_view()}
        </div>
    }
}

/// Sub-category narrowing for the selected chip, limited to what the
/// server lists under `/categories`
#[component]
fn SubCategoryFilter(wardrobe: WardrobeCategory) -> impl IntoView {
    let store = use_wardrobe_store();
    let selected = move || match store.source().get() {
        ListSource::SubCategory(category) => category.sub_key().to_string(),
        _ => String::new(),
    };

    view! {
        <select
            class="sub-category-filter"
            prop:value=selected
            on:change=move |ev| {
                let value = event_target_value(&ev);
                let source = value
                    .parse::<u8>()
                    .ok()
                    .and_then(|sub| ItemCategory::from_keys(wardrobe.key(), sub))
                    .map(ListSource::SubCategory)
                    .unwrap_or_default();
                store.source().set(source);
            }
        >
            <option value="">{format!("All {}", wardrobe.label().to_lowercase())}</option>
            {move || store.server_sub_keys().with(|keys| wardrobe.sub_categories_in(keys)).into_iter().map(|category| {
                let key = category.sub_key().to_string();
                view! { <option value=key.clone() selected=move || selected() == key>{category.sub_label()}</option> }
            }).collect_view()}
        </select>
    }
}

/// Success message that clears itself
#[component]
fn FlashMessage() -> impl IntoView {
    let store = use_wardrobe_store();

    Effect::new(move |_| {
        let Some(message) = store.flash().get() else {
            return;
        };
        spawn_local(async move {
            sleep(FLASH_DURATION).await;
            // A newer message restarts the timer through its own effect run
            if store.flash().get_untracked().as_deref() == Some(message.as_str()) {
                store.flash().set(None);
            }
        });
    });

    view! {
        {move || store.flash().get().map(|msg| view! { <div class="flash-message">{msg}</div> })}
    }
}

#[component]
pub fn ItemGrid() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_wardrobe_store();

    let loads = StoredValue::new(SelectionTracker::default());

    // Refetch on login/logout, source change and explicit reloads
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let source = store.source().get();
        let authenticated = ctx.is_authenticated();
        let generation = loads.with_value(|l| l.begin());
        if !store.list().write().begin_load(authenticated) {
            return;
        }
        spawn_local(async move {
            let api = ctx.api();
            let result = load_items(&api, &source).await;
            let Some(result) = loads.with_value(|l| l.accept(generation, result)) else {
                return;
            };
            if let Ok(items) = &result {
                log::info!("[LIST] Loaded {} items for {:?}", items.len(), source);
            }
            store.list().write().finish_load(result);
        });
    });

    // Sub-categories the server knows about, for the filter dropdown
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if !ctx.is_authenticated() {
            return;
        }
        spawn_local(async move {
            match ctx.api().categories().await {
                Ok(keys) => store.server_sub_keys().set(keys),
                Err(e) => log::warn!("[LIST] Failed to load categories: {}", e),
            }
        });
    });

    let phase = move || store.list().with(|list| list.phase.clone());
    let visible = Memo::new(move |_| store_visible_items(&store));
    let total = move || store.list().with(|list| list.items.len());

    view! {
        <section class="item-grid-section">
            <SearchBar />
            <CategoryChips />
            {move || store.wardrobe().get().map(|wardrobe| view! { <SubCategoryFilter wardrobe=wardrobe /> })}
            <FlashMessage />
            {move || store.list().with(|list| list.action_error.clone()).map(|msg| view! {
                <div class="action-error">
                    <span>{msg}</span>
                    <button class="dismiss-btn" on:click=move |_| store.list().write().clear_action_error()>
                        "×"
                    </button>
                </div>
            })}
            {move || match phase() {
                ListPhase::NotAuthenticated => view! {
                    <p class="grid-status">"Sign in to see your wardrobe."</p>
                }.into_any(),
                ListPhase::Loading if total() == 0 => view! {
                    <p class="grid-status">"Loading items..."</p>
                }.into_any(),
                ListPhase::LoadError(msg) => view! {
                    <div class="grid-status error">
                        <span>{format!("Error loading items: {}", msg)}</span>
                        <button class="retry-btn" on:click=move |_| ctx.reload()>"Retry"</button>
                    </div>
                }.into_any(),
                _ => view! {
                    <p class="grid-count">
                        {move || {
                            let count = visible.with(|v| v.len());
                            let filtering = !store.query().with(|q| q.trim().is_empty())
                                || store.wardrobe().with(Option::is_some)
                                || store.source().with(|s| *s != ListSource::All);
                            if !filtering {
                                format!("{} items in your wardrobe", count)
                            } else {
                                format!("Found {} items", count)
                            }
                        }}
                    </p>
                    <Show
                        when=move || visible.with(|v| !v.is_empty())
                        fallback=move || view! {
                            <p class="grid-empty">
                                {move || if total() == 0 { "No items yet. Add your first one above." } else { "No items match your search." }}
                            </p>
                        }
                    >
                        <div class="item-grid">
                            <For
                                each=move || visible.get()
                                key=|item| (item.id.clone(), item.revision())
                                children=move |item| view! { <ItemCard item=item /> }
                            />
                        </div>
                    </Show>
                }.into_any(),
            }}
        </section>
    }
}
