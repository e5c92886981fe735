//! Category Selector Component
//!
//! Wardrobe category buttons plus a sub-category dropdown. Switching the
//! wardrobe category resets the sub-category to that category's first entry.

use leptos::prelude::*;

use crate::categories::{ItemCategory, WardrobeCategory};

#[component]
pub fn CategorySelector(
    #[prop(into)] category: Signal<ItemCategory>,
    #[prop(into)] on_change: Callback<ItemCategory>,
) -> impl IntoView {
    let sub_options = move || category.get().wardrobe().sub_categories();

    view! {
        <div class="category-selector">
            <div class="type-selector-row">
                {WardrobeCategory::ALL.iter().map(|&wardrobe| {
                    let is_selected = move || category.get().wardrobe() == wardrobe;
                    view! {
                        <button
                            type="button"
                            class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                            on:click=move |_| on_change.run(category.get_untracked().with_wardrobe(wardrobe))
                        >
                            {wardrobe.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <select
                class="sub-category-select"
                prop:value=move || category.get().sub_key().to_string()
                on:change=move |ev| {
                    match event_target_value(&ev).parse::<u8>() {
                        Ok(key) => on_change.run(category.get_untracked().with_sub_key(key)),
                        Err(_) => log::warn!("[FORM] Ignoring non-numeric sub-category"),
                    }
                }
            >
                {move || sub_options().into_iter().map(|(key, label)| {
                    view! {
                        <option value=key.to_string() selected=move || category.get().sub_key() == key>
                            {label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
