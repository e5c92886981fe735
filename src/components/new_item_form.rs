//! New Item Form Component
//!
//! Name, category, notes and an optional photo. Picking a photo previews it
//! and asks the server for a palette and a clothing-type suggestion; results
//! for a photo that has since been replaced are dropped.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::categories::ItemCategory;
use crate::components::category_selector::CategorySelector;
use crate::components::color_palette::ColorPalette;
use crate::context::AppContext;
use crate::files::{picked_file, read_image, reset_input};
use crate::store::{store_set_flash, use_wardrobe_store};
use crate::wardrobe::{
    classify_image, extract_palette, submit_draft, suggest_category, ImageOutcome, ItemDraft, SelectionTracker,
    SubmitGuard,
};

#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_wardrobe_store();

    let draft = RwSignal::new(ItemDraft::default());
    let (preview, set_preview) = signal(None::<String>);
    let (analyzing, set_analyzing) = signal(false);
    let (suggestion, set_suggestion) = signal(None::<String>);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let tracker = StoredValue::new(SelectionTracker::default());
    let guard = StoredValue::new(SubmitGuard::default());

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        reset_input(&ev);
        let generation = tracker.with_value(|t| t.begin());
        set_suggestion.set(None);
        set_error.set(None);
        spawn_local(async move {
            let image = match read_image(&file).await {
                Ok(image) => image,
                Err(e) => {
                    log::error!("[FORM] {}", e);
                    set_error.set(Some(e));
                    return;
                }
            };
            if !tracker.with_value(|t| t.is_current(generation)) {
                return;
            }
            set_preview.set(Some(image.data_url()));
            draft.update(|d| d.set_image(Some(image.clone())));
            set_analyzing.set(true);

            let api = ctx.api();
            let colors = extract_palette(&api, &image).await;
            if let Some(colors) = tracker.with_value(|t| t.accept(generation, colors)) {
                draft.update(|d| d.colors = colors);
            }

            let label = classify_image(&api, &image).await;
            if let Some(label) = tracker.with_value(|t| t.accept(generation, label)).flatten() {
                if let Some(category) = suggest_category(draft.with_untracked(|d| d.category), &label) {
                    draft.update(|d| d.category = category);
                }
                set_suggestion.set(Some(label));
            }

            if tracker.with_value(|t| t.is_current(generation)) {
                set_analyzing.set(false);
            }
        });
    };

    let clear_image = move |_| {
        tracker.with_value(|t| t.begin());
        draft.update(|d| d.set_image(None));
        set_preview.set(None);
        set_suggestion.set(None);
        set_analyzing.set(false);
    };

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let snapshot = draft.get_untracked();
        let guard = guard.get_value();
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match submit_draft(&ctx.api(), &snapshot, &guard).await {
                Ok(outcome) => {
                    match outcome.image {
                        ImageOutcome::Failed(e) => {
                            set_error.set(Some(format!("Item saved, but the image upload failed: {}", e)));
                        }
                        _ => store_set_flash(&store, format!("Added {}", snapshot.name.trim())),
                    }
                    tracker.with_value(|t| t.begin());
                    draft.set(ItemDraft::default());
                    set_preview.set(None);
                    set_suggestion.set(None);
                    set_analyzing.set(false);
                    ctx.reload();
                }
                Err(e) => {
                    log::warn!("[FORM] Submit rejected: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(guard.is_busy());
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <h2>"Add an item"</h2>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="Item name"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                />
            </div>
            <CategorySelector
                category=Signal::derive(move || draft.with(|d| d.category))
                on_change=move |category: ItemCategory| draft.update(|d| d.category = category)
            />
            {move || suggestion.get().map(|label| view! {
                <div class="suggestion">{format!("Looks like: {}", label)}</div>
            })}
            <textarea
                placeholder="Notes (optional)"
                prop:value=move || draft.with(|d| d.notes.clone())
                on:input=move |ev| draft.update(|d| d.notes = event_target_value(&ev))
            ></textarea>
            <div class="image-picker">
                <input type="file" accept="image/*" on:change=on_file />
                {move || preview.get().map(|src| view! {
                    <div class="image-preview">
                        <img src=src alt="Preview" />
                        <button type="button" class="cancel-btn" on:click=clear_image>"Remove"</button>
                    </div>
                })}
                <Show when=move || analyzing.get()>
                    <span class="analyzing">"Analyzing image..."</span>
                </Show>
                <ColorPalette colors=Signal::derive(move || draft.with(|d| d.colors.clone())) />
            </div>
            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <button type="submit" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Add item" }}
            </button>
        </form>
    }
}
