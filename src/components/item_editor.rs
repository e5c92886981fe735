//! Item Editor Component
//!
//! Inline edit form shown in place of a card. Only changed fields are sent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::categories::ItemCategory;
use crate::components::category_selector::CategorySelector;
use crate::context::AppContext;
use crate::models::ClothingItem;
use crate::store::{store_set_flash, use_wardrobe_store};
use crate::wardrobe::{save_edit, EditOutcome, ItemDraft};

#[component]
pub fn ItemEditor(item: ClothingItem, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_wardrobe_store();

    let original = StoredValue::new(item.clone());
    let draft = RwSignal::new(ItemDraft::from_item(&item));
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Diff against the server's current copy
    if let Some(id) = item.id.clone() {
        spawn_local(async move {
            match ctx.api().get_item(&id).await {
                Ok(fresh) => {
                    let loaded = original.get_value();
                    draft.update(|d| {
                        if !d.refresh_from(&loaded, &fresh) {
                            log::debug!("[EDIT] Keeping edits to {} over refreshed copy", id);
                        }
                    });
                    original.set_value(fresh);
                }
                Err(e) => {
                    log::warn!("[EDIT] Could not refresh {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    }

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        set_error.set(None);
        let original = original.get_value();
        let edited = draft.get_untracked();
        spawn_local(async move {
            match save_edit(&ctx.api(), &original, &edited).await {
                Ok(EditOutcome::Saved) => {
                    store_set_flash(&store, "Changes saved!");
                    on_close.run(());
                    ctx.reload();
                }
                Ok(EditOutcome::NoChanges) => {
                    store_set_flash(&store, "No changes to save.");
                    on_close.run(());
                }
                Err(e) => {
                    log::error!("[EDIT] Save failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="item-editor" on:submit=save>
            <input
                type="text"
                class="item-editor-name"
                placeholder="Item name"
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <CategorySelector
                category=Signal::derive(move || draft.with(|d| d.category))
                on_change=move |category: ItemCategory| draft.update(|d| d.category = category)
            />
            <textarea
                class="item-editor-notes"
                placeholder="Notes"
                prop:value=move || draft.with(|d| d.notes.clone())
                on:input=move |ev| draft.update(|d| d.notes = event_target_value(&ev))
            ></textarea>
            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <div class="item-editor-actions">
                <button type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
