//! Item Card Component
//!
//! One wardrobe item in the grid, with inline edit and two-step delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::color_palette::ColorPalette;
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::components::item_editor::ItemEditor;
use crate::context::AppContext;
use crate::models::ClothingItem;
use crate::store::{store_action_failed, store_set_flash, use_wardrobe_store};
use crate::wardrobe::{delete_item, Confirmation, DeleteOutcome};

/// Image, or a placeholder when there is none or it fails to load
#[component]
fn ItemImage(src: Option<String>, alt: String) -> impl IntoView {
    let (broken, set_broken) = signal(false);
    let has_image = src.is_some();

    view! {
        <Show
            when=move || has_image && !broken.get()
            fallback=|| view! { <div class="item-image placeholder">"No image"</div> }
        >
            <img
                class="item-image"
                src=src.clone()
                alt=alt.clone()
                loading="lazy"
                on:error=move |_| set_broken.set(true)
            />
        </Show>
    }
}

#[component]
pub fn ItemCard(item: ClothingItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_wardrobe_store();

    let (editing, set_editing) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let id = item.id.clone().unwrap_or_default();
    let image_url = item.image_url(ctx.api().config());
    let title = item.title().to_string();
    let category_label = format!("{} · {}", item.category.wardrobe().label(), item.category.sub_label());
    let notes = item.notes.clone();
    let colors = item.colors.clone();
    let stored_item = StoredValue::new(item);

    let on_decide = move |confirmation: Confirmation| {
        let id = id.clone();
        set_deleting.set(true);
        spawn_local(async move {
            match delete_item(&ctx.api(), &id, confirmation).await {
                Ok(DeleteOutcome::Deleted) => {
                    log::info!("[LIST] Deleted {}", id);
                    store_set_flash(&store, "Item deleted");
                    ctx.reload();
                }
                Ok(DeleteOutcome::Cancelled) => {}
                Err(e) => {
                    log::error!("[LIST] Delete of {} failed: {}", id, e);
                    store_action_failed(&store, e.to_string());
                }
            }
            set_deleting.set(false);
        });
    };

    view! {
        <div class="item-card" class:deleting=move || deleting.get()>
            <Show
                when=move || editing.get()
                fallback=move || {
                    let notes = notes.clone();
                    let colors = colors.clone();
                    view! {
                        <ItemImage src=image_url.clone() alt=title.clone() />
                        <div class="item-body">
                            <div class="item-header">
                                <h3 class="item-title">{title.clone()}</h3>
                                <div class="item-actions">
                                    <button
                                        class="edit-btn"
                                        title="Edit item"
                                        on:click=move |_| set_editing.set(true)
                                    >
                                        "✎"
                                    </button>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        on_decide=on_decide.clone()
                                        disabled=deleting
                                    />
                                </div>
                            </div>
                            <div class="item-category">{category_label.clone()}</div>
                            {notes.map(|n| view! { <p class="item-notes">{n}</p> })}
                            <ColorPalette colors=colors />
                        </div>
                    }
                }
            >
                <ItemEditor item=stored_item.get_value() on_close=move |_| set_editing.set(false) />
            </Show>
        </div>
    }
}
