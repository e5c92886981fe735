//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::categories::WardrobeCategory;
use crate::models::{ClothingItem, Stats};
use crate::wardrobe::{ListSource, ListState};

/// Global view state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct WardrobeState {
    /// Last fetched items and their load status
    pub list: ListState,
    /// Search box contents
    pub query: String,
    /// Wardrobe chip, applied to the cached list
    pub wardrobe: Option<WardrobeCategory>,
    /// Server query behind the cached list
    pub source: ListSource,
    /// Short-lived success message above the grid
    pub flash: Option<String>,
    pub stats: Option<Stats>,
    /// Sub-category keys from `/categories`
    pub server_sub_keys: Vec<String>,
}

/// Type alias for the store
pub type WardrobeStore = Store<WardrobeState>;

/// Get the store from context
pub fn use_wardrobe_store() -> WardrobeStore {
    expect_context::<WardrobeStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Items matching the current chip and query, in server order
pub fn store_visible_items(store: &WardrobeStore) -> Vec<ClothingItem> {
    let query = store.query().get();
    let wardrobe = store.wardrobe().get();
    store.source().with(|source| store.list().with(|list| list.visible(&query, wardrobe, source)))
}

/// Pick a wardrobe chip. A sub-category narrowing from another wardrobe no
/// longer applies and falls back to the full list.
pub fn store_select_wardrobe(store: &WardrobeStore, wardrobe: Option<WardrobeCategory>) {
    store.wardrobe().set(wardrobe);
    let stale = store
        .source()
        .with_untracked(|s| matches!(s, ListSource::SubCategory(c) if Some(c.wardrobe()) != wardrobe));
    if stale {
        store.source().set(ListSource::All);
    }
}

pub fn store_action_failed(store: &WardrobeStore, message: impl Into<String>) {
    store.list().write().action_failed(message);
}

pub fn store_set_flash(store: &WardrobeStore, message: impl Into<String>) {
    store.flash().set(Some(message.into()));
}
