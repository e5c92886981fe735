//! Item List State
//!
//! Load/delete lifecycle of the item grid. The server owns the data; this is
//! only the last copy we fetched plus what the view should show about it.

use crate::api::{ApiError, WardrobeApi};
use crate::categories::{ItemCategory, WardrobeCategory};
use crate::models::ClothingItem;
use crate::wardrobe::filter::{filter_items, in_wardrobe};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    NotAuthenticated,
    Loading,
    Loaded,
    LoadError(String),
}

/// Which server query filled the cache
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListSource {
    #[default]
    All,
    SubCategory(ItemCategory),
    /// `/search` results for a trimmed query
    Search(String),
}

impl ListSource {
    /// Server search for `query`, or everything when it is blank
    pub fn search(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            ListSource::All
        } else {
            ListSource::Search(query.to_string())
        }
    }
}

/// Fetch the items for `source`
pub async fn load_items<A: WardrobeApi + ?Sized>(api: &A, source: &ListSource) -> Result<Vec<ClothingItem>, ApiError> {
    match source {
        ListSource::All => api.list_items().await,
        ListSource::SubCategory(category) => api.list_by_category(*category).await,
        ListSource::Search(query) => api.search(query).await,
    }
}

/// Cached collection and its fetch status
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    pub phase: ListPhase,
    pub items: Vec<ClothingItem>,
    /// Failure of a user action (delete, save) shown above the grid
    pub action_error: Option<String>,
}

impl ListState {
    /// Start a (re)fetch. Without a session nothing is fetched.
    pub fn begin_load(&mut self, authenticated: bool) -> bool {
        if authenticated {
            self.phase = ListPhase::Loading;
            true
        } else {
            self.phase = ListPhase::NotAuthenticated;
            self.items.clear();
            self.action_error = None;
            false
        }
    }

    pub fn finish_load(&mut self, result: Result<Vec<ClothingItem>, ApiError>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.phase = ListPhase::Loaded;
            }
            Err(e) => {
                log::error!("[LIST] Failed to load items: {}", e);
                self.phase = ListPhase::LoadError(e.to_string());
            }
        }
    }

    /// Record a failed action without touching the items
    pub fn action_failed(&mut self, message: impl Into<String>) {
        self.action_error = Some(message.into());
    }

    pub fn clear_action_error(&mut self) {
        self.action_error = None;
    }

    /// Items to show. Server search results for the current query are
    /// shown as returned, since the server also matches fields the local
    /// filter does not look at.
    pub fn visible(&self, query: &str, wardrobe: Option<WardrobeCategory>, source: &ListSource) -> Vec<ClothingItem> {
        let scoped = in_wardrobe(&self.items, wardrobe);
        match source {
            ListSource::Search(searched) if searched == query.trim() => scoped,
            _ => filter_items(&scoped, query),
        }
    }
}

/// Did the user agree to a destructive action?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Delete an item once the user has confirmed. Declining issues no request.
pub async fn delete_item<A: WardrobeApi + ?Sized>(
    api: &A,
    id: &str,
    confirmation: Confirmation,
) -> Result<DeleteOutcome, ApiError> {
    if confirmation == Confirmation::Declined {
        log::debug!("[LIST] Delete of {} cancelled", id);
        return Ok(DeleteOutcome::Cancelled);
    }
    api.delete_item(id).await?;
    Ok(DeleteOutcome::Deleted)
}
