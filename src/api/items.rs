//! Item Endpoints
//!
//! CRUD calls for wardrobe items.

use super::{segment, ApiClient, ApiError};
use crate::categories::ItemCategory;
use crate::models::{ClothingItem, CreatedItem, ItemPatch, NewItem};

impl ApiClient {
    pub async fn list_items(&self) -> Result<Vec<ClothingItem>, ApiError> {
        let request = self.authorized(self.http.get(self.url("/items")));
        self.send_json(request).await
    }

    pub async fn get_item(&self, id: &str) -> Result<ClothingItem, ApiError> {
        let url = self.url(&format!("/items/{}", segment(id)));
        self.send_json(self.authorized(self.http.get(url))).await
    }

    pub async fn create_item(&self, item: &NewItem) -> Result<CreatedItem, ApiError> {
        let request = self.authorized(self.http.post(self.url("/items")).json(item));
        let created: CreatedItem = self.send_json(request).await?;
        log::info!("[API] Created item {}", created.id);
        Ok(created)
    }

    pub async fn update_item(&self, id: &str, patch: &ItemPatch) -> Result<(), ApiError> {
        let url = self.url(&format!("/items/{}", segment(id)));
        self.send_empty(self.authorized(self.http.put(url).json(patch))).await
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/items/{}", segment(id)));
        self.send_empty(self.authorized(self.http.delete(url))).await?;
        log::info!("[API] Deleted item {}", id);
        Ok(())
    }

    /// Items of one sub-category. The route matches on the sub-category key
    /// alone, which repeats across wardrobe categories, so the response is
    /// narrowed to the requested parent here.
    pub async fn list_by_category(&self, category: ItemCategory) -> Result<Vec<ClothingItem>, ApiError> {
        let url = self.url(&format!("/items/category/{}", category.sub_key()));
        let mut items: Vec<ClothingItem> = self.send_json(self.authorized(self.http.get(url))).await?;
        items.retain(|item| item.category == category);
        Ok(items)
    }
}
