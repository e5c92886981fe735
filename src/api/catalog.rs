//! Catalog Endpoints
//!
//! Search, taxonomy, statistics and the liveness probe.

use super::{ApiClient, ApiError};
use crate::models::{CategoryList, ClothingItem, Health, Stats};

impl ApiClient {
    /// Server-side search by free text
    pub async fn search(&self, query: &str) -> Result<Vec<ClothingItem>, ApiError> {
        let request = self
            .authorized(self.http.get(self.url("/search")))
            .query(&[("query", query)]);
        self.send_json(request).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let list: CategoryList = self.send_json(self.authorized(self.http.get(self.url("/categories")))).await?;
        Ok(list.categories)
    }

    pub async fn stats(&self) -> Result<Stats, ApiError> {
        self.send_json(self.authorized(self.http.get(self.url("/stats")))).await
    }

    /// Unauthenticated liveness probe
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.send_json(self.http.get(self.url("/health"))).await
    }
}
