//! Wardrobe API Client
//!
//! Thin REST client for the wardrobe backend, organized by domain. Every call
//! is a single round trip: no retries, no caching. Authenticated calls carry
//! the session's bearer token when there is one.

mod auth;
mod catalog;
mod items;
mod media;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::categories::ItemCategory;
use crate::config::AppConfig;
use crate::models::{ClothingItem, ColorEntry, ImageFile, ItemPatch, NewItem};
use crate::session::AuthStore;

/// Characters escaped in a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success status; `message` is the server's `detail` when present
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Invalid upload: {0}")]
    Multipart(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Error for a non-success response, preferring the body's string `detail`
pub fn error_for_status(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| match b.detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| format!("HTTP error! status: {}", status));
    ApiError::Http { status, message }
}

/// Percent-encode one path segment
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// REST client bound to one backend and one session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<AppConfig>,
    auth: AuthStore,
}

impl ApiClient {
    pub fn new(config: AppConfig, auth: AuthStore) -> Self {
        Self::with_http(reqwest::Client::new(), config, auth)
    }

    pub fn with_http(http: reqwest::Client, config: AppConfig, auth: AuthStore) -> Self {
        Self {
            http,
            config: Arc::new(config),
            auth,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base(), path)
    }

    /// Attach the bearer token if the session has one
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.get_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = error_for_status(status.as_u16(), &body);
        log::warn!("[API] Request failed: {}", err);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }
}

/// Operations the wardrobe views depend on
#[async_trait(?Send)]
pub trait WardrobeApi {
    async fn list_items(&self) -> Result<Vec<ClothingItem>, ApiError>;
    async fn list_by_category(&self, category: ItemCategory) -> Result<Vec<ClothingItem>, ApiError>;
    async fn search(&self, query: &str) -> Result<Vec<ClothingItem>, ApiError>;
    async fn create_item(&self, item: &NewItem) -> Result<String, ApiError>;
    async fn update_item(&self, id: &str, patch: &ItemPatch) -> Result<(), ApiError>;
    async fn delete_item(&self, id: &str) -> Result<(), ApiError>;
    async fn upload_image(&self, id: &str, file: &ImageFile) -> Result<(), ApiError>;
    async fn extract_colors(&self, file: &ImageFile) -> Result<Vec<ColorEntry>, ApiError>;
    async fn classify(&self, file: &ImageFile) -> Result<String, ApiError>;
}

#[async_trait(?Send)]
impl WardrobeApi for ApiClient {
    async fn list_items(&self) -> Result<Vec<ClothingItem>, ApiError> {
        ApiClient::list_items(self).await
    }

    async fn list_by_category(&self, category: ItemCategory) -> Result<Vec<ClothingItem>, ApiError> {
        ApiClient::list_by_category(self, category).await
    }

    async fn search(&self, query: &str) -> Result<Vec<ClothingItem>, ApiError> {
        ApiClient::search(self, query).await
    }

    async fn create_item(&self, item: &NewItem) -> Result<String, ApiError> {
        ApiClient::create_item(self, item).await.map(|created| created.id)
    }

    async fn update_item(&self, id: &str, patch: &ItemPatch) -> Result<(), ApiError> {
        ApiClient::update_item(self, id, patch).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete_item(self, id).await
    }

    async fn upload_image(&self, id: &str, file: &ImageFile) -> Result<(), ApiError> {
        ApiClient::upload_image(self, id, file).await
    }

    async fn extract_colors(&self, file: &ImageFile) -> Result<Vec<ColorEntry>, ApiError> {
        ApiClient::extract_colors(self, file).await
    }

    async fn classify(&self, file: &ImageFile) -> Result<String, ApiError> {
        ApiClient::classify(self, file).await
    }
}
