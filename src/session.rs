//! Session Store
//!
//! Owns the application bearer token. The raw token lives in browser session
//! storage; the decoded identity lives in a signal so views can react to
//! login and logout. Created once in `App` and handed out through context.

use std::sync::{Arc, Mutex};

use base64::Engine;
use leptos::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Session storage key holding the raw token
pub const TOKEN_KEY: &str = "auth_token";

/// Identity decoded from the token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    #[serde(alias = "sub")]
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.email)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not valid base64: {0}")]
    Encoding(String),
    #[error("token payload is not valid JSON: {0}")]
    Payload(String),
}

/// Decode the payload segment of a JWT. The signature is not checked; the
/// server does that on every request.
pub fn decode_identity(token: &str) -> Result<Identity, SessionError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(SessionError::Malformed),
    };
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::Encoding(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::Payload(e.to_string()))
}

/// Expiry check at a given time. No `exp` claim counts as expired.
pub fn is_expired_at(token: &str, now_secs: i64) -> bool {
    match decode_identity(token) {
        Ok(Identity { exp: Some(exp), .. }) => exp < now_secs,
        _ => true,
    }
}

/// Current time in whole seconds
pub fn now_secs() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// Where the raw token is persisted
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// `window.sessionStorage`, scoped to the current tab
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok().flatten()
    }
}

impl TokenStorage for BrowserSessionStorage {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn store(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(TOKEN_KEY, token) {
                    log::error!("[SESSION] Failed to persist token: {:?}", e);
                }
            }
            None => log::warn!("[SESSION] Session storage unavailable, token kept in memory only"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// In-memory storage, used off the browser and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn with_token(token: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.store(&token.into());
        storage
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn store(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

type SignOutHook = Arc<dyn Fn() + Send + Sync>;

/// Reactive auth state plus its persistence
#[derive(Clone)]
pub struct AuthStore {
    identity: RwSignal<Option<Identity>>,
    storage: Arc<dyn TokenStorage>,
    sign_out_hook: Option<SignOutHook>,
}

impl AuthStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            identity: RwSignal::new(None),
            storage: Arc::new(storage),
            sign_out_hook: None,
        }
    }

    /// Provider callback run on `logout` (e.g. Google's auto-select reset)
    pub fn with_sign_out_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.sign_out_hook = Some(Arc::new(hook));
        self
    }

    /// Restore identity from storage, dropping expired or broken tokens
    pub fn hydrate(&self) {
        let identity = self.get_user_from_token();
        if identity.is_some() {
            log::info!("[SESSION] Restored session from storage");
        }
        self.identity.set(identity);
    }

    /// Reactive identity, `None` when logged out
    pub fn identity(&self) -> Signal<Option<Identity>> {
        self.identity.into()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.with_untracked(|i| i.is_some())
    }

    pub fn save_token(&self, token: &str) {
        self.storage.store(token);
        match decode_identity(token) {
            Ok(identity) => self.identity.set(Some(identity)),
            Err(e) => {
                log::error!("[SESSION] Failed to decode token: {}", e);
                self.identity.set(None);
            }
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.storage.load()
    }

    pub fn remove_token(&self) {
        self.storage.clear();
        self.identity.set(None);
    }

    pub fn logout(&self) {
        self.remove_token();
        if let Some(hook) = &self.sign_out_hook {
            hook();
        }
        log::info!("[SESSION] Logged out");
    }

    pub fn is_token_expired(&self, token: &str) -> bool {
        is_expired_at(token, now_secs())
    }

    /// Stored identity if the token is present and still valid. An expired
    /// token is removed as a side effect.
    pub fn get_user_from_token(&self) -> Option<Identity> {
        let token = self.get_token()?;
        if self.is_token_expired(&token) {
            log::info!("[SESSION] Stored token expired, clearing");
            self.remove_token();
            return None;
        }
        match decode_identity(&token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                log::warn!("[SESSION] Stored token unreadable: {}", e);
                self.remove_token();
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use base64::Engine;

    /// Unsigned JWT with the given JSON payload
    pub fn make_token(payload: serde_json::Value) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        format!(
            "{}.{}.signature",
            engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            engine.encode(payload.to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::make_token;
    use super::*;
    use serde_json::json;

    fn token_with_exp(exp: Option<i64>) -> String {
        let mut payload = json!({"user_id": "u1", "email": "ada@example.com", "name": "Ada"});
        if let Some(exp) = exp {
            payload["exp"] = json!(exp);
        }
        make_token(payload)
    }

    #[test]
    fn test_decode_identity() {
        let identity = decode_identity(&token_with_exp(Some(42))).unwrap();
        assert_eq!(identity.user_id, "u1");
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.display_name(), "Ada");
        assert_eq!(identity.exp, Some(42));
    }

    #[test]
    fn test_decode_accepts_sub_claim() {
        let token = make_token(json!({"sub": "g-1", "email": "b@example.com"}));
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.user_id, "g-1");
        assert_eq!(identity.display_name(), "b@example.com");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_identity("not-a-token"), Err(SessionError::Malformed));
        assert_eq!(decode_identity("a..c"), Err(SessionError::Malformed));
        assert!(matches!(decode_identity("a.!!!.c"), Err(SessionError::Encoding(_))));
        let not_json = format!("a.{}.c", base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("nope"));
        assert!(matches!(decode_identity(&not_json), Err(SessionError::Payload(_))));
    }

    #[test]
    fn test_expiry_is_fail_closed() {
        let now = 1_700_000_000;
        assert!(is_expired_at(&token_with_exp(Some(now - 1)), now));
        assert!(!is_expired_at(&token_with_exp(Some(now + 60)), now));
        assert!(is_expired_at(&token_with_exp(None), now));
        assert!(is_expired_at("garbage", now));
    }

    #[test]
    fn test_save_token_sets_identity() {
        let store = AuthStore::new(MemoryStorage::default());
        let token = token_with_exp(Some(now_secs() + 3600));
        store.save_token(&token);

        assert_eq!(store.get_token(), Some(token));
        assert!(store.is_authenticated());
        assert_eq!(store.identity().get_untracked().unwrap().email, "ada@example.com");
    }

    #[test]
    fn test_save_malformed_token_resets_identity() {
        let store = AuthStore::new(MemoryStorage::default());
        store.save_token(&token_with_exp(Some(now_secs() + 3600)));
        store.save_token("broken");

        assert!(!store.is_authenticated());
        // The raw value is still persisted; hydration will discard it
        assert_eq!(store.get_token().as_deref(), Some("broken"));
    }

    #[test]
    fn test_get_user_without_token() {
        let storage = MemoryStorage::default();
        let store = AuthStore::new(storage.clone());
        assert_eq!(store.get_user_from_token(), None);
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_get_user_with_expired_token_clears_storage() {
        let storage = MemoryStorage::with_token(token_with_exp(Some(now_secs() - 10)));
        let store = AuthStore::new(storage.clone());

        assert_eq!(store.get_user_from_token(), None);
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_get_user_without_exp_clears_storage() {
        let storage = MemoryStorage::with_token(token_with_exp(None));
        let store = AuthStore::new(storage.clone());

        assert_eq!(store.get_user_from_token(), None);
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_hydrate_restores_valid_session() {
        let storage = MemoryStorage::with_token(token_with_exp(Some(now_secs() + 3600)));
        let store = AuthStore::new(storage);
        store.hydrate();
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_hydrate_discards_garbage() {
        let storage = MemoryStorage::with_token("garbage");
        let store = AuthStore::new(storage.clone());
        store.hydrate();
        assert!(!store.is_authenticated());
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_logout_clears_and_runs_hook() {
        let called = Arc::new(Mutex::new(false));
        let flag = called.clone();
        let storage = MemoryStorage::with_token(token_with_exp(Some(now_secs() + 3600)));
        let store = AuthStore::new(storage.clone()).with_sign_out_hook(move || {
            *flag.lock().unwrap() = true;
        });
        store.hydrate();
        store.logout();

        assert!(!store.is_authenticated());
        assert_eq!(storage.load(), None);
        assert!(*called.lock().unwrap());
    }
}
