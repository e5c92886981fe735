//! Auth Endpoints
//!
//! Exchange a Google ID token for an application session token. This route
//! lives under its own prefix, separate from the item API version.

use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::AuthResponse;

#[derive(Serialize)]
struct GoogleAuthRequest<'a> {
    token: &'a str,
}

impl ApiClient {
    pub async fn google_login(&self, credential: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/auth/google", self.config.auth_base());
        let request = self.http.post(url).json(&GoogleAuthRequest { token: credential });
        let response: AuthResponse = self.send_json(request).await?;
        log::info!("[API] Signed in as {}", response.user.email);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_server::{client_for, serve_once};
    use crate::session::{AuthStore, MemoryStorage};

    #[tokio::test]
    async fn test_google_login_exchange() {
        let body = r#"{"token":"app.jwt.token","user":{"id":"u1","email":"ada@example.com","name":"Ada","picture":null}}"#;
        let (base, server) = serve_once("200 OK", body);
        let client = client_for(&base, AuthStore::new(MemoryStorage::default()));

        let auth = client.google_login("google-credential").await.unwrap();
        assert_eq!(auth.token, "app.jwt.token");
        assert_eq!(auth.user.name, "Ada");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/auth/google "));
        assert!(request.ends_with(r#"{"token":"google-credential"}"#));
    }

    #[tokio::test]
    async fn test_rejected_credential() {
        let (base, server) = serve_once("401 Unauthorized", r#"{"detail":"Invalid Google token"}"#);
        let client = client_for(&base, AuthStore::new(MemoryStorage::default()));

        let err = client.google_login("bad").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Google token");
        server.join().unwrap();
    }
}
