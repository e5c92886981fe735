//! Build-time Configuration
//!
//! Endpoints are baked in at compile time from environment variables so the
//! static bundle can be served from any host.

/// Resolved frontend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin, e.g. `http://localhost:8000`
    pub api_url: String,
    /// Classifier service origin
    pub classifier_url: String,
    /// Versioned prefix for item/catalog routes
    pub api_prefix: String,
    /// Prefix for the login exchange (versioned separately)
    pub auth_prefix: String,
    pub google_client_id: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("WARDROBE_API_URL"),
            option_env!("WARDROBE_CLASSIFIER_URL"),
            option_env!("WARDROBE_API_PREFIX"),
            option_env!("WARDROBE_AUTH_PREFIX"),
            option_env!("WARDROBE_GOOGLE_CLIENT_ID"),
            option_env!("WARDROBE_LOG_LEVEL"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        classifier_url: Option<&str>,
        api_prefix: Option<&str>,
        auth_prefix: Option<&str>,
        google_client_id: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            api_url: normalize_origin(api_url.unwrap_or("http://localhost:8000")),
            classifier_url: normalize_origin(classifier_url.unwrap_or("http://localhost:8001")),
            api_prefix: normalize_prefix(api_prefix.unwrap_or("/api/v1")),
            auth_prefix: normalize_prefix(auth_prefix.unwrap_or("/api")),
            google_client_id: google_client_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            log_level: log_level.unwrap_or("info").to_string(),
        }
    }

    /// Base for item and catalog routes
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_url, self.api_prefix)
    }

    /// Base for the auth exchange
    pub fn auth_base(&self) -> String {
        format!("{}{}", self.api_url, self.auth_prefix)
    }

    /// Public URL of a stored image path
    pub fn image_url(&self, path: &str) -> String {
        format!("{}/images/{}", self.api_base(), path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None, None, None)
    }
}

fn normalize_origin(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_localhost() {
        let config = AppConfig::default();
        assert_eq!(config.api_base(), "http://localhost:8000/api/v1");
        assert_eq!(config.auth_base(), "http://localhost:8000/api");
        assert_eq!(config.classifier_url, "http://localhost:8001");
        assert_eq!(config.google_client_id, None);
    }

    #[test]
    fn test_urls_and_prefixes_are_normalized() {
        let config = AppConfig::from_values(
            Some("https://wardrobe.example.com/"),
            None,
            Some("api/v2/"),
            Some(""),
            Some("  "),
            None,
        );
        assert_eq!(config.api_base(), "https://wardrobe.example.com/api/v2");
        assert_eq!(config.auth_base(), "https://wardrobe.example.com");
        assert_eq!(config.google_client_id, None);
    }

    #[test]
    fn test_image_url() {
        let config = AppConfig::default();
        assert_eq!(
            config.image_url("wardrobe/blue_dress"),
            "http://localhost:8000/api/v1/images/wardrobe/blue_dress"
        );
    }
}
