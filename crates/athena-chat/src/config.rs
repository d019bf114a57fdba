//! API configuration
//!
//! Where the chat backend lives and what limits the interface applies.
//! The base URL can be overridden from the page's config panel; the
//! override is persisted under [`API_URL_KEY`] and re-applied at load.

use serde::{Deserialize, Serialize};

/// Storage key for a user-saved API base URL.
pub const API_URL_KEY: &str = "athena_api_url";

/// Storage key for the opaque conversation blob.
pub const CONVERSATION_KEY: &str = "athena_conversation";

/// Connection settings for the chat API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the athena-orchestrator server
    pub base_url: String,
    /// Hard cap on outgoing message length, in characters
    pub max_message_length: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://10.0.33.97:8001".to_string(),
            max_message_length: 2000,
        }
    }
}

impl ApiConfig {
    /// Join the base URL with an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Apply a saved override, ignoring empty values.
    pub fn apply_saved_url(&mut self, saved: Option<String>) {
        if let Some(url) = saved {
            let url = url.trim();
            if !url.is_empty() {
                self.base_url = url.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint("/chat"), "http://10.0.33.97:8001/chat");
        assert_eq!(config.endpoint("healthz"), "http://10.0.33.97:8001/healthz");

        let mut trailing = ApiConfig::default();
        trailing.base_url = "http://localhost:8001/".to_string();
        assert_eq!(trailing.endpoint("/sessions"), "http://localhost:8001/sessions");
    }

    #[test]
    fn test_saved_url_override() {
        let mut config = ApiConfig::default();
        config.apply_saved_url(Some("http://localhost:9000".to_string()));
        assert_eq!(config.base_url, "http://localhost:9000");

        config.apply_saved_url(Some("   ".to_string()));
        assert_eq!(config.base_url, "http://localhost:9000");

        config.apply_saved_url(None);
        assert_eq!(config.base_url, "http://localhost:9000");
    }
}
