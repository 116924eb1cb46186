//! Startup configuration, loaded once into an immutable struct.

use std::fmt;
use std::time::Duration;

use crate::error::{FlowError, Result};

const ENV_CLIENT_ID: &str = "QIITA_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "QIITA_CLIENT_SECRET";
const ENV_AUTHORIZE_URL: &str = "QIITA_AUTHORIZE_URL";
const ENV_TOKEN_URL: &str = "QIITA_TOKEN_URL";
const ENV_API_BASE_URL: &str = "QIITA_API_BASE_URL";
const ENV_HTTP_TIMEOUT_SECS: &str = "QIITA_HTTP_TIMEOUT_SECS";

const DEFAULT_AUTHORIZE_URL: &str = "https://qiita.com/api/v2/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://qiita.com/api/v2/access_tokens";
const DEFAULT_API_BASE_URL: &str = "https://qiita.com/api/v2";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth client credentials registered with the provider.
///
/// The secret is only reachable through [`client_secret`](Self::client_secret)
/// and never appears in `Debug` output.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .finish()
    }
}

/// Provider endpoint URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub api_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Immutable application configuration.
///
/// Built once at startup (see [`from_env`](Self::from_env)) and passed by
/// reference to the flow clients.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: ClientCredentials,
    pub endpoints: Endpoints,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `QIITA_CLIENT_ID` and `QIITA_CLIENT_SECRET` are required; endpoint
    /// URLs and the HTTP timeout may be overridden with
    /// `QIITA_AUTHORIZE_URL`, `QIITA_TOKEN_URL`, `QIITA_API_BASE_URL`, and
    /// `QIITA_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let client_id = require_env(ENV_CLIENT_ID)?;
        let client_secret = require_env(ENV_CLIENT_SECRET)?;
        let mut config = Self::new(ClientCredentials::new(client_id, client_secret));

        if let Ok(url) = std::env::var(ENV_AUTHORIZE_URL) {
            config.endpoints.authorize_url = url;
        }
        if let Ok(url) = std::env::var(ENV_TOKEN_URL) {
            config.endpoints.token_url = url;
        }
        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            config.endpoints.api_base_url = url;
        }
        if let Ok(raw) = std::env::var(ENV_HTTP_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                FlowError::Configuration(format!(
                    "{ENV_HTTP_TIMEOUT_SECS} must be an integer number of seconds, got {raw:?}"
                ))
            })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| FlowError::Configuration(format!("missing environment variable {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_client_secret() {
        let credentials = ClientCredentials::new("public-id", "super-secret");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("public-id"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn app_config_debug_redacts_client_secret() {
        let config = AppConfig::new(ClientCredentials::new("public-id", "super-secret"));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn default_endpoints_point_at_provider() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.authorize_url, "https://qiita.com/api/v2/oauth/authorize");
        assert_eq!(endpoints.token_url, "https://qiita.com/api/v2/access_tokens");
        assert_eq!(endpoints.api_base_url, "https://qiita.com/api/v2");
    }

    #[test]
    fn default_http_timeout_is_ten_seconds() {
        let config = AppConfig::new(ClientCredentials::new("id", "secret"));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn builders_override_defaults() {
        let config = AppConfig::new(ClientCredentials::new("id", "secret"))
            .with_http_timeout(Duration::from_secs(3));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }
}
