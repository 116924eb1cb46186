//! Authorization-URL construction and the code-for-token exchange.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::request::{AuthRequest, StateToken};
use crate::auth::scope::{join_scopes, Scope};
use crate::auth::token::{AccessToken, AuthorizationCode, TokenGrant};
use crate::config::{AppConfig, ClientCredentials};
use crate::error::{FlowError, Result};
use crate::util::urlencoded;

/// OAuth2 authorization-code flow client for the provider's auth endpoints.
///
/// Holds the immutable client credentials and an HTTP client with an
/// explicit timeout; a hung provider surfaces as [`FlowError::Network`].
///
/// # Example
/// ```no_run
/// use qiita_connect::auth::{AuthClient, Scope};
/// use qiita_connect::config::{AppConfig, ClientCredentials};
///
/// # fn example() -> qiita_connect::error::Result<()> {
/// let config = AppConfig::new(ClientCredentials::new("id", "secret"));
/// let auth = AuthClient::new(&config)?;
/// let request = auth.build_authorization_url("id", &[Scope::ReadQiita])?;
/// println!("open {}", request.url);
/// # Ok(())
/// # }
/// ```
pub struct AuthClient {
    client: reqwest::Client,
    credentials: ClientCredentials,
    authorize_url: String,
    token_url: String,
}

impl AuthClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| FlowError::Configuration(err.to_string()))?;
        Ok(Self {
            client,
            credentials: config.credentials.clone(),
            authorize_url: config.endpoints.authorize_url.clone(),
            token_url: config.endpoints.token_url.clone(),
        })
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Build the provider authorization URL for a scope selection.
    ///
    /// Generates a fresh anti-forgery state token and embeds the client id,
    /// the `+`-joined scopes in selection order, and the token. No network
    /// call is made.
    pub fn build_authorization_url(
        &self,
        client_id: &str,
        scopes: &[Scope],
    ) -> Result<AuthRequest> {
        if client_id.is_empty() {
            return Err(FlowError::InvalidRequest(
                "client_id must not be empty".to_string(),
            ));
        }
        let state = StateToken::generate();
        let url = format!(
            "{}?client_id={}&scope={}&state={}",
            self.authorize_url,
            urlencoded(client_id),
            join_scopes(scopes),
            state,
        );
        debug!(scope_count = scopes.len(), "built authorization url");
        Ok(AuthRequest {
            client_id: client_id.to_string(),
            scopes: scopes.to_vec(),
            state,
            url,
        })
    }

    /// Exchange a one-time authorization code for an access token.
    ///
    /// Posts `{client_id, client_secret, code}` as JSON to the token
    /// endpoint. Never retried here: a failed exchange may already have
    /// consumed the code, so recovery restarts from
    /// [`build_authorization_url`](Self::build_authorization_url).
    pub async fn exchange_code(&self, code: AuthorizationCode) -> Result<TokenGrant> {
        debug!("exchanging authorization code");
        let resp = self
            .client
            .post(&self.token_url)
            .json(&ExchangeRequest {
                client_id: &self.credentials.client_id,
                client_secret: self.credentials.client_secret(),
                code: code.as_str(),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "token exchange rejected");
            return Err(FlowError::AuthExchange {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let payload: ExchangeResponse = serde_json::from_str(&body).map_err(|_| {
            FlowError::MalformedResponse(
                "token endpoint response lacked a `token` field".to_string(),
            )
        })?;
        debug!(granted_scopes = payload.scopes.len(), "token exchange succeeded");
        Ok(TokenGrant {
            token: AccessToken::new(payload.token),
            scopes: payload.scopes,
        })
    }
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    token: String,
    #[serde(default)]
    scopes: Vec<String>,
}
