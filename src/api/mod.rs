//! Authenticated resource calls against the provider API.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::auth::AccessToken;
use crate::config::AppConfig;
use crate::error::{FlowError, Result};
use crate::util::urlencoded;

/// Pagination window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
        }
    }
}

/// The authenticated user's profile.
///
/// `id` is required; every other profile field the provider returns is kept
/// as-is in `profile`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// An article the authenticated user has stocked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockedArticle {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bearer-authenticated client for the provider's resource endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| FlowError::Configuration(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.endpoints.api_base_url.clone(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch the authenticated user's profile.
    ///
    /// Fails with [`FlowError::Unauthorized`] when the token is rejected and
    /// [`FlowError::MalformedResponse`] when the response lacks an `id`.
    pub async fn fetch_authenticated_user(&self, token: &AccessToken) -> Result<UserIdentity> {
        let url = format!("{}/authenticated_user", self.base_url);
        debug!("fetching authenticated user");
        let body = self.get_authorized(&url, &[], token).await?;
        let identity: UserIdentity = serde_json::from_str(&body).map_err(|_| {
            FlowError::MalformedResponse(
                "authenticated_user response lacked an `id` field".to_string(),
            )
        })?;
        Ok(identity)
    }

    /// List articles the given user has stocked.
    pub async fn fetch_user_stocks(
        &self,
        token: &AccessToken,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<StockedArticle>> {
        if user_id.is_empty() {
            return Err(FlowError::InvalidRequest(
                "user_id must not be empty".to_string(),
            ));
        }
        let url = format!("{}/users/{}/stocks", self.base_url, urlencoded(user_id));
        debug!(user_id, page = page.page, per_page = page.per_page, "fetching stocks");
        let query = [
            ("page", page.page.to_string()),
            ("per_page", page.per_page.to_string()),
        ];
        let body = self.get_authorized(&url, &query, token).await?;
        let stocks: Vec<StockedArticle> = serde_json::from_str(&body).map_err(|_| {
            FlowError::MalformedResponse("stocks response was not an article list".to_string())
        })?;
        Ok(stocks)
    }

    async fn get_authorized(
        &self,
        url: &str,
        query: &[(&str, String)],
        token: &AccessToken,
    ) -> Result<String> {
        let mut request = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", token.secret()));
        if !query.is_empty() {
            request = request.query(query);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(url, "access token rejected");
            return Err(FlowError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(url, status = status.as_u16(), "resource call failed");
            return Err(FlowError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.text().await?)
    }
}
