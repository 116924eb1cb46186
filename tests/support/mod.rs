#![allow(dead_code)]

use std::time::Duration;

use qiita_connect::api::ApiClient;
use qiita_connect::auth::{AccessToken, AuthClient};
use qiita_connect::config::{AppConfig, ClientCredentials};
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

pub fn test_config() -> AppConfig {
    AppConfig::new(ClientCredentials::new(CLIENT_ID, CLIENT_SECRET))
        .with_http_timeout(Duration::from_secs(2))
}

pub fn auth_client(server: &MockServer) -> AuthClient {
    AuthClient::new(&test_config())
        .expect("build auth client")
        .with_authorize_url(format!("{}/oauth/authorize", server.uri()))
        .with_token_url(format!("{}/access_tokens", server.uri()))
}

pub fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&test_config())
        .expect("build api client")
        .with_base_url(server.uri())
}

pub fn token(secret: &str) -> AccessToken {
    AccessToken::new(secret)
}
