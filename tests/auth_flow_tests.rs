mod support;

use std::time::Duration;

use pretty_assertions::assert_eq;
use qiita_connect::auth::{AuthorizationCode, Scope};
use qiita_connect::config::{AppConfig, ClientCredentials};
use qiita_connect::error::FlowError;
use qiita_connect::prelude::AuthClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{auth_client, CLIENT_ID, CLIENT_SECRET};

#[tokio::test]
async fn exchange_success_returns_token_and_granted_scopes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_tokens"))
        .and(body_json(json!({
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
            "code": "code-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "client_id": CLIENT_ID,
            "scopes": ["read_qiita"],
            "token": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client(&server);
    let grant = auth
        .exchange_code(AuthorizationCode::new("code-1"))
        .await
        .expect("exchange");

    assert_eq!(grant.token.secret(), "abc123");
    assert_eq!(grant.scopes, vec!["read_qiita".to_string()]);
}

#[tokio::test]
async fn exchange_rejection_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_tokens"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message": "invalid code"}"#),
        )
        .mount(&server)
        .await;

    let auth = auth_client(&server);
    let err = auth
        .exchange_code(AuthorizationCode::new("used-code"))
        .await
        .unwrap_err();

    match err {
        FlowError::AuthExchange { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid code"));
        }
        other => panic!("expected AuthExchange, got {other:?}"),
    }
}

#[tokio::test]
async fn exchange_response_without_token_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "client_id": CLIENT_ID,
            "scopes": ["read_qiita"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client(&server);
    let err = auth
        .exchange_code(AuthorizationCode::new("code-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::MalformedResponse(_)));
}

#[tokio::test]
async fn exchange_timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_tokens"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "too-late" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = AppConfig::new(ClientCredentials::new(CLIENT_ID, CLIENT_SECRET))
        .with_http_timeout(Duration::from_millis(200));
    let auth = AuthClient::new(&config)
        .expect("build auth client")
        .with_token_url(format!("{}/access_tokens", server.uri()));

    let err = auth
        .exchange_code(AuthorizationCode::new("code-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::Network(_)));
}

#[tokio::test]
async fn authorization_url_round_trips_every_scope_combination_order() {
    let server = MockServer::start().await;
    let auth = auth_client(&server);

    let selections: [&[Scope]; 3] = [
        &[Scope::ReadQiita],
        &[Scope::WriteQiitaTeam, Scope::ReadQiitaTeam],
        &[
            Scope::WriteQiita,
            Scope::ReadQiita,
            Scope::WriteQiitaTeam,
            Scope::ReadQiitaTeam,
        ],
    ];
    for selection in selections {
        let request = auth
            .build_authorization_url(CLIENT_ID, selection)
            .expect("build url");
        let scope_param = request
            .url
            .split('&')
            .find_map(|pair| pair.strip_prefix("scope="))
            .expect("scope param");
        let reconstructed: Vec<Scope> = scope_param
            .split('+')
            .map(|s| s.parse().expect("known scope"))
            .collect();
        assert_eq!(reconstructed, selection.to_vec());
    }
}
