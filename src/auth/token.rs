//! Credential types produced by the authorization flow.

use std::fmt;

use chrono::{DateTime, Utc};

/// One-time authorization code delivered by the provider redirect.
///
/// Single-use by provider contract: the provider rejects a second exchange
/// of the same code, this crate does not track consumption itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bearer credential for authenticated API calls.
///
/// Held in process memory for the session only, never persisted. `Debug`
/// output redacts the secret.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    issued_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"..")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Result of a successful code exchange.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub token: AccessToken,
    /// Scopes the provider reports as granted, echoed verbatim.
    pub scopes: Vec<String>,
}
