//! Pending authorization request types.

use std::fmt;

use crate::auth::scope::Scope;
use crate::util::random_hex;

const STATE_TOKEN_BYTES: usize = 12;

/// Anti-forgery state token round-tripped through the authorization
/// redirect.
///
/// Generated from cryptographically random bytes; the session compares the
/// redirect's `state` query parameter against the pending token to detect
/// forged callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken(String);

impl StateToken {
    pub fn generate() -> Self {
        Self(random_hex(STATE_TOKEN_BYTES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pending authorization request awaiting the provider redirect.
///
/// Holds the state token to verify against and the rendered URL the user
/// must visit. Discarded once the redirect arrives.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub client_id: String,
    pub scopes: Vec<Scope>,
    pub state: StateToken,
    pub url: String,
}
