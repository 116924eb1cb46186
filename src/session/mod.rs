//! Explicit per-session state machine for the authorization flow.
//!
//! One [`Session`] owns all flow state for one interactive user session.
//! Every user action maps to exactly one method; each reads the current
//! phase, performs its operation, and writes the next phase. A failed
//! operation leaves the phase unchanged, so the user can retry from the
//! last good state.

use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ApiClient, Page, StockedArticle, UserIdentity};
use crate::auth::{AccessToken, AuthClient, AuthRequest, AuthorizationCode, Scope, TokenGrant};
use crate::error::{FlowError, Result};

/// Query parameters delivered by the provider redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// Where a session currently stands in the authorization flow.
///
/// The only path back to `Unauthenticated` is [`Session::reset`]; the flow
/// defines no logout or revocation transition.
#[derive(Debug)]
pub enum Phase {
    /// Initial state; no token held.
    Unauthenticated,
    /// An authorization URL was issued; waiting for the redirect.
    AuthorizationRequested { request: AuthRequest },
    /// The redirect delivered a one-time code.
    CodeReceived { code: AuthorizationCode },
    /// A valid access token is held.
    Authenticated { token: AccessToken },
    /// The user's identity is cached; identity refetch is re-entrant.
    IdentityFetched {
        token: AccessToken,
        identity: UserIdentity,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Unauthenticated => "unauthenticated",
            Phase::AuthorizationRequested { .. } => "authorization_requested",
            Phase::CodeReceived { .. } => "code_received",
            Phase::Authenticated { .. } => "authenticated",
            Phase::IdentityFetched { .. } => "identity_fetched",
        }
    }
}

/// One interactive session's flow state.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    /// The `code`/`state` query parameters currently visible on the
    /// session's callback URL. Cleared after a successful exchange so the
    /// one-time code cannot be replayed from browser history.
    callback: Option<CallbackParams>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unauthenticated,
            callback: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The access token held by this session, if any.
    pub fn access_token(&self) -> Option<&AccessToken> {
        match &self.phase {
            Phase::Authenticated { token } | Phase::IdentityFetched { token, .. } => Some(token),
            _ => None,
        }
    }

    /// The cached identity, if it has been fetched.
    pub fn identity(&self) -> Option<&UserIdentity> {
        match &self.phase {
            Phase::IdentityFetched { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Callback query parameters still visible on the session URL.
    pub fn callback_params(&self) -> Option<&CallbackParams> {
        self.callback.as_ref()
    }

    /// Start (or restart) the flow: build an authorization URL for the
    /// given scope selection and hold the pending request.
    pub fn request_authorization(
        &mut self,
        auth: &AuthClient,
        client_id: &str,
        scopes: &[Scope],
    ) -> Result<AuthRequest> {
        match &self.phase {
            Phase::Unauthenticated | Phase::AuthorizationRequested { .. } => {}
            other => {
                return Err(FlowError::InvalidState(format!(
                    "authorization requested in phase {}",
                    other.name()
                )))
            }
        }
        let request = auth.build_authorization_url(client_id, scopes)?;
        debug!(scope_count = request.scopes.len(), "authorization requested");
        self.phase = Phase::AuthorizationRequested {
            request: request.clone(),
        };
        Ok(request)
    }

    /// Accept the provider redirect carrying `code` and `state`.
    ///
    /// The returned state must match the pending request's token; a
    /// mismatch fails with [`FlowError::StateMismatch`] and the session
    /// keeps waiting for a genuine redirect.
    pub fn receive_redirect(&mut self, params: CallbackParams) -> Result<()> {
        let request = match &self.phase {
            Phase::AuthorizationRequested { request } => request,
            other => {
                return Err(FlowError::InvalidState(format!(
                    "redirect received in phase {}",
                    other.name()
                )))
            }
        };
        if params.state != request.state.as_str() {
            return Err(FlowError::StateMismatch {
                expected: request.state.to_string(),
                received: params.state,
            });
        }
        debug!("authorization code received");
        let code = AuthorizationCode::new(params.code.clone());
        self.callback = Some(params);
        self.phase = Phase::CodeReceived { code };
        Ok(())
    }

    /// Exchange the received code for an access token.
    ///
    /// On success the callback query parameters are cleared from the
    /// session's visible URL state. On failure the session stays in
    /// `CodeReceived`; per provider contract the code may already be
    /// invalid, so recovery restarts from
    /// [`request_authorization`](Self::request_authorization).
    pub async fn exchange(&mut self, auth: &AuthClient) -> Result<TokenGrant> {
        let code = match &self.phase {
            Phase::CodeReceived { code } => code.clone(),
            other => {
                return Err(FlowError::InvalidState(format!(
                    "exchange dispatched in phase {}",
                    other.name()
                )))
            }
        };
        let grant = auth.exchange_code(code).await?;
        self.callback = None;
        self.phase = Phase::Authenticated {
            token: grant.token.clone(),
        };
        debug!("session authenticated");
        Ok(grant)
    }

    /// Fetch the authenticated user's profile, caching it in the session.
    ///
    /// Re-entrant: callable again from `IdentityFetched` with the same
    /// token. A rejected token leaves both the phase and the held token
    /// untouched.
    pub async fn fetch_identity(&mut self, api: &ApiClient) -> Result<UserIdentity> {
        let token = match &self.phase {
            Phase::Authenticated { token } | Phase::IdentityFetched { token, .. } => token.clone(),
            other => {
                return Err(FlowError::InvalidState(format!(
                    "identity fetch dispatched in phase {}",
                    other.name()
                )))
            }
        };
        let identity = api.fetch_authenticated_user(&token).await?;
        debug!(user_id = %identity.id, "identity fetched");
        self.phase = Phase::IdentityFetched {
            token,
            identity: identity.clone(),
        };
        Ok(identity)
    }

    /// List articles the authenticated user has stocked.
    ///
    /// Needs the fetched identity for the user id; no state transition.
    pub async fn fetch_stocks(&self, api: &ApiClient, page: Page) -> Result<Vec<StockedArticle>> {
        match &self.phase {
            Phase::IdentityFetched { token, identity } => {
                api.fetch_user_stocks(token, &identity.id, page).await
            }
            other => Err(FlowError::InvalidState(format!(
                "stocks requested in phase {}",
                other.name()
            ))),
        }
    }

    /// Discard all session state. The only way back to `Unauthenticated`.
    pub fn reset(&mut self) {
        debug!("session reset");
        *self = Self::new();
    }

    /// Redacted view of the session for display.
    ///
    /// Never contains the access-token secret or the client secret.
    pub fn snapshot(&self) -> Value {
        let mut snapshot = match &self.phase {
            Phase::Unauthenticated => json!({ "phase": "unauthenticated" }),
            Phase::AuthorizationRequested { request } => json!({
                "phase": "authorization_requested",
                "client_id": request.client_id,
                "scopes": request.scopes,
                "state": request.state.as_str(),
                "url": request.url,
            }),
            Phase::CodeReceived { code } => json!({
                "phase": "code_received",
                "code": code.as_str(),
            }),
            Phase::Authenticated { token } => json!({
                "phase": "authenticated",
                "token_issued_at": token.issued_at().to_rfc3339(),
            }),
            Phase::IdentityFetched { token, identity } => json!({
                "phase": "identity_fetched",
                "token_issued_at": token.issued_at().to_rfc3339(),
                "user_id": identity.id,
            }),
        };
        if let Some(params) = &self.callback {
            snapshot["callback"] = json!({ "code": params.code, "state": params.state });
        }
        snapshot
    }
}
