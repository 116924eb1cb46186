//! Convenience re-exports for common use.

pub use crate::api::{ApiClient, Page, StockedArticle, UserIdentity};
pub use crate::auth::{
    AccessToken, AuthClient, AuthRequest, AuthorizationCode, Scope, StateToken, TokenGrant,
};
pub use crate::config::{AppConfig, ClientCredentials, Endpoints};
pub use crate::error::{FlowError, Result};
pub use crate::session::{CallbackParams, Phase, Session};
