//! qiita-connect — OAuth2 authorization-code flow for the Qiita API.
//!
//! Drives the three-step exchange against the provider: build an
//! authorization URL carrying an anti-forgery state token, exchange the
//! redirect's one-time code for an access token, and call the API on the
//! user's behalf. All flow state lives in an explicit
//! [`session::Session`] state machine owned by the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use qiita_connect::prelude::*;
//!
//! # async fn example() -> qiita_connect::error::Result<()> {
//! let config = AppConfig::from_env()?;
//! let auth = AuthClient::new(&config)?;
//! let api = ApiClient::new(&config)?;
//!
//! let mut session = Session::new();
//! let request = session.request_authorization(
//!     &auth,
//!     &config.credentials.client_id,
//!     &[Scope::ReadQiita],
//! )?;
//! println!("open {}", request.url);
//!
//! // ...after the user authorizes, the redirect arrives:
//! session.receive_redirect(CallbackParams {
//!     code: "one-time-code".to_string(),
//!     state: request.state.as_str().to_string(),
//! })?;
//! session.exchange(&auth).await?;
//! let identity = session.fetch_identity(&api).await?;
//! println!("authenticated as {}", identity.id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
pub mod session;
pub mod util;
