//! The authorization half of the flow: scope selection, authorization-URL
//! construction with an anti-forgery state token, and the one-shot
//! code-for-token exchange.

pub mod client;
pub mod request;
pub mod scope;
pub mod token;

pub use client::AuthClient;
pub use request::{AuthRequest, StateToken};
pub use scope::Scope;
pub use token::{AccessToken, AuthorizationCode, TokenGrant};
