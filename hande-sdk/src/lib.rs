//! Hand-E SDK gateway client
//!
//! Translates local intents into authenticated calls against the Hand-E API.
//! Every call carries the deployment secret (`X-HandE-Secret`) when one is
//! configured, plus the per-user session token (`X-HandE-User-Token`) when the
//! caller has one. Calls are independent, use a short fixed timeout and are
//! never retried.

use async_trait::async_trait;
use hande_core::{CurrentUser, HandEResult, Metric};
use serde_json::Value;
use thiserror::Error;

pub mod client;
mod http;


pub use client::HandEClient;

/// `X-HandE-Secret`
pub const SECRET_HEADER: &str = "x-hande-secret";
/// `X-HandE-User-Token`
pub const USER_TOKEN_HEADER: &str = "x-hande-user-token";

/// SDK endpoints consumed from Hand-E
pub mod endpoints {
    pub const CONTEXT: &str = "/sdk/me";
    pub const CURRENT_USER: &str = "/sdk/me/user";
    pub const LOGIN: &str = "/sdk/auth/login";
    pub const USAGE: &str = "/sdk/usage";
    pub const CONSUMPTION_BY_USER: &str = "/sdk/consumption-by-user";
}

/// Why a login attempt did not yield a session token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Hand-E rejected the credentials (HTTP {status})")]
    Invalid { status: u16 },

    #[error("Hand-E accepted the login but returned no token")]
    NoToken,

    #[error("Hand-E is unreachable: {0}")]
    Unreachable(String),
}

impl LoginError {
    /// Code carried in the `?error=` query parameter after a failed login
    pub fn code(&self) -> &'static str {
        match self {
            LoginError::Invalid { .. } => "invalid",
            LoginError::NoToken => "no_token",
            LoginError::Unreachable(_) => "injoignable",
        }
    }
}

/// Operations the web layer needs from Hand-E
#[async_trait]
pub trait HandEApi: Send + Sync {
    /// True when no deployment secret is configured
    fn is_offline(&self) -> bool;

    /// `GET /sdk/me`: the deployment context, or `{"error": ...}` on failure
    async fn get_context(&self) -> Value;

    /// `GET /sdk/me/user`: the user behind `token`, `None` on any failure
    async fn get_current_user(&self, token: Option<&str>) -> Option<CurrentUser>;

    /// `POST /sdk/auth/login`: exchange credentials for a session token
    async fn login(&self, email: &str, password: &str) -> Result<String, LoginError>;

    /// `POST /sdk/usage`: report one usage event, attributed to `token` if present
    async fn report_usage(&self, metric: Metric, value: f64, token: Option<&str>)
        -> HandEResult<()>;

    /// `GET /sdk/consumption-by-user`: per-user totals, owner only
    async fn get_consumption_by_user(&self, token: &str) -> HandEResult<Value>;
}
