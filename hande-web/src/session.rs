//! Cookie-backed sessions
//!
//! The session token is issued by Hand-E and echoed back through an HTTP-only
//! cookie. It is never decoded or validated locally: a request is
//! authenticated only if Hand-E resolves the token to a user, otherwise the
//! anonymous view is served whatever the cookie contains.

use crate::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hande_core::CurrentUser;
use hande_sdk::HandEApi;
use std::convert::Infallible;

/// Name of the cookie holding the Hand-E session token
pub const SESSION_COOKIE_NAME: &str = "hande_user_token";

/// Session cookie lifetime in seconds (7 days)
pub const SESSION_COOKIE_MAX_AGE: i64 = 7 * 24 * 60 * 60;

/// Session state for one request
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Anonymous,
    Authenticated { token: String, user: CurrentUser },
}

impl Session {
    /// Ask Hand-E who owns `token`; anything but a user means anonymous
    pub async fn resolve(api: &dyn HandEApi, token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Session::Anonymous;
        };

        match api.get_current_user(Some(token)).await {
            Some(user) => Session::Authenticated {
                token: token.to_string(),
                user,
            },
            None => Session::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// Read the session token from the cookie jar; empty values count as absent
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Cookie storing a freshly issued token
///
/// `None` when the token cannot be carried verbatim in a cookie value.
pub fn session_cookie(token: String) -> Option<Cookie<'static>> {
    if !is_cookie_value(&token) {
        return None;
    }

    Some(
        Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(SESSION_COOKIE_MAX_AGE))
            .build(),
    )
}

/// RFC 6265 `cookie-octet`s only: no whitespace, controls, `"`, `,`, `;` or `\`
fn is_cookie_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}

/// Cookie instructing the browser to drop the session
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

/// Extractor yielding the session token, if the request carries one
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(SessionToken(session_token(&jar)))
    }
}

/// Extractor rejecting requests without a session cookie (401)
#[derive(Debug, Clone)]
pub struct RequireSession(pub String);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state)
            .await
            .unwrap_or_default();
        token
            .map(RequireSession)
            .ok_or_else(|| ApiError::unauthorized("login required"))
    }
}
