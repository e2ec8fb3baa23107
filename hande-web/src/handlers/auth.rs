//! Login and logout
//!
//! Credentials go straight to Hand-E; the returned token is stored in the
//! session cookie as-is, or refused as `no_token` when it is not a valid
//! cookie value. Failures redirect back to the dashboard with an `error`
//! query code instead of an error page.

use super::types::LoginForm;
use crate::{
    session::{removal_cookie, session_cookie},
    AppState,
};
use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use hande_sdk::LoginError;
use tracing::{debug, info, warn};

/// Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> impl IntoResponse {
    // A missing or unreadable form is an empty one
    let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
        debug!("Login form not readable, using empty fields: {}", rejection);
        LoginForm::default()
    });

    let result = state
        .api
        .login(form.email.trim(), &form.password)
        .await
        .and_then(|token| session_cookie(token).ok_or(LoginError::NoToken));

    match result {
        Ok(cookie) => {
            info!("User logged in");
            (jar.add(cookie), Redirect::to("/"))
        }
        Err(err) => {
            warn!(code = err.code(), "Login failed: {}", err);
            (jar, Redirect::to(&format!("/?error={}", err.code())))
        }
    }
}

/// Drop the session cookie
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    info!("User logged out");
    (jar.add(removal_cookie()), Redirect::to("/"))
}
