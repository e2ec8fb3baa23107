//! Shared reqwest plumbing

use hande_core::{ErrorContext, HandEConfig, HandEError, HandEResult};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::warn;

use crate::{SECRET_HEADER, USER_TOKEN_HEADER};

const CLIENT_USER_AGENT: &str = concat!("hande-sdk/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for every Hand-E call
pub(crate) fn create_http_client(config: &HandEConfig) -> HandEResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    reqwest::Client::builder()
        .timeout(config.timeout())
        .default_headers(headers)
        .build()
        .map_err(|e| HandEError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })
}

/// Secret and optional user token headers
pub(crate) fn auth_headers(secret: Option<&str>, token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(secret) = secret {
        match HeaderValue::from_str(secret) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(SECRET_HEADER, value);
            }
            Err(_) => warn!("Deployment secret is not a valid header value, sending without it"),
        }
    }

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        match HeaderValue::from_str(token) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(USER_TOKEN_HEADER, value);
            }
            Err(_) => warn!("Session token is not a valid header value, sending without it"),
        }
    }

    headers
}

/// Map a transport failure (timeout, refused connection...) to a network error
pub(crate) fn transport_error(error: reqwest::Error, operation: &str) -> HandEError {
    let message = if error.is_timeout() {
        format!("request to Hand-E timed out: {}", error)
    } else if error.is_connect() {
        format!("could not connect to Hand-E: {}", error)
    } else {
        format!("request to Hand-E failed: {}", error)
    };

    HandEError::Network {
        message,
        source: Some(Box::new(error)),
        context: ErrorContext::new("hande_sdk").with_operation(operation),
    }
}

/// Turn a non-success response into an upstream error carrying its body
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> HandEError {
    let status = response.status();
    let path = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();

    HandEError::Upstream {
        status: status.as_u16(),
        body: if body.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            body
        },
        context: ErrorContext::new("hande_sdk")
            .with_operation(operation)
            .with_metadata("path", &path),
    }
}
