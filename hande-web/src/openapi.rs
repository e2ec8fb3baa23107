//! OpenAPI description of the JSON endpoints

use axum::response::{IntoResponse, Json};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::error::ErrorBody;
use crate::handlers::{ChatRequest, ChatResponse, ContextResponse, HealthResponse, TaskResponse};
use crate::session::SESSION_COOKIE_NAME;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hand-E Demo API",
        description = "Demo application metering its usage through Hand-E"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::get_context,
        crate::handlers::execute_task,
        crate::handlers::chat,
        crate::handlers::consumption,
    ),
    components(
        schemas(
            HealthResponse,
            ContextResponse,
            TaskResponse,
            ChatRequest,
            ChatResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Context", description = "Deployment context from Hand-E"),
        (name = "Usage", description = "Metered operations"),
        (name = "Chat", description = "Demo chatbot"),
        (name = "Admin", description = "Owner-only views"),
    ),
    modifiers(&SessionCookieAddon)
)]
pub struct ApiDoc;

/// Documents the session cookie used by the owner-only endpoints
pub struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}

/// Serve the OpenAPI document
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let openapi = ApiDoc::openapi();
        assert_eq!(openapi.info.title, "Hand-E Demo API");
        assert!(openapi.paths.paths.contains_key("/execute-task"));
        assert!(openapi.paths.paths.contains_key("/admin/consumption"));
    }

    #[test]
    fn test_openapi_json() {
        let json = ApiDoc::openapi().to_pretty_json().unwrap();
        assert!(json.contains("Hand-E Demo API"));
        assert!(json.contains("session_cookie"));
    }
}
