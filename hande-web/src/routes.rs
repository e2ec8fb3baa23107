//! Route definitions for the Hand-E demo server

use crate::{handlers, openapi, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// HTML page and form routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
}

/// JSON API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health and context
        .route("/health", get(handlers::health_check))
        .route("/api/context", get(handlers::get_context))
        // Metered actions
        .route("/execute-task", post(handlers::execute_task))
        .route("/chat", post(handlers::chat))
        // Owner view
        .route("/admin/consumption", get(handlers::consumption))
        // API description
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
}
