//! Health and context handlers

use super::types::{ContextResponse, HealthResponse};
use crate::{templates::APP_NAME, AppState};
use axum::{extract::State, response::Json};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Check the server health status and whether Hand-E reporting is live",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = if state.api.is_offline() {
        "offline"
    } else {
        "online"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: mode.to_string(),
    })
}

/// Deployment context as JSON
#[utoipa::path(
    get,
    path = "/api/context",
    tag = "Context",
    summary = "Hand-E context",
    description = "Application identity and the context Hand-E reports for this deployment",
    responses(
        (status = 200, description = "Context fetched (errors are embedded in the payload)", body = ContextResponse)
    )
)]
pub async fn get_context(State(state): State<AppState>) -> Json<ContextResponse> {
    let context = state.api.get_context().await;

    Json(ContextResponse {
        app: APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        deployment_id: state.deployment_id().map(str::to_string),
        hand_e_context: context,
    })
}
