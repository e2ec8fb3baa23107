//! Request and response types used by the handlers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// `online` when a deployment secret is configured, `offline` otherwise
    #[schema(example = "online")]
    pub mode: String,
}

/// Application identity plus the raw Hand-E context
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContextResponse {
    #[schema(example = "Hand-E Demo Application")]
    pub app: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub deployment_id: Option<String>,
    /// Payload of `/sdk/me`, an offline marker, or `{"error": ...}`
    #[schema(value_type = Object)]
    pub hand_e_context: serde_json::Value,
}

/// Result of a metered task
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    #[schema(example = "Task executed successfully")]
    pub message: String,
    pub reported: bool,
    #[schema(example = "1 execution unit reported to Hand-E")]
    pub cost: String,
    #[schema(example = "0.50s")]
    pub duration: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChatRequest {
    #[schema(example = "Hello")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
    pub reported: bool,
}

/// Login form posted by the dashboard
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query string of `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Login error code set by a failed `POST /login`
    pub error: Option<String>,
}
