use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use hande_core::HandEError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

/// JSON body returned for every failed API call
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "owner only")]
    pub error: String,
    /// Body returned by Hand-E, when the failure came from upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error returned by the JSON handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Upstream failures become user-facing errors; nothing is retried
impl From<HandEError> for ApiError {
    fn from(err: HandEError) -> Self {
        match err {
            HandEError::Forbidden { body, .. } => {
                ApiError::new(StatusCode::FORBIDDEN, "owner only").with_detail(body)
            }
            HandEError::Upstream { status, body, .. } => ApiError::new(
                StatusCode::BAD_GATEWAY,
                format!("Hand-E returned HTTP {}", status),
            )
            .with_detail(body),
            HandEError::Network { message, .. } => {
                ApiError::new(StatusCode::BAD_GATEWAY, "Hand-E is unreachable").with_detail(message)
            }
            other => {
                error!("Unexpected error: {}", other);
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        error!("Template rendering failed: {}", err);
        ApiError::internal("failed to render page")
    }
}

/// JSON extractor that answers malformed bodies with an [`ErrorBody`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        warn!("JSON deserialization error: {}", message);
        ApiError::new(rejection.status(), message)
    }
}
