//! Owner-only consumption view

use crate::{session::RequireSession, ApiError, AppState};
use axum::{extract::State, response::Json};
use serde_json::Value;

/// Proxy per-user consumption totals; Hand-E decides who the owner is
#[utoipa::path(
    get,
    path = "/admin/consumption",
    tag = "Admin",
    summary = "Consumption by user",
    description = "Per-user usage totals for this deployment, visible to the deployment owner only",
    responses(
        (status = 200, description = "Consumption totals as returned by Hand-E"),
        (status = 401, description = "No session cookie", body = crate::error::ErrorBody),
        (status = 403, description = "Signed-in user is not the owner", body = crate::error::ErrorBody),
        (status = 502, description = "Hand-E failed or was unreachable", body = crate::error::ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn consumption(
    State(state): State<AppState>,
    RequireSession(token): RequireSession,
) -> Result<Json<Value>, ApiError> {
    let totals = state.api.get_consumption_by_user(&token).await?;

    Ok(Json(totals))
}
