//! Metered task execution

use super::types::TaskResponse;
use crate::{session::SessionToken, ApiError, AppState};
use axum::{extract::State, response::Json};
use hande_core::{performance::measure_async, HandEError, Metric};
use tracing::info;

/// Report one unit of `metric`, attributed to `token` when present
pub(crate) async fn report(
    state: &AppState,
    metric: Metric,
    token: Option<&str>,
) -> Result<(), ApiError> {
    state
        .api
        .report_usage(metric, metric.unit_value(), token)
        .await
        .map_err(usage_error)
}

/// Transport failures are ours (500); rejections carry the upstream body (502)
fn usage_error(err: HandEError) -> ApiError {
    if err.is_transport() {
        ApiError::internal("failed to report usage").with_detail(err.to_string())
    } else {
        err.into()
    }
}

/// Run a simulated task and bill it
#[utoipa::path(
    post,
    path = "/execute-task",
    tag = "Usage",
    summary = "Execute a metered task",
    description = "Simulate some work, then report one task_execution unit to Hand-E",
    responses(
        (status = 200, description = "Task executed and reported", body = TaskResponse),
        (status = 500, description = "Hand-E could not be reached", body = crate::error::ErrorBody),
        (status = 502, description = "Hand-E rejected the usage report", body = crate::error::ErrorBody)
    )
)]
pub async fn execute_task(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<TaskResponse>, ApiError> {
    let delay = state.config.task_delay();
    let (result, duration) = measure_async("execute_task", async {
        tokio::time::sleep(delay).await;
        report(&state, Metric::TaskExecution, token.as_deref()).await
    })
    .await;
    result?;

    info!(
        attributed = token.is_some(),
        duration_ms = duration.as_millis() as u64,
        "Task executed"
    );

    Ok(Json(TaskResponse {
        message: "Task executed successfully".to_string(),
        reported: true,
        cost: "1 execution unit reported to Hand-E".to_string(),
        duration: format!("{:.2}s", duration.as_secs_f64()),
    }))
}
