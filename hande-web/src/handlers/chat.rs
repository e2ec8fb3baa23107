//! Chatbot endpoint

use super::{
    types::{ChatRequest, ChatResponse},
    usage::report,
};
use crate::{chatbot::compose_reply, error::ApiJson, session::SessionToken, ApiError, AppState};
use axum::{extract::State, response::Json};
use hande_core::Metric;
use tracing::debug;

/// Answer a chat message and bill it as one `chat_message`
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    summary = "Send a chat message",
    description = "Reply to a message and report one chat_message unit to Hand-E",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Message answered and reported", body = ChatResponse),
        (status = 400, description = "Malformed JSON body", body = crate::error::ErrorBody),
        (status = 500, description = "Hand-E could not be reached", body = crate::error::ErrorBody),
        (status = 502, description = "Hand-E rejected the usage report", body = crate::error::ErrorBody)
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    debug!(length = request.message.len(), "Chat message received");

    let reply = compose_reply(&request.message);
    report(&state, Metric::ChatMessage, token.as_deref()).await?;

    Ok(Json(ChatResponse {
        reply,
        reported: true,
    }))
}
