use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::chat::transcript::ChatMessage;
use crate::chat::ChatReply;
use crate::errors::AppError;
use crate::session::extractor::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    /// Set when the query came from speech-to-text.
    #[serde(default)]
    pub via_voice: bool,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state
        .chat
        .ask(auth.uid(), &request.query, request.via_voice)
        .await?;
    Ok(Json(reply))
}

/// GET /api/v1/chat/transcript
pub async fn handle_get_transcript(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Json<Vec<ChatMessage>> {
    Json(state.chat.transcripts().get(auth.uid()).await)
}

/// DELETE /api/v1/chat/transcript
pub async fn handle_clear_transcript(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> StatusCode {
    state.chat.transcripts().clear(auth.uid()).await;
    StatusCode::NO_CONTENT
}
