use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::ApiError;
use crate::llm::answer::{answer_question, validate_chat_request, CHAT_FIELDS_REQUIRED};
use crate::models::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// POST /api/chat — answer a question from the indexed pages of a document.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|r| ApiError::from_json_rejection(r, CHAT_FIELDS_REQUIRED))?;
    let (doc_id, question) =
        validate_chat_request(req).map_err(|e| ApiError::from_rag("chat_failed", e))?;

    let response = answer_question(
        state.embedder.as_ref(),
        state.chat.as_ref(),
        state.store.as_ref(),
        &doc_id,
        &question,
    )
    .await
    .map_err(|e| ApiError::from_rag("chat_failed", e))?;

    Ok(Json(response))
}
