use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::ApiError;
use crate::models::{IndexRequest, IndexResponse};
use crate::search::indexer::{index_pages, validate_index_request, INDEX_FIELDS_REQUIRED};
use crate::state::AppState;

/// POST /api/index — embed the pages of a document and store them in memory.
pub async fn index(
    State(state): State<AppState>,
    payload: Result<Json<IndexRequest>, JsonRejection>,
) -> Result<Json<IndexResponse>, ApiError> {
    let Json(req) =
        payload.map_err(|r| ApiError::from_json_rejection(r, INDEX_FIELDS_REQUIRED))?;
    let (doc_id, pages) =
        validate_index_request(req).map_err(|e| ApiError::from_rag("embedding_failed", e))?;

    let count = index_pages(state.embedder.as_ref(), state.store.as_ref(), &doc_id, pages)
        .await
        .map_err(|e| ApiError::from_rag("embedding_failed", e))?;

    Ok(Json(IndexResponse {
        ok: true,
        pages: count,
    }))
}
