//! Axum HTTP surface: health, upload, index and chat.

use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::error::RagError;
use crate::state::AppState;

pub mod chat;
pub mod index;
pub mod upload;

/// Uploaded PDFs may be far larger than JSON bodies.
const UPLOAD_BODY_LIMIT: usize = 100 * 1024 * 1024;

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    let json_limit = state.config.json_body_limit;

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/index", post(index::index))
        .route("/api/chat", post(chat::chat))
        .layer(DefaultBodyLimit::max(json_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// JSON error response: `{error}` for bad requests, `{error, detail}` for
/// failures behind the request.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                detail: None,
            },
        }
    }

    /// Map a pipeline error; `code` names the failed operation in 500 bodies.
    pub fn from_rag(code: &'static str, err: RagError) -> Self {
        if err.is_validation() {
            return Self::bad_request(err.to_string());
        }
        tracing::error!("{code}: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: code.to_string(),
                detail: Some(err.to_string()),
            },
        }
    }

    /// Map a JSON body that could not be read. Oversized bodies keep their
    /// 413; anything else is a bad request carrying `message`.
    pub fn from_json_rejection(rejection: JsonRejection, message: &str) -> Self {
        let status = rejection.status();
        tracing::debug!(%status, "Rejected JSON body: {}", rejection.body_text());
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Self {
                status,
                body: ErrorBody {
                    error: "Request body too large".to_string(),
                    detail: None,
                },
            };
        }
        Self::bad_request(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
