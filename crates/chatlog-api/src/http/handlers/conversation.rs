//! Conversation HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/send - Append a message
//! - GET  /api/v1/pull - Read one page (query parameters)
//! - POST /api/v1/pull - Read one page (JSON body)

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use chatlog_types::chat::{PullRequest, PullResponse, SendRequest, SendResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// Parameters for `GET /pull` (query string) and `POST /pull` (JSON body).
///
/// `limit` falls back to `pull.default_limit` from the service config.
#[derive(Debug, Deserialize)]
pub struct PullQuery {
    pub chat: String,
    #[serde(default)]
    pub cursor: i64,
    pub limit: Option<i32>,
    #[serde(default)]
    pub reverse: bool,
}

impl PullQuery {
    fn into_request(self, default_limit: i32) -> PullRequest {
        PullRequest {
            chat: self.chat,
            cursor: self.cursor,
            limit: self.limit.unwrap_or(default_limit),
            reverse: self.reverse,
        }
    }
}

/// POST /api/v1/send - Append a message to a conversation.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7();

    let message = state.conversation_service.send(request).await?;

    tracing::debug!(
        %request_id,
        chat_key = %message.chat_key,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "send handled"
    );
    Ok(Json(SendResponse::success()))
}

/// GET /api/v1/pull - Read one page of a conversation.
pub async fn pull(
    State(state): State<AppState>,
    Query(query): Query<PullQuery>,
) -> Result<Json<PullResponse>, AppError> {
    let request = query.into_request(state.config.pull.default_limit);
    pull_page(&state, request).await
}

/// POST /api/v1/pull - Read one page, with the request as a JSON body.
pub async fn pull_json(
    State(state): State<AppState>,
    Json(body): Json<PullQuery>,
) -> Result<Json<PullResponse>, AppError> {
    let request = body.into_request(state.config.pull.default_limit);
    pull_page(&state, request).await
}

async fn pull_page(state: &AppState, request: PullRequest) -> Result<Json<PullResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7();

    let page = state.conversation_service.pull(request).await?;

    tracing::debug!(
        %request_id,
        returned = page.messages.len(),
        has_more = page.has_more,
        next_cursor = page.next_cursor,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "pull handled"
    );
    Ok(Json(PullResponse::success(page)))
}
