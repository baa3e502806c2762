use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use wallet_ai::ChatReply;
use wallet_core::chat::{ChatMessage, ChatThread, MAX_LISTED_MESSAGES};

use crate::{
    auth::UserId,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagesQuery {
    thread_id: Option<String>,
    limit: Option<usize>,
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Json(body): Json<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    if !state.chat_service.is_enabled() {
        return Err(ApiError::ChatDisabled);
    }
    let reply = state
        .chat_service
        .send_message(user.as_str(), &body.message)
        .await?;
    Ok(Json(reply))
}

/// `null` until the user has a thread.
async fn get_thread(
    State(state): State<Arc<AppState>>,
    user: UserId,
) -> ApiResult<Json<Option<ChatThread>>> {
    Ok(Json(state.chat_service.get_thread(user.as_str())?))
}

async fn create_thread(
    State(state): State<Arc<AppState>>,
    user: UserId,
) -> ApiResult<Json<ChatThread>> {
    Ok(Json(
        state.chat_service.get_or_create_thread(user.as_str()).await?,
    ))
}

/// Messages of `threadId`, or of the user's own thread when omitted.
async fn list_messages(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<MessagesQuery>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    let thread_id = match query.thread_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => match state.chat_service.get_thread(user.as_str())? {
            Some(thread) => thread.id,
            None => return Ok(Json(Vec::new())),
        },
    };
    let limit = query.limit.unwrap_or(MAX_LISTED_MESSAGES);
    Ok(Json(state.chat_service.get_messages(
        user.as_str(),
        &thread_id,
        limit,
    )?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(send_message))
        .route("/chat/thread", get(get_thread).post(create_thread))
        .route("/chat/messages", get(list_messages))
}
