use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use studyhall_core::{ChatSession, chat};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SendRequest {
    pub session_id: Option<String>,
    pub message: String,
}

pub async fn send(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Json(req): Json<SendRequest>,
) -> Result<Json<ChatSession>, ApiError> {
    let session = chat::send_message(
        &ctx,
        &state.store,
        &state.normalizer,
        req.session_id.as_deref(),
        &req.message,
    )
    .await?;
    Ok(Json(session))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<ChatSession>>, ApiError> {
    Ok(Json(chat::list_sessions(&ctx, &state.store)?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<Json<ChatSession>, ApiError> {
    Ok(Json(chat::get_session(&ctx, &state.store, &id)?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    chat::delete_session(&ctx, &state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
