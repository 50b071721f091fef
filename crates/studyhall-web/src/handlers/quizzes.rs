use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use studyhall_core::{Quiz, quizzes};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub count: Option<usize>,
}

#[derive(Deserialize)]
pub struct CompleteRequest {
    pub answers: Vec<usize>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<Quiz>), ApiError> {
    let quiz = quizzes::generate_quiz(&ctx, &state.store, &state.normalizer, &req.topic, req.count)
        .await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Quiz>>, ApiError> {
    Ok(Json(quizzes::list_quizzes(&ctx, &state.store)?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<Json<Quiz>, ApiError> {
    Ok(Json(quizzes::get_quiz(&ctx, &state.store, &id)?))
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
    Json(req): Json<CompleteRequest>,
) -> Result<Json<Quiz>, ApiError> {
    Ok(Json(quizzes::complete_quiz(
        &ctx,
        &state.store,
        &id,
        &req.answers,
    )?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    quizzes::delete_quiz(&ctx, &state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
