use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use studyhall_core::{Note, NoteUpdate, notes};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::parse_document_form;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let form = parse_document_form(multipart).await?;
    let note = notes::create_note(
        &ctx,
        &state.store,
        &state.normalizer,
        &form.title,
        form.source,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(notes::list_notes(&ctx, &state.store)?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(notes::get_note(&ctx, &state.store, &id)?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
    Json(update): Json<NoteUpdate>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(notes::update_note(&ctx, &state.store, &id, &update)?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    notes::delete_note(&ctx, &state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
