use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use studyhall_core::{PastPaper, papers};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::parse_document_form;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PastPaper>), ApiError> {
    let form = parse_document_form(multipart).await?;
    let paper = papers::analyze_paper(
        &ctx,
        &state.store,
        &state.normalizer,
        &form.title,
        form.source,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(paper)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<PastPaper>>, ApiError> {
    Ok(Json(papers::list_papers(&ctx, &state.store)?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<Json<PastPaper>, ApiError> {
    Ok(Json(papers::get_paper(&ctx, &state.store, &id)?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    papers::delete_paper(&ctx, &state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
