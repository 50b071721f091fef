use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use studyhall_core::{Profile, profile};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub display_name: String,
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(profile::get_or_init_profile(&ctx, &state.store)?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(profile::set_display_name(
        &ctx,
        &state.store,
        &req.display_name,
    )?))
}
