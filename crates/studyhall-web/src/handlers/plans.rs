use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use studyhall_core::planner::{self, PlanWithTasks};
use studyhall_core::{StudyPlan, StudyTask};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub goal: String,
    pub days: Option<u32>,
}

#[derive(Deserialize)]
pub struct TaskUpdateRequest {
    pub completed: bool,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<PlanWithTasks>), ApiError> {
    let result =
        planner::generate_plan(&ctx, &state.store, &state.normalizer, &req.goal, req.days).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<StudyPlan>>, ApiError> {
    Ok(Json(planner::list_plans(&ctx, &state.store)?))
}

pub async fn tasks(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<Json<Vec<StudyTask>>, ApiError> {
    Ok(Json(planner::plan_tasks(&ctx, &state.store, &id)?))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
    Json(req): Json<TaskUpdateRequest>,
) -> Result<Json<StudyTask>, ApiError> {
    Ok(Json(planner::set_task_completed(
        &ctx,
        &state.store,
        &id,
        req.completed,
    )?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Identity(ctx): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    planner::delete_plan(&ctx, &state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
