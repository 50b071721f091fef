//! Planner: a study goal broken into checkable tasks.

use studyhall_ai::Normalizer;
use studyhall_store::{Store, StudyPlan, StudyTask};
use tracing::info;

use crate::{Error, UserContext, require_nonempty};

pub const DEFAULT_PLAN_DAYS: u32 = 7;
pub const MAX_PLAN_DAYS: u32 = 90;

/// A plan together with its ordered tasks, as returned to callers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlanWithTasks {
    pub plan: StudyPlan,
    pub tasks: Vec<StudyTask>,
}

pub async fn generate_plan(
    ctx: &UserContext,
    store: &Store,
    normalizer: &Normalizer,
    goal: &str,
    days: Option<u32>,
) -> Result<PlanWithTasks, Error> {
    let goal = require_nonempty(goal, "study goal")?;
    let days = days.unwrap_or(DEFAULT_PLAN_DAYS).clamp(1, MAX_PLAN_DAYS);

    let planned = normalizer.generate_plan(&goal, days).await?;
    info!(user = %ctx.user_id, tasks = planned.len(), "study plan generated");

    let pairs: Vec<(String, String)> = planned
        .into_iter()
        .map(|t| (t.title, t.detail))
        .collect();
    let plan = store.create_plan(&ctx.user_id, &goal, &pairs)?;
    let tasks = store.plan_tasks(&ctx.user_id, &plan.id)?;
    Ok(PlanWithTasks { plan, tasks })
}

pub fn list_plans(ctx: &UserContext, store: &Store) -> Result<Vec<StudyPlan>, Error> {
    Ok(store.list_plans(&ctx.user_id)?)
}

pub fn plan_tasks(ctx: &UserContext, store: &Store, plan_id: &str) -> Result<Vec<StudyTask>, Error> {
    Ok(store.plan_tasks(&ctx.user_id, plan_id)?)
}

pub fn set_task_completed(
    ctx: &UserContext,
    store: &Store,
    task_id: &str,
    completed: bool,
) -> Result<StudyTask, Error> {
    Ok(store.set_task_completed(&ctx.user_id, task_id, completed)?)
}

pub fn delete_plan(ctx: &UserContext, store: &Store, plan_id: &str) -> Result<(), Error> {
    Ok(store.delete_plan(&ctx.user_id, plan_id)?)
}
