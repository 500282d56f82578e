use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use saver_core::milestones::{Milestone, MilestoneError, MilestoneUpdate, NewMilestone};
use saver_core::Result;

/// Checks the goal belongs to the user and the milestone belongs to the goal.
fn require_milestone_on_goal(
    state: &AppState,
    user_id: i32,
    goal_id: i32,
    milestone_id: i32,
) -> Result<()> {
    state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let on_goal = state
        .milestone_service
        .get_milestones_for_goal(goal_id)?
        .iter()
        .any(|m| m.id == milestone_id);
    if on_goal {
        Ok(())
    } else {
        Err(MilestoneError::MilestoneNotFound(milestone_id).into())
    }
}

async fn get_all_milestones(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Milestone>>> {
    let milestones = state.milestone_service.get_all_milestones()?;
    Ok(Json(milestones))
}

async fn get_milestone(
    Path(milestone_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Milestone>> {
    let milestone = state.milestone_service.get_milestone(milestone_id)?;
    Ok(Json(milestone))
}

async fn get_milestones_for_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Milestone>>> {
    state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let milestones = state.milestone_service.get_milestones_for_goal(goal_id)?;
    Ok(Json(milestones))
}

async fn create_milestone(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
    Json(milestone): Json<NewMilestone>,
) -> ApiResult<Json<Milestone>> {
    let goal = state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let m = state
        .milestone_service
        .create_milestone_for_goal(milestone, &goal)
        .await?;
    Ok(Json(m))
}

async fn generate_milestones(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Milestone>>> {
    let goal = state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let milestones = state.milestone_service.generate_milestones(&goal).await?;
    Ok(Json(milestones))
}

async fn update_milestone(
    Path((user_id, goal_id, milestone_id)): Path<(i32, i32, i32)>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<MilestoneUpdate>,
) -> ApiResult<Json<Milestone>> {
    let goal = state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let m = state
        .milestone_service
        .update_milestone(milestone_id, update, &goal)
        .await?;
    Ok(Json(m))
}

async fn delete_milestone(
    Path((user_id, goal_id, milestone_id)): Path<(i32, i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Milestone>> {
    require_milestone_on_goal(&state, user_id, goal_id, milestone_id)?;
    let removed = state.milestone_service.delete_milestone(milestone_id).await?;
    Ok(Json(removed))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/milestones", get(get_all_milestones))
        .route("/milestones/{milestone_id}", get(get_milestone))
        .route(
            "/users/{user_id}/goals/{goal_id}/milestones",
            get(get_milestones_for_goal)
                .post(create_milestone)
                .patch(generate_milestones),
        )
        .route(
            "/users/{user_id}/goals/{goal_id}/milestones/{milestone_id}",
            put(update_milestone).delete(delete_milestone),
        )
}
