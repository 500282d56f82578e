use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use saver_core::goals::{Goal, GoalUpdate, NewGoal};
use saver_core::milestones::Milestone;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalBalance {
    goal_id: i32,
    balance: Decimal,
}

async fn get_all_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals()?;
    Ok(Json(goals))
}

async fn get_goals_for_user(
    Path(user_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals_for_user(user_id)?;
    Ok(Json(goals))
}

async fn create_goal(
    Path(user_id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.create_goal(Some(user_id), goal).await?;
    Ok(Json(g))
}

async fn get_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal_for_user(user_id, goal_id)?;
    Ok(Json(goal))
}

async fn update_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let g = state
        .goal_service
        .update_goal(user_id, goal_id, update)
        .await?;
    Ok(Json(g))
}

async fn delete_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_goal(user_id, goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_goal_balance(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GoalBalance>> {
    state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let balance = state.transaction_service.get_goal_balance(goal_id)?;
    Ok(Json(GoalBalance { goal_id, balance }))
}

/// Re-runs milestone settlement for a goal whose last settlement failed.
async fn settle_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Milestone>>> {
    state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let settled = state.transaction_service.settle_goal(goal_id).await?;
    Ok(Json(settled))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_all_goals))
        .route(
            "/users/{user_id}/goals",
            get(get_goals_for_user).post(create_goal),
        )
        .route(
            "/users/{user_id}/goals/{goal_id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route(
            "/users/{user_id}/goals/{goal_id}/balance",
            get(get_goal_balance),
        )
        .route(
            "/users/{user_id}/goals/{goal_id}/settlement",
            post(settle_goal),
        )
}
