use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use saver_core::transactions::{NewTransaction, Transaction};
use serde::Deserialize;

#[derive(Deserialize)]
struct AmountQuery {
    amount: Option<f64>,
}

impl AmountQuery {
    fn required(self) -> ApiResult<f64> {
        self.amount
            .ok_or_else(|| ApiError::BadRequest("query parameter 'amount' is required".into()))
    }
}

async fn get_transactions_for_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    state.goal_service.get_goal_for_user(user_id, goal_id)?;
    let transactions = state.transaction_service.get_transactions_for_goal(goal_id)?;
    Ok(Json(transactions))
}

async fn create_transaction_for_goal(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
    Json(transaction): Json<Option<NewTransaction>>,
) -> ApiResult<Json<Transaction>> {
    let t = state
        .transaction_service
        .create_transaction(user_id, transaction, Some(goal_id))
        .await?;
    Ok(Json(t))
}

async fn get_transactions_for_user(
    Path(user_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .get_all_transactions_for_user(user_id)?;
    Ok(Json(transactions))
}

/// Posts a transaction with no target goal, taking money out of the body's source goal.
async fn create_transaction_for_user(
    Path(user_id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(transaction): Json<Option<NewTransaction>>,
) -> ApiResult<Json<Transaction>> {
    let t = state
        .transaction_service
        .create_transaction(user_id, transaction, None)
        .await?;
    Ok(Json(t))
}

async fn withdraw(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    Query(query): Query<AmountQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let amount = query.required()?;
    let t = state
        .transaction_service
        .withdraw(user_id, amount, goal_id)
        .await?;
    Ok(Json(t))
}

async fn deposit(
    Path((user_id, goal_id)): Path<(i32, i32)>,
    Query(query): Query<AmountQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let amount = query.required()?;
    let t = state
        .transaction_service
        .deposit(user_id, amount, goal_id)
        .await?;
    Ok(Json(t))
}

async fn reverse_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let t = state
        .transaction_service
        .reverse_transaction(transaction_id)
        .await?;
    Ok(Json(t))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/{user_id}/goals/{goal_id}/transactions",
            get(get_transactions_for_goal).post(create_transaction_for_goal),
        )
        .route(
            "/users/{user_id}/transactions",
            get(get_transactions_for_user).post(create_transaction_for_user),
        )
        .route(
            "/users/{user_id}/goals/{goal_id}/withdrawals",
            put(withdraw),
        )
        .route("/users/{user_id}/goals/{goal_id}/deposits", put(deposit))
        .route(
            "/transactions/{transaction_id}/reversal",
            post(reverse_transaction),
        )
}
