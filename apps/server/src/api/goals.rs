use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use wallet_core::goals::{Goal, GoalUpdate, NewGoal};

use super::PeriodQuery;
use crate::{auth::UserId, error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionRequest {
    amount: Decimal,
}

async fn get_goals(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<Goal>>> {
    let period = query.resolve()?;
    let goals = state
        .goal_service
        .get_goals(user.as_str(), period.month(), period.year())?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goal_service.create_goal(user.as_str(), goal).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
    Json(mut goal): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    goal.id = id;
    let goal = state.goal_service.update_goal(user.as_str(), goal).await?;
    Ok(Json(goal))
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(user.as_str(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_to_goal(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
    Json(body): Json<ContributionRequest>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .add_to_goal(user.as_str(), &id, body.amount)
        .await?;
    Ok(Json(goal))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", put(update_goal).delete(delete_goal))
        .route("/goals/{id}/contributions", post(add_to_goal))
}
