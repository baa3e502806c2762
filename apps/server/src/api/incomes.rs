use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use wallet_core::incomes::{Income, IncomeUpdate, NewIncome};

use super::PeriodQuery;
use crate::{auth::UserId, error::ApiResult, main_lib::AppState};

async fn list_incomes(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<Income>>> {
    let period = query.resolve()?;
    let incomes = state
        .income_service
        .get_incomes(user.as_str(), period.month(), period.year())?;
    Ok(Json(incomes))
}

async fn create_income(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Json(new_income): Json<NewIncome>,
) -> ApiResult<(StatusCode, Json<Income>)> {
    let income = state
        .income_service
        .create_income(user.as_str(), new_income)
        .await?;
    Ok((StatusCode::CREATED, Json(income)))
}

async fn update_income(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
    Json(mut update): Json<IncomeUpdate>,
) -> ApiResult<Json<Income>> {
    update.id = id;
    let income = state
        .income_service
        .update_income(user.as_str(), update)
        .await?;
    Ok(Json(income))
}

async fn delete_income(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .income_service
        .delete_income(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/incomes", get(list_incomes).post(create_income))
        .route("/incomes/{id}", put(update_income).delete(delete_income))
}
