use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use wallet_core::fixed_expenses::{FixedExpense, FixedExpenseUpdate, NewFixedExpense};

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetResponse {
    reset_count: usize,
}

async fn list_fixed_expenses(
    State(state): State<Arc<AppState>>,
    user: UserId,
) -> ApiResult<Json<Vec<FixedExpense>>> {
    let expenses = state
        .fixed_expense_service
        .get_fixed_expenses(user.as_str())?;
    Ok(Json(expenses))
}

async fn create_fixed_expense(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Json(new_expense): Json<NewFixedExpense>,
) -> ApiResult<(StatusCode, Json<FixedExpense>)> {
    let expense = state
        .fixed_expense_service
        .create_fixed_expense(user.as_str(), new_expense)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_fixed_expense(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
    Json(mut update): Json<FixedExpenseUpdate>,
) -> ApiResult<Json<FixedExpense>> {
    update.id = id;
    let expense = state
        .fixed_expense_service
        .update_fixed_expense(user.as_str(), update)
        .await?;
    Ok(Json(expense))
}

async fn delete_fixed_expense(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .fixed_expense_service
        .delete_fixed_expense(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_as_paid(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<FixedExpense>> {
    let expense = state
        .fixed_expense_service
        .mark_as_paid(user.as_str(), &id)
        .await?;
    Ok(Json(expense))
}

async fn mark_as_unpaid(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<FixedExpense>> {
    let expense = state
        .fixed_expense_service
        .mark_as_unpaid(user.as_str(), &id)
        .await?;
    Ok(Json(expense))
}

async fn reset_statuses(
    State(state): State<Arc<AppState>>,
    user: UserId,
) -> ApiResult<Json<ResetResponse>> {
    let reset_count = state
        .fixed_expense_service
        .reset_statuses(user.as_str())
        .await?;
    tracing::info!("Reset {} fixed expense statuses", reset_count);
    Ok(Json(ResetResponse { reset_count }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/fixed-expenses",
            get(list_fixed_expenses).post(create_fixed_expense),
        )
        .route("/fixed-expenses/reset", post(reset_statuses))
        .route(
            "/fixed-expenses/{id}",
            put(update_fixed_expense).delete(delete_fixed_expense),
        )
        .route("/fixed-expenses/{id}/pay", post(mark_as_paid))
        .route("/fixed-expenses/{id}/unpay", post(mark_as_unpaid))
}
