use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use wallet_core::{
    variable_expenses::{summarize_by_category, CategoryTotal, NewVariableExpense, VariableExpense},
    ExpenseCategory,
};

use super::PeriodQuery;
use crate::{auth::UserId, error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
struct VariableExpenseQuery {
    month: Option<u32>,
    year: Option<i32>,
    category: Option<String>,
}

async fn list_variable_expenses(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<VariableExpenseQuery>,
) -> ApiResult<Json<Vec<VariableExpense>>> {
    let period = PeriodQuery {
        month: query.month,
        year: query.year,
    }
    .resolve()?;
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::parse::<ExpenseCategory>)
        .transpose()?;
    let expenses = state.variable_expense_service.get_variable_expenses(
        user.as_str(),
        period.month(),
        period.year(),
        category,
    )?;
    Ok(Json(expenses))
}

async fn category_totals(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<CategoryTotal>>> {
    let period = query.resolve()?;
    let expenses = state.variable_expense_service.get_variable_expenses(
        user.as_str(),
        period.month(),
        period.year(),
        None,
    )?;
    Ok(Json(summarize_by_category(&expenses)))
}

async fn create_variable_expense(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Json(new_expense): Json<NewVariableExpense>,
) -> ApiResult<(StatusCode, Json<VariableExpense>)> {
    let expense = state
        .variable_expense_service
        .create_variable_expense(user.as_str(), new_expense)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn delete_variable_expense(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .variable_expense_service
        .delete_variable_expense(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/variable-expenses",
            get(list_variable_expenses).post(create_variable_expense),
        )
        .route("/variable-expenses/categories", get(category_totals))
        .route("/variable-expenses/{id}", delete(delete_variable_expense))
}
