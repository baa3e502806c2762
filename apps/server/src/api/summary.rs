use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use wallet_core::summary::{CategoryBreakdown, FinancialSummary, MonthlyComparison};

use super::PeriodQuery;
use crate::{auth::UserId, error::ApiResult, main_lib::AppState};

async fn get_summary(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<FinancialSummary>> {
    let period = query.resolve()?;
    let summary = state.summary_service.compute_summary(
        user.as_str(),
        period.month(),
        period.year(),
        Utc::now().date_naive(),
    )?;
    Ok(Json(summary))
}

async fn get_expenses_by_category(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<CategoryBreakdown>>> {
    let period = query.resolve()?;
    let breakdown = state.summary_service.get_expenses_by_category(
        user.as_str(),
        period.month(),
        period.year(),
    )?;
    Ok(Json(breakdown))
}

async fn get_monthly_comparison(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<MonthlyComparison>> {
    let period = query.resolve()?;
    let comparison = state.summary_service.get_monthly_comparison(
        user.as_str(),
        period.month(),
        period.year(),
    )?;
    Ok(Json(comparison))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/summary/categories", get(get_expenses_by_category))
        .route("/summary/comparison", get(get_monthly_comparison))
}
