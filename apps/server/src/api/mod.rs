mod chat;
mod fixed_expenses;
mod goals;
mod health;
mod incomes;
mod summary;
mod variable_expenses;

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use wallet_core::utils::MonthPeriod;

use crate::{config::Config, error::ApiResult, main_lib::AppState};

/// `?month=&year=` selector. Missing parts default to the current month.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    pub(crate) fn resolve(&self) -> ApiResult<MonthPeriod> {
        let today = Utc::now().date_naive();
        Ok(MonthPeriod::new(
            self.month.unwrap_or_else(|| today.month()),
            self.year.unwrap_or_else(|| today.year()),
        )?)
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new().allow_origin(origins)
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let api = Router::new()
        .merge(health::router())
        .merge(incomes::router())
        .merge(fixed_expenses::router())
        .merge(variable_expenses::router())
        .merge(goals::router())
        .merge(summary::router())
        .merge(chat::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
