use std::sync::Arc;

use crate::{
    ai_environment::ServerAssistantEnvironment,
    config::{Config, LogFormat},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wallet_ai::{ChatConfig, ChatService};
use wallet_core::{
    chat::{ChatHistoryService, ChatHistoryServiceTrait},
    fixed_expenses::{FixedExpenseService, FixedExpenseServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    incomes::{IncomeService, IncomeServiceTrait},
    summary::{FinancialSummaryService, FinancialSummaryServiceTrait, RepositoryRecordStore},
    variable_expenses::{VariableExpenseService, VariableExpenseServiceTrait},
};
use wallet_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, ChatRepository, FixedExpenseRepository,
    GoalRepository, IncomeRepository, VariableExpenseRepository,
};

pub struct AppState {
    pub income_service: Arc<dyn IncomeServiceTrait>,
    pub fixed_expense_service: Arc<dyn FixedExpenseServiceTrait>,
    pub variable_expense_service: Arc<dyn VariableExpenseServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub summary_service: Arc<dyn FinancialSummaryServiceTrait>,
    pub chat_service: Arc<ChatService<ServerAssistantEnvironment>>,
    pub db_path: String,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(&pool)?;

    let income_repo = Arc::new(IncomeRepository::new(pool.clone(), writer.clone()));
    let fixed_expense_repo = Arc::new(FixedExpenseRepository::new(pool.clone(), writer.clone()));
    let variable_expense_repo =
        Arc::new(VariableExpenseRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let chat_repo = Arc::new(ChatRepository::new(pool.clone(), writer.clone()));

    let income_service: Arc<dyn IncomeServiceTrait> =
        Arc::new(IncomeService::new(income_repo.clone()));
    let fixed_expense_service: Arc<dyn FixedExpenseServiceTrait> =
        Arc::new(FixedExpenseService::new(fixed_expense_repo.clone()));
    let variable_expense_service: Arc<dyn VariableExpenseServiceTrait> =
        Arc::new(VariableExpenseService::new(variable_expense_repo.clone()));
    let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(goal_repo.clone()));
    let chat_history_service: Arc<dyn ChatHistoryServiceTrait> =
        Arc::new(ChatHistoryService::new(chat_repo));

    let record_store = Arc::new(RepositoryRecordStore::new(
        income_repo,
        fixed_expense_repo,
        variable_expense_repo,
        goal_repo,
    ));
    let summary_service: Arc<dyn FinancialSummaryServiceTrait> = Arc::new(
        FinancialSummaryService::new(record_store)
            .with_monthly_goal_fallback(config.default_monthly_goal),
    );

    let assistant_environment = Arc::new(ServerAssistantEnvironment::new(
        income_service.clone(),
        fixed_expense_service.clone(),
        variable_expense_service.clone(),
        goal_service.clone(),
        chat_history_service,
    ));
    let chat_config = ChatConfig {
        api_key: config.openrouter_api_key.clone(),
        model: config.chat_model.clone(),
        ..ChatConfig::default()
    };
    if config.openrouter_api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY not set; sending chat messages is disabled");
    }
    let chat_service = Arc::new(ChatService::new(assistant_environment, chat_config));

    Ok(Arc::new(AppState {
        income_service,
        fixed_expense_service,
        variable_expense_service,
        goal_service,
        summary_service,
        chat_service,
        db_path,
    }))
}
